use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::queries::{MarkRange, SelectionKind, SelectionQuery};

/// Which action set the toolbar presents. Exactly one applies per
/// evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "context", rename_all = "snake_case")]
pub enum ToolbarContext {
    Code,
    Table,
    TableColumn { index: usize },
    TableRow { index: usize },
    TableCell,
    Image,
    Attachment,
    Divider,
    ReadOnly,
    Notice,
    Formatting,
}

/// Editor view that replaces the action list while keeping the context's
/// visibility rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "editor", rename_all = "snake_case")]
pub enum InlineEditor {
    /// The selection exactly bounds a link mark.
    TextLink(MarkRange),
    /// The selection is an embed node.
    EmbedLink { pos: usize, href: Option<String> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub active: bool,
    pub context: ToolbarContext,
    pub editor: Option<InlineEditor>,
}

/// What the rules look at, computed once per evaluation.
pub struct SelectionFacts<'a> {
    pub query: &'a dyn SelectionQuery,
    pub kind: SelectionKind<'a>,
    pub read_only: bool,
    pub column: Option<usize>,
    pub row: Option<usize>,
}

impl<'a> SelectionFacts<'a> {
    pub fn new(query: &'a dyn SelectionQuery, read_only: bool) -> Self {
        Self {
            query,
            kind: query.kind(),
            read_only,
            column: query.column_index(),
            row: query.row_index(),
        }
    }

    fn is_empty(&self) -> bool {
        matches!(self.kind, SelectionKind::Empty)
    }

    fn node_kind(&self) -> Option<&'a str> {
        match self.kind {
            SelectionKind::Node(node) => Some(node.kind()),
            SelectionKind::Empty | SelectionKind::Text | SelectionKind::Cell => None,
        }
    }

    fn in_code_block(&self) -> bool {
        self.query.is_node_active("code_block") || self.query.is_node_active("code_fence")
    }

    fn in_notice(&self) -> bool {
        self.query.is_node_active("notice")
    }
}

/// A rule answers `None` when it does not apply, passing to the next one.
pub type ActiveRule = fn(&SelectionFacts<'_>) -> Option<bool>;
pub type ContextRule = fn(&SelectionFacts<'_>) -> Option<ToolbarContext>;

/// Node kinds a node selection may activate the toolbar for.
const ACTIVATING_NODES: [&str; 4] = ["divider", "image", "attachment", "embed"];

pub const ACTIVE_RULES: &[(&str, ActiveRule)] = &[
    ("link", link_is_active),
    ("code", code_is_active),
    ("notice", notice_is_active),
    ("empty", empty_is_inactive),
    ("activating_node", activating_node_is_active),
    ("other_node", other_node_is_inactive),
    ("content", content_is_active),
];

pub const CONTEXT_RULES: &[(&str, ContextRule)] = &[
    ("code", code_context),
    ("table", table_context),
    ("table_column", table_column_context),
    ("table_row", table_row_context),
    ("table_cell", table_cell_context),
    ("image", image_context),
    ("attachment", attachment_context),
    ("divider", divider_context),
    ("read_only", read_only_context),
    ("notice", notice_context),
];

fn link_is_active(facts: &SelectionFacts<'_>) -> Option<bool> {
    facts.query.is_link_active().then_some(true)
}

fn code_is_active(facts: &SelectionFacts<'_>) -> Option<bool> {
    (facts.in_code_block() && facts.query.from() > 0).then_some(true)
}

fn notice_is_active(facts: &SelectionFacts<'_>) -> Option<bool> {
    (facts.in_notice() && facts.query.from() > 0).then_some(true)
}

fn empty_is_inactive(facts: &SelectionFacts<'_>) -> Option<bool> {
    facts.is_empty().then_some(false)
}

fn activating_node_is_active(facts: &SelectionFacts<'_>) -> Option<bool> {
    facts
        .node_kind()
        .filter(|kind| ACTIVATING_NODES.contains(kind))
        .map(|_| true)
}

fn other_node_is_inactive(facts: &SelectionFacts<'_>) -> Option<bool> {
    facts.node_kind().map(|_| false)
}

fn content_is_active(facts: &SelectionFacts<'_>) -> Option<bool> {
    match facts.kind {
        SelectionKind::Text => {
            if facts.query.selected_text().is_empty() {
                Some(false)
            } else {
                Some(facts.query.slice_has_content())
            }
        }
        SelectionKind::Cell => Some(facts.query.slice_has_content()),
        SelectionKind::Empty | SelectionKind::Node(_) => Some(false),
    }
}

fn code_context(facts: &SelectionFacts<'_>) -> Option<ToolbarContext> {
    (facts.in_code_block() && facts.is_empty()).then_some(ToolbarContext::Code)
}

fn table_context(facts: &SelectionFacts<'_>) -> Option<ToolbarContext> {
    (facts.column.is_some() && facts.row.is_some()).then_some(ToolbarContext::Table)
}

fn table_column_context(facts: &SelectionFacts<'_>) -> Option<ToolbarContext> {
    facts
        .column
        .map(|index| ToolbarContext::TableColumn { index })
}

fn table_row_context(facts: &SelectionFacts<'_>) -> Option<ToolbarContext> {
    facts.row.map(|index| ToolbarContext::TableRow { index })
}

fn table_cell_context(facts: &SelectionFacts<'_>) -> Option<ToolbarContext> {
    matches!(facts.kind, SelectionKind::Cell).then_some(ToolbarContext::TableCell)
}

fn node_context(
    facts: &SelectionFacts<'_>,
    kind: &str,
    context: ToolbarContext,
) -> Option<ToolbarContext> {
    (facts.node_kind() == Some(kind)).then_some(context)
}

fn image_context(facts: &SelectionFacts<'_>) -> Option<ToolbarContext> {
    node_context(facts, "image", ToolbarContext::Image)
}

fn attachment_context(facts: &SelectionFacts<'_>) -> Option<ToolbarContext> {
    node_context(facts, "attachment", ToolbarContext::Attachment)
}

fn divider_context(facts: &SelectionFacts<'_>) -> Option<ToolbarContext> {
    node_context(facts, "divider", ToolbarContext::Divider)
}

fn read_only_context(facts: &SelectionFacts<'_>) -> Option<ToolbarContext> {
    facts.read_only.then_some(ToolbarContext::ReadOnly)
}

fn notice_context(facts: &SelectionFacts<'_>) -> Option<ToolbarContext> {
    (facts.in_notice() && facts.is_empty()).then_some(ToolbarContext::Notice)
}

/// Runs the activation rules top-down; the first rule that applies decides.
pub fn is_active(facts: &SelectionFacts<'_>) -> bool {
    for (name, rule) in ACTIVE_RULES {
        if let Some(active) = rule(facts) {
            trace!(rule = name, active, "activation rule matched");
            return active;
        }
    }
    false
}

/// Runs the context rules top-down, falling back to formatting.
pub fn resolve_context(facts: &SelectionFacts<'_>) -> ToolbarContext {
    for (name, rule) in CONTEXT_RULES {
        if let Some(context) = rule(facts) {
            trace!(rule = name, ?context, "context rule matched");
            return context;
        }
    }
    ToolbarContext::Formatting
}

/// Editor view that pre-empts the action list, if any.
pub fn inline_editor(facts: &SelectionFacts<'_>) -> Option<InlineEditor> {
    let (from, to) = (facts.query.from(), facts.query.to());
    if let Some(link) = facts.query.link_range(from) {
        if link.from == from && link.to == to {
            return Some(InlineEditor::TextLink(link));
        }
    }
    match facts.kind {
        SelectionKind::Node(node) if node.kind() == "embed" => Some(InlineEditor::EmbedLink {
            pos: from,
            href: node.attr_str("href").map(str::to_string),
        }),
        _ => None,
    }
}

pub fn classify(query: &dyn SelectionQuery, read_only: bool) -> Classification {
    let facts = SelectionFacts::new(query, read_only);
    let classification = Classification {
        active: is_active(&facts),
        context: resolve_context(&facts),
        editor: inline_editor(&facts),
    };
    debug!(
        active = classification.active,
        context = ?classification.context,
        editor = classification.editor.is_some(),
        "classified selection"
    );
    classification
}
