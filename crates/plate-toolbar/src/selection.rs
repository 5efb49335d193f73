use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::document::{Document, DocumentError, Node};

/// The user's selection. Exactly one variant is active; a selection is
/// replaced wholesale on every change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Selection {
    /// Zero-width caret.
    Caret { pos: usize },
    /// Span of inline content; `anchor` stays fixed while `head` moves.
    Text { anchor: usize, head: usize },
    /// The single node starting at `pos`.
    Node { pos: usize },
    /// Rectangle of table cells between the cells starting at `anchor` and
    /// `head`.
    Cell { anchor: usize, head: usize },
}

impl Selection {
    pub fn caret(pos: usize) -> Self {
        Selection::Caret { pos }
    }

    pub fn text(anchor: usize, head: usize) -> Self {
        Selection::Text { anchor, head }
    }

    pub fn node(pos: usize) -> Self {
        Selection::Node { pos }
    }

    pub fn cells(anchor: usize, head: usize) -> Self {
        Selection::Cell { anchor, head }
    }

    /// Caret at the very start of the document.
    pub fn at_start() -> Self {
        Selection::Caret { pos: 0 }
    }

    fn clamped(self, size: usize) -> Self {
        match self {
            Selection::Caret { pos } => Selection::Caret {
                pos: pos.min(size),
            },
            Selection::Text { anchor, head } => Selection::Text {
                anchor: anchor.min(size),
                head: head.min(size),
            },
            Selection::Node { pos } => Selection::Node {
                pos: pos.min(size),
            },
            Selection::Cell { anchor, head } => Selection::Cell {
                anchor: anchor.min(size),
                head: head.min(size),
            },
        }
    }
}

/// A document revision paired with the selection over it.
#[derive(Debug, Clone, PartialEq)]
pub struct EditorState {
    doc: Document,
    selection: Selection,
}

impl EditorState {
    pub fn new(doc: Document, selection: Selection) -> Self {
        let selection = selection.clamped(doc.content_size());
        Self { doc, selection }
    }

    pub fn doc(&self) -> &Document {
        &self.doc
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn set_selection(&mut self, selection: Selection) {
        self.selection = selection.clamped(self.doc.content_size());
    }

    /// Applies a link with `href` over `range`, replacing any link already
    /// there.
    pub fn set_link(&mut self, range: Range<usize>, href: &str) -> Result<(), DocumentError> {
        self.doc.set_link(range, Some(href))?;
        self.selection = self.selection.clamped(self.doc.content_size());
        Ok(())
    }

    pub fn remove_link(&mut self, range: Range<usize>) -> Result<(), DocumentError> {
        self.doc.set_link(range, None)?;
        self.selection = self.selection.clamped(self.doc.content_size());
        Ok(())
    }

    /// Covered document range of the selection.
    pub fn range(&self) -> Range<usize> {
        match self.selection {
            Selection::Caret { pos } => pos..pos,
            Selection::Text { anchor, head } => anchor.min(head)..anchor.max(head),
            Selection::Node { pos } => {
                let size = self.doc.node_at(pos).map_or(0, Node::size);
                pos..pos + size
            }
            Selection::Cell { anchor, head } => self
                .cell_rect()
                .and_then(|rect| rect.content_range(&self.doc))
                .unwrap_or(anchor.min(head)..anchor.max(head)),
        }
    }

    pub fn from(&self) -> usize {
        self.range().start
    }

    pub fn to(&self) -> usize {
        self.range().end
    }

    pub fn is_empty(&self) -> bool {
        let range = self.range();
        range.start == range.end
    }

    /// Node designated by a node selection.
    pub fn selected_node(&self) -> Option<&Node> {
        match self.selection {
            Selection::Node { pos } => self.doc.node_at(pos),
            Selection::Caret { .. } | Selection::Text { .. } | Selection::Cell { .. } => None,
        }
    }
}
