use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::document::{Document, ElementNode, Marks, Node};
use crate::selection::{EditorState, Selection};

/// Which selection variant is active, with the selected node for node
/// selections.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SelectionKind<'a> {
    Empty,
    Text,
    Node(&'a Node),
    Cell,
}

/// Extent and target of a link mark.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkRange {
    pub from: usize,
    pub to: usize,
    pub href: String,
}

impl MarkRange {
    pub fn range(&self) -> Range<usize> {
        self.from..self.to
    }
}

/// Read-only view of a document and its selection, as consumed by the
/// classifier.
///
/// Queries that do not apply to the current selection answer `None` or
/// `false` rather than failing.
pub trait SelectionQuery {
    fn kind(&self) -> SelectionKind<'_>;
    fn from(&self) -> usize;
    fn to(&self) -> usize;
    /// Whether the selection sits inside, or node-selects, a node of `kind`.
    fn is_node_active(&self, kind: &str) -> bool;
    fn is_link_active(&self) -> bool;
    /// Text content of the document cut to the selection.
    fn selected_text(&self) -> String;
    /// Whether any node of the selection's content fragment has content.
    fn slice_has_content(&self) -> bool;
    /// Left column of a cell selection that spans every row.
    fn column_index(&self) -> Option<usize>;
    /// Top row of a cell selection that spans every column.
    fn row_index(&self) -> Option<usize>;
    fn link_range(&self, pos: usize) -> Option<MarkRange>;
}

/// Rectangle of selected cells. `bottom` and `right` are exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRect {
    pub table_pos: usize,
    pub top: usize,
    pub left: usize,
    pub bottom: usize,
    pub right: usize,
    pub rows: usize,
    pub cols: usize,
}

impl CellRect {
    pub fn is_column_selection(&self) -> bool {
        self.top == 0 && self.bottom == self.rows
    }

    pub fn is_row_selection(&self) -> bool {
        self.left == 0 && self.right == self.cols
    }

    /// Start position and node of every selected cell, row by row.
    pub fn cells<'a>(&self, doc: &'a Document) -> Vec<(usize, &'a Node)> {
        let Some(Node::Element(table)) = doc.node_at(self.table_pos) else {
            return Vec::new();
        };
        let mut cells = Vec::new();
        let mut row_pos = self.table_pos + 1;
        for (row_ix, row) in table.children.iter().enumerate() {
            if (self.top..self.bottom).contains(&row_ix) {
                if let Node::Element(row_el) = row {
                    let mut cell_pos = row_pos + 1;
                    for (col_ix, cell) in row_el.children.iter().enumerate() {
                        if (self.left..self.right).contains(&col_ix) {
                            cells.push((cell_pos, cell));
                        }
                        cell_pos += cell.size();
                    }
                }
            }
            row_pos += row.size();
        }
        cells
    }

    /// From the first selected cell's content start to the last one's
    /// content end.
    pub fn content_range(&self, doc: &Document) -> Option<Range<usize>> {
        let cells = self.cells(doc);
        let from = cells.iter().map(|(pos, _)| pos + 1).min()?;
        let to = cells.iter().map(|(pos, cell)| pos + cell.size() - 1).max()?;
        Some(from..to)
    }
}

fn is_cell_kind(kind: &str) -> bool {
    matches!(kind, "table_cell" | "table_header")
}

/// Table position, row and column of the cell starting at `pos`.
fn cell_coords(doc: &Document, pos: usize) -> Option<(usize, usize, usize)> {
    let resolved = doc.resolve(pos);
    let cell = resolved.child_after()?;
    if cell.pos != pos || !is_cell_kind(cell.node.kind()) {
        return None;
    }
    let depth = resolved.depth();
    if resolved.parent()?.kind != "table_row" || resolved.node(depth.checked_sub(1)?)?.kind != "table" {
        return None;
    }
    let row = resolved.index_in_parent(depth)?;
    let table_pos = resolved.before(depth - 1)?;
    Some((table_pos, row, cell.index))
}

fn table_dimensions(table: &ElementNode) -> (usize, usize) {
    let cols = table
        .children
        .iter()
        .map(|row| match row {
            Node::Element(el) => el.children.len(),
            Node::Text(_) | Node::Void(_) => 0,
        })
        .max()
        .unwrap_or(0);
    (table.children.len(), cols)
}

impl EditorState {
    pub fn cell_rect(&self) -> Option<CellRect> {
        let Selection::Cell { anchor, head } = *self.selection() else {
            return None;
        };
        let (table_pos, anchor_row, anchor_col) = cell_coords(self.doc(), anchor)?;
        let (head_table, head_row, head_col) = cell_coords(self.doc(), head)?;
        if table_pos != head_table {
            return None;
        }
        let Some(Node::Element(table)) = self.doc().node_at(table_pos) else {
            return None;
        };
        let (rows, cols) = table_dimensions(table);
        Some(CellRect {
            table_pos,
            top: anchor_row.min(head_row),
            left: anchor_col.min(head_col),
            bottom: anchor_row.max(head_row) + 1,
            right: anchor_col.max(head_col) + 1,
            rows,
            cols,
        })
    }

    /// Nearest ancestor of kind `kind` around the selection start.
    pub fn ancestor(&self, kind: &str) -> Option<&ElementNode> {
        self.doc().resolve(self.from()).ancestor(kind)
    }

    /// Marks a caret at `pos` would apply. Links are non-inclusive at both
    /// ends.
    pub fn marks_at(&self, pos: usize) -> Marks {
        let resolved = self.doc().resolve(pos);
        let before = resolved.child_before();
        let after = resolved.child_after();
        let marks_of = |child: Option<crate::document::ChildAt<'_>>| {
            child
                .and_then(|c| c.node.marks().cloned())
                .unwrap_or_default()
        };

        match (before, after) {
            (Some(b), Some(a)) if b.index == a.index => marks_of(Some(b)),
            // Nothing before the caret can carry the link into it.
            (None, after) => Marks {
                link: None,
                ..marks_of(after)
            },
            (Some(b), after) => {
                let mut marks = marks_of(Some(b));
                if marks.link.is_some() && marks_of(after).link != marks.link {
                    marks.link = None;
                }
                marks
            }
        }
    }

    pub fn is_mark_active(&self, pred: impl Fn(&Marks) -> bool) -> bool {
        if self.is_empty() {
            pred(&self.marks_at(self.from()))
        } else {
            self.doc().range_has_mark(self.from(), self.to(), pred)
        }
    }
}

impl SelectionQuery for EditorState {
    fn kind(&self) -> SelectionKind<'_> {
        match *self.selection() {
            Selection::Caret { .. } => SelectionKind::Empty,
            Selection::Text { anchor, head } if anchor == head => SelectionKind::Empty,
            Selection::Text { .. } => SelectionKind::Text,
            Selection::Node { .. } => match self.selected_node() {
                Some(node) => SelectionKind::Node(node),
                None => SelectionKind::Empty,
            },
            Selection::Cell { .. } => SelectionKind::Cell,
        }
    }

    fn from(&self) -> usize {
        EditorState::from(self)
    }

    fn to(&self) -> usize {
        EditorState::to(self)
    }

    fn is_node_active(&self, kind: &str) -> bool {
        self.ancestor(kind).is_some() || self.selected_node().is_some_and(|node| node.kind() == kind)
    }

    fn is_link_active(&self) -> bool {
        self.is_mark_active(|marks| marks.link.is_some())
    }

    fn selected_text(&self) -> String {
        self.doc().text_between(self.from(), self.to())
    }

    fn slice_has_content(&self) -> bool {
        match self.kind() {
            SelectionKind::Text => self
                .doc()
                .cut_content_sizes(self.from(), self.to())
                .into_iter()
                .any(|size| size > 0),
            // Cell slices are table rows, each holding at least one cell.
            SelectionKind::Cell => self
                .cell_rect()
                .is_some_and(|rect| !rect.cells(self.doc()).is_empty()),
            SelectionKind::Empty | SelectionKind::Node(_) => false,
        }
    }

    fn column_index(&self) -> Option<usize> {
        self.cell_rect()
            .filter(CellRect::is_column_selection)
            .map(|rect| rect.left)
    }

    fn row_index(&self) -> Option<usize> {
        self.cell_rect()
            .filter(CellRect::is_row_selection)
            .map(|rect| rect.top)
    }

    fn link_range(&self, pos: usize) -> Option<MarkRange> {
        let resolved = self.doc().resolve(pos);
        let start = resolved.child_after()?;
        let href = start.node.marks()?.link.clone()?;
        let same_link = |node: &Node| node.marks().and_then(|m| m.link.as_deref()) == Some(href.as_str());

        let children: Vec<_> = resolved.children_with_pos().collect();
        let mut first = start.index;
        while first > 0 && same_link(children[first - 1].node) {
            first -= 1;
        }
        let mut last = start.index;
        while last + 1 < children.len() && same_link(children[last + 1].node) {
            last += 1;
        }

        let from = children[first].pos;
        let to = children[last].pos + children[last].node.size();
        Some(MarkRange { from, to, href })
    }
}
