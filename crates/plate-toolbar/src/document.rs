use std::collections::BTreeMap;
use std::fmt;
use std::ops::Range;

use serde::{Deserialize, Serialize};

pub type Attrs = BTreeMap<String, serde_json::Value>;
pub type NodeKind = String;

/// Immutable-per-revision document tree.
///
/// Positions are flat integers: an element contributes an opening and a
/// closing token around its content, text contributes one position per char
/// and a void node contributes a single position. Position 0 sits before the
/// first top-level block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Document {
    #[serde(default)]
    pub children: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "node", rename_all = "snake_case")]
pub enum Node {
    Element(ElementNode),
    Text(TextNode),
    Void(VoidNode),
}

impl Node {
    pub fn element(kind: impl Into<String>, children: Vec<Node>) -> Self {
        Node::Element(ElementNode {
            kind: kind.into(),
            attrs: Attrs::default(),
            children,
        })
    }

    pub fn void(kind: impl Into<String>) -> Self {
        Node::Void(VoidNode {
            kind: kind.into(),
            attrs: Attrs::default(),
        })
    }

    pub fn text(text: impl Into<String>) -> Self {
        Node::Text(TextNode {
            text: text.into(),
            marks: Marks::default(),
        })
    }

    pub fn link(text: impl Into<String>, href: impl Into<String>) -> Self {
        Node::Text(TextNode {
            text: text.into(),
            marks: Marks {
                link: Some(href.into()),
                ..Marks::default()
            },
        })
    }

    pub fn paragraph(text: impl Into<String>) -> Self {
        let text = text.into();
        let children = if text.is_empty() {
            Vec::new()
        } else {
            vec![Node::text(text)]
        };
        Node::element("paragraph", children)
    }

    pub fn code_block(text: impl Into<String>) -> Self {
        let text = text.into();
        let children = if text.is_empty() {
            Vec::new()
        } else {
            vec![Node::text(text)]
        };
        Node::element("code_block", children)
    }

    pub fn notice(style: &str, children: Vec<Node>) -> Self {
        Node::element("notice", children).with_attr("style", style)
    }

    pub fn divider() -> Self {
        Node::void("divider")
    }

    pub fn image(src: impl Into<String>) -> Self {
        Node::void("image").with_attr("src", src.into())
    }

    pub fn attachment(href: impl Into<String>) -> Self {
        Node::void("attachment").with_attr("href", href.into())
    }

    pub fn embed(href: impl Into<String>) -> Self {
        Node::void("embed").with_attr("href", href.into())
    }

    /// A table whose cells each hold one paragraph. The first row uses header
    /// cells.
    pub fn table<R, C>(rows: R) -> Self
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        let rows = rows
            .into_iter()
            .enumerate()
            .map(|(row_ix, cells)| {
                let cell_kind = if row_ix == 0 {
                    "table_header"
                } else {
                    "table_cell"
                };
                let cells = cells
                    .into_iter()
                    .map(|text| Node::element(cell_kind, vec![Node::paragraph(text)]))
                    .collect();
                Node::element("table_row", cells)
            })
            .collect();
        Node::element("table", rows)
    }

    pub fn with_attr(mut self, key: &str, value: impl Into<serde_json::Value>) -> Self {
        match &mut self {
            Node::Element(el) => {
                el.attrs.insert(key.to_string(), value.into());
            }
            Node::Void(void) => {
                void.attrs.insert(key.to_string(), value.into());
            }
            Node::Text(_) => {}
        }
        self
    }

    pub fn kind(&self) -> &str {
        match self {
            Node::Element(el) => &el.kind,
            Node::Void(void) => &void.kind,
            Node::Text(_) => "text",
        }
    }

    pub fn attrs(&self) -> Option<&Attrs> {
        match self {
            Node::Element(el) => Some(&el.attrs),
            Node::Void(void) => Some(&void.attrs),
            Node::Text(_) => None,
        }
    }

    pub fn attr_str(&self, key: &str) -> Option<&str> {
        self.attrs()
            .and_then(|attrs| attrs.get(key))
            .and_then(|v| v.as_str())
    }

    pub fn marks(&self) -> Option<&Marks> {
        match self {
            Node::Text(t) => Some(&t.marks),
            _ => None,
        }
    }

    pub fn size(&self) -> usize {
        match self {
            Node::Element(el) => el.content_size() + 2,
            Node::Text(t) => t.len(),
            Node::Void(_) => 1,
        }
    }

    /// Size of the node's content. Text and void nodes have no content.
    pub fn content_size(&self) -> usize {
        match self {
            Node::Element(el) => el.content_size(),
            Node::Text(_) | Node::Void(_) => 0,
        }
    }

    pub fn text_content(&self) -> String {
        let mut out = String::new();
        collect_text(std::slice::from_ref(self), 0, 0, self.size(), &mut out);
        out
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementNode {
    pub kind: NodeKind,
    #[serde(default)]
    pub attrs: Attrs,
    #[serde(default)]
    pub children: Vec<Node>,
}

impl ElementNode {
    pub fn content_size(&self) -> usize {
        content_size(&self.children)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoidNode {
    pub kind: NodeKind,
    #[serde(default)]
    pub attrs: Attrs,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextNode {
    pub text: String,
    #[serde(default)]
    pub marks: Marks,
}

impl TextNode {
    /// Length in positions (chars, not bytes).
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Marks {
    #[serde(default)]
    pub bold: bool,
    #[serde(default)]
    pub italic: bool,
    #[serde(default)]
    pub strikethrough: bool,
    #[serde(default)]
    pub highlight: bool,
    #[serde(default)]
    pub code: bool,
    #[serde(default)]
    pub placeholder: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentError {
    InvalidRange { from: usize, to: usize },
    OutOfRange { from: usize, to: usize, size: usize },
}

impl fmt::Display for DocumentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentError::InvalidRange { from, to } => {
                write!(f, "invalid range {from}..{to}")
            }
            DocumentError::OutOfRange { from, to, size } => {
                write!(f, "range {from}..{to} is outside document of size {size}")
            }
        }
    }
}

impl std::error::Error for DocumentError {}

impl Document {
    pub fn new(children: Vec<Node>) -> Self {
        Self { children }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn content_size(&self) -> usize {
        content_size(&self.children)
    }

    pub fn resolve(&self, pos: usize) -> ResolvedPos<'_> {
        let pos = pos.min(self.content_size());
        let mut frames: Vec<Frame<'_>> = Vec::new();
        let mut children: &[Node] = &self.children;
        let mut start = 0;

        'descend: loop {
            let mut child_pos = start;
            for (index, child) in children.iter().enumerate() {
                let end = child_pos + child.size();
                if let Node::Element(el) = child {
                    if pos > child_pos && pos < end {
                        frames.push(Frame {
                            element: el,
                            start: child_pos + 1,
                            index,
                        });
                        children = &el.children;
                        start = child_pos + 1;
                        continue 'descend;
                    }
                }
                if end > pos {
                    break;
                }
                child_pos = end;
            }
            break;
        }

        ResolvedPos {
            pos,
            frames,
            root: &self.children,
        }
    }

    /// The node that starts exactly at `pos`, if any.
    pub fn node_at(&self, pos: usize) -> Option<&Node> {
        let resolved = self.resolve(pos);
        let child = resolved.child_after()?;
        (child.pos == pos).then_some(child.node)
    }

    /// Text content of the document cut to `from..to`.
    pub fn text_between(&self, from: usize, to: usize) -> String {
        let mut out = String::new();
        if from < to {
            collect_text(&self.children, 0, from, to, &mut out);
        }
        out
    }

    /// Content sizes of the top-level nodes that remain after cutting the
    /// document to `from..to`.
    pub fn cut_content_sizes(&self, from: usize, to: usize) -> Vec<usize> {
        let mut sizes = Vec::new();
        let mut pos = 0;
        for child in &self.children {
            if pos >= to {
                break;
            }
            let end = pos + child.size();
            if end > from {
                sizes.push(match child {
                    Node::Element(el) => cut_size(
                        &el.children,
                        from.saturating_sub(pos + 1),
                        (to - pos - 1).min(el.content_size()),
                    ),
                    Node::Text(_) | Node::Void(_) => 0,
                });
            }
            pos = end;
        }
        sizes
    }

    pub fn range_has_mark(&self, from: usize, to: usize, pred: impl Fn(&Marks) -> bool) -> bool {
        fn walk(
            children: &[Node],
            start: usize,
            from: usize,
            to: usize,
            pred: &dyn Fn(&Marks) -> bool,
        ) -> bool {
            let mut pos = start;
            for child in children {
                if pos >= to {
                    return false;
                }
                let end = pos + child.size();
                if end > from {
                    let hit = match child {
                        Node::Text(t) => pred(&t.marks),
                        Node::Element(el) => walk(&el.children, pos + 1, from, to, pred),
                        Node::Void(_) => false,
                    };
                    if hit {
                        return true;
                    }
                }
                pos = end;
            }
            false
        }

        from < to && walk(&self.children, 0, from, to, &pred)
    }

    /// Replaces the link mark over every text position in `range`. `None`
    /// removes the link.
    pub fn set_link(&mut self, range: Range<usize>, href: Option<&str>) -> Result<(), DocumentError> {
        let size = self.content_size();
        if range.start > range.end {
            return Err(DocumentError::InvalidRange {
                from: range.start,
                to: range.end,
            });
        }
        if range.end > size {
            return Err(DocumentError::OutOfRange {
                from: range.start,
                to: range.end,
                size,
            });
        }
        if range.start < range.end {
            relink(&mut self.children, 0, &range, href);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
struct Frame<'a> {
    element: &'a ElementNode,
    start: usize,
    index: usize,
}

/// A position resolved against the tree, carrying its ancestor chain.
///
/// Depth 0 is the document itself; depth `n` is the `n`th element ancestor.
#[derive(Debug, Clone)]
pub struct ResolvedPos<'a> {
    pub pos: usize,
    frames: Vec<Frame<'a>>,
    root: &'a [Node],
}

#[derive(Debug, Clone, Copy)]
pub struct ChildAt<'a> {
    pub index: usize,
    pub pos: usize,
    pub node: &'a Node,
}

impl<'a> ResolvedPos<'a> {
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Element ancestor at `depth` (1-based). Depth 0 has no element.
    pub fn node(&self, depth: usize) -> Option<&'a ElementNode> {
        depth
            .checked_sub(1)
            .and_then(|ix| self.frames.get(ix))
            .map(|frame| frame.element)
    }

    /// Index of the ancestor at `depth` within its own parent.
    pub fn index_in_parent(&self, depth: usize) -> Option<usize> {
        depth
            .checked_sub(1)
            .and_then(|ix| self.frames.get(ix))
            .map(|frame| frame.index)
    }

    /// Position directly before the ancestor at `depth`.
    pub fn before(&self, depth: usize) -> Option<usize> {
        depth
            .checked_sub(1)
            .and_then(|ix| self.frames.get(ix))
            .map(|frame| frame.start - 1)
    }

    pub fn parent(&self) -> Option<&'a ElementNode> {
        self.frames.last().map(|frame| frame.element)
    }

    pub fn start(&self) -> usize {
        self.frames.last().map_or(0, |frame| frame.start)
    }

    pub fn parent_offset(&self) -> usize {
        self.pos - self.start()
    }

    pub fn siblings(&self) -> &'a [Node] {
        self.frames
            .last()
            .map_or(self.root, |frame| frame.element.children.as_slice())
    }

    pub fn ancestor(&self, kind: &str) -> Option<&'a ElementNode> {
        self.frames
            .iter()
            .rev()
            .map(|frame| frame.element)
            .find(|el| el.kind == kind)
    }

    pub fn child_after(&self) -> Option<ChildAt<'a>> {
        self.children_with_pos()
            .find(|child| child.pos <= self.pos && self.pos < child.pos + child.node.size())
    }

    pub fn child_before(&self) -> Option<ChildAt<'a>> {
        self.children_with_pos()
            .find(|child| child.pos < self.pos && self.pos <= child.pos + child.node.size())
    }

    pub fn children_with_pos(&self) -> impl Iterator<Item = ChildAt<'a>> + 'a {
        let mut pos = self.start();
        self.siblings().iter().enumerate().map(move |(index, node)| {
            let child = ChildAt { index, pos, node };
            pos += node.size();
            child
        })
    }
}

fn content_size(children: &[Node]) -> usize {
    children.iter().map(Node::size).sum()
}

fn collect_text(children: &[Node], start: usize, from: usize, to: usize, out: &mut String) {
    let mut pos = start;
    for child in children {
        if pos >= to {
            break;
        }
        let end = pos + child.size();
        if end > from {
            match child {
                Node::Text(t) => {
                    let a = from.saturating_sub(pos);
                    let b = (to - pos).min(t.len());
                    out.push_str(slice_chars(&t.text, a, b));
                }
                Node::Element(el) => collect_text(&el.children, pos + 1, from, to, out),
                Node::Void(_) => {}
            }
        }
        pos = end;
    }
}

fn cut_size(children: &[Node], from: usize, to: usize) -> usize {
    let mut size = 0;
    let mut pos = 0;
    for child in children {
        if pos >= to {
            break;
        }
        let end = pos + child.size();
        if end > from {
            size += match child {
                Node::Text(_) => to.min(end) - from.max(pos),
                Node::Void(_) => 1,
                Node::Element(el) => {
                    2 + cut_size(
                        &el.children,
                        from.saturating_sub(pos + 1),
                        (to - pos - 1).min(el.content_size()),
                    )
                }
            };
        }
        pos = end;
    }
    size
}

fn relink(children: &mut Vec<Node>, start: usize, range: &Range<usize>, href: Option<&str>) {
    let mut next: Vec<Node> = Vec::with_capacity(children.len());
    let mut pos = start;

    for child in children.drain(..) {
        let size = child.size();
        let end = pos + size;
        let overlaps = end > range.start && pos < range.end;
        match child {
            Node::Text(text) if overlaps => {
                let a = range.start.saturating_sub(pos);
                let b = (range.end - pos).min(size);
                let pieces = [
                    (0, a, text.marks.link.clone()),
                    (a, b, href.map(str::to_string)),
                    (b, size, text.marks.link.clone()),
                ];
                for (lo, hi, link) in pieces {
                    if lo < hi {
                        next.push(Node::Text(TextNode {
                            text: slice_chars(&text.text, lo, hi).to_string(),
                            marks: Marks {
                                link,
                                ..text.marks.clone()
                            },
                        }));
                    }
                }
            }
            Node::Element(mut el) => {
                if overlaps {
                    relink(&mut el.children, pos + 1, range, href);
                }
                next.push(Node::Element(el));
            }
            other => next.push(other),
        }
        pos = end;
    }

    *children = merge_adjacent_text(next);
}

fn merge_adjacent_text(children: Vec<Node>) -> Vec<Node> {
    let mut merged: Vec<Node> = Vec::with_capacity(children.len());
    for child in children {
        if let (Some(Node::Text(prev)), Node::Text(next)) = (merged.last_mut(), &child) {
            if prev.marks == next.marks {
                prev.text.push_str(&next.text);
                continue;
            }
        }
        merged.push(child);
    }
    merged
}

fn slice_chars(text: &str, from: usize, to: usize) -> &str {
    let byte = |ix: usize| {
        text.char_indices()
            .nth(ix)
            .map_or(text.len(), |(byte, _)| byte)
    };
    let (from, to) = (byte(from), byte(to));
    if from >= to { "" } else { &text[from..to] }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Document {
        Document::new(vec![
            Node::paragraph("hello"),
            Node::notice("info", vec![Node::paragraph("tip")]),
        ])
    }

    #[test]
    fn sizes_count_open_and_close_tokens() {
        let doc = sample();
        assert_eq!(doc.children[0].size(), 7);
        assert_eq!(doc.children[1].size(), 7);
        assert_eq!(doc.content_size(), 14);
    }

    #[test]
    fn resolve_descends_into_elements() {
        let doc = sample();
        let resolved = doc.resolve(10);
        assert_eq!(resolved.depth(), 2);
        assert_eq!(resolved.parent().map(|el| el.kind.as_str()), Some("paragraph"));
        assert_eq!(resolved.ancestor("notice").map(|el| el.kind.as_str()), Some("notice"));
        assert_eq!(resolved.parent_offset(), 1);

        let top = doc.resolve(7);
        assert_eq!(top.depth(), 0);
        assert_eq!(top.child_after().map(|c| c.node.kind()), Some("notice"));
    }

    #[test]
    fn text_between_cuts_across_blocks() {
        let doc = sample();
        assert_eq!(doc.text_between(3, 11), "lloti");
        assert_eq!(doc.text_between(0, 14), "hellotip");
        assert_eq!(doc.text_between(6, 9), "");
    }

    #[test]
    fn slice_chars_respects_multibyte_text() {
        assert_eq!(slice_chars("héllo", 1, 3), "él");
        assert_eq!(slice_chars("héllo", 4, 9), "o");
    }

    #[test]
    fn cut_content_sizes_keep_boundary_blocks() {
        let doc = Document::new(vec![Node::paragraph(""), Node::paragraph("")]);
        assert_eq!(doc.cut_content_sizes(1, 3), vec![0, 0]);

        let doc = sample();
        assert_eq!(doc.cut_content_sizes(2, 4), vec![2]);
    }

    #[test]
    fn set_link_merges_equal_neighbours() {
        let mut doc = Document::new(vec![Node::element(
            "paragraph",
            vec![Node::text("ab"), Node::link("cd", "a"), Node::text("ef")],
        )]);
        doc.set_link(1..7, None).unwrap();
        assert_eq!(doc.children[0], Node::paragraph("abcdef"));
    }
}
