//! Fragments: owned copies of the content between two offsets
//!
//! Extraction mirrors DOM range cloning. Below the nearest common ancestor of
//! the two boundary leaves, partially selected elements are copied without
//! their children and refilled with the selected part, fully selected
//! siblings are copied whole.

use crate::document::{markup, Document, ElementNode, NodeId, NodeKind};
use crate::index::PositionIndex;
use std::ops::Range;

/// A node of an extracted fragment
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FragmentNode {
    Text(String),
    Element {
        element: ElementNode,
        children: Vec<FragmentNode>,
    },
    Comment(String),
}

impl FragmentNode {
    fn write_markup(&self, out: &mut String) {
        match self {
            FragmentNode::Text(text) => markup::write_text(out, text),
            FragmentNode::Comment(comment) => markup::write_comment(out, comment),
            FragmentNode::Element { element, children } => {
                markup::write_start_tag(out, element);
                for child in children {
                    child.write_markup(out);
                }
                markup::write_end_tag(out, element);
            }
        }
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            FragmentNode::Text(text) => out.push_str(text),
            FragmentNode::Element { children, .. } => {
                for child in children {
                    child.collect_text(out);
                }
            }
            FragmentNode::Comment(_) => {}
        }
    }
}

/// Content between two offsets, ready to render
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fragment {
    pub nodes: Vec<FragmentNode>,
}

impl Fragment {
    /// Copy the content of `range` out of `document`
    ///
    /// Offsets are clamped to the indexed content.
    pub fn extract(document: &Document, index: &PositionIndex, range: Range<usize>) -> Self {
        let to = range.end.min(index.max_position());
        let from = range.start.min(to);
        if from == to {
            return Self::default();
        }

        let (start_entry, start_local) = index.leaf_for_offset(from);
        let (end_entry, end_local) = index.leaf_ending_at(to);

        let start = BoundaryPoint {
            node: start_entry.leaf,
            offset: start_local,
        };
        let end = BoundaryPoint {
            node: end_entry.leaf,
            offset: end_local,
        };

        let mut nodes = Vec::new();
        clone_range(document, start, end, &mut nodes);
        Self { nodes }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Serialized markup of the fragment
    pub fn to_markup(&self) -> String {
        let mut out = String::new();
        for node in &self.nodes {
            node.write_markup(&mut out);
        }
        out
    }

    /// Plain text of the fragment
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        for node in &self.nodes {
            node.collect_text(&mut out);
        }
        out
    }
}

/// A position inside a node: char offset for text, child index for elements
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct BoundaryPoint {
    node: NodeId,
    offset: usize,
}

fn clone_range(
    document: &Document,
    start: BoundaryPoint,
    end: BoundaryPoint,
    out: &mut Vec<FragmentNode>,
) {
    if start.node == end.node {
        match document.kind(start.node) {
            NodeKind::Text(text) => push_text(out, text.slice(start.offset, end.offset)),
            NodeKind::Element(_) => {
                let children = document.children(start.node);
                for &child in children.get(start.offset..end.offset).unwrap_or(&[]) {
                    out.push(clone_deep(document, child));
                }
            }
            NodeKind::Comment(_) => {}
        }
        return;
    }

    let common = document.common_ancestor(start.node, end.node);
    let first_partial = (start.node != common).then(|| child_toward(document, common, start.node));
    let last_partial = (end.node != common).then(|| child_toward(document, common, end.node));

    let contained_from = match first_partial {
        Some(child) => document.index_in_parent(child).map_or(0, |i| i + 1),
        None => start.offset,
    };
    let contained_to = match last_partial {
        Some(child) => document.index_in_parent(child).unwrap_or(0),
        None => end.offset,
    };

    if let Some(child) = first_partial {
        match document.kind(child) {
            NodeKind::Text(text) => push_text(out, text.slice(start.offset, text.len())),
            NodeKind::Element(element) => {
                let mut children = Vec::new();
                let child_end = BoundaryPoint {
                    node: child,
                    offset: document.children(child).len(),
                };
                clone_range(document, start, child_end, &mut children);
                out.push(FragmentNode::Element {
                    element: element.clone(),
                    children,
                });
            }
            NodeKind::Comment(comment) => out.push(FragmentNode::Comment(comment.clone())),
        }
    }

    let siblings = document.children(common);
    for &child in siblings.get(contained_from..contained_to).unwrap_or(&[]) {
        out.push(clone_deep(document, child));
    }

    if let Some(child) = last_partial {
        match document.kind(child) {
            NodeKind::Text(text) => push_text(out, text.slice(0, end.offset)),
            NodeKind::Element(element) => {
                let mut children = Vec::new();
                let child_start = BoundaryPoint {
                    node: child,
                    offset: 0,
                };
                clone_range(document, child_start, end, &mut children);
                out.push(FragmentNode::Element {
                    element: element.clone(),
                    children,
                });
            }
            NodeKind::Comment(comment) => out.push(FragmentNode::Comment(comment.clone())),
        }
    }
}

/// The child of `ancestor` on the path down to `node`
fn child_toward(document: &Document, ancestor: NodeId, node: NodeId) -> NodeId {
    document
        .ancestors(node)
        .find(|&n| document.parent(n) == Some(ancestor))
        .unwrap_or(node)
}

fn clone_deep(document: &Document, id: NodeId) -> FragmentNode {
    match document.kind(id) {
        NodeKind::Text(text) => FragmentNode::Text(text.value().to_string()),
        NodeKind::Comment(comment) => FragmentNode::Comment(comment.clone()),
        NodeKind::Element(element) => FragmentNode::Element {
            element: element.clone(),
            children: document
                .children(id)
                .iter()
                .map(|&child| clone_deep(document, child))
                .collect(),
        },
    }
}

fn push_text(out: &mut Vec<FragmentNode>, text: &str) {
    if !text.is_empty() {
        out.push(FragmentNode::Text(text.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(markup: &str, range: Range<usize>) -> String {
        let doc = Document::parse(markup).unwrap();
        let index = PositionIndex::build(&doc).unwrap();
        Fragment::extract(&doc, &index, range).to_markup()
    }

    const SAMPLE: &str = "<div><p>aa</p><p>bb<span>cc</span>dd</p></div>";

    #[test]
    fn test_full_range_under_common_ancestor() {
        assert_eq!(extract(SAMPLE, 0..8), "<p>aa</p><p>bb<span>cc</span>dd</p>");
    }

    #[test]
    fn test_range_cut_inside_second_paragraph() {
        assert_eq!(extract(SAMPLE, 0..3), "<p>aa</p><p>b</p>");
    }

    #[test]
    fn test_range_starting_inside_span() {
        assert_eq!(extract(SAMPLE, 5..7), "<span>c</span>d");
    }

    #[test]
    fn test_range_within_single_leaf() {
        assert_eq!(extract(SAMPLE, 2..3), "b");
    }

    #[test]
    fn test_range_end_on_leaf_edge_has_no_empty_tail() {
        assert_eq!(extract(SAMPLE, 0..2), "aa");
        assert_eq!(extract(SAMPLE, 0..4), "<p>aa</p><p>bb</p>");
        assert_eq!(extract(SAMPLE, 2..6), "bb<span>cc</span>");
    }

    #[test]
    fn test_empty_range() {
        assert_eq!(extract(SAMPLE, 3..3), "");
        assert_eq!(extract(SAMPLE, 8..8), "");
    }

    #[test]
    fn test_contained_siblings_are_deep_copied() {
        let markup = "<p>one</p><!--c--><ul><li>two</li><li>three</li></ul><p>four</p>";
        assert_eq!(
            extract(markup, 1..12),
            "<p>ne</p><!--c--><ul><li>two</li><li>three</li></ul><p>f</p>"
        );
    }

    #[test]
    fn test_attributes_survive_partial_copy() {
        let markup = "<p class=\"lead\" id=\"x\">hello <a href=\"/y\">world</a></p><p>next</p>";
        // Common ancestor is the p, so only its inner part is copied
        assert_eq!(extract(markup, 3..9), "lo <a href=\"/y\">wor</a>");
        assert_eq!(
            extract(markup, 3..13),
            "<p class=\"lead\" id=\"x\">lo <a href=\"/y\">world</a></p><p>ne</p>"
        );
    }

    #[test]
    fn test_fragment_text_content() {
        let doc = Document::parse(SAMPLE).unwrap();
        let index = PositionIndex::build(&doc).unwrap();
        let fragment = Fragment::extract(&doc, &index, 1..7);
        assert_eq!(fragment.text_content(), "abbccd");
        assert!(!fragment.is_empty());
    }
}
