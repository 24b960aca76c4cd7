//! Document model: an arena tree of markup nodes

pub mod markup;
mod node;
mod parse;

pub use node::{Attribute, Attributes, ElementNode, NodeId, NodeKind, TextNode};

use smallvec::SmallVec;
use std::hash::{Hash, Hasher};

/// Tag name of the synthetic container every document hangs from
pub const ROOT_NAME: &str = "div";

#[derive(Debug, Clone)]
struct NodeData {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: SmallVec<[NodeId; 4]>,
}

/// A snapshot of markup content
///
/// Nodes live in a flat arena and refer to each other by [`NodeId`]. The root
/// is a container element whose children are the actual content; it is never
/// part of an extracted fragment.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<NodeData>,
    root: NodeId,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create an empty document holding only the root container
    pub fn new() -> Self {
        Self {
            nodes: vec![NodeData {
                kind: NodeKind::Element(ElementNode::new(ROOT_NAME)),
                parent: None,
                children: SmallVec::new(),
            }],
            root: NodeId(0),
        }
    }

    /// Parse a markup fragment into a new document
    pub fn parse(markup: &str) -> Result<Self, crate::PaginationError> {
        let mut document = Self::new();
        let root = document.root;
        parse::parse_into(&mut document, root, markup)?;
        Ok(document)
    }

    /// The root container
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Total number of nodes, root included
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the root has no content
    pub fn is_empty(&self) -> bool {
        self.children(self.root).is_empty()
    }

    fn push(&mut self, parent: NodeId, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(NodeData {
            kind,
            parent: Some(parent),
            children: SmallVec::new(),
        });
        self.nodes[parent.index()].children.push(id);
        id
    }

    /// Append an element as the last child of `parent`
    pub fn append_element(&mut self, parent: NodeId, element: ElementNode) -> NodeId {
        self.push(parent, NodeKind::Element(element))
    }

    /// Append a text node as the last child of `parent`
    pub fn append_text(&mut self, parent: NodeId, text: impl Into<String>) -> NodeId {
        self.push(parent, NodeKind::Text(TextNode::new(text)))
    }

    /// Append a comment as the last child of `parent`
    pub fn append_comment(&mut self, parent: NodeId, comment: impl Into<String>) -> NodeId {
        self.push(parent, NodeKind::Comment(comment.into()))
    }

    /// Node kind
    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.nodes[id.index()].kind
    }

    /// Text leaf, if `id` is one
    pub fn text(&self, id: NodeId) -> Option<&TextNode> {
        self.kind(id).as_text()
    }

    /// Element, if `id` is one
    pub fn element(&self, id: NodeId) -> Option<&ElementNode> {
        self.kind(id).as_element()
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.index()].parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.index()].children
    }

    /// Position of `id` among its siblings
    pub fn index_in_parent(&self, id: NodeId) -> Option<usize> {
        let parent = self.parent(id)?;
        self.children(parent).iter().position(|&child| child == id)
    }

    /// Ancestors of `id` starting with `id` itself and ending at the root
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(Some(id), move |&node| self.parent(node))
    }

    /// Nearest node that is an inclusive ancestor of both `a` and `b`
    pub fn common_ancestor(&self, a: NodeId, b: NodeId) -> NodeId {
        let chain: SmallVec<[NodeId; 16]> = self.ancestors(a).collect();
        self.ancestors(b)
            .find(|n| chain.contains(n))
            .unwrap_or(self.root)
    }

    /// Concatenated text of all leaves under the root
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(self.root, &mut out);
        out
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        match self.kind(id) {
            NodeKind::Text(text) => out.push_str(text.value()),
            NodeKind::Element(_) => {
                for &child in self.children(id) {
                    self.collect_text(child, out);
                }
            }
            NodeKind::Comment(_) => {}
        }
    }

    /// Serialized content of the root (its `innerHTML`)
    pub fn to_markup(&self) -> String {
        let mut out = String::new();
        for &child in self.children(self.root) {
            self.write_node(child, &mut out);
        }
        out
    }

    /// Serialize `id` and its subtree
    pub fn write_node(&self, id: NodeId, out: &mut String) {
        match self.kind(id) {
            NodeKind::Text(text) => markup::write_text(out, text.value()),
            NodeKind::Comment(comment) => markup::write_comment(out, comment),
            NodeKind::Element(element) => {
                markup::write_start_tag(out, element);
                for &child in self.children(id) {
                    self.write_node(child, out);
                }
                markup::write_end_tag(out, element);
            }
        }
    }

    /// Hash of the serialized markup, used to key cached pagination
    pub fn content_hash(&self) -> u64 {
        let mut hasher = rustc_hash::FxHasher::default();
        self.to_markup().hash(&mut hasher);
        hasher.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_document() {
        let doc = Document::new();
        assert!(doc.is_empty());
        assert_eq!(doc.len(), 1);
        assert_eq!(doc.element(doc.root()).map(|e| e.name.as_str()), Some(ROOT_NAME));
    }

    #[test]
    fn test_build_and_serialize() {
        let mut doc = Document::new();
        let root = doc.root();
        let p = doc.append_element(root, ElementNode::new("p"));
        doc.append_text(p, "Hello ");
        let em = doc.append_element(p, ElementNode::new("em"));
        doc.append_text(em, "world");

        assert_eq!(doc.to_markup(), "<p>Hello <em>world</em></p>");
        assert_eq!(doc.text_content(), "Hello world");
    }

    #[test]
    fn test_common_ancestor() {
        let mut doc = Document::new();
        let root = doc.root();
        let p = doc.append_element(root, ElementNode::new("p"));
        let a = doc.append_text(p, "a");
        let span = doc.append_element(p, ElementNode::new("span"));
        let b = doc.append_text(span, "b");
        let q = doc.append_element(root, ElementNode::new("p"));
        let c = doc.append_text(q, "c");

        assert_eq!(doc.common_ancestor(a, b), p);
        assert_eq!(doc.common_ancestor(b, c), root);
        assert_eq!(doc.common_ancestor(span, b), span);
        assert_eq!(doc.common_ancestor(a, c), root);
        assert!(doc.ancestors(b).any(|n| n == p));
        assert!(!doc.ancestors(b).any(|n| n == q));
        assert_eq!(doc.index_in_parent(span), Some(1));
    }
}
