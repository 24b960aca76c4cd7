//! Node kinds stored in the document arena

use smallvec::SmallVec;

/// Index of a node inside its [`Document`](super::Document)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// A single `name="value"` pair on an element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

/// Attributes are few on almost every element
pub type Attributes = SmallVec<[Attribute; 2]>;

/// Text-bearing leaf
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextNode {
    value: String,
    /// Length in chars, cached since offsets are char based
    char_len: usize,
}

impl TextNode {
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        let char_len = value.chars().count();
        Self { value, char_len }
    }

    /// Text content
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Number of characters (offset units) in this leaf
    pub fn len(&self) -> usize {
        self.char_len
    }

    pub fn is_empty(&self) -> bool {
        self.char_len == 0
    }

    /// Byte index of the char at `local`, or the byte length when `local == len`
    pub fn byte_index(&self, local: usize) -> usize {
        if self.char_len == self.value.len() {
            return local.min(self.value.len());
        }
        self.value
            .char_indices()
            .nth(local)
            .map(|(idx, _)| idx)
            .unwrap_or(self.value.len())
    }

    /// Substring between two char offsets
    pub fn slice(&self, from: usize, to: usize) -> &str {
        let start = self.byte_index(from);
        let end = self.byte_index(to.max(from));
        &self.value[start..end]
    }

    /// Chars from `local` onwards paired with their char offset
    pub fn chars_from(&self, local: usize) -> impl Iterator<Item = (usize, char)> + '_ {
        self.value[self.byte_index(local)..]
            .chars()
            .enumerate()
            .map(move |(i, c)| (local + i, c))
    }

    /// Chars before `local` (exclusive) in reverse order, paired with their char offset
    pub fn chars_before(&self, local: usize) -> impl Iterator<Item = (usize, char)> + '_ {
        self.value[..self.byte_index(local)]
            .chars()
            .rev()
            .enumerate()
            .map(move |(i, c)| (local - 1 - i, c))
    }
}

/// Markup element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementNode {
    /// Tag name, lowercased
    pub name: String,
    pub attributes: Attributes,
}

impl ElementNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into().to_ascii_lowercase(),
            attributes: Attributes::new(),
        }
    }

    /// Attribute value by name
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    /// Set or replace an attribute
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|a| a.name == name) {
            Some(existing) => existing.value = value,
            None => self.attributes.push(Attribute { name, value }),
        }
    }

    /// Stable identifier, if the element carries a non-empty `id`
    pub fn id(&self) -> Option<&str> {
        self.attribute("id").filter(|id| !id.is_empty())
    }

    /// Whether this element never has children or an end tag
    pub fn is_void(&self) -> bool {
        super::markup::is_void_element(&self.name)
    }
}

/// The closed set of node kinds in a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Text(TextNode),
    Element(ElementNode),
    Comment(String),
}

impl NodeKind {
    pub fn as_text(&self) -> Option<&TextNode> {
        match self {
            NodeKind::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_element(&self) -> Option<&ElementNode> {
        match self {
            NodeKind::Element(element) => Some(element),
            _ => None,
        }
    }
}
