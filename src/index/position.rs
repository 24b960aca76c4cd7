//! Flattened positions of text leaves and the offset resolver

use crate::document::{Document, NodeId, NodeKind};
use crate::PaginationError;
use rustc_hash::FxHashMap;

/// A text leaf together with the absolute offset of its first character
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionEntry {
    pub offset: usize,
    pub leaf: NodeId,
}

/// Document-order index of text leaves plus element ids
///
/// Entries are strictly increasing by offset and each one starts where the
/// previous leaf ends, so together they cover `0..max_position`.
#[derive(Debug, Clone)]
pub struct PositionIndex {
    entries: Vec<PositionEntry>,
    /// Element id -> offset of its first contained character
    ids: FxHashMap<String, usize>,
    max_position: usize,
}

impl PositionIndex {
    /// Walk the document once and record every leaf and id
    pub fn build(document: &Document) -> Result<Self, PaginationError> {
        let mut index = Self {
            entries: Vec::new(),
            ids: FxHashMap::default(),
            max_position: 0,
        };

        let end = document
            .children(document.root())
            .iter()
            .fold(0, |offset, &child| index.visit(document, child, offset));

        if index.entries.is_empty() {
            return Err(PaginationError::EmptyContent);
        }
        index.max_position = end;

        log::debug!(
            "indexed {} text leaves, {} ids, {} chars",
            index.entries.len(),
            index.ids.len(),
            end
        );

        Ok(index)
    }

    /// Record `node` at `offset` and return the offset following it
    fn visit(&mut self, document: &Document, node: NodeId, offset: usize) -> usize {
        match document.kind(node) {
            NodeKind::Text(text) => {
                // Empty leaves own no characters
                if text.is_empty() {
                    return offset;
                }
                self.entries.push(PositionEntry { offset, leaf: node });
                offset + text.len()
            }
            NodeKind::Element(element) => {
                if let Some(id) = element.id() {
                    self.ids.entry(id.to_string()).or_insert(offset);
                }
                document
                    .children(node)
                    .iter()
                    .fold(offset, |offset, &child| self.visit(document, child, offset))
            }
            NodeKind::Comment(_) => offset,
        }
    }

    pub fn entries(&self) -> &[PositionEntry] {
        &self.entries
    }

    /// Number of indexed leaves (never zero)
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Offset one past the last character
    pub fn max_position(&self) -> usize {
        self.max_position
    }

    /// Offset at which the element with `id` begins
    pub fn position_of_id(&self, id: &str) -> Option<usize> {
        self.ids.get(id).copied()
    }

    /// All recorded ids with their offsets, in no particular order
    pub fn ids(&self) -> impl Iterator<Item = (&str, usize)> + '_ {
        self.ids.iter().map(|(id, &offset)| (id.as_str(), offset))
    }

    /// Index of the last entry whose offset is not greater than `pos`
    ///
    /// Offsets past `max_position` are clamped to it.
    pub fn index_for_offset(&self, pos: usize) -> usize {
        let pos = pos.min(self.max_position);
        // entries[0].offset == 0, so at least one entry qualifies
        self.entries
            .partition_point(|entry| entry.offset <= pos)
            .saturating_sub(1)
    }

    /// Entry owning `pos`
    pub fn entry_for_offset(&self, pos: usize) -> PositionEntry {
        self.entries[self.index_for_offset(pos)]
    }

    /// Entry owning `pos` and the char offset of `pos` inside that leaf
    pub fn leaf_for_offset(&self, pos: usize) -> (PositionEntry, usize) {
        let pos = pos.min(self.max_position);
        let entry = self.entry_for_offset(pos);
        (entry, pos - entry.offset)
    }

    /// Entry whose content ends at or contains `pos`, and the local offset
    ///
    /// Unlike [`leaf_for_offset`](Self::leaf_for_offset), an offset sitting on
    /// a leaf edge resolves to the end of the earlier leaf. Range ends use this
    /// so a fragment never drags in an empty clone of the following element.
    pub fn leaf_ending_at(&self, pos: usize) -> (PositionEntry, usize) {
        let pos = pos.min(self.max_position);
        let i = self
            .entries
            .partition_point(|entry| entry.offset < pos)
            .saturating_sub(1);
        let entry = self.entries[i];
        (entry, pos - entry.offset)
    }

    /// Offset one past the last character of entry `i`
    pub fn leaf_end(&self, i: usize) -> usize {
        self.entries
            .get(i + 1)
            .map(|next| next.offset)
            .unwrap_or(self.max_position)
    }
}
