//! Word boundaries around an offset
//!
//! Scans never leave the leaf that owns the offset: when a leaf has no
//! whitespace in the scanned direction, its own edge is the boundary.

use super::PositionIndex;
use crate::document::Document;

/// Characters a page may be cut before
pub fn is_break_char(c: char) -> bool {
    c.is_ascii_whitespace()
}

impl PositionIndex {
    /// First boundary at or after `pos`
    pub fn next_boundary(&self, document: &Document, pos: usize) -> usize {
        let pos = pos.min(self.max_position());
        let i = self.index_for_offset(pos);
        let entry = self.entries()[i];
        let leaf_end = self.leaf_end(i);

        let Some(text) = document.text(entry.leaf) else {
            return leaf_end;
        };

        text.chars_from(pos - entry.offset)
            .find(|&(_, c)| is_break_char(c))
            .map(|(local, _)| entry.offset + local)
            .unwrap_or(leaf_end)
    }

    /// Last boundary at or before `pos`
    pub fn previous_boundary(&self, document: &Document, pos: usize) -> usize {
        let pos = pos.min(self.max_position());
        let entry = self.entry_for_offset(pos);

        let Some(text) = document.text(entry.leaf) else {
            return entry.offset;
        };

        // The char at `pos` itself is included
        let upto = (pos - entry.offset + 1).min(text.len());
        text.chars_before(upto)
            .find(|&(_, c)| is_break_char(c))
            .map(|(local, _)| entry.offset + local)
            .unwrap_or(entry.offset)
    }
}
