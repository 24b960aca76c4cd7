//! Page-break search against the overflow oracle
//!
//! The first candidate end is `start + jump`, snapped forward to a word
//! boundary. While the fragment fits, the end moves out one word at a time;
//! once it overflows, the end moves back one word at a time until the
//! fragment fits again.

use crate::document::Document;
use crate::fragment::Fragment;
use crate::index::PositionIndex;
use crate::pagination::state::PageBreak;
use crate::surface::RenderSurface;

pub(crate) struct BreakSearch<'a, S: ?Sized> {
    document: &'a Document,
    index: &'a PositionIndex,
    surface: &'a mut S,
    probes: usize,
}

impl<'a, S: RenderSurface + ?Sized> BreakSearch<'a, S> {
    pub(crate) fn new(document: &'a Document, index: &'a PositionIndex, surface: &'a mut S) -> Self {
        Self {
            document,
            index,
            surface,
            probes: 0,
        }
    }

    /// Render `start..end` and ask whether it overflows
    fn probe(&mut self, start: usize, end: usize) -> bool {
        let fragment = Fragment::extract(self.document, self.index, start..end);
        self.surface.render(&fragment);
        self.probes += 1;
        let overflows = self.surface.overflows();
        log::trace!("probe {}..{} overflows={}", start, end, overflows);
        overflows
    }

    /// Find the end of the largest page starting at `start`
    ///
    /// `start` must be below `max_position`.
    pub(crate) fn find_break(mut self, start: usize, jump: usize) -> PageBreak {
        let max = self.index.max_position();
        let mut end = self
            .index
            .next_boundary(self.document, start.saturating_add(jump).min(max));
        let mut overflow = self.probe(start, end);
        let mut known_good: Option<usize> = None;

        // Expand
        while !overflow && end < max {
            known_good = Some(end);
            end = self.index.next_boundary(self.document, end + 1);
            overflow = self.probe(start, end);
        }

        // Contract
        while overflow {
            let candidate = self
                .index
                .previous_boundary(self.document, end - 1)
                .max(start);
            if candidate == start {
                break;
            }
            if let Some(good) = known_good.filter(|&good| candidate <= good) {
                end = good;
                overflow = false;
                break;
            }
            end = candidate;
            overflow = self.probe(start, end);
        }

        if !overflow {
            return PageBreak {
                start,
                end,
                probes: self.probes,
                overflowing: false,
            };
        }

        // Nothing past `start` fits: take the shortest run that makes progress
        let end = self.index.next_boundary(self.document, start + 1);
        log::warn!(
            "no fitting break after offset {}, page {}..{} overflows",
            start,
            start,
            end
        );
        PageBreak {
            start,
            end,
            probes: self.probes,
            overflowing: true,
        }
    }
}
