//! Committed page boundaries and the adaptive jump hint

use crate::cache::{CachedBoundaries, CACHE_VERSION};
use rustc_hash::FxHashSet;
use std::ops::Range;

/// Result of one page-break search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageBreak {
    /// Offset the page starts at
    pub start: usize,
    /// Exclusive end offset, always greater than `start`
    pub end: usize,
    /// Oracle queries spent finding it
    pub probes: usize,
    /// The page could not be made to fit and overflows the viewport
    pub overflowing: bool,
}

impl PageBreak {
    pub fn width(&self) -> usize {
        self.end - self.start
    }
}

/// Append-only list of page start offsets
///
/// `offsets[k]` is where page `k + 1` starts and `offsets[k + 1]` where it
/// ends. The list starts with `0` and is strictly increasing.
#[derive(Debug, Clone)]
pub struct PageBoundaries {
    offsets: Vec<usize>,
    jump: usize,
    /// 1-based numbers of pages that overflow the viewport
    overflowing: FxHashSet<usize>,
    max_position: usize,
}

impl PageBoundaries {
    pub fn new(max_position: usize, jump: usize) -> Self {
        Self {
            offsets: vec![0],
            jump: jump.max(1),
            overflowing: FxHashSet::default(),
            max_position,
        }
    }

    /// Restore from a cache record already checked with
    /// [`CachedBoundaries::is_valid_for`]
    pub fn from_cached(record: CachedBoundaries) -> Self {
        Self {
            offsets: record.boundaries,
            jump: record.jump.max(1),
            overflowing: record.overflowing.into_iter().collect(),
            max_position: record.max_position,
        }
    }

    pub fn to_cached(&self) -> CachedBoundaries {
        let mut overflowing: Vec<_> = self.overflowing.iter().copied().collect();
        overflowing.sort_unstable();
        CachedBoundaries {
            version: CACHE_VERSION,
            max_position: self.max_position,
            jump: self.jump,
            boundaries: self.offsets.clone(),
            overflowing,
            surface: None,
        }
    }

    pub fn offsets(&self) -> &[usize] {
        &self.offsets
    }

    /// Start of the first page not computed yet
    pub fn last(&self) -> usize {
        self.offsets.last().copied().unwrap_or(0)
    }

    pub fn max_position(&self) -> usize {
        self.max_position
    }

    /// Whether every page has been computed
    pub fn is_exhausted(&self) -> bool {
        self.last() == self.max_position
    }

    /// Exact number of pages committed so far
    pub fn computed_pages(&self) -> usize {
        self.offsets.len() - 1
    }

    /// Exact count once exhausted, otherwise `max_position / jump` rounded
    pub fn estimated_pages(&self) -> usize {
        if self.is_exhausted() {
            return self.computed_pages();
        }
        (self.max_position as f64 / self.jump as f64).round() as usize
    }

    pub fn jump(&self) -> usize {
        self.jump
    }

    pub fn set_jump(&mut self, jump: usize) {
        self.jump = jump.max(1);
    }

    /// Offsets of committed page `n` (1-based)
    pub fn page_range(&self, n: usize) -> Option<Range<usize>> {
        if n == 0 || n > self.computed_pages() {
            return None;
        }
        Some(self.offsets[n - 1]..self.offsets[n])
    }

    /// Append the page found by a search starting at [`last`](Self::last)
    pub fn commit(&mut self, page: PageBreak) {
        if page.start != self.last() || page.end <= page.start || page.end > self.max_position {
            log::warn!(
                "rejecting page {}..{} after boundary {}",
                page.start,
                page.end,
                self.last()
            );
            return;
        }
        self.offsets.push(page.end);
        if page.overflowing {
            self.overflowing.insert(self.computed_pages());
        }
    }

    /// Committed page holding `pos`, if known yet
    pub fn page_containing(&self, pos: usize) -> Option<usize> {
        if pos >= self.last() {
            // The end of content belongs to the final page
            return (self.is_exhausted() && pos == self.max_position && self.computed_pages() > 0)
                .then(|| self.computed_pages());
        }
        Some(self.offsets.partition_point(|&start| start <= pos))
    }

    pub fn is_overflowing(&self, n: usize) -> bool {
        self.overflowing.contains(&n)
    }
}
