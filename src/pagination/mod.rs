//! Lazy pagination of a document against a render surface

mod search;
mod state;

pub use state::{PageBoundaries, PageBreak};

use crate::cache::{BoundaryCache, CachedBoundaries};
use crate::document::Document;
use crate::fragment::Fragment;
use crate::index::{PositionEntry, PositionIndex};
use crate::surface::RenderSurface;
use crate::PaginationError;
use search::BreakSearch;
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Default first guess at a page width, in characters
pub const DEFAULT_INITIAL_JUMP: usize = 1000;

/// Paginator settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PaginatorConfig {
    /// Characters the first page-break search jumps ahead by
    pub initial_jump: usize,
    /// Key boundaries are cached under; derived from the content and the
    /// surface geometry when unset
    pub cache_key: Option<String>,
}

impl Default for PaginatorConfig {
    fn default() -> Self {
        Self {
            initial_jump: DEFAULT_INITIAL_JUMP,
            cache_key: None,
        }
    }
}

impl PaginatorConfig {
    pub fn with_initial_jump(initial_jump: usize) -> Self {
        Self {
            initial_jump,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), PaginationError> {
        if self.initial_jump == 0 {
            return Err(PaginationError::ZeroJump);
        }
        Ok(())
    }
}

/// Splits a document into pages that fit a render surface
///
/// Pages are computed on demand and remembered: asking for page `n` computes
/// every page up to `n` that is not known yet, asking again is a lookup plus
/// one render.
pub struct Paginator<S: RenderSurface> {
    document: Document,
    index: PositionIndex,
    surface: S,
    state: PageBoundaries,
    cache: Option<Box<dyn BoundaryCache>>,
    cache_key: String,
    surface_tag: Option<String>,
}

impl<S: RenderSurface> Paginator<S> {
    /// Index `document` for pagination on `surface`
    pub fn new(
        document: Document,
        surface: S,
        config: PaginatorConfig,
    ) -> Result<Self, PaginationError> {
        Self::build(document, surface, config, None)
    }

    /// Like [`new`](Self::new), restoring and persisting boundaries in `cache`
    pub fn with_cache(
        document: Document,
        surface: S,
        config: PaginatorConfig,
        cache: Box<dyn BoundaryCache>,
    ) -> Result<Self, PaginationError> {
        Self::build(document, surface, config, Some(cache))
    }

    /// Parse `markup` and index it
    pub fn from_markup(
        markup: &str,
        surface: S,
        config: PaginatorConfig,
    ) -> Result<Self, PaginationError> {
        Self::new(Document::parse(markup)?, surface, config)
    }

    fn build(
        document: Document,
        surface: S,
        config: PaginatorConfig,
        cache: Option<Box<dyn BoundaryCache>>,
    ) -> Result<Self, PaginationError> {
        config.validate()?;
        let index = PositionIndex::build(&document)?;
        let surface_tag = surface.cache_tag();
        let cache_key = config.cache_key.unwrap_or_else(|| {
            let key = format!("markup-pager:{:016x}", document.content_hash());
            match &surface_tag {
                Some(tag) => format!("{key}:{tag}"),
                None => key,
            }
        });

        let mut state = PageBoundaries::new(index.max_position(), config.initial_jump);
        if let Some(restored) = cache.as_deref().and_then(|cache| {
            restore(cache, &cache_key, index.max_position(), surface_tag.as_deref())
        }) {
            state = restored;
        }

        Ok(Self {
            document,
            index,
            surface,
            state,
            cache,
            cache_key,
            surface_tag,
        })
    }

    /// Markup of page `n` (1-based), rendered on the surface
    ///
    /// The markup is what the surface reports through
    /// [`RenderSurface::rendered_markup`], or the serialized fragment when the
    /// surface does not report any. `None` for `n == 0` and for pages past
    /// the end of content.
    pub fn get_page(&mut self, n: usize) -> Option<String> {
        let range = self.page_range(n)?;
        Some(self.materialize(range))
    }

    /// Offsets of page `n`, computing pages up to it if needed
    pub fn page_range(&mut self, n: usize) -> Option<Range<usize>> {
        if n == 0 {
            return None;
        }
        self.extend_until(|state| state.computed_pages() >= n);
        self.state.page_range(n)
    }

    /// Page count, estimated from the jump hint until every page is known
    pub fn pages_number(&self) -> usize {
        self.state.estimated_pages()
    }

    /// Number of pages computed so far
    pub fn computed_pages_number(&self) -> usize {
        self.state.computed_pages()
    }

    /// Compute every remaining page and return the exact page count
    pub fn paginate_all(&mut self) -> usize {
        self.extend_until(|_| false);
        self.state.computed_pages()
    }

    /// Leaf owning `pos` and the offset that leaf starts at
    pub fn get_element_for_position(&self, pos: usize) -> PositionEntry {
        self.index.entry_for_offset(pos)
    }

    /// Markup between two offsets, rendered on the surface
    pub fn get_content_from_range(&mut self, from: usize, to: usize) -> Result<String, PaginationError> {
        let max = self.index.max_position();
        for offset in [from, to] {
            if offset > max {
                return Err(PaginationError::OffsetOutOfRange { offset, max });
            }
        }
        if from > to {
            return Err(PaginationError::InvertedRange { from, to });
        }
        Ok(self.materialize(from..to))
    }

    /// Search the end of the page starting at `start` and adopt its width as
    /// the new jump hint. Nothing is committed.
    ///
    /// `None` when `start` is at or past the end of content.
    pub fn find_break(&mut self, start: usize) -> Option<PageBreak> {
        if start >= self.index.max_position() {
            return None;
        }
        let page = BreakSearch::new(&self.document, &self.index, &mut self.surface)
            .find_break(start, self.state.jump());
        self.state.set_jump(page.width());
        Some(page)
    }

    /// Page holding `pos` (1-based), computing pages up to it if needed
    pub fn page_for_offset(&mut self, pos: usize) -> Option<usize> {
        if pos > self.index.max_position() {
            return None;
        }
        self.extend_until(|state| state.page_containing(pos).is_some());
        self.state.page_containing(pos)
    }

    /// Page on which the element with `id` begins
    pub fn page_for_id(&mut self, id: &str) -> Option<usize> {
        let pos = self.index.position_of_id(id)?;
        self.page_for_offset(pos)
    }

    pub fn position_of_id(&self, id: &str) -> Option<usize> {
        self.index.position_of_id(id)
    }

    /// Committed boundaries, starting with 0
    pub fn boundaries(&self) -> &[usize] {
        self.state.offsets()
    }

    /// Current jump hint
    pub fn jump(&self) -> usize {
        self.state.jump()
    }

    /// Whether every page has been computed
    pub fn is_exhausted(&self) -> bool {
        self.state.is_exhausted()
    }

    /// Whether page `n` had to be cut wider than the viewport
    pub fn is_page_overflowing(&self, n: usize) -> bool {
        self.state.is_overflowing(n)
    }

    pub fn max_position(&self) -> usize {
        self.index.max_position()
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn index(&self) -> &PositionIndex {
        &self.index
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn cache_key(&self) -> &str {
        &self.cache_key
    }

    fn materialize(&mut self, range: Range<usize>) -> String {
        let fragment = Fragment::extract(&self.document, &self.index, range);
        self.surface.render(&fragment);
        self.surface
            .rendered_markup()
            .unwrap_or_else(|| fragment.to_markup())
    }

    /// Commit pages until `done` holds or content runs out
    fn extend_until(&mut self, done: impl Fn(&PageBoundaries) -> bool) {
        let before = self.state.computed_pages();

        while !done(&self.state) && !self.state.is_exhausted() {
            let Some(page) = self.find_break(self.state.last()) else {
                break;
            };
            self.state.commit(page);
            log::debug!(
                "page {} spans {}..{} after {} probes",
                self.state.computed_pages(),
                page.start,
                page.end,
                page.probes
            );
        }

        if self.state.computed_pages() != before {
            self.store();
        }
    }

    fn store(&mut self) {
        let Some(cache) = self.cache.as_deref_mut() else {
            return;
        };
        let mut record = self.state.to_cached();
        record.surface = self.surface_tag.clone();
        match serde_json::to_string(&record) {
            Ok(value) => cache.set(&self.cache_key, &value),
            Err(err) => log::warn!("could not serialize page boundaries: {}", err),
        }
    }
}

fn restore(
    cache: &dyn BoundaryCache,
    key: &str,
    max_position: usize,
    surface: Option<&str>,
) -> Option<PageBoundaries> {
    let raw = cache.get(key)?;
    let record: CachedBoundaries = match serde_json::from_str(&raw) {
        Ok(record) => record,
        Err(err) => {
            log::debug!("ignoring unreadable cache entry {}: {}", key, err);
            return None;
        }
    };
    if !record.is_valid_for(max_position, surface) {
        log::debug!("ignoring stale cache entry {}", key);
        return None;
    }
    log::debug!(
        "restored {} page boundaries from cache entry {}",
        record.boundaries.len() - 1,
        key
    );
    Some(PageBoundaries::from_cached(record))
}
