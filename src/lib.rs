//! Markup Pager: splits markup content into pages that fit a viewport
//!
//! The content is never reflowed. Instead the paginator:
//! - Indexes text leaves by character offset
//! - Cuts candidate ranges out of the tree as standalone fragments
//! - Asks a render surface whether each candidate overflows
//! - Remembers every page boundary it has found, optionally across sessions
//!
//! Pages are computed lazily, so opening page 3 of a long book only measures
//! the first three pages.

pub mod cache;
pub mod document;
mod error;
pub mod fragment;
pub mod index;
pub mod layout;
pub mod pagination;
pub mod surface;
pub mod wasm;

// Re-export WASM types for direct use
pub use wasm::{WasmMeasuredPaginator, WasmPaginator};

// Re-export primary types
pub use cache::{BoundaryCache, CachedBoundaries, MemoryCache};
pub use document::{Document, ElementNode, NodeId, NodeKind, TextNode};
pub use error::PaginationError;
pub use fragment::{Fragment, FragmentNode};
pub use index::{PositionEntry, PositionIndex};
pub use layout::{FontMetrics, MeasuredSurface, Viewport};
pub use pagination::{PageBoundaries, PageBreak, Paginator, PaginatorConfig};
pub use surface::RenderSurface;
