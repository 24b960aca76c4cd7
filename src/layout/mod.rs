//! Headless measurement of fragments

mod block;
pub mod font;
mod line_break;
mod measure;

pub use block::BlockKind;
pub use font::FontMetrics;
pub use line_break::{LineBreaker, LineLayout};
pub use measure::{BlockLayout, MeasuredSurface, Viewport};
