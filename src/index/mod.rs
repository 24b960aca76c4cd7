//! Positional index over text leaves

mod boundary;
mod position;

pub use boundary::is_break_char;
pub use position::{PositionEntry, PositionIndex};
