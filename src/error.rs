//! Error type shared across the crate

use thiserror::Error;

/// Failures surfaced by construction and range queries
#[derive(Debug, Error)]
pub enum PaginationError {
    /// The document has no text leaves, so no offset is meaningful
    #[error("content has no text to paginate")]
    EmptyContent,

    #[error("initial jump must be a positive number of characters")]
    ZeroJump,

    #[error("offset {offset} is outside the content range 0..={max}")]
    OffsetOutOfRange { offset: usize, max: usize },

    #[error("range start {from} is past its end {to}")]
    InvertedRange { from: usize, to: usize },

    #[error("malformed markup: {0}")]
    Markup(#[from] quick_xml::Error),

    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
}
