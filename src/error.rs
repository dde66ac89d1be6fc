//! Error type shared by the filter catalog, session and codec boundary.

use thiserror::Error;

/// Top-level error type for all filter_lab operations.
#[derive(Debug, Error)]
pub enum FilterError {
    // -- Input validation --
    #[error("invalid input raster: expected (height, width, 3) with non-zero size, got {shape:?}")]
    InvalidInput { shape: Vec<usize> },

    #[error("degenerate intensity range: low percentile {lo} >= high percentile {hi}")]
    DegenerateRange { lo: f64, hi: f64 },

    // -- Catalog / session --
    #[error("unknown filter: {0}")]
    UnknownFilter(String),

    #[error("no image loaded")]
    NoImage,

    // -- Codec boundary --
    #[error("failed to decode image: {0}")]
    Decode(#[source] image::ImageError),

    #[error("failed to encode image: {0}")]
    Encode(#[source] image::ImageError),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, FilterError>;
