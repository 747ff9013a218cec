//! Error types for page-level failures.
//!
//! Only true I/O problems surface here. Geometric ambiguity (missing or
//! duplicated marks, raster misses) is resolved inside the detectors and
//! reported as [`DetectionWarning`](crate::types::DetectionWarning) values.

/// Result type alias for crate operations.
pub type Result<T> = std::result::Result<T, CoverError>;

#[derive(Debug, thiserror::Error)]
pub enum CoverError {
    /// Page geometry, vector data or raster content cannot be obtained.
    #[error("Input unavailable: {0}")]
    InputUnavailable(String),

    /// The renderer failed for a requested region.
    #[error("Rendering at {dpi} DPI failed: {reason}")]
    Render { dpi: f64, reason: String },

    /// A degenerate rectangle was requested.
    #[error("Invalid region: {0}")]
    InvalidRegion(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
