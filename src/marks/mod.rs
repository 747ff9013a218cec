//! Trim-mark detection.
//!
//! Modules
//! - [`cluster1d`] – chained 1D clustering of near-duplicate coordinates.
//! - [`vector`] – vertical (and horizontal) marks from the vector path list.
//! - [`raster`] – raster fallback: `imageproc` threshold and contours around
//!   the line opening in [`morphology`].
//! - [`options`] – the tunables of every detector.
pub mod cluster1d;
pub mod morphology;
pub mod options;
pub mod raster;
pub mod vector;

pub use cluster1d::{cluster_1d, cluster_centers, Cluster};
pub use options::{
    HorizontalMarkOptions, InkFilter, PositionFilter, RasterMarkOptions, VectorMarkOptions,
};
pub use raster::{
    analyze_bounds_strip, analyze_column_strip, detect_raster_columns, detect_vertical_bounds,
    external_boxes, ink_mask, BlobBox, RasterBoundsScan, RasterColumnScan, RasterStroke,
};
pub use vector::{
    detect_horizontal_marks, detect_vertical_marks, CandidateStatus, HorizontalScan,
    StrokeCandidate, VectorScan,
};
