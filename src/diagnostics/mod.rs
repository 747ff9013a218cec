//! Serializable diagnostics of a detection pass.
//!
//! `DetectionReport` is the main entry point returned by the detector,
//! bundling the `DetectionResult` with a `PipelineTrace` that records every
//! stage the pipeline executed. [`overlay`] draws a result onto a page
//! raster for visual inspection.

pub mod overlay;
pub mod pipeline;
pub mod timing;

pub use overlay::{render_overlay, OverlayLegend, OverlayStyle};
pub use pipeline::{ColumnStage, DetectionReport, InputDescriptor, PipelineTrace, VectorStage};
pub use timing::{StageTiming, TimingBreakdown};
