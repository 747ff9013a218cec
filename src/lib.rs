#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod classify;
pub mod detector;
pub mod diagnostics;
pub mod error;
pub mod export;
pub mod page;
pub mod types;
pub mod units;

// Building blocks: still public, mostly useful for tools and tests.
pub mod config;
pub mod image;
pub mod marks;

// --- High-level re-exports -------------------------------------------------

// Main entry points: detector + results.
pub use crate::detector::{ColumnSource, CoverDetector, CoverParams, VerticalBoundsSource};
pub use crate::error::{CoverError, Result};
pub use crate::types::{DetectionResult, DetectionWarning, Interval, StructuralZone, ZoneMap};

// High-level diagnostics returned by the detector.
pub use crate::diagnostics::{DetectionReport, PipelineTrace};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use cover_marks::prelude::*;
///
/// # fn main() -> cover_marks::Result<()> {
/// let page = PageDescription::load(std::path::Path::new("cover.json"))?;
/// let raster = RasterPage::load(std::path::Path::new("cover.png"), 300.0)?;
/// let result = CoverDetector::new(CoverParams::default()).process(&page, &raster)?;
/// if let Some(spine) = result.zones.get(StructuralZone::Spine) {
///     println!("spine {:.1}mm", spine.width_mm);
/// }
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::classify::{ClassifierOptions, SpineStrategy};
    pub use crate::export::{export_regions, ExportOptions, ExportSelection};
    pub use crate::page::{PageDescription, PageRenderer, PageSource, RasterPage};
    pub use crate::{CoverDetector, CoverParams, DetectionResult, StructuralZone};
}
