//! Cover detector orchestrating one page end-to-end.
//!
//! Overview
//! - Collects column candidates from the vector paths (or the raster top
//!   strip) and clusters them.
//! - Classifies the columns into structural zones around the spine.
//! - Resolves the Y crop boundaries from the trim box, horizontal vector
//!   marks, or the raster left-edge strip.
//!
//! Modules
//! - [`params`] – configuration types used by the detector and CLI.
//! - `pipeline` – the [`CoverDetector`] implementation.

pub mod params;
mod pipeline;

pub use params::{ColumnSource, CoverParams, VerticalBoundsSource};
pub use pipeline::CoverDetector;
