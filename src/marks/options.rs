//! Tunables for the mark detectors.
//!
//! Every threshold is a domain constant rather than a derived value; the
//! defaults match common prepress output (hairline trim marks a few
//! millimetres outside the trim box).
use serde::{Deserialize, Serialize};

/// Positional filter separating trim marks from unrelated vertical art.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "mode")]
pub enum PositionFilter {
    /// Keep candidates starting on the highest row of marks: `y0` within
    /// `tolerance_pt` of the global minimum (negative `y0` discarded first).
    #[serde(rename_all = "camelCase")]
    MinY { tolerance_pt: f64 },
    /// Keep candidates starting within `margin_pt` of the page top or ending
    /// within `margin_pt` of the page bottom.
    #[serde(rename_all = "camelCase")]
    MarginBand { margin_pt: f64 },
}

impl Default for PositionFilter {
    fn default() -> Self {
        PositionFilter::MinY { tolerance_pt: 2.0 }
    }
}

/// Registration-ink check on a path's stroke (else fill) colour.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InkFilter {
    /// CMYK paths pass when the component sum exceeds this (registration).
    pub cmyk_min_sum: f32,
    /// RGB paths pass when the component sum is below this (near black).
    pub rgb_max_sum: f32,
    /// Gray paths pass when the level is below this.
    pub gray_max: f32,
    /// Whether paths without any paint pass.
    pub allow_uncolored: bool,
}

impl Default for InkFilter {
    fn default() -> Self {
        Self {
            cmyk_min_sum: 3.0,
            rgb_max_sum: 0.2,
            gray_max: 0.2,
            allow_uncolored: true,
        }
    }
}

/// Vertical vector mark detection.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VectorMarkOptions {
    /// Candidates must be taller than this (points).
    pub min_height_pt: f64,
    /// Candidates must be narrower than this (points).
    pub max_width_pt: f64,
    pub filter: PositionFilter,
    /// Chaining tolerance when clustering x-centres (points).
    pub cluster_tolerance_pt: f64,
    /// Optional paint check, disabled when `None`.
    pub ink_filter: Option<InkFilter>,
}

impl Default for VectorMarkOptions {
    fn default() -> Self {
        Self {
            min_height_pt: 8.0,
            max_width_pt: 6.0,
            filter: PositionFilter::default(),
            cluster_tolerance_pt: 5.0,
            ink_filter: None,
        }
    }
}

/// Horizontal vector mark search used for the Y crop boundaries.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HorizontalMarkOptions {
    /// Candidates must be wider than this (points).
    pub min_width_pt: f64,
    /// Candidates must be shorter than this (points).
    pub max_height_pt: f64,
    /// Only paths starting within this distance of the left page edge count.
    pub scan_depth_pt: f64,
    /// Expected distance of the trim line from the page edge (mm).
    pub target_offset_mm: f64,
    /// Accept marks within this distance of the target (mm).
    pub search_tolerance_mm: f64,
}

impl Default for HorizontalMarkOptions {
    fn default() -> Self {
        Self {
            min_width_pt: 10.0,
            max_height_pt: 5.0,
            scan_depth_pt: 100.0,
            target_offset_mm: 15.0,
            search_tolerance_mm: 5.0,
        }
    }
}

/// Raster fallback detecting horizontal trim strokes in a left-edge strip.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RasterMarkOptions {
    /// Width of the scanned strip from the left page edge (mm).
    pub strip_width_mm: f64,
    /// Render resolution for the strip.
    pub dpi: f64,
    /// Pixels at or below this luminance count as ink.
    pub ink_threshold: u8,
    /// Length of the horizontal opening element (mm, ≈40 px at 300 DPI).
    pub opening_length_mm: f64,
    /// Strokes must be wider than this (mm, ≈30 px at 300 DPI).
    pub min_stroke_width_mm: f64,
    /// Fraction of the strip height forming the top and bottom bands.
    pub band_fraction: f64,
    /// Boundary offset from the page edge when a band has no stroke (mm).
    pub fallback_offset_mm: f64,
    /// Column scan: strokes must start within this distance of the highest
    /// stroke top (points).
    pub row_tolerance_pt: f64,
    /// Column scan: chaining tolerance for stroke x-centres (points).
    pub cluster_tolerance_pt: f64,
}

impl Default for RasterMarkOptions {
    fn default() -> Self {
        Self {
            strip_width_mm: 50.0,
            dpi: 300.0,
            ink_threshold: 200,
            opening_length_mm: 3.4,
            min_stroke_width_mm: 2.54,
            band_fraction: 0.25,
            fallback_offset_mm: 15.0,
            row_tolerance_pt: 2.0,
            cluster_tolerance_pt: 5.0,
        }
    }
}
