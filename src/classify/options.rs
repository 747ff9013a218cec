use serde::{Deserialize, Serialize};

/// Rule used to pick the spine among the intervals.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum SpineStrategy {
    /// The narrowest interval inside the central band.
    Narrowest,
    /// The longest run of consecutive narrow intervals near the centre,
    /// merged into one spine. Used when marks subdivide the spine.
    #[serde(rename_all = "camelCase")]
    Grouped {
        /// Each interval of the run must be narrower than this (mm).
        max_width_mm: f64,
        /// Midpoints must lie within this fraction of the trim width from
        /// the centre.
        band_fraction: f64,
    },
}

impl Default for SpineStrategy {
    fn default() -> Self {
        SpineStrategy::Narrowest
    }
}

impl SpineStrategy {
    pub fn grouped() -> Self {
        SpineStrategy::Grouped {
            max_width_mm: 30.0,
            band_fraction: 0.25,
        }
    }
}

/// Structural classifier tunables.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClassifierOptions {
    /// Trim-box edges are added as columns only when farther than this from
    /// the outermost detected column (points).
    pub edge_merge_pt: f64,
    /// Intervals up to this width are noise (mm).
    pub min_interval_mm: f64,
    /// Central band half-width as a fraction of the trim width.
    pub central_band_fraction: f64,
    pub strategy: SpineStrategy,
}

impl Default for ClassifierOptions {
    fn default() -> Self {
        Self {
            edge_merge_pt: 50.0,
            min_interval_mm: 1.0,
            central_band_fraction: 0.40,
            strategy: SpineStrategy::Narrowest,
        }
    }
}
