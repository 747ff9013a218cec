//! Parameter types configuring one detection pass.
//!
//! Every heuristic threshold lives in one of the option structs below and
//! can be overridden from JSON; nothing is read from process-wide state.

use crate::classify::ClassifierOptions;
use crate::marks::{HorizontalMarkOptions, RasterMarkOptions, VectorMarkOptions};
use serde::{Deserialize, Serialize};

/// Where the column candidates come from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ColumnSource {
    /// Vertical marks among the vector paths.
    #[default]
    Vector,
    /// Vertical strokes in a rendered strip along the top edge.
    Raster,
    /// Vector marks, replaced by the raster scan when fewer than two
    /// columns come out of the vector data.
    VectorThenRaster,
}

/// Where the Y crop boundaries come from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum VerticalBoundsSource {
    /// The trim box's own Y extent.
    #[default]
    TrimBox,
    /// Horizontal vector marks near the left page edge.
    VectorMarks,
    /// Horizontal strokes in a rendered left-edge strip.
    RasterMarks,
}

/// Detector-wide parameters.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CoverParams {
    pub column_source: ColumnSource,
    pub bounds_source: VerticalBoundsSource,
    pub vector: VectorMarkOptions,
    pub horizontal: HorizontalMarkOptions,
    pub raster: RasterMarkOptions,
    pub classifier: ClassifierOptions,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::SpineStrategy;
    use crate::marks::PositionFilter;

    #[test]
    fn partial_json_keeps_defaults() {
        let json = r#"{
            "boundsSource": "rasterMarks",
            "vector": { "filter": { "mode": "marginBand", "marginPt": 100.0 } },
            "classifier": { "strategy": { "kind": "grouped", "maxWidthMm": 25.0, "bandFraction": 0.2 } }
        }"#;
        let params: CoverParams = serde_json::from_str(json).unwrap();
        assert_eq!(params.bounds_source, VerticalBoundsSource::RasterMarks);
        assert_eq!(params.column_source, ColumnSource::Vector);
        assert_eq!(
            params.vector.filter,
            PositionFilter::MarginBand { margin_pt: 100.0 }
        );
        assert_eq!(params.vector.min_height_pt, 8.0);
        assert_eq!(params.raster.dpi, 300.0);
        assert_eq!(
            params.classifier.strategy,
            SpineStrategy::Grouped {
                max_width_mm: 25.0,
                band_fraction: 0.2
            }
        );
        assert_eq!(params.classifier.edge_merge_pt, 50.0);
    }
}
