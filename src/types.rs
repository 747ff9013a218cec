use crate::units::pt_to_mm;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Axis-aligned rectangle in page points, y growing downwards.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl Rect {
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self { x0, y0, x1, y1 }
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }

    pub fn is_empty(&self) -> bool {
        !(self.width() > 0.0 && self.height() > 0.0)
    }
}

/// Page geometry as reported by the PDF collaborator.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageGeometry {
    pub width: f64,
    pub height: f64,
    pub trim_box: Rect,
    #[serde(default)]
    pub rotation: i32,
}

impl PageGeometry {
    /// Full page rectangle (media box in page space).
    pub fn page_rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }
}

/// Horizontal span between two consecutive columns.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Interval {
    pub x0: f64,
    pub x1: f64,
    pub width_mm: f64,
}

impl Interval {
    pub fn new(x0: f64, x1: f64) -> Self {
        Self {
            x0,
            x1,
            width_mm: pt_to_mm(x1 - x0),
        }
    }

    #[inline]
    pub fn width_pt(&self) -> f64 {
        self.x1 - self.x0
    }

    #[inline]
    pub fn midpoint(&self) -> f64 {
        0.5 * (self.x0 + self.x1)
    }
}

/// Named production zones of a combined cover page, left to right.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StructuralZone {
    LeftFlap,
    BackCover,
    Spine,
    FrontCover,
    RightFlap,
}

impl StructuralZone {
    pub const ALL: [StructuralZone; 5] = [
        StructuralZone::LeftFlap,
        StructuralZone::BackCover,
        StructuralZone::Spine,
        StructuralZone::FrontCover,
        StructuralZone::RightFlap,
    ];

    pub fn label(self) -> &'static str {
        match self {
            StructuralZone::LeftFlap => "left flap",
            StructuralZone::BackCover => "back cover",
            StructuralZone::Spine => "spine",
            StructuralZone::FrontCover => "front cover",
            StructuralZone::RightFlap => "right flap",
        }
    }
}

impl fmt::Display for StructuralZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Zone → interval assignment. An unset zone was not detected.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneMap {
    pub left_flap: Option<Interval>,
    pub back_cover: Option<Interval>,
    pub spine: Option<Interval>,
    pub front_cover: Option<Interval>,
    pub right_flap: Option<Interval>,
}

impl ZoneMap {
    pub fn get(&self, zone: StructuralZone) -> Option<&Interval> {
        match zone {
            StructuralZone::LeftFlap => self.left_flap.as_ref(),
            StructuralZone::BackCover => self.back_cover.as_ref(),
            StructuralZone::Spine => self.spine.as_ref(),
            StructuralZone::FrontCover => self.front_cover.as_ref(),
            StructuralZone::RightFlap => self.right_flap.as_ref(),
        }
    }

    pub fn set(&mut self, zone: StructuralZone, interval: Interval) {
        let slot = match zone {
            StructuralZone::LeftFlap => &mut self.left_flap,
            StructuralZone::BackCover => &mut self.back_cover,
            StructuralZone::Spine => &mut self.spine,
            StructuralZone::FrontCover => &mut self.front_cover,
            StructuralZone::RightFlap => &mut self.right_flap,
        };
        *slot = Some(interval);
    }

    /// Detected zones in left-to-right order.
    pub fn iter(&self) -> impl Iterator<Item = (StructuralZone, &Interval)> + '_ {
        StructuralZone::ALL
            .into_iter()
            .filter_map(move |zone| self.get(zone).map(|iv| (zone, iv)))
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}

/// Where a vertical crop boundary came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BoundaryOrigin {
    TrimBox,
    VectorMark,
    RasterMark,
    DefaultOffset,
}

/// Y-crop boundaries shared by every zone rectangle.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerticalBounds {
    pub y_top: f64,
    pub y_bottom: f64,
    pub top_origin: BoundaryOrigin,
    pub bottom_origin: BoundaryOrigin,
}

impl VerticalBounds {
    pub fn from_trim_box(trim_box: &Rect) -> Self {
        Self {
            y_top: trim_box.y0,
            y_bottom: trim_box.y1,
            top_origin: BoundaryOrigin::TrimBox,
            bottom_origin: BoundaryOrigin::TrimBox,
        }
    }

    pub fn height(&self) -> f64 {
        self.y_bottom - self.y_top
    }
}

/// Top or bottom band of the raster strip.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Band {
    Top,
    Bottom,
}

/// Recoverable geometric ambiguity recorded during one detection pass.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum DetectionWarning {
    /// Fewer than two usable intervals survived column assembly.
    InsufficientMarks { columns: usize, intervals: usize },
    /// No interval lies within the central band of the trim box.
    NoCentralInterval { intervals: usize },
    /// Several central intervals tie for narrowest; the first one won.
    AmbiguousSpine { candidates: usize, chosen_x0: f64 },
    /// No stroke survived in a raster band; a fixed offset was used.
    RasterFallbackMiss { band: Band, fallback_pt: f64 },
    /// No horizontal vector mark near the target; the target was used.
    VectorBoundaryMiss { band: Band, fallback_pt: f64 },
    /// Detected boundaries were inverted; the trim box was used instead.
    InvertedBounds { y_top: f64, y_bottom: f64 },
}

impl fmt::Display for DetectionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DetectionWarning::InsufficientMarks { columns, intervals } => write!(
                f,
                "insufficient trim marks: {columns} columns, {intervals} usable intervals"
            ),
            DetectionWarning::NoCentralInterval { intervals } => {
                write!(f, "none of {intervals} intervals lies in the central band")
            }
            DetectionWarning::AmbiguousSpine {
                candidates,
                chosen_x0,
            } => write!(
                f,
                "{candidates} central intervals tie for narrowest, chose x0={chosen_x0:.1}pt"
            ),
            DetectionWarning::RasterFallbackMiss { band, fallback_pt } => write!(
                f,
                "no raster stroke in {band:?} band, using {fallback_pt:.1}pt"
            ),
            DetectionWarning::VectorBoundaryMiss { band, fallback_pt } => write!(
                f,
                "no horizontal vector mark in {band:?} band, using {fallback_pt:.1}pt"
            ),
            DetectionWarning::InvertedBounds { y_top, y_bottom } => write!(
                f,
                "inverted bounds y_top={y_top:.1} y_bottom={y_bottom:.1}, using trim box"
            ),
        }
    }
}

/// Outcome of one detection pass over a single page.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionResult {
    /// Canonical columns (strictly increasing), trim-box edges included.
    pub columns: Vec<f64>,
    pub zones: ZoneMap,
    pub bounds: VerticalBounds,
    pub warnings: Vec<DetectionWarning>,
}

impl DetectionResult {
    /// Absolute crop rectangle of `zone`, if it was detected.
    pub fn zone_rect(&self, zone: StructuralZone) -> Option<Rect> {
        self.zones
            .get(zone)
            .map(|iv| Rect::new(iv.x0, self.bounds.y_top, iv.x1, self.bounds.y_bottom))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zone_map_iterates_left_to_right() {
        let mut zones = ZoneMap::default();
        zones.set(StructuralZone::FrontCover, Interval::new(200.0, 340.0));
        zones.set(StructuralZone::Spine, Interval::new(185.0, 200.0));
        let order: Vec<_> = zones.iter().map(|(z, _)| z).collect();
        assert_eq!(order, vec![StructuralZone::Spine, StructuralZone::FrontCover]);
        assert!(!zones.is_empty());
        assert!(ZoneMap::default().is_empty());
    }

    #[test]
    fn zone_rect_uses_vertical_bounds() {
        let mut zones = ZoneMap::default();
        zones.set(StructuralZone::Spine, Interval::new(10.0, 20.0));
        let result = DetectionResult {
            columns: vec![0.0, 10.0, 20.0, 30.0],
            zones,
            bounds: VerticalBounds::from_trim_box(&Rect::new(0.0, 5.0, 30.0, 95.0)),
            warnings: Vec::new(),
        };
        let rect = result.zone_rect(StructuralZone::Spine).unwrap();
        assert_eq!(rect, Rect::new(10.0, 5.0, 20.0, 95.0));
        assert!(result.zone_rect(StructuralZone::BackCover).is_none());
    }

    #[test]
    fn warnings_serialize_with_kind_tag() {
        let w = DetectionWarning::InsufficientMarks {
            columns: 2,
            intervals: 1,
        };
        let json = serde_json::to_string(&w).unwrap();
        assert!(json.contains("\"kind\":\"insufficientMarks\""), "{json}");
    }
}
