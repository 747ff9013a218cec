//! Trim-mark detection on the page's vector paths.
//!
//! Vertical trim marks are thin, tall rectangles. After the shape test an
//! optional ink check and one of two positional filters discard unrelated
//! vector art (registration crosses, borders, decorative rules), and the
//! surviving x-centres are clustered into columns.
//!
//! Horizontal marks near the left edge are searched separately to recover the
//! Y crop boundaries when the trim box is not trustworthy.
use super::cluster1d::cluster_centers;
use super::options::{HorizontalMarkOptions, InkFilter, PositionFilter, VectorMarkOptions};
use crate::page::{PathColor, VectorPath};
use crate::types::PageGeometry;
use crate::units::mm_to_pt;
use log::debug;
use serde::Serialize;

/// Why a shape-qualified candidate was kept or dropped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum CandidateStatus {
    Kept,
    RejectedInk,
    /// `y0` is negative (drawn outside the page).
    OutsidePage,
    /// Not on the highest row of marks.
    OffRow,
    /// Neither near the top nor near the bottom page edge.
    OutsideMargins,
}

/// A vertical stroke that passed the shape test.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StrokeCandidate {
    pub x: f64,
    pub y0: f64,
    pub y1: f64,
    pub width: f64,
    pub status: CandidateStatus,
}

/// Result of a vertical mark scan.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VectorScan {
    pub paths_total: usize,
    pub candidates: Vec<StrokeCandidate>,
    /// Global minimum `y0` used by the min-Y filter.
    pub min_y: Option<f64>,
    /// Clustered x positions of the kept candidates, ascending.
    pub columns: Vec<f64>,
}

impl VectorScan {
    pub fn kept(&self) -> usize {
        self.count(CandidateStatus::Kept)
    }

    pub fn count(&self, status: CandidateStatus) -> usize {
        self.candidates.iter().filter(|c| c.status == status).count()
    }
}

/// Whether `color` looks like registration or solid black ink.
pub fn is_registration_ink(color: Option<PathColor>, filter: &InkFilter) -> bool {
    match color {
        None => filter.allow_uncolored,
        Some(c @ PathColor::Cmyk(_)) => c.component_sum() > filter.cmyk_min_sum,
        Some(c @ PathColor::Rgb(_)) => c.component_sum() < filter.rgb_max_sum,
        Some(PathColor::Gray(g)) => g < filter.gray_max,
    }
}

/// Detect vertical trim marks and return their clustered x positions.
///
/// Never fails: no drawings or no surviving candidates yield an empty
/// column list.
pub fn detect_vertical_marks(
    paths: &[VectorPath],
    page: &PageGeometry,
    opts: &VectorMarkOptions,
) -> VectorScan {
    let mut candidates: Vec<StrokeCandidate> = paths
        .iter()
        .filter(|p| p.rect.height() > opts.min_height_pt && p.rect.width() < opts.max_width_pt)
        .map(|p| {
            let ink_ok = opts
                .ink_filter
                .as_ref()
                .map_or(true, |f| is_registration_ink(p.paint(), f));
            StrokeCandidate {
                x: p.rect.x0 + 0.5 * p.rect.width(),
                y0: p.rect.y0,
                y1: p.rect.y1,
                width: p.rect.width(),
                status: if ink_ok {
                    CandidateStatus::Kept
                } else {
                    CandidateStatus::RejectedInk
                },
            }
        })
        .collect();

    let min_y = match opts.filter {
        PositionFilter::MinY { tolerance_pt } => apply_min_y(&mut candidates, tolerance_pt),
        PositionFilter::MarginBand { margin_pt } => {
            apply_margin_band(&mut candidates, page.height, margin_pt);
            None
        }
    };

    let xs: Vec<f64> = candidates
        .iter()
        .filter(|c| c.status == CandidateStatus::Kept)
        .map(|c| c.x)
        .collect();
    let columns = cluster_centers(&xs, opts.cluster_tolerance_pt);

    debug!(
        "detect_vertical_marks paths={} candidates={} kept={} min_y={:?} columns={}",
        paths.len(),
        candidates.len(),
        xs.len(),
        min_y,
        columns.len()
    );

    VectorScan {
        paths_total: paths.len(),
        candidates,
        min_y,
        columns,
    }
}

fn apply_min_y(candidates: &mut [StrokeCandidate], tolerance_pt: f64) -> Option<f64> {
    for c in candidates.iter_mut() {
        if c.status == CandidateStatus::Kept && c.y0 < 0.0 {
            c.status = CandidateStatus::OutsidePage;
        }
    }
    let min_y = candidates
        .iter()
        .filter(|c| c.status == CandidateStatus::Kept)
        .map(|c| c.y0)
        .fold(None, |acc: Option<f64>, y| Some(acc.map_or(y, |m| m.min(y))))?;
    for c in candidates.iter_mut() {
        if c.status == CandidateStatus::Kept && c.y0 > min_y + tolerance_pt {
            c.status = CandidateStatus::OffRow;
        }
    }
    Some(min_y)
}

fn apply_margin_band(candidates: &mut [StrokeCandidate], page_height: f64, margin_pt: f64) {
    for c in candidates.iter_mut() {
        if c.status != CandidateStatus::Kept {
            continue;
        }
        let near_top = c.y0 < margin_pt;
        let near_bottom = c.y1 > page_height - margin_pt;
        if !(near_top || near_bottom) {
            c.status = CandidateStatus::OutsideMargins;
        }
    }
}

/// Horizontal marks found near the left page edge.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HorizontalScan {
    /// `y0` of every horizontal candidate inside the scan depth.
    pub candidates: Vec<f64>,
    pub target_top: f64,
    pub target_bottom: f64,
    pub top: Option<f64>,
    pub bottom: Option<f64>,
}

/// Locate the horizontal trim marks closest to the expected offsets from the
/// top and bottom page edges.
pub fn detect_horizontal_marks(
    paths: &[VectorPath],
    page: &PageGeometry,
    opts: &HorizontalMarkOptions,
) -> HorizontalScan {
    let candidates: Vec<f64> = paths
        .iter()
        .filter(|p| p.rect.width() > opts.min_width_pt && p.rect.height() < opts.max_height_pt)
        .filter(|p| p.rect.x0 < opts.scan_depth_pt)
        .map(|p| p.rect.y0)
        .collect();

    let offset = mm_to_pt(opts.target_offset_mm);
    let tol = mm_to_pt(opts.search_tolerance_mm);
    let target_top = offset;
    let target_bottom = page.height - offset;
    let top = closest_within(&candidates, target_top, tol);
    let bottom = closest_within(&candidates, target_bottom, tol);
    debug!(
        "detect_horizontal_marks candidates={} top={:?} bottom={:?}",
        candidates.len(),
        top,
        bottom
    );

    HorizontalScan {
        candidates,
        target_top,
        target_bottom,
        top,
        bottom,
    }
}

/// First value strictly closest to `target` with distance below `tol`.
fn closest_within(values: &[f64], target: f64, tol: f64) -> Option<f64> {
    let mut best: Option<(f64, f64)> = None;
    for &v in values {
        let dist = (v - target).abs();
        if dist < tol && best.map_or(true, |(d, _)| dist < d) {
            best = Some((dist, v));
        }
    }
    best.map(|(_, v)| v)
}
