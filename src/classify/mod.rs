//! Structural classifier: columns → named cover zones.
//!
//! The classifier is a pure function of the column list and the trim box:
//!
//! 1. [`assemble_columns`] sorts the detected columns, collapses
//!    near-duplicates and adds the trim-box edges when no column sits near
//!    them.
//! 2. [`compute_intervals`] forms the spans between consecutive columns and
//!    drops slivers.
//! 3. A [`SpineStrategy`] picks the spine.
//! 4. Back and front cover are the intervals adjacent to the spine; any
//!    further intervals outward form the flaps, bounded by the outermost
//!    columns.
//!
//! Missing or ambiguous marks never fail: zones stay unset and a
//! [`DetectionWarning`] explains why.
pub mod options;
pub mod spine;

pub use options::{ClassifierOptions, SpineStrategy};
pub use spine::{SpinePick, SpineSearch};

use crate::types::{DetectionWarning, Interval, Rect, StructuralZone, ZoneMap};
use crate::units::{mm_to_pt, pt_to_mm};
use log::{debug, warn};
use serde::Serialize;

/// Full classifier output, including intermediate lists for diagnostics.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Classification {
    /// Strictly increasing columns, trim-box edges included when added.
    pub columns: Vec<f64>,
    pub intervals: Vec<Interval>,
    pub strategy: SpineStrategy,
    pub spine: SpineSearch,
    pub zones: ZoneMap,
    pub warnings: Vec<DetectionWarning>,
}

/// Sort `detected`, collapse columns no farther apart than `min_gap_pt` and
/// add the trim-box edges when they are farther than `edge_merge_pt` from the
/// outermost column.
pub fn assemble_columns(
    detected: &[f64],
    trim_box: &Rect,
    edge_merge_pt: f64,
    min_gap_pt: f64,
) -> Vec<f64> {
    let mut sorted: Vec<f64> = detected.iter().copied().filter(|v| v.is_finite()).collect();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let mut columns: Vec<f64> = Vec::with_capacity(sorted.len() + 2);
    let first = sorted.first().copied();
    let last = sorted.last().copied();
    if first.map_or(true, |x| (x - trim_box.x0).abs() > edge_merge_pt) {
        columns.push(trim_box.x0);
    }
    columns.extend(sorted);
    if last.map_or(true, |x| (x - trim_box.x1).abs() > edge_merge_pt) {
        columns.push(trim_box.x1);
    }
    columns.sort_by(|a, b| a.total_cmp(b));

    let mut out: Vec<f64> = Vec::with_capacity(columns.len());
    for x in columns {
        match out.last() {
            Some(&prev) if x - prev <= min_gap_pt => {}
            _ => out.push(x),
        }
    }
    out
}

/// Spans between consecutive columns wider than `min_interval_mm`.
pub fn compute_intervals(columns: &[f64], min_interval_mm: f64) -> Vec<Interval> {
    columns
        .windows(2)
        .map(|w| Interval::new(w[0], w[1]))
        .filter(|iv| iv.width_mm > min_interval_mm)
        .collect()
}

/// Classify detected columns into structural zones.
pub fn classify(detected: &[f64], trim_box: &Rect, opts: &ClassifierOptions) -> Classification {
    let columns = assemble_columns(
        detected,
        trim_box,
        opts.edge_merge_pt,
        mm_to_pt(opts.min_interval_mm),
    );
    let intervals = compute_intervals(&columns, opts.min_interval_mm);
    debug!(
        "classify columns={:?} intervals_mm={:?}",
        columns,
        intervals.iter().map(|iv| iv.width_mm).collect::<Vec<_>>()
    );

    let mut out = Classification {
        columns,
        intervals,
        strategy: opts.strategy,
        spine: SpineSearch::default(),
        zones: ZoneMap::default(),
        warnings: Vec::new(),
    };

    if out.intervals.len() < 2 {
        let warning = DetectionWarning::InsufficientMarks {
            columns: out.columns.len(),
            intervals: out.intervals.len(),
        };
        warn!("classify: {warning}");
        out.warnings.push(warning);
        return out;
    }

    out.spine = match opts.strategy {
        SpineStrategy::Narrowest => {
            spine::narrowest_central(&out.intervals, trim_box, opts.central_band_fraction)
        }
        SpineStrategy::Grouped {
            max_width_mm,
            band_fraction,
        } => spine::grouped_central(&out.intervals, trim_box, max_width_mm, band_fraction),
    };

    let Some(pick) = out.spine.pick else {
        let warning = DetectionWarning::NoCentralInterval {
            intervals: out.intervals.len(),
        };
        warn!("classify: {warning}");
        out.warnings.push(warning);
        return out;
    };

    if pick.tied > 1 {
        let warning = DetectionWarning::AmbiguousSpine {
            candidates: pick.tied,
            chosen_x0: pick.interval.x0,
        };
        warn!("classify: {warning}");
        out.warnings.push(warning);
    }

    out.zones = assign_zones(&out.columns, &out.intervals, &pick);
    debug!(
        "classify spine=({:.1},{:.1}) {:.1}mm zones={}",
        pick.interval.x0,
        pick.interval.x1,
        pick.interval.width_mm,
        out.zones.iter().count()
    );
    out
}

/// Adjacency assignment around the chosen spine.
fn assign_zones(columns: &[f64], intervals: &[Interval], pick: &SpinePick) -> ZoneMap {
    let mut zones = ZoneMap::default();
    zones.set(StructuralZone::Spine, pick.interval);

    if pick.first > 0 {
        let back = intervals[pick.first - 1];
        zones.set(StructuralZone::BackCover, back);
        if pick.first > 1 {
            if let Some(&left) = columns.first() {
                zones.set(StructuralZone::LeftFlap, Interval::new(left, back.x0));
            }
        }
    }

    if pick.last + 1 < intervals.len() {
        let front = intervals[pick.last + 1];
        zones.set(StructuralZone::FrontCover, front);
        if pick.last + 2 < intervals.len() {
            if let Some(&right) = columns.last() {
                zones.set(StructuralZone::RightFlap, Interval::new(front.x1, right));
            }
        }
    }
    zones
}

/// Width of every detected zone in millimetres, left to right.
pub fn zone_widths_mm(zones: &ZoneMap) -> Vec<(StructuralZone, f64)> {
    zones
        .iter()
        .map(|(zone, iv)| (zone, pt_to_mm(iv.width_pt())))
        .collect()
}
