//! Spine selection strategies.
use crate::types::{Interval, Rect};
use serde::Serialize;

const WIDTH_EPS: f64 = 1e-6;

/// Chosen spine: the index range of merged intervals and their union.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpinePick {
    pub first: usize,
    pub last: usize,
    pub interval: Interval,
    /// Number of equally good choices; the first one was taken.
    pub tied: usize,
}

/// Candidates considered by a strategy and the pick, if any.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpineSearch {
    /// Indices of intervals that qualified as spine material.
    pub candidates: Vec<usize>,
    pub pick: Option<SpinePick>,
}

fn near_center(iv: &Interval, trim_box: &Rect, fraction: f64) -> bool {
    let center = 0.5 * (trim_box.x0 + trim_box.x1);
    (iv.midpoint() - center).abs() < trim_box.width() * fraction
}

/// Narrowest interval whose midpoint lies inside the central band.
/// Equal widths resolve to the leftmost.
pub fn narrowest_central(intervals: &[Interval], trim_box: &Rect, band_fraction: f64) -> SpineSearch {
    let candidates: Vec<usize> = intervals
        .iter()
        .enumerate()
        .filter(|(_, iv)| near_center(iv, trim_box, band_fraction))
        .map(|(i, _)| i)
        .collect();

    let mut best: Option<usize> = None;
    for &i in &candidates {
        if best.map_or(true, |b| intervals[i].width_pt() < intervals[b].width_pt() - WIDTH_EPS) {
            best = Some(i);
        }
    }
    let pick = best.map(|b| {
        let tied = candidates
            .iter()
            .filter(|&&i| (intervals[i].width_pt() - intervals[b].width_pt()).abs() <= WIDTH_EPS)
            .count();
        SpinePick {
            first: b,
            last: b,
            interval: intervals[b],
            tied,
        }
    });
    SpineSearch { candidates, pick }
}

/// Longest run of consecutive intervals that are near the centre and
/// narrower than `max_width_mm`; the run's union is the spine. Equal-length
/// runs resolve to the leftmost.
pub fn grouped_central(
    intervals: &[Interval],
    trim_box: &Rect,
    max_width_mm: f64,
    band_fraction: f64,
) -> SpineSearch {
    let qualifies: Vec<bool> = intervals
        .iter()
        .map(|iv| iv.width_mm < max_width_mm && near_center(iv, trim_box, band_fraction))
        .collect();
    let candidates: Vec<usize> = (0..intervals.len()).filter(|&i| qualifies[i]).collect();

    let mut runs: Vec<(usize, usize)> = Vec::new();
    let mut i = 0;
    while i < qualifies.len() {
        if !qualifies[i] {
            i += 1;
            continue;
        }
        let start = i;
        while i + 1 < qualifies.len() && qualifies[i + 1] {
            i += 1;
        }
        runs.push((start, i));
        i += 1;
    }

    let longest = runs.iter().map(|(a, b)| b - a + 1).max();
    let pick = longest.and_then(|len| {
        let tied = runs.iter().filter(|(a, b)| b - a + 1 == len).count();
        runs.iter().find(|(a, b)| b - a + 1 == len).map(|&(first, last)| SpinePick {
            first,
            last,
            interval: Interval::new(intervals[first].x0, intervals[last].x1),
            tied,
        })
    });
    SpineSearch { candidates, pick }
}
