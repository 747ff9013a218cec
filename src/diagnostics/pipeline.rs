use crate::classify::{zone_widths_mm, Classification};
use crate::detector::ColumnSource;
use crate::diagnostics::TimingBreakdown;
use crate::marks::{
    CandidateStatus, HorizontalScan, RasterBoundsScan, RasterColumnScan, StrokeCandidate,
    VectorScan,
};
use crate::types::{DetectionResult, PageGeometry, Rect};
use crate::units::pt_to_mm;
use serde::Serialize;

/// Result produced by [`CoverDetector::process_with_diagnostics`](crate::CoverDetector).
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionReport {
    pub result: DetectionResult,
    pub trace: PipelineTrace,
}

/// Stage-by-stage record of one detection pass.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineTrace {
    pub input: InputDescriptor,
    pub timings: TimingBreakdown,
    pub columns: ColumnStage,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vector: Option<VectorStage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raster_columns: Option<RasterColumnScan>,
    pub classification: Classification,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub horizontal: Option<HorizontalScan>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raster_bounds: Option<RasterBoundsScan>,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputDescriptor {
    pub page_width: f64,
    pub page_height: f64,
    pub trim_box: Rect,
    pub rotation: i32,
    pub paths_total: usize,
}

impl InputDescriptor {
    pub fn new(page: &PageGeometry, paths_total: usize) -> Self {
        Self {
            page_width: page.width,
            page_height: page.height,
            trim_box: page.trim_box,
            rotation: page.rotation,
            paths_total,
        }
    }
}

/// Which source supplied the classified columns.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnStage {
    pub requested: ColumnSource,
    /// `Raster` when the raster scan replaced the vector columns.
    pub used: ColumnSource,
    pub detected: Vec<f64>,
}

/// Vertical vector mark scan with per-filter counts.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VectorStage {
    pub elapsed_ms: f64,
    pub paths_total: usize,
    pub shape_candidates: usize,
    pub rejected_ink: usize,
    pub rejected_position: usize,
    pub kept: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_y: Option<f64>,
    pub columns: Vec<f64>,
    pub candidates: Vec<StrokeCandidate>,
}

impl VectorStage {
    pub fn from_scan(scan: VectorScan, elapsed_ms: f64) -> Self {
        let rejected_ink = scan.count(CandidateStatus::RejectedInk);
        let kept = scan.kept();
        let shape_candidates = scan.candidates.len();
        Self {
            elapsed_ms,
            paths_total: scan.paths_total,
            shape_candidates,
            rejected_ink,
            rejected_position: shape_candidates - kept - rejected_ink,
            kept,
            min_y: scan.min_y,
            columns: scan.columns,
            candidates: scan.candidates,
        }
    }
}

impl DetectionReport {
    /// Human-readable summary printed by the demo binaries.
    pub fn print_text_summary(&self) {
        let res = &self.result;
        let trace = &self.trace;
        println!("Detection summary");
        println!(
            "  page: {:.1}x{:.1}pt ({:.1}x{:.1}mm), {} paths",
            trace.input.page_width,
            trace.input.page_height,
            pt_to_mm(trace.input.page_width),
            pt_to_mm(trace.input.page_height),
            trace.input.paths_total
        );
        if let Some(v) = &trace.vector {
            println!(
                "  vector marks: {} candidates, {} kept, {} rejected by ink, {} by position",
                v.shape_candidates, v.kept, v.rejected_ink, v.rejected_position
            );
        }
        if let Some(r) = &trace.raster_columns {
            println!(
                "  raster columns: {} strokes -> {} columns",
                r.strokes.len(),
                r.columns.len()
            );
        }
        println!("  columns ({:?}):", trace.columns.used);
        for (i, x) in res.columns.iter().enumerate() {
            println!("    {:>2}: {:8.1}pt ({:6.1}mm)", i + 1, x, pt_to_mm(*x));
        }
        println!("  spine strategy: {:?}", trace.classification.strategy);
        for (zone, width_mm) in zone_widths_mm(&res.zones) {
            if let Some(iv) = res.zones.get(zone) {
                println!(
                    "  {:<12} {:8.1} .. {:8.1}pt  {:6.1}mm",
                    zone.label(),
                    iv.x0,
                    iv.x1,
                    width_mm
                );
            }
        }
        println!(
            "  y bounds: {:.1} ({:?}) .. {:.1} ({:?})",
            res.bounds.y_top, res.bounds.top_origin, res.bounds.y_bottom, res.bounds.bottom_origin
        );
        for warning in &res.warnings {
            println!("  warning: {warning}");
        }
        println!("  total_ms: {:.3}", trace.timings.total_ms);
    }
}
