//! Detector pipeline driving one cover page end-to-end.
//!
//! Typical usage:
//! ```no_run
//! use cover_marks::page::{PageDescription, RasterPage};
//! use cover_marks::{CoverDetector, CoverParams};
//! use std::path::Path;
//!
//! # fn example() -> cover_marks::Result<()> {
//! let page = PageDescription::load(Path::new("cover.json"))?;
//! let raster = RasterPage::load(Path::new("cover.png"), 150.0)?;
//! let detector = CoverDetector::new(CoverParams::default());
//! let report = detector.process_with_diagnostics(&page, &raster)?;
//! for (zone, iv) in report.result.zones.iter() {
//!     println!("{zone}: {:.1}mm", iv.width_mm);
//! }
//! # Ok(())
//! # }
//! ```
use super::params::{ColumnSource, CoverParams, VerticalBoundsSource};
use crate::classify::{classify, Classification};
use crate::diagnostics::timing::elapsed_ms;
use crate::diagnostics::{
    ColumnStage, DetectionReport, InputDescriptor, PipelineTrace, TimingBreakdown, VectorStage,
};
use crate::error::Result;
use crate::marks::{
    detect_horizontal_marks, detect_raster_columns, detect_vertical_bounds,
    detect_vertical_marks, HorizontalScan, RasterBoundsScan, RasterColumnScan,
};
use crate::page::{PageRenderer, PageSource, VectorPath};
use crate::types::{
    Band, BoundaryOrigin, DetectionResult, DetectionWarning, PageGeometry, VerticalBounds,
};
use log::{debug, warn};
use std::time::Instant;

/// Cover detector. Holds only its parameters, so one instance can serve
/// any number of pages, also from several threads.
#[derive(Clone, Debug, Default)]
pub struct CoverDetector {
    params: CoverParams,
}

struct ColumnOutcome {
    stage: ColumnStage,
    vector: Option<VectorStage>,
    raster: Option<RasterColumnScan>,
}

struct BoundsOutcome {
    bounds: VerticalBounds,
    warnings: Vec<DetectionWarning>,
    horizontal: Option<HorizontalScan>,
    raster: Option<RasterBoundsScan>,
}

impl CoverDetector {
    pub fn new(params: CoverParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &CoverParams {
        &self.params
    }

    /// Run detection on one page, returning the compact result.
    pub fn process<S, R>(&self, source: &S, renderer: &R) -> Result<DetectionResult>
    where
        S: PageSource + ?Sized,
        R: PageRenderer + ?Sized,
    {
        Ok(self.process_with_diagnostics(source, renderer)?.result)
    }

    /// Run detection and return the result with a stage-by-stage trace.
    ///
    /// Only failures to obtain the page (geometry, drawings, rasters) are
    /// errors. Missing or ambiguous marks end up as warnings.
    pub fn process_with_diagnostics<S, R>(&self, source: &S, renderer: &R) -> Result<DetectionReport>
    where
        S: PageSource + ?Sized,
        R: PageRenderer + ?Sized,
    {
        let total_start = Instant::now();
        let mut timings = TimingBreakdown::default();

        let page = source.geometry()?;
        let drawings = source.drawings()?;
        debug!(
            "CoverDetector::process page={:.1}x{:.1} trim=({:.1},{:.1})-({:.1},{:.1}) paths={}",
            page.width,
            page.height,
            page.trim_box.x0,
            page.trim_box.y0,
            page.trim_box.x1,
            page.trim_box.y1,
            drawings.len()
        );

        let columns = self.collect_columns(&page, &drawings, renderer, &mut timings)?;
        let classification = timings.time("classify", || {
            self.classify_columns(&columns.stage.detected, &page)
        });
        let bounds_start = Instant::now();
        let bounds = self.resolve_bounds(&page, &drawings, renderer)?;
        timings.push("verticalBounds", elapsed_ms(bounds_start));

        let mut warnings = classification.warnings.clone();
        warnings.extend(bounds.warnings.iter().cloned());

        let result = DetectionResult {
            columns: classification.columns.clone(),
            zones: classification.zones.clone(),
            bounds: bounds.bounds,
            warnings,
        };
        timings.total_ms = elapsed_ms(total_start);
        debug!(
            "CoverDetector::process done zones={} warnings={} total_ms={:.3}",
            result.zones.iter().count(),
            result.warnings.len(),
            timings.total_ms
        );

        Ok(DetectionReport {
            result,
            trace: PipelineTrace {
                input: InputDescriptor::new(&page, drawings.len()),
                timings,
                columns: columns.stage,
                vector: columns.vector,
                raster_columns: columns.raster,
                classification,
                horizontal: bounds.horizontal,
                raster_bounds: bounds.raster,
            },
        })
    }

    /// Classify an externally supplied column list against `page`'s trim box.
    pub fn classify_columns(&self, columns: &[f64], page: &PageGeometry) -> Classification {
        classify(columns, &page.trim_box, &self.params.classifier)
    }

    fn collect_columns<R: PageRenderer + ?Sized>(
        &self,
        page: &PageGeometry,
        drawings: &[VectorPath],
        renderer: &R,
        timings: &mut TimingBreakdown,
    ) -> Result<ColumnOutcome> {
        let requested = self.params.column_source;
        let mut vector = None;
        let mut used = requested;
        let mut detected = Vec::new();

        if matches!(requested, ColumnSource::Vector | ColumnSource::VectorThenRaster) {
            let start = Instant::now();
            let scan = detect_vertical_marks(drawings, page, &self.params.vector);
            let ms = elapsed_ms(start);
            timings.push("vectorMarks", ms);
            detected = scan.columns.clone();
            vector = Some(VectorStage::from_scan(scan, ms));
        }

        let needs_raster = match requested {
            ColumnSource::Raster => true,
            ColumnSource::VectorThenRaster => detected.len() < 2,
            ColumnSource::Vector => false,
        };
        let mut raster = None;
        if needs_raster {
            if requested == ColumnSource::VectorThenRaster {
                debug!(
                    "CoverDetector::process vector columns={} -> raster column scan",
                    detected.len()
                );
            }
            let scan = detect_raster_columns(renderer, page, &self.params.raster)?;
            timings.push("rasterColumns", scan.elapsed_ms);
            detected = scan.columns.clone();
            used = ColumnSource::Raster;
            raster = Some(scan);
        } else if requested == ColumnSource::VectorThenRaster {
            used = ColumnSource::Vector;
        }

        Ok(ColumnOutcome {
            stage: ColumnStage {
                requested,
                used,
                detected,
            },
            vector,
            raster,
        })
    }

    fn resolve_bounds<R: PageRenderer + ?Sized>(
        &self,
        page: &PageGeometry,
        drawings: &[VectorPath],
        renderer: &R,
    ) -> Result<BoundsOutcome> {
        let mut out = BoundsOutcome {
            bounds: VerticalBounds::from_trim_box(&page.trim_box),
            warnings: Vec::new(),
            horizontal: None,
            raster: None,
        };

        match self.params.bounds_source {
            VerticalBoundsSource::TrimBox => {}
            VerticalBoundsSource::VectorMarks => {
                let scan = detect_horizontal_marks(drawings, page, &self.params.horizontal);
                let (y_top, top_origin) = match scan.top {
                    Some(y) => (y, BoundaryOrigin::VectorMark),
                    None => {
                        warn!("vector bounds: no horizontal mark near {:.1}pt", scan.target_top);
                        out.warnings.push(DetectionWarning::VectorBoundaryMiss {
                            band: Band::Top,
                            fallback_pt: scan.target_top,
                        });
                        (scan.target_top, BoundaryOrigin::DefaultOffset)
                    }
                };
                let (y_bottom, bottom_origin) = match scan.bottom {
                    Some(y) => (y, BoundaryOrigin::VectorMark),
                    None => {
                        warn!("vector bounds: no horizontal mark near {:.1}pt", scan.target_bottom);
                        out.warnings.push(DetectionWarning::VectorBoundaryMiss {
                            band: Band::Bottom,
                            fallback_pt: scan.target_bottom,
                        });
                        (scan.target_bottom, BoundaryOrigin::DefaultOffset)
                    }
                };
                out.bounds = VerticalBounds {
                    y_top,
                    y_bottom,
                    top_origin,
                    bottom_origin,
                };
                out.horizontal = Some(scan);
            }
            VerticalBoundsSource::RasterMarks => {
                let scan = detect_vertical_bounds(renderer, page, &self.params.raster)?;
                for band in [Band::Top, Band::Bottom] {
                    if scan.missed(band) {
                        let fallback_pt = match band {
                            Band::Top => scan.y_top,
                            Band::Bottom => scan.y_bottom,
                        };
                        out.warnings
                            .push(DetectionWarning::RasterFallbackMiss { band, fallback_pt });
                    }
                }
                out.bounds = VerticalBounds {
                    y_top: scan.y_top,
                    y_bottom: scan.y_bottom,
                    top_origin: scan.top_origin,
                    bottom_origin: scan.bottom_origin,
                };
                out.raster = Some(scan);
            }
        }

        if !(out.bounds.y_top < out.bounds.y_bottom) {
            let warning = DetectionWarning::InvertedBounds {
                y_top: out.bounds.y_top,
                y_bottom: out.bounds.y_bottom,
            };
            warn!("CoverDetector::process {warning}");
            out.warnings.push(warning);
            out.bounds = VerticalBounds::from_trim_box(&page.trim_box);
        }
        Ok(out)
    }
}
