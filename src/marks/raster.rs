//! Raster fallback for trim marks.
//!
//! A narrow strip of the page is rendered at high resolution, thresholded for
//! dark ink, opened with a line-shaped element to keep only long straight
//! strokes, and reduced to the bounding boxes of its external contours. Two
//! scans share this chain:
//!
//! - [`detect_vertical_bounds`] renders a left-edge strip over the full page
//!   height and looks for horizontal strokes in the top and bottom bands. The
//!   leftmost stroke of each band wins (marks are drawn flush to the sheet
//!   edge); a band without strokes falls back to a fixed offset from the page
//!   edge.
//! - [`detect_raster_columns`] renders a strip along the top edge and looks
//!   for vertical strokes on the highest row, substituting for vector columns.
use super::cluster1d::cluster_centers;
use super::morphology::{count_foreground, open_lines, Orientation};
use super::options::RasterMarkOptions;
use crate::error::Result;
use crate::page::PageRenderer;
use crate::types::{Band, BoundaryOrigin, PageGeometry, Rect};
use crate::units::{mm_to_pt, mm_to_px, RasterFrame};
use image::GrayImage;
use imageproc::contours::{find_contours, BorderType, Contour};
use imageproc::contrast::{threshold, ThresholdType};
use log::{debug, warn};
use serde::Serialize;
use std::time::Instant;

/// Axis-aligned bounding box of an external contour, in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlobBox {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl BlobBox {
    fn from_contour(contour: &Contour<u32>) -> Option<Self> {
        let first = contour.points.first()?;
        let (mut x0, mut y0, mut x1, mut y1) = (first.x, first.y, first.x, first.y);
        for p in &contour.points {
            x0 = x0.min(p.x);
            y0 = y0.min(p.y);
            x1 = x1.max(p.x);
            y1 = y1.max(p.y);
        }
        Some(Self {
            x: x0,
            y: y0,
            w: x1 - x0 + 1,
            h: y1 - y0 + 1,
        })
    }

    /// Vertical centre in pixels.
    pub fn center_y(&self) -> f64 {
        self.y as f64 + self.h as f64 / 2.0
    }

    /// Horizontal centre in pixels.
    pub fn center_x(&self) -> f64 {
        self.x as f64 + self.w as f64 / 2.0
    }
}

/// Inverted fixed threshold: pixels at or below `level` (ink) become
/// foreground, brighter pixels (paper) background.
pub fn ink_mask(gray: &GrayImage, level: u8) -> GrayImage {
    threshold(gray, level, ThresholdType::BinaryInverted)
}

/// Bounding boxes of the outermost contours of `mask`, in the order the
/// contour tracer meets them (raster order of their first border pixel).
/// Blobs lying inside a hole of another blob are skipped.
pub fn external_boxes(mask: &GrayImage) -> Vec<BlobBox> {
    find_contours::<u32>(mask)
        .iter()
        .filter(|c| c.border_type == BorderType::Outer && c.parent.is_none())
        .filter_map(BlobBox::from_contour)
        .collect()
}

/// A stroke blob that survived the width test, in pixels and page points.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RasterStroke {
    pub blob: BlobBox,
    /// Left edge in page points.
    pub x_pt: f64,
    /// Vertical centre in page points.
    pub y_pt: f64,
    pub band: Option<Band>,
}

/// Result of the vertical-boundary scan.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RasterBoundsScan {
    pub strip: Rect,
    pub dpi: f64,
    pub width_px: u32,
    pub height_px: u32,
    pub ink_pixels: usize,
    pub blobs_total: usize,
    pub strokes: Vec<RasterStroke>,
    pub top_winner: Option<usize>,
    pub bottom_winner: Option<usize>,
    pub y_top: f64,
    pub y_bottom: f64,
    pub top_origin: BoundaryOrigin,
    pub bottom_origin: BoundaryOrigin,
    pub elapsed_ms: f64,
}

impl RasterBoundsScan {
    pub fn missed(&self, band: Band) -> bool {
        match band {
            Band::Top => self.top_winner.is_none(),
            Band::Bottom => self.bottom_winner.is_none(),
        }
    }
}

/// Render the left-edge strip and locate the Y crop boundaries.
pub fn detect_vertical_bounds<R: PageRenderer + ?Sized>(
    renderer: &R,
    page: &PageGeometry,
    opts: &RasterMarkOptions,
) -> Result<RasterBoundsScan> {
    let strip = Rect::new(
        0.0,
        0.0,
        mm_to_pt(opts.strip_width_mm).min(page.width),
        page.height,
    );
    let start = Instant::now();
    let rgb = renderer.render(&strip, opts.dpi)?;
    let gray = image::imageops::grayscale(&rgb);
    let frame = RasterFrame::new((strip.x0, strip.y0), opts.dpi);
    let mut scan = analyze_bounds_strip(&gray, &frame, page.height, opts);
    scan.strip = strip;
    scan.elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
    Ok(scan)
}

/// Boundary analysis of an already rendered grayscale strip.
///
/// `frame` maps strip pixels to page points; `page_height` anchors the
/// bottom fallback.
pub fn analyze_bounds_strip(
    gray: &GrayImage,
    frame: &RasterFrame,
    page_height: f64,
    opts: &RasterMarkOptions,
) -> RasterBoundsScan {
    let (w, h) = gray.dimensions();
    let mask = ink_mask(gray, opts.ink_threshold);
    let ink_pixels = count_foreground(&mask);
    let kernel = mm_to_px(opts.opening_length_mm, frame.dpi).round().max(1.0) as usize;
    let opened = open_lines(&mask, kernel, Orientation::Horizontal);
    let blobs = external_boxes(&opened);
    let min_width_px = mm_to_px(opts.min_stroke_width_mm, frame.dpi);

    let top_limit = h as f64 * opts.band_fraction;
    let bottom_limit = h as f64 * (1.0 - opts.band_fraction);
    let strokes: Vec<RasterStroke> = blobs
        .iter()
        .filter(|b| b.w as f64 > min_width_px)
        .map(|b| {
            let cy = b.center_y();
            let band = if cy < top_limit {
                Some(Band::Top)
            } else if cy > bottom_limit {
                Some(Band::Bottom)
            } else {
                None
            };
            let (x_pt, y_pt) = frame.to_page(b.x as f64, cy);
            RasterStroke {
                blob: *b,
                x_pt,
                y_pt,
                band,
            }
        })
        .collect();

    let top_winner = leftmost_in_band(&strokes, Band::Top);
    let bottom_winner = leftmost_in_band(&strokes, Band::Bottom);
    let offset = mm_to_pt(opts.fallback_offset_mm);

    let (y_top, top_origin) = match top_winner {
        Some(i) => (strokes[i].y_pt, BoundaryOrigin::RasterMark),
        None => {
            warn!("raster scan: no stroke in top band, using {:.1}pt", offset);
            (offset, BoundaryOrigin::DefaultOffset)
        }
    };
    let (y_bottom, bottom_origin) = match bottom_winner {
        Some(i) => (strokes[i].y_pt, BoundaryOrigin::RasterMark),
        None => {
            let y = page_height - offset;
            warn!("raster scan: no stroke in bottom band, using {:.1}pt", y);
            (y, BoundaryOrigin::DefaultOffset)
        }
    };

    debug!(
        "analyze_bounds_strip {}x{} kernel={}px ink={} blobs={} strokes={} y_top={:.2} y_bottom={:.2}",
        w,
        h,
        kernel,
        ink_pixels,
        blobs.len(),
        strokes.len(),
        y_top,
        y_bottom
    );

    RasterBoundsScan {
        strip: Rect::new(0.0, 0.0, w as f64 * frame.scale(), h as f64 * frame.scale()),
        dpi: frame.dpi,
        width_px: w,
        height_px: h,
        ink_pixels,
        blobs_total: blobs.len(),
        strokes,
        top_winner,
        bottom_winner,
        y_top,
        y_bottom,
        top_origin,
        bottom_origin,
        elapsed_ms: 0.0,
    }
}

/// Index of the stroke with the smallest x in `band`; the first one wins ties.
fn leftmost_in_band(strokes: &[RasterStroke], band: Band) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (i, s) in strokes.iter().enumerate() {
        if s.band != Some(band) {
            continue;
        }
        if best.map_or(true, |b| s.blob.x < strokes[b].blob.x) {
            best = Some(i);
        }
    }
    best
}

/// Result of the raster column scan.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RasterColumnScan {
    pub strip: Rect,
    pub dpi: f64,
    pub blobs_total: usize,
    /// Vertical strokes that passed the length test; `x_pt` is the centre.
    pub strokes: Vec<RasterStroke>,
    /// Top edge of the highest stroke row (points).
    pub min_top_pt: Option<f64>,
    pub columns: Vec<f64>,
    pub elapsed_ms: f64,
}

/// Render the top-edge strip and detect vertical mark columns.
pub fn detect_raster_columns<R: PageRenderer + ?Sized>(
    renderer: &R,
    page: &PageGeometry,
    opts: &RasterMarkOptions,
) -> Result<RasterColumnScan> {
    let strip = Rect::new(
        0.0,
        0.0,
        page.width,
        mm_to_pt(opts.strip_width_mm).min(page.height),
    );
    let start = Instant::now();
    let rgb = renderer.render(&strip, opts.dpi)?;
    let gray = image::imageops::grayscale(&rgb);
    let frame = RasterFrame::new((strip.x0, strip.y0), opts.dpi);
    let mut scan = analyze_column_strip(&gray, &frame, opts);
    scan.strip = strip;
    scan.elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
    Ok(scan)
}

/// Column analysis of an already rendered grayscale strip.
pub fn analyze_column_strip(
    gray: &GrayImage,
    frame: &RasterFrame,
    opts: &RasterMarkOptions,
) -> RasterColumnScan {
    let mask = ink_mask(gray, opts.ink_threshold);
    let kernel = mm_to_px(opts.opening_length_mm, frame.dpi).round().max(1.0) as usize;
    let opened = open_lines(&mask, kernel, Orientation::Vertical);
    let blobs = external_boxes(&opened);
    let min_len_px = mm_to_px(opts.min_stroke_width_mm, frame.dpi);

    let strokes: Vec<RasterStroke> = blobs
        .iter()
        .filter(|b| b.h as f64 > min_len_px)
        .map(|b| {
            let (x_pt, y_pt) = frame.to_page(b.center_x(), b.y as f64);
            RasterStroke {
                blob: *b,
                x_pt,
                y_pt,
                band: Some(Band::Top),
            }
        })
        .collect();

    let min_top_pt = strokes
        .iter()
        .map(|s| s.y_pt)
        .fold(None, |acc: Option<f64>, y| Some(acc.map_or(y, |m| m.min(y))));
    let columns = match min_top_pt {
        Some(min_top) => {
            let xs: Vec<f64> = strokes
                .iter()
                .filter(|s| s.y_pt <= min_top + opts.row_tolerance_pt)
                .map(|s| s.x_pt)
                .collect();
            cluster_centers(&xs, opts.cluster_tolerance_pt)
        }
        None => Vec::new(),
    };

    debug!(
        "analyze_column_strip {}x{} blobs={} strokes={} min_top={:?} columns={}",
        gray.width(),
        gray.height(),
        blobs.len(),
        strokes.len(),
        min_top_pt,
        columns.len()
    );

    RasterColumnScan {
        strip: Rect::new(
            0.0,
            0.0,
            gray.width() as f64 * frame.scale(),
            gray.height() as f64 * frame.scale(),
        ),
        dpi: frame.dpi,
        blobs_total: blobs.len(),
        strokes,
        min_top_pt,
        columns,
        elapsed_ms: 0.0,
    }
}
