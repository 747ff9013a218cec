//! Synthetic cover pages with trim marks, as vector paths and as rasters.
use cover_marks::page::{PageDescription, PageRenderer, PathColor, RasterPage, VectorPath};
use cover_marks::types::{PageGeometry, Rect};
use cover_marks::Result;
use image::{Rgb, RgbImage};
use std::cell::Cell;

pub const PAGE_W: f64 = 423.2;
pub const PAGE_H: f64 = 380.0;
pub const OFFSET_X: f64 = 20.0;
pub const TRIM_Y0: f64 = 40.0;
pub const TRIM_Y1: f64 = 340.0;
pub const RASTER_DPI: f64 = 300.0;

/// Mark columns of a flapped cover, relative to the trim box's left edge.
pub const COVER_COLUMNS: [f64; 6] = [0.0, 42.5, 184.9, 198.3, 340.7, 383.2];

const REGISTRATION: PathColor = PathColor::Cmyk([1.0, 1.0, 1.0, 1.0]);

pub fn geometry() -> PageGeometry {
    PageGeometry {
        width: PAGE_W,
        height: PAGE_H,
        trim_box: Rect::new(OFFSET_X, TRIM_Y0, OFFSET_X + 383.2, TRIM_Y1),
        rotation: 0,
    }
}

/// Absolute x of every cover column on the page.
pub fn page_columns() -> Vec<f64> {
    COVER_COLUMNS.iter().map(|x| x + OFFSET_X).collect()
}

pub fn vertical_mark(x: f64, y0: f64, y1: f64) -> VectorPath {
    VectorPath::new(Rect::new(x - 0.25, y0, x + 0.25, y1)).with_stroke(REGISTRATION)
}

pub fn horizontal_mark(x0: f64, x1: f64, y: f64) -> VectorPath {
    VectorPath::new(Rect::new(x0, y - 0.25, x1, y + 0.25)).with_stroke(REGISTRATION)
}

/// Marks above and below the trim box at every column, horizontal marks
/// flush with the left page edge at the trim lines, plus one vertical rule
/// inside the artwork.
pub fn cover_drawings() -> Vec<VectorPath> {
    let mut paths = Vec::new();
    for x in page_columns() {
        paths.push(vertical_mark(x, 5.0, 30.0));
        paths.push(vertical_mark(x, PAGE_H - 30.0, PAGE_H - 5.0));
    }
    paths.push(horizontal_mark(0.0, 15.0, TRIM_Y0));
    paths.push(horizontal_mark(0.0, 15.0, TRIM_Y1));
    paths.push(vertical_mark(120.0, 100.0, 200.0));
    paths
}

pub fn cover_page() -> PageDescription {
    PageDescription {
        geometry: geometry(),
        drawings: cover_drawings(),
    }
}

pub fn blank_page() -> PageDescription {
    PageDescription {
        geometry: geometry(),
        drawings: Vec::new(),
    }
}

/// Rasterize `paths` as solid black rectangles on white paper.
pub fn rasterize(paths: &[VectorPath], dpi: f64) -> RasterPage {
    let s = dpi / 72.0;
    let w = (PAGE_W * s).round() as u32;
    let h = (PAGE_H * s).round() as u32;
    let mut img = RgbImage::from_pixel(w, h, Rgb([255, 255, 255]));
    for p in paths {
        let x0 = (p.rect.x0 * s).round() as u32;
        let y0 = (p.rect.y0 * s).round() as u32;
        let x1 = ((p.rect.x1 * s).round() as u32).max(x0 + 1).min(w);
        let y1 = ((p.rect.y1 * s).round() as u32).max(y0 + 1).min(h);
        for y in y0..y1 {
            for x in x0..x1 {
                img.put_pixel(x, y, Rgb([0, 0, 0]));
            }
        }
    }
    RasterPage::new(img, dpi)
}

/// Renderer wrapper counting how often it is asked for pixels.
pub struct CountingRenderer<R> {
    pub inner: R,
    pub calls: Cell<usize>,
}

impl<R> CountingRenderer<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            calls: Cell::new(0),
        }
    }
}

impl<R: PageRenderer> PageRenderer for CountingRenderer<R> {
    fn render(&self, region: &Rect, dpi: f64) -> Result<RgbImage> {
        self.calls.set(self.calls.get() + 1);
        self.inner.render(region, dpi)
    }
}
