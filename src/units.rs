//! Unit conversions shared by the detectors and the exporter.
//!
//! Internal geometry is kept in PDF points. Millimetres are the unit of every
//! human-facing measurement, and rasters are addressed in pixels at a known
//! resolution.
use nalgebra::{Matrix3, Vector3};

/// Points per millimetre.
pub const MM_TO_PT: f64 = 2.83465;
/// Points per inch (PDF user space).
pub const PT_PER_INCH: f64 = 72.0;
/// Millimetres per inch.
pub const MM_PER_INCH: f64 = 25.4;

#[inline]
pub fn mm_to_pt(mm: f64) -> f64 {
    mm * MM_TO_PT
}

#[inline]
pub fn pt_to_mm(pt: f64) -> f64 {
    pt / MM_TO_PT
}

/// Number of pixels spanned by `mm` millimetres at `dpi`.
#[inline]
pub fn mm_to_px(mm: f64, dpi: f64) -> f64 {
    mm * dpi / MM_PER_INCH
}

/// Size of one raster pixel in points at `dpi` (0.24 at 300 DPI).
#[inline]
pub fn pt_per_px(dpi: f64) -> f64 {
    PT_PER_INCH / dpi
}

/// Affine mapping between a raster rendered from a page region and page
/// points.
///
/// A raster of the region whose top-left corner sits at `origin` (points) and
/// that was rendered at `dpi` maps pixel `(u, v)` to
/// `origin + (u, v) * 72 / dpi`.
#[derive(Clone, Debug, PartialEq)]
pub struct RasterFrame {
    pub dpi: f64,
    to_page: Matrix3<f64>,
}

impl RasterFrame {
    pub fn new(origin: (f64, f64), dpi: f64) -> Self {
        let s = pt_per_px(dpi);
        let to_page = Matrix3::new(s, 0.0, origin.0, 0.0, s, origin.1, 0.0, 0.0, 1.0);
        Self { dpi, to_page }
    }

    /// Map a pixel position into page points.
    pub fn to_page(&self, u: f64, v: f64) -> (f64, f64) {
        let p = self.to_page * Vector3::new(u, v, 1.0);
        (p[0] / p[2], p[1] / p[2])
    }

    /// Map a page position into (fractional) pixel coordinates.
    pub fn to_pixel(&self, x: f64, y: f64) -> (f64, f64) {
        let inv = self.to_page.try_inverse().unwrap_or_else(Matrix3::identity);
        let p = inv * Vector3::new(x, y, 1.0);
        (p[0] / p[2], p[1] / p[2])
    }

    /// Scale factor from pixels to points.
    pub fn scale(&self) -> f64 {
        self.to_page[(0, 0)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn millimetre_round_trip_is_stable() {
        let pt = mm_to_pt(15.0);
        assert!((pt - 42.51975).abs() < 1e-9);
        assert!((pt_to_mm(pt) - 15.0).abs() < 1e-12);
    }

    #[test]
    fn frame_maps_pixels_at_300_dpi() {
        let frame = RasterFrame::new((0.0, 0.0), 300.0);
        assert!((frame.scale() - 0.24).abs() < 1e-12);
        let (_, y) = frame.to_page(0.0, 1200.0);
        assert!((y - 288.0).abs() < 1e-9);
    }

    #[test]
    fn frame_honours_region_origin() {
        let frame = RasterFrame::new((100.0, 50.0), 150.0);
        let (x, y) = frame.to_page(30.0, 60.0);
        assert!((x - 114.4).abs() < 1e-9);
        assert!((y - 78.8).abs() < 1e-9);
        let (u, v) = frame.to_pixel(x, y);
        assert!((u - 30.0).abs() < 1e-9 && (v - 60.0).abs() < 1e-9);
    }
}
