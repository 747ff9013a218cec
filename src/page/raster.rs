use super::PageRenderer;
use crate::error::{CoverError, Result};
use crate::image::io::load_rgb_image;
use crate::types::Rect;
use crate::units::RasterFrame;
use image::imageops::{self, FilterType};
use image::RgbImage;
use log::debug;
use std::path::Path;

/// Renderer backed by a full-page raster rendered ahead of time at `dpi`.
///
/// Regions are cropped from the stored raster and resampled to the requested
/// resolution. Parts of a region outside the page render as white paper.
#[derive(Clone, Debug)]
pub struct RasterPage {
    image: RgbImage,
    dpi: f64,
}

impl RasterPage {
    pub fn new(image: RgbImage, dpi: f64) -> Self {
        Self { image, dpi }
    }

    pub fn load(path: &Path, dpi: f64) -> Result<Self> {
        Ok(Self::new(load_rgb_image(path)?, dpi))
    }

    pub fn dpi(&self) -> f64 {
        self.dpi
    }

    pub fn image(&self) -> &RgbImage {
        &self.image
    }
}

impl PageRenderer for RasterPage {
    fn render(&self, region: &Rect, dpi: f64) -> Result<RgbImage> {
        if region.is_empty() || !(dpi > 0.0) {
            return Err(CoverError::InvalidRegion(format!(
                "{region:?} at {dpi} DPI"
            )));
        }
        if self.image.width() == 0 || self.image.height() == 0 || !(self.dpi > 0.0) {
            return Err(CoverError::Render {
                dpi,
                reason: format!(
                    "page raster {}x{} at {} DPI cannot be resampled",
                    self.image.width(),
                    self.image.height(),
                    self.dpi
                ),
            });
        }
        let frame = RasterFrame::new((0.0, 0.0), self.dpi);
        let (u0, v0) = frame.to_pixel(region.x0, region.y0);
        let (u1, v1) = frame.to_pixel(region.x1, region.y1);

        // Source pixels, clamped to the stored raster.
        let (iw, ih) = (self.image.width() as f64, self.image.height() as f64);
        let sx0 = u0.round().clamp(0.0, iw) as u32;
        let sy0 = v0.round().clamp(0.0, ih) as u32;
        let sx1 = u1.round().clamp(0.0, iw) as u32;
        let sy1 = v1.round().clamp(0.0, ih) as u32;

        let out_w = ((region.width() * dpi / 72.0).round() as u32).max(1);
        let out_h = ((region.height() * dpi / 72.0).round() as u32).max(1);
        let mut out = RgbImage::from_pixel(out_w, out_h, image::Rgb([255, 255, 255]));
        if sx1 <= sx0 || sy1 <= sy0 {
            debug!("RasterPage::render region {region:?} lies outside the page");
            return Ok(out);
        }

        let crop = imageops::crop_imm(&self.image, sx0, sy0, sx1 - sx0, sy1 - sy0).to_image();
        let scale = dpi / self.dpi;
        let cw = ((crop.width() as f64 * scale).round() as u32).max(1);
        let ch = ((crop.height() as f64 * scale).round() as u32).max(1);
        let resized = if cw == crop.width() && ch == crop.height() {
            crop
        } else {
            imageops::resize(&crop, cw, ch, FilterType::Triangle)
        };

        // Place the visible part at its offset inside the requested region.
        let ox = ((sx0 as f64 - u0) * scale).round().max(0.0) as i64;
        let oy = ((sy0 as f64 - v0) * scale).round().max(0.0) as i64;
        imageops::overlay(&mut out, &resized, ox, oy);
        debug!(
            "RasterPage::render region=({:.1},{:.1})-({:.1},{:.1}) dpi={} -> {}x{}",
            region.x0, region.y0, region.x1, region.y1, dpi, out_w, out_h
        );
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_region_at_native_resolution() {
        // 72 DPI: one pixel per point.
        let mut img = RgbImage::from_pixel(100, 50, image::Rgb([255, 255, 255]));
        img.put_pixel(20, 10, image::Rgb([0, 0, 0]));
        let page = RasterPage::new(img, 72.0);
        let out = page.render(&Rect::new(10.0, 5.0, 30.0, 25.0), 72.0).unwrap();
        assert_eq!((out.width(), out.height()), (20, 20));
        assert_eq!(out.get_pixel(10, 5).0, [0, 0, 0]);
    }

    #[test]
    fn upsamples_to_requested_dpi() {
        let img = RgbImage::from_pixel(100, 50, image::Rgb([0, 0, 0]));
        let page = RasterPage::new(img, 72.0);
        let out = page.render(&Rect::new(0.0, 0.0, 10.0, 10.0), 144.0).unwrap();
        assert_eq!((out.width(), out.height()), (20, 20));
    }

    #[test]
    fn empty_region_is_rejected() {
        let page = RasterPage::new(RgbImage::new(10, 10), 72.0);
        assert!(page.render(&Rect::new(5.0, 5.0, 5.0, 8.0), 72.0).is_err());
    }

    #[test]
    fn empty_page_raster_is_a_render_error() {
        let page = RasterPage::new(RgbImage::new(0, 0), 300.0);
        let err = page.render(&Rect::new(0.0, 0.0, 10.0, 10.0), 72.0).unwrap_err();
        assert!(matches!(err, CoverError::Render { dpi, .. } if dpi == 72.0));
    }
}
