//! Debug overlay of a detection result on a full-page raster.
//!
//! Columns are thin cyan lines, spine boundaries thick green lines, the Y
//! crop boundaries yellow lines and every zone an outlined rectangle in its
//! own colour. Zone names go into the returned [`OverlayLegend`] instead of
//! being drawn as text.
use crate::types::{DetectionResult, PageGeometry, Rect, StructuralZone};
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_hollow_rect_mut};
use imageproc::rect::Rect as PixelRect;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OverlayStyle {
    pub column_color: [u8; 3],
    pub column_px: u32,
    pub spine_color: [u8; 3],
    pub spine_px: u32,
    pub bounds_color: [u8; 3],
    pub bounds_px: u32,
    pub zone_px: u32,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            column_color: [0, 200, 200],
            column_px: 2,
            spine_color: [0, 255, 128],
            spine_px: 6,
            bounds_color: [255, 220, 0],
            bounds_px: 4,
            zone_px: 4,
        }
    }
}

pub fn zone_color(zone: StructuralZone) -> [u8; 3] {
    match zone {
        StructuralZone::LeftFlap => [100, 100, 255],
        StructuralZone::BackCover => [255, 100, 100],
        StructuralZone::Spine => [0, 255, 255],
        StructuralZone::FrontCover => [100, 255, 100],
        StructuralZone::RightFlap => [255, 100, 255],
    }
}

/// One outlined zone of the overlay.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LegendEntry {
    pub zone: StructuralZone,
    pub label: &'static str,
    pub color: [u8; 3],
    /// Zone rectangle in page points.
    pub rect: Rect,
    /// Zone rectangle in overlay pixels: `[x, y, width, height]`.
    pub rect_px: [i64; 4],
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlayLegend {
    pub scale_x: f64,
    pub scale_y: f64,
    pub entries: Vec<LegendEntry>,
}

/// Draw `result` over a copy of `page_raster`, which must cover the whole
/// page.
pub fn render_overlay(
    page_raster: &RgbImage,
    page: &PageGeometry,
    result: &DetectionResult,
    style: &OverlayStyle,
) -> (RgbImage, OverlayLegend) {
    let mut img = page_raster.clone();
    let (w, h) = (img.width(), img.height());
    let sx = if page.width > 0.0 { w as f64 / page.width } else { 1.0 };
    let sy = if page.height > 0.0 { h as f64 / page.height } else { 1.0 };

    for &x in &result.columns {
        vertical_line(&mut img, x * sx, style.column_px, Rgb(style.column_color));
    }
    if let Some(spine) = result.zones.spine {
        for x in [spine.x0, spine.x1] {
            vertical_line(&mut img, x * sx, style.spine_px, Rgb(style.spine_color));
        }
    }
    for y in [result.bounds.y_top, result.bounds.y_bottom] {
        horizontal_line(&mut img, y * sy, style.bounds_px, Rgb(style.bounds_color));
    }

    let mut entries = Vec::new();
    for (zone, _) in result.zones.iter() {
        let Some(rect) = result.zone_rect(zone) else {
            continue;
        };
        let x = (rect.x0 * sx).round() as i64;
        let y = (rect.y0 * sy).round() as i64;
        let rw = ((rect.x1 * sx).round() as i64 - x).max(0);
        let rh = ((rect.y1 * sy).round() as i64 - y).max(0);
        let color = zone_color(zone);
        outline(&mut img, x, y, rw, rh, style.zone_px, Rgb(color));
        entries.push(LegendEntry {
            zone,
            label: zone.label(),
            color,
            rect,
            rect_px: [x, y, rw, rh],
        });
    }

    (
        img,
        OverlayLegend {
            scale_x: sx,
            scale_y: sy,
            entries,
        },
    )
}

fn vertical_line(img: &mut RgbImage, x: f64, thickness: u32, color: Rgb<u8>) {
    let t = thickness.max(1);
    let x0 = (x - t as f64 / 2.0).round() as i32;
    draw_filled_rect_mut(img, PixelRect::at(x0, 0).of_size(t, img.height().max(1)), color);
}

fn horizontal_line(img: &mut RgbImage, y: f64, thickness: u32, color: Rgb<u8>) {
    let t = thickness.max(1);
    let y0 = (y - t as f64 / 2.0).round() as i32;
    draw_filled_rect_mut(img, PixelRect::at(0, y0).of_size(img.width().max(1), t), color);
}

fn outline(img: &mut RgbImage, x: i64, y: i64, w: i64, h: i64, thickness: u32, color: Rgb<u8>) {
    for t in 0..thickness as i64 {
        let (iw, ih) = (w - 2 * t, h - 2 * t);
        if iw <= 0 || ih <= 0 {
            break;
        }
        let rect = PixelRect::at((x + t) as i32, (y + t) as i32).of_size(iw as u32, ih as u32);
        draw_hollow_rect_mut(img, rect, color);
    }
}
