//! Region exporter.
//!
//! Every detected zone becomes an absolute rectangle (X from its interval,
//! Y from the shared vertical bounds) that is rendered once through the
//! [`PageRenderer`]. Unset or unselected zones never trigger a render.
pub mod naming;

pub use naming::{export_file_name, zone_suffix};

use crate::error::Result;
use crate::image::io::save_rgb_image;
use crate::page::PageRenderer;
use crate::types::{DetectionResult, Rect, StructuralZone};
use image::RgbImage;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Which detected zones are exported.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExportSelection {
    /// Every detected zone.
    #[default]
    All,
    /// Front and back cover only.
    CoversOnly,
}

impl ExportSelection {
    pub fn includes(self, zone: StructuralZone) -> bool {
        match self {
            ExportSelection::All => true,
            ExportSelection::CoversOnly => {
                matches!(zone, StructuralZone::FrontCover | StructuralZone::BackCover)
            }
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExportOptions {
    /// Render resolution of the exported zones.
    pub dpi: f64,
    pub selection: ExportSelection,
    /// Caller-supplied prefix of every file name (e.g. an ISBN).
    pub identifier: String,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            dpi: 300.0,
            selection: ExportSelection::All,
            identifier: "cover".to_string(),
        }
    }
}

/// A zone rendered to pixels.
#[derive(Clone, Debug)]
pub struct RenderedRegion {
    pub zone: StructuralZone,
    pub rect: Rect,
    pub image: RgbImage,
}

/// Rectangles of the zones that would be exported, left to right.
pub fn export_plan(result: &DetectionResult, selection: ExportSelection) -> Vec<(StructuralZone, Rect)> {
    StructuralZone::ALL
        .into_iter()
        .filter(|&zone| selection.includes(zone))
        .filter_map(|zone| result.zone_rect(zone).map(|rect| (zone, rect)))
        .collect()
}

/// Render every selected, detected zone to a pixel buffer.
pub fn render_regions<R: PageRenderer + ?Sized>(
    renderer: &R,
    result: &DetectionResult,
    opts: &ExportOptions,
) -> Result<Vec<RenderedRegion>> {
    export_plan(result, opts.selection)
        .into_iter()
        .map(|(zone, rect)| {
            let image = renderer.render(&rect, opts.dpi)?;
            debug!(
                "render_regions {zone}: {:.1}x{:.1}pt -> {}x{}px",
                rect.width(),
                rect.height(),
                image.width(),
                image.height()
            );
            Ok(RenderedRegion { zone, rect, image })
        })
        .collect()
}

/// Render the selected zones and write them as PNGs under `out_dir`.
///
/// Returns the written path of every exported zone.
pub fn export_regions<R: PageRenderer + ?Sized>(
    renderer: &R,
    result: &DetectionResult,
    out_dir: &Path,
    opts: &ExportOptions,
) -> Result<BTreeMap<StructuralZone, PathBuf>> {
    let mut written = BTreeMap::new();
    for region in render_regions(renderer, result, opts)? {
        let path = out_dir.join(export_file_name(&opts.identifier, region.zone));
        save_rgb_image(&region.image, &path)?;
        written.insert(region.zone, path);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Interval, VerticalBounds, ZoneMap};

    fn result() -> DetectionResult {
        let mut zones = ZoneMap::default();
        zones.set(StructuralZone::BackCover, Interval::new(10.0, 100.0));
        zones.set(StructuralZone::Spine, Interval::new(100.0, 120.0));
        zones.set(StructuralZone::FrontCover, Interval::new(120.0, 210.0));
        DetectionResult {
            columns: vec![10.0, 100.0, 120.0, 210.0],
            zones,
            bounds: VerticalBounds::from_trim_box(&Rect::new(10.0, 20.0, 210.0, 300.0)),
            warnings: Vec::new(),
        }
    }

    #[test]
    fn plan_skips_unset_zones() {
        let plan = export_plan(&result(), ExportSelection::All);
        let zones: Vec<_> = plan.iter().map(|(z, _)| *z).collect();
        assert_eq!(
            zones,
            vec![
                StructuralZone::BackCover,
                StructuralZone::Spine,
                StructuralZone::FrontCover
            ]
        );
        assert_eq!(plan[1].1, Rect::new(100.0, 20.0, 120.0, 300.0));
    }

    #[test]
    fn covers_only_selection() {
        let plan = export_plan(&result(), ExportSelection::CoversOnly);
        assert_eq!(plan.len(), 2);
        assert!(plan.iter().all(|(z, _)| *z != StructuralZone::Spine));
    }
}
