use super::load_json;
use crate::error::Result;
use crate::export::ExportOptions;
use crate::CoverParams;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputConfig {
    /// Directory receiving the zone PNGs.
    pub dir: PathBuf,
    pub json_out: Option<PathBuf>,
    /// Debug overlay PNG; its legend is written next to it as JSON.
    pub debug_overlay: Option<PathBuf>,
    #[serde(default = "default_preview_dpi")]
    pub preview_dpi: f64,
}

impl OutputConfig {
    pub fn legend_path(&self) -> Option<PathBuf> {
        self.debug_overlay
            .as_ref()
            .map(|p| p.with_extension("json"))
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuntimeConfig {
    /// Page description JSON (geometry and vector paths).
    pub page: PathBuf,
    /// Pre-rendered raster of the full page.
    pub page_image: PathBuf,
    #[serde(default = "default_image_dpi")]
    pub page_image_dpi: f64,
    #[serde(default)]
    pub params: CoverParams,
    #[serde(default)]
    pub export: ExportOptions,
    pub output: OutputConfig,
}

fn default_preview_dpi() -> f64 {
    150.0
}

fn default_image_dpi() -> f64 {
    300.0
}

pub fn load_config(path: &Path) -> Result<RuntimeConfig> {
    load_json(path)
}
