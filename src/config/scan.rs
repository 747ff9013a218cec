use super::load_json;
use crate::error::Result;
use crate::marks::{HorizontalMarkOptions, VectorMarkOptions};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Configuration of the `mark_scan` analysis tool.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkScanConfig {
    pub page: PathBuf,
    #[serde(default)]
    pub vector: VectorMarkOptions,
    #[serde(default)]
    pub horizontal: HorizontalMarkOptions,
    pub json_out: Option<PathBuf>,
}

pub fn load_config(path: &Path) -> Result<MarkScanConfig> {
    load_json(path)
}
