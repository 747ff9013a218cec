//! JSON runtime configuration of the demo binaries.
pub mod cover;
pub mod scan;

use crate::error::{CoverError, Result};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let contents = fs::read_to_string(path).map_err(|e| {
        CoverError::Config(format!("failed to read config {}: {e}", path.display()))
    })?;
    serde_json::from_str(&contents).map_err(|e| {
        CoverError::Config(format!("failed to parse config {}: {e}", path.display()))
    })
}
