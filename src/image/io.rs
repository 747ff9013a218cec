//! I/O helpers for rasters and JSON.
//!
//! - `load_rgb_image`: read a PNG/JPEG into an RGB buffer.
//! - `save_rgb_image`: write a PNG, creating parent dirs.
//! - `write_json_file` / `read_json_file`: pretty JSON to and from disk.
use crate::error::{CoverError, Result};
use image::RgbImage;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Load an image from disk as 8-bit RGB.
pub fn load_rgb_image(path: &Path) -> Result<RgbImage> {
    let img = image::open(path).map_err(|e| {
        CoverError::InputUnavailable(format!("failed to open {}: {e}", path.display()))
    })?;
    Ok(img.into_rgb8())
}

/// Save an RGB raster to disk; the format follows the file extension.
pub fn save_rgb_image(image: &RgbImage, path: &Path) -> Result<()> {
    ensure_parent_dir(path)?;
    image.save(path)?;
    Ok(())
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json)?;
    Ok(())
}

/// Read and deserialize a JSON document.
pub fn read_json_file<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let data = fs::read_to_string(path).map_err(|e| {
        CoverError::InputUnavailable(format!("failed to read {}: {e}", path.display()))
    })?;
    Ok(serde_json::from_str(&data)?)
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
