//! Raster and JSON file helpers.
//!
//! Rasters coming from the renderer are `image::RgbImage`; the raster mark
//! detector works on `image::GrayImage` masks.
pub mod io;
