//! Seams to the PDF collaborator.
//!
//! The detectors never parse PDF themselves. They consume page geometry and
//! vector paths through [`PageSource`] and request rasters through
//! [`PageRenderer`]. [`PageDescription`] and [`RasterPage`] are file-backed
//! implementations used by the demo binaries and by tests.
mod description;
mod raster;

pub use description::{PageDescription, PathColor, VectorPath};
pub use raster::RasterPage;

use crate::error::Result;
use crate::types::{PageGeometry, Rect};
use image::RgbImage;

/// Read-only access to one page's geometry and vector content.
pub trait PageSource {
    fn geometry(&self) -> Result<PageGeometry>;
    fn drawings(&self) -> Result<Vec<VectorPath>>;
}

/// Rasterization of a page region.
///
/// `region` is in page points; the returned raster covers exactly that
/// region at `dpi`. Calls are blocking and not retried by the caller.
pub trait PageRenderer {
    fn render(&self, region: &Rect, dpi: f64) -> Result<RgbImage>;
}

impl<T: PageSource + ?Sized> PageSource for &T {
    fn geometry(&self) -> Result<PageGeometry> {
        (**self).geometry()
    }
    fn drawings(&self) -> Result<Vec<VectorPath>> {
        (**self).drawings()
    }
}

impl<T: PageRenderer + ?Sized> PageRenderer for &T {
    fn render(&self, region: &Rect, dpi: f64) -> Result<RgbImage> {
        (**self).render(region, dpi)
    }
}
