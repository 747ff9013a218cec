//! Page collaborators that fail on purpose.
use cover_marks::page::{PageRenderer, PageSource, VectorPath};
use cover_marks::types::{PageGeometry, Rect};
use cover_marks::{CoverError, Result};
use image::RgbImage;

/// Which `PageSource` call returns an error.
#[derive(Clone, Copy, Debug)]
pub enum FailAt {
    Geometry,
    Drawings,
}

/// Source delegating to `inner` except for the call named by `fail_at`.
pub struct FailingSource<S> {
    pub inner: S,
    pub fail_at: FailAt,
}

impl<S: PageSource> PageSource for FailingSource<S> {
    fn geometry(&self) -> Result<PageGeometry> {
        match self.fail_at {
            FailAt::Geometry => Err(CoverError::InputUnavailable("page tree is damaged".into())),
            FailAt::Drawings => self.inner.geometry(),
        }
    }

    fn drawings(&self) -> Result<Vec<VectorPath>> {
        match self.fail_at {
            FailAt::Drawings => Err(CoverError::InputUnavailable(
                "content stream cannot be decoded".into(),
            )),
            FailAt::Geometry => self.inner.drawings(),
        }
    }
}

/// Renderer whose every call fails.
pub struct FailingRenderer;

impl PageRenderer for FailingRenderer {
    fn render(&self, _region: &Rect, dpi: f64) -> Result<RgbImage> {
        Err(CoverError::Render {
            dpi,
            reason: "rasterizer unavailable".into(),
        })
    }
}
