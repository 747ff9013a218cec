use super::PageSource;
use crate::error::{CoverError, Result};
use crate::image::io::read_json_file;
use crate::types::{PageGeometry, Rect};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Colour of a path's stroke or fill, by number of components.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f32>", into = "Vec<f32>")]
pub enum PathColor {
    Gray(f32),
    Rgb([f32; 3]),
    Cmyk([f32; 4]),
}

impl PathColor {
    /// Sum of all components.
    pub fn component_sum(&self) -> f32 {
        match self {
            PathColor::Gray(g) => *g,
            PathColor::Rgb(c) => c.iter().sum(),
            PathColor::Cmyk(c) => c.iter().sum(),
        }
    }
}

impl TryFrom<Vec<f32>> for PathColor {
    type Error = String;

    fn try_from(v: Vec<f32>) -> std::result::Result<Self, Self::Error> {
        match v.as_slice() {
            [g] => Ok(PathColor::Gray(*g)),
            [r, g, b] => Ok(PathColor::Rgb([*r, *g, *b])),
            [c, m, y, k] => Ok(PathColor::Cmyk([*c, *m, *y, *k])),
            other => Err(format!(
                "colour must have 1, 3 or 4 components, got {}",
                other.len()
            )),
        }
    }
}

impl From<PathColor> for Vec<f32> {
    fn from(c: PathColor) -> Self {
        match c {
            PathColor::Gray(g) => vec![g],
            PathColor::Rgb(c) => c.to_vec(),
            PathColor::Cmyk(c) => c.to_vec(),
        }
    }
}

/// One vector path: its bounding rectangle and optional paint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VectorPath {
    pub rect: Rect,
    #[serde(default)]
    pub stroke: Option<PathColor>,
    #[serde(default)]
    pub fill: Option<PathColor>,
}

impl VectorPath {
    pub fn new(rect: Rect) -> Self {
        Self {
            rect,
            stroke: None,
            fill: None,
        }
    }

    pub fn with_stroke(mut self, color: PathColor) -> Self {
        self.stroke = Some(color);
        self
    }

    /// Stroke colour, else fill colour.
    pub fn paint(&self) -> Option<PathColor> {
        self.stroke.or(self.fill)
    }
}

/// Page geometry plus its vector paths, as exported by the PDF side.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PageDescription {
    pub geometry: PageGeometry,
    #[serde(default)]
    pub drawings: Vec<VectorPath>,
}

impl PageDescription {
    pub fn load(path: &Path) -> Result<Self> {
        let desc: PageDescription = read_json_file(path)?;
        if desc.geometry.width <= 0.0 || desc.geometry.height <= 0.0 {
            return Err(CoverError::InputUnavailable(format!(
                "page {} has empty media box",
                path.display()
            )));
        }
        Ok(desc)
    }
}

impl PageSource for PageDescription {
    fn geometry(&self) -> Result<PageGeometry> {
        Ok(self.geometry.clone())
    }

    fn drawings(&self) -> Result<Vec<VectorPath>> {
        Ok(self.drawings.clone())
    }
}
