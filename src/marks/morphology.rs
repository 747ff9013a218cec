//! Binary opening with a line-shaped structuring element.
//!
//! For a 1×k (or k×1) element, erosion followed by dilation keeps exactly the
//! foreground runs along that direction whose length is at least `k` and
//! removes everything shorter. The filter therefore works directly on runs:
//! text, dots and strokes crossing the direction disappear, long straight
//! strokes survive unchanged.
use image::{GrayImage, Luma};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Foreground value in binary masks.
pub const FOREGROUND: u8 = 255;

/// Direction of the structuring element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// Morphological opening of `mask` with a line element of `length` pixels.
pub fn open_lines(mask: &GrayImage, length: usize, orientation: Orientation) -> GrayImage {
    let (w, h) = mask.dimensions();
    let mut out = mask.clone();
    if w == 0 || h == 0 || length <= 1 {
        return out;
    }
    match orientation {
        Orientation::Horizontal => {
            let data: &mut [u8] = &mut out;
            data.par_chunks_mut(w as usize)
                .for_each(|row| keep_long_runs(row, length));
        }
        Orientation::Vertical => {
            let mut column = vec![0u8; h as usize];
            for x in 0..w {
                for (y, c) in column.iter_mut().enumerate() {
                    *c = mask.get_pixel(x, y as u32)[0];
                }
                keep_long_runs(&mut column, length);
                for (y, &c) in column.iter().enumerate() {
                    out.put_pixel(x, y as u32, Luma([c]));
                }
            }
        }
    }
    out
}

/// Number of foreground pixels in `mask`.
pub fn count_foreground(mask: &GrayImage) -> usize {
    mask.pixels().filter(|p| p[0] != 0).count()
}

/// Clear every foreground run shorter than `length`.
fn keep_long_runs(line: &mut [u8], length: usize) {
    let n = line.len();
    let mut i = 0usize;
    while i < n {
        if line[i] == 0 {
            i += 1;
            continue;
        }
        let start = i;
        while i < n && line[i] != 0 {
            i += 1;
        }
        let fill = if i - start >= length { FOREGROUND } else { 0 };
        line[start..i].fill(fill);
    }
}
