//! Line store: extracting 1-D pixel sequences from an image and writing
//! them back.
//!
//! Every effect in this engine works on "lines" - rows or columns copied out
//! of the image - and reconstructs the image afterwards by replaying pixels
//! in the same index-major scan order. Write-back is deliberately agnostic
//! to grouping: a flat run, whole lines, or arbitrary segment groups all
//! land in the same place as long as the concatenated order matches the
//! extraction order.
//!
//! # Scan order
//!
//! - [`Axis::Rows`]: left-to-right, then top-to-bottom.
//! - [`Axis::Columns`]: top-to-bottom, then left-to-right.

use crate::error::{Error, Result};
use crate::image::Image;
use crate::pixel::Pixel;

/// Orientation of extracted lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Axis {
    /// Lines are image rows; scan order is row-major.
    #[default]
    Rows,
    /// Lines are image columns; scan order is column-major.
    Columns,
}

impl Axis {
    /// Length of one line along this axis for the given image.
    #[inline]
    pub fn line_len(self, image: &Image) -> usize {
        match self {
            Axis::Rows => image.width() as usize,
            Axis::Columns => image.height() as usize,
        }
    }

    /// Number of lines along this axis for the given image.
    #[inline]
    pub fn line_count(self, image: &Image) -> usize {
        match self {
            Axis::Rows => image.height() as usize,
            Axis::Columns => image.width() as usize,
        }
    }

    /// Maps a linear scan index to (x, y) coordinates.
    #[inline]
    fn coords(self, index: usize, image: &Image) -> (u32, u32) {
        match self {
            Axis::Rows => {
                let w = image.width() as usize;
                ((index % w) as u32, (index / w) as u32)
            }
            Axis::Columns => {
                let h = image.height() as usize;
                ((index / h) as u32, (index % h) as u32)
            }
        }
    }
}

/// Copies all pixels of the image into a flat sequence in `axis` scan order.
pub fn flatten(image: &Image, axis: Axis) -> Vec<Pixel> {
    let mut pixels = Vec::with_capacity(image.pixel_count());
    match axis {
        Axis::Rows => {
            for y in 0..image.height() {
                for x in 0..image.width() {
                    pixels.push(image.pixel(x, y));
                }
            }
        }
        Axis::Columns => {
            for x in 0..image.width() {
                for y in 0..image.height() {
                    pixels.push(image.pixel(x, y));
                }
            }
        }
    }
    pixels
}

/// Extracts the image as an ordered list of lines (rows or columns).
///
/// Lines are copies; mutating them does not affect the image until they are
/// written back.
pub fn extract(image: &Image, axis: Axis) -> Vec<Vec<Pixel>> {
    let line_len = axis.line_len(image);
    if line_len == 0 {
        return Vec::new();
    }
    let flat = flatten(image, axis);
    flat.chunks(line_len).map(|c| c.to_vec()).collect()
}

/// Writes a flat pixel run into the image starting at linear scan index
/// `start`, returning the index one past the last pixel written.
///
/// # Errors
///
/// Returns [`Error::OutOfBounds`] if the run would exceed the image, and
/// [`Error::ChannelMismatch`] if a pixel disagrees with the image mode.
pub fn write_pixels(
    image: &mut Image,
    pixels: &[Pixel],
    axis: Axis,
    start: usize,
) -> Result<usize> {
    let total = image.pixel_count();
    let mut index = start;
    for &pixel in pixels {
        if index >= total {
            let (x, y) = axis.coords(index, image);
            return Err(Error::OutOfBounds {
                x,
                y,
                width: image.width(),
                height: image.height(),
            });
        }
        let (x, y) = axis.coords(index, image);
        image.set(x, y, pixel)?;
        index += 1;
    }
    Ok(index)
}

/// Writes grouped pixel sequences into the image, resuming the linear scan
/// index across group boundaries.
///
/// This is the inverse of any flatten/extract/partition combination: the
/// groups' concatenation fills the image in `axis` scan order.
pub fn write_lines<S: AsRef<[Pixel]>>(image: &mut Image, groups: &[S], axis: Axis) -> Result<()> {
    let mut index = 0;
    for group in groups {
        index = write_pixels(image, group.as_ref(), axis, index)?;
    }
    Ok(())
}
