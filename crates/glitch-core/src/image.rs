//! Image buffer type for pixel-reordering effects.
//!
//! [`Image`] is an owned, row-major buffer of [`Pixel`]s with a runtime
//! [`ChannelMode`]. Unlike channel-interleaved layouts, the buffer stores
//! whole pixels because every operation in this engine moves, reorders or
//! blends pixels as units rather than individual channels.
//!
//! # Memory Layout
//!
//! Pixels are stored row-major, top-to-bottom:
//!
//! ```text
//! [p(0,0) p(1,0) ... p(w-1,0)]  <- Row 0
//! [p(0,1) p(1,1) ... p(w-1,1)]  <- Row 1
//! ```
//!
//! # Usage
//!
//! ```rust
//! use glitch_core::{ChannelMode, Image, Pixel};
//!
//! let mut img = Image::new(4, 2, ChannelMode::Rgb);
//! img.set(1, 0, Pixel::rgb(255, 0, 0)).unwrap();
//! assert_eq!(img.get(1, 0), Some(Pixel::rgb(255, 0, 0)));
//! ```
//!
//! # Used By
//!
//! - [`crate::lines`] - line extraction and write-back
//! - `glitch-ops` - all effect compositions

use crate::error::{Error, Result};
use crate::pixel::{ChannelMode, Pixel};

/// Owned image buffer: dimensions, channel mode and row-major pixel data.
///
/// The buffer is exclusively owned by the caller; effects never mutate an
/// input image, they build and return a new one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    width: u32,
    height: u32,
    mode: ChannelMode,
    data: Vec<Pixel>,
}

impl Image {
    /// Creates a new image filled with blank (all-zero) pixels.
    pub fn new(width: u32, height: u32, mode: ChannelMode) -> Self {
        let count = width as usize * height as usize;
        Self {
            width,
            height,
            mode,
            data: vec![Pixel::blank(mode); count],
        }
    }

    /// Creates an image from existing row-major pixel data.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if the data length is not
    /// `width * height`, or [`Error::ChannelMismatch`] if any pixel's
    /// channel count disagrees with `mode`.
    pub fn from_pixels(width: u32, height: u32, mode: ChannelMode, data: Vec<Pixel>) -> Result<Self> {
        let expected = width as usize * height as usize;
        if data.len() != expected {
            return Err(Error::invalid_dimensions(
                width,
                height,
                format!("expected {} pixels, got {}", expected, data.len()),
            ));
        }
        if let Some(bad) = data.iter().find(|p| p.channels() != mode.channels()) {
            return Err(Error::ChannelMismatch {
                expected: mode.channels(),
                got: bad.channels(),
            });
        }
        Ok(Self {
            width,
            height,
            mode,
            data,
        })
    }

    /// Creates an image filled with a specific pixel value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ChannelMismatch`] if the pixel does not match `mode`.
    pub fn filled(width: u32, height: u32, mode: ChannelMode, pixel: Pixel) -> Result<Self> {
        if pixel.channels() != mode.channels() {
            return Err(Error::ChannelMismatch {
                expected: mode.channels(),
                got: pixel.channels(),
            });
        }
        let count = width as usize * height as usize;
        Ok(Self {
            width,
            height,
            mode,
            data: vec![pixel; count],
        })
    }

    /// Returns the image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the image dimensions as (width, height).
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Returns the channel mode.
    #[inline]
    pub fn mode(&self) -> ChannelMode {
        self.mode
    }

    /// Returns the total number of pixels.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Returns `true` if the image has zero area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Returns a reference to the raw row-major pixel data.
    #[inline]
    pub fn data(&self) -> &[Pixel] {
        &self.data
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Returns the pixel at (x, y).
    ///
    /// # Panics
    ///
    /// Panics if (x, y) is out of bounds.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> Pixel {
        debug_assert!(x < self.width && y < self.height, "pixel out of bounds");
        self.data[self.index(x, y)]
    }

    /// Returns the pixel at (x, y), or `None` if out of bounds.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Option<Pixel> {
        if x < self.width && y < self.height {
            Some(self.pixel(x, y))
        } else {
            None
        }
    }

    /// Sets the pixel at (x, y).
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] for coordinates outside the image and
    /// [`Error::ChannelMismatch`] if the pixel's channel count disagrees
    /// with the image mode.
    pub fn set(&mut self, x: u32, y: u32, pixel: Pixel) -> Result<()> {
        if x >= self.width || y >= self.height {
            return Err(Error::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        if pixel.channels() != self.mode.channels() {
            return Err(Error::ChannelMismatch {
                expected: self.mode.channels(),
                got: pixel.channels(),
            });
        }
        let idx = self.index(x, y);
        self.data[idx] = pixel;
        Ok(())
    }

    /// Iterates over all pixels with their coordinates, row-major.
    pub fn pixels(&self) -> impl Iterator<Item = (u32, u32, Pixel)> + '_ {
        (0..self.height)
            .flat_map(move |y| (0..self.width).map(move |x| (x, y, self.pixel(x, y))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_blank() {
        let img = Image::new(4, 3, ChannelMode::Rgb);
        assert_eq!(img.dimensions(), (4, 3));
        assert_eq!(img.pixel_count(), 12);
        assert_eq!(img.pixel(3, 2), Pixel::rgb(0, 0, 0));
    }

    #[test]
    fn test_set_get() {
        let mut img = Image::new(4, 4, ChannelMode::Rgba);
        img.set(2, 1, Pixel::rgba(9, 8, 7, 255)).unwrap();
        assert_eq!(img.get(2, 1), Some(Pixel::rgba(9, 8, 7, 255)));
        assert_eq!(img.get(4, 0), None);
    }

    #[test]
    fn test_set_out_of_bounds() {
        let mut img = Image::new(2, 2, ChannelMode::Gray);
        assert!(matches!(
            img.set(2, 0, Pixel::gray(1)),
            Err(Error::OutOfBounds { .. })
        ));
    }

    #[test]
    fn test_set_channel_mismatch() {
        let mut img = Image::new(2, 2, ChannelMode::Gray);
        assert!(matches!(
            img.set(0, 0, Pixel::rgb(1, 2, 3)),
            Err(Error::ChannelMismatch { .. })
        ));
    }

    #[test]
    fn test_from_pixels_wrong_length() {
        let data = vec![Pixel::gray(0); 3];
        assert!(Image::from_pixels(2, 2, ChannelMode::Gray, data).is_err());
    }

    #[test]
    fn test_from_pixels_mode_check() {
        let data = vec![Pixel::rgb(0, 0, 0); 4];
        assert!(Image::from_pixels(2, 2, ChannelMode::Gray, data).is_err());
    }

    #[test]
    fn test_filled() {
        let img = Image::filled(3, 3, ChannelMode::Rgb, Pixel::rgb(1, 2, 3)).unwrap();
        assert!(img.pixels().all(|(_, _, p)| p == Pixel::rgb(1, 2, 3)));
    }
}
