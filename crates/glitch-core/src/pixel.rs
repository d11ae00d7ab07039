//! Pixel and channel-mode types.
//!
//! A [`Pixel`] is a fixed-capacity tuple of 1 (gray), 3 (RGB) or 4 (RGBA)
//! 8-bit channels. The channel count is carried at runtime so grayscale and
//! color images share one engine; mixing counts inside a single operation is
//! a precondition violation that the image and blend layers check for.
//!
//! # Brightness
//!
//! Brightness uses the luminosity method with the classic video weights:
//! `Y = 0.299*R + 0.587*G + 0.114*B`, rounded and clamped to [0, 255].
//! Grayscale pixels are their own brightness.
//!
//! # Used By
//!
//! - [`crate::image::Image`] - pixel storage
//! - `glitch-ops` - shifting, sorting and blending machinery

use crate::error::{Error, Result};

/// Luminosity weight for the red channel.
pub const LUMA_R: f64 = 0.299;

/// Luminosity weight for the green channel.
pub const LUMA_G: f64 = 0.587;

/// Luminosity weight for the blue channel.
pub const LUMA_B: f64 = 0.114;

/// Channel layout of an image: grayscale, RGB or RGBA.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChannelMode {
    /// Single 8-bit intensity channel.
    Gray,
    /// Three 8-bit color channels.
    #[default]
    Rgb,
    /// Three color channels plus alpha.
    Rgba,
}

impl ChannelMode {
    /// Number of channels per pixel for this mode.
    #[inline]
    pub const fn channels(self) -> usize {
        match self {
            ChannelMode::Gray => 1,
            ChannelMode::Rgb => 3,
            ChannelMode::Rgba => 4,
        }
    }

    /// Resolves a channel count back to a mode, if supported.
    pub fn from_channels(channels: usize) -> Option<Self> {
        match channels {
            1 => Some(ChannelMode::Gray),
            3 => Some(ChannelMode::Rgb),
            4 => Some(ChannelMode::Rgba),
            _ => None,
        }
    }
}

/// A single pixel: up to four 8-bit channels plus the active channel count.
///
/// Unused channel lanes are always zero, so derived equality and hashing
/// behave as if only the active channels existed.
///
/// # Example
///
/// ```rust
/// use glitch_core::Pixel;
///
/// let px = Pixel::rgb(255, 128, 0);
/// assert_eq!(px.channels(), 3);
/// assert_eq!(px.channel(1), 128);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pixel {
    data: [u8; 4],
    channels: u8,
}

impl Pixel {
    /// Creates a grayscale pixel.
    #[inline]
    pub const fn gray(value: u8) -> Self {
        Self {
            data: [value, 0, 0, 0],
            channels: 1,
        }
    }

    /// Creates an RGB pixel.
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self {
            data: [r, g, b, 0],
            channels: 3,
        }
    }

    /// Creates an RGBA pixel.
    #[inline]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            data: [r, g, b, a],
            channels: 4,
        }
    }

    /// Creates an all-zero pixel for the given mode (the "null" pixel used
    /// to fill vacated cells after a truncating shift).
    #[inline]
    pub const fn blank(mode: ChannelMode) -> Self {
        Self {
            data: [0; 4],
            channels: mode.channels() as u8,
        }
    }

    /// Creates an all-zero pixel with the same channel count as `other`.
    #[inline]
    pub const fn blank_like(other: &Pixel) -> Self {
        Self {
            data: [0; 4],
            channels: other.channels,
        }
    }

    /// Returns the active channel count (1, 3 or 4).
    #[inline]
    pub const fn channels(&self) -> usize {
        self.channels as usize
    }

    /// Returns channel `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i` is not an active channel.
    #[inline]
    pub fn channel(&self, i: usize) -> u8 {
        debug_assert!(i < self.channels(), "channel index out of range");
        self.data[i]
    }

    /// Returns the active channels as a slice.
    #[inline]
    pub fn raw(&self) -> &[u8] {
        &self.data[..self.channels()]
    }

    /// Brightness via the luminosity method, rounded and clamped to [0, 255].
    ///
    /// Grayscale pixels return their single channel verbatim; the alpha
    /// channel of RGBA pixels does not contribute.
    pub fn brightness(&self) -> u8 {
        if self.channels == 1 {
            return self.data[0];
        }
        let y = LUMA_R * self.data[0] as f64
            + LUMA_G * self.data[1] as f64
            + LUMA_B * self.data[2] as f64;
        clamp_intensity(y.round())
    }

    /// Normalized channel values in [0, 1]; inactive lanes are zero.
    #[inline]
    pub fn to_f64(&self) -> [f64; 4] {
        let mut out = [0.0; 4];
        for c in 0..self.channels() {
            out[c] = self.data[c] as f64 / 255.0;
        }
        out
    }

    /// Builds a pixel from raw (0-255 scale) channel values, rounding and
    /// clamping each channel.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if `channels` is not 1, 3 or 4.
    pub fn from_f64(values: [f64; 4], channels: usize) -> Result<Self> {
        let mode = ChannelMode::from_channels(channels).ok_or_else(|| {
            Error::InvalidParameter(format!(
                "unsupported channel count {channels} (expected 1, 3 or 4)"
            ))
        })?;
        let mut data = [0u8; 4];
        for c in 0..channels {
            data[c] = clamp_intensity(values[c].round());
        }
        Ok(Self {
            data,
            channels: mode.channels() as u8,
        })
    }
}

/// Clamps a (rounded) channel value into the representable [0, 255] range.
#[inline]
pub fn clamp_intensity(value: f64) -> u8 {
    if value <= 0.0 {
        0
    } else if value >= 255.0 {
        255
    } else {
        value as u8
    }
}
