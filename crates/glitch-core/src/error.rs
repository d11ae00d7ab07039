//! Error types for glitch-core operations.
//!
//! One unified error enum covers all failure modes of the core types:
//! buffer bounds, dimension checks, channel-mode agreement, and parameter
//! validation for the partitioner.
//!
//! # Dependencies
//!
//! - [`thiserror`] - For derive macro error implementation

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or mutating core pixel structures.
#[derive(Debug, Error)]
pub enum Error {
    /// Pixel coordinates are outside image bounds.
    ///
    /// Returned when attempting to access a pixel at (x, y) where
    /// `x >= width` or `y >= height`, or when a write-back run exceeds
    /// the image's pixel count.
    #[error("pixel ({x}, {y}) out of bounds for image {width}x{height}")]
    OutOfBounds {
        /// X coordinate that was out of bounds
        x: u32,
        /// Y coordinate that was out of bounds
        y: u32,
        /// Image width
        width: u32,
        /// Image height
        height: u32,
    },

    /// Buffer length does not match the declared dimensions.
    #[error("invalid dimensions {width}x{height}: {reason}")]
    InvalidDimensions {
        /// Declared width
        width: u32,
        /// Declared height
        height: u32,
        /// Explanation of the mismatch
        reason: String,
    },

    /// A pixel's channel count disagrees with the image's channel mode.
    #[error("channel mismatch: expected {expected} channels, got {got}")]
    ChannelMismatch {
        /// Channels required by the image mode
        expected: usize,
        /// Channels carried by the offending pixel
        got: usize,
    },

    /// Invalid parameter value (zero group count, zero chunk size, ...).
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

impl Error {
    /// Creates an [`Error::InvalidDimensions`] with a formatted reason.
    pub fn invalid_dimensions(width: u32, height: u32, reason: impl Into<String>) -> Self {
        Self::InvalidDimensions {
            width,
            height,
            reason: reason.into(),
        }
    }
}
