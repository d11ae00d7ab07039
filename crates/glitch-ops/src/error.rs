//! Error types for effect operations.

use thiserror::Error;

/// Error type for effect operations.
#[derive(Error, Debug)]
pub enum OpsError {
    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Pixels with differing channel counts were combined.
    #[error("channel mismatch: expected {expected} channels, got {got}")]
    ChannelMismatch {
        /// Channels of the first pixel in the list.
        expected: usize,
        /// Channels of the offending pixel.
        got: usize,
    },

    /// Error bubbled up from the core image/line layer.
    #[error(transparent)]
    Core(#[from] glitch_core::Error),
}

/// Result type for effect operations.
pub type OpsResult<T> = Result<T, OpsError>;
