//! # glitch-core
//!
//! Core types for procedural pixel-transform effects.
//!
//! This crate provides the foundational pieces shared by every effect in the
//! engine:
//!
//! - [`Pixel`], [`ChannelMode`] - fixed-width 8-bit pixels (gray/RGB/RGBA)
//! - [`Image`] - owned row-major pixel buffer
//! - [`lines`] - line store: row/column extraction and index-major write-back
//! - [`partition`] - ceiling-accumulation segment partitioner
//!
//! ## Crate Structure
//!
//! `glitch-core` has no internal dependencies; the operation crate builds
//! on top of it:
//!
//! ```text
//! glitch-core (this crate)
//!    ^
//!    |
//!    +-- glitch-ops (shifts, waves, sorting, blending, effects)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use glitch_core::{lines, ChannelMode, Image, Pixel};
//!
//! let img = Image::filled(4, 2, ChannelMode::Gray, Pixel::gray(7)).unwrap();
//! let rows = lines::extract(&img, lines::Axis::Rows);
//! assert_eq!(rows.len(), 2);
//! assert_eq!(rows[0].len(), 4);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod image;
pub mod lines;
pub mod partition;
pub mod pixel;

// Re-exports for convenience
pub use error::{Error, Result};
pub use image::Image;
pub use lines::Axis;
pub use partition::{chunk, merge, partition, partition_by};
pub use pixel::{clamp_intensity, ChannelMode, Pixel, LUMA_B, LUMA_G, LUMA_R};
