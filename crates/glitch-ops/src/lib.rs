//! # glitch-ops
//!
//! Pixel-reordering effects for glitch-art image processing.
//!
//! This crate provides the displacement primitives and the effect
//! compositions built on `glitch-core`'s line store and partitioner.
//!
//! # Modules
//!
//! - [`shift`] - circular and truncating sequence shifts
//! - [`wave`] - stateful periodic waveform shifters
//! - [`arrange`] - key sorting and in-place rearrangers
//! - [`blend`] - multi-mode blend reducer, line blending, pixelate
//! - [`sort`] - line-sort and glitch-sort effects
//! - [`split`] - ghost-split effect
//! - [`warp`] - wave-warp and mirror effects
//!
//! # Example
//!
//! ```rust
//! use glitch_core::{ChannelMode, Image, Pixel};
//! use glitch_ops::sort::{line_sort, LineSortParams, SegmentKind, SortMethod};
//! use glitch_ops::SortKey;
//! use rand::SeedableRng;
//! use rand_pcg::Pcg32;
//!
//! let img = Image::filled(8, 8, ChannelMode::Gray, Pixel::gray(128)).unwrap();
//! let params = LineSortParams {
//!     kind: SegmentKind::Rows,
//!     size: 1,
//!     method: SortMethod::Key { key: SortKey::Brightness, ascending: true },
//! };
//! let mut rng = Pcg32::seed_from_u64(7);
//! let sorted = line_sort(&img, &params, &mut rng).unwrap();
//! assert_eq!(sorted.dimensions(), (8, 8));
//! ```
//!
//! All effects take an image by reference, a plain parameter struct, and a
//! caller-supplied random source, and return a new image of the same
//! dimensions. Seeding the random source makes every effect fully
//! deterministic.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
pub mod arrange;
pub mod blend;
pub mod shift;
pub mod sort;
pub mod split;
pub mod warp;
pub mod wave;

pub use arrange::{Arranger, Order, SortKey};
pub use blend::BlendMode;
pub use error::{OpsError, OpsResult};
pub use wave::WaveKind;

/// Axis selection shared by every effect composition.
///
/// Cross variants run the effect once per axis; the name says which axis
/// goes first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// Single pass along rows.
    #[default]
    Horizontal,
    /// Single pass along columns.
    Vertical,
    /// Two passes, rows first.
    CrossHorizontalFirst,
    /// Two passes, columns first.
    CrossVerticalFirst,
}

impl Direction {
    /// Whether the first (or only) pass is the horizontal one.
    pub fn horizontal_first(self) -> bool {
        matches!(self, Direction::Horizontal | Direction::CrossHorizontalFirst)
    }

    /// Number of passes: cross directions run one per axis.
    pub fn repetitions(self) -> usize {
        match self {
            Direction::Horizontal | Direction::Vertical => 1,
            Direction::CrossHorizontalFirst | Direction::CrossVerticalFirst => 2,
        }
    }
}
