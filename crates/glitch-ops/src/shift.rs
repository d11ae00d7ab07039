//! Shift primitive: integer displacement of pixel or segment sequences.
//!
//! Two flavors share one offset-resolution pipeline:
//!
//! - **circular** - a rotation; every element survives, elements that fall
//!   off one end reappear at the other.
//! - **truncating** - displaced elements are discarded and the vacated cells
//!   are filled with blank (all-zero) units.
//!
//! Offsets are real-valued and rounded *up* to a whole number of cells
//! before application. A positive offset moves content toward lower indices
//! (the element at index `offset` becomes the new first element); negative
//! offsets move the other way. Sequence length never changes.

use glitch_core::Pixel;
use rand::Rng;

/// Behavior switches for a single shift application.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShiftOptions {
    /// Rotate (wraparound) instead of truncating.
    pub circular: bool,
    /// Replace the offset with a random integer in `[0, len - 1]`.
    pub randomize_magnitude: bool,
    /// Flip the offset's sign with probability 0.5 after magnitude
    /// resolution.
    pub randomize_direction: bool,
}

impl ShiftOptions {
    /// Options for a plain circular shift with no randomization.
    pub const fn circular() -> Self {
        Self {
            circular: true,
            randomize_magnitude: false,
            randomize_direction: false,
        }
    }

    /// Options for a plain truncating shift with no randomization.
    pub const fn truncating() -> Self {
        Self {
            circular: false,
            randomize_magnitude: false,
            randomize_direction: false,
        }
    }
}

/// Resolves a raw offset to the signed integer cell count to apply.
fn resolve_offset<R: Rng>(len: usize, offset: f64, opts: ShiftOptions, rng: &mut R) -> i64 {
    let mut cells = if opts.randomize_magnitude {
        rng.gen_range(0..len as i64)
    } else {
        let mut cells = offset.ceil() as i64;
        if opts.circular {
            cells = cells.rem_euclid(len as i64);
        }
        cells
    };
    if opts.randomize_direction && rng.gen_bool(0.5) {
        cells = -cells;
    }
    cells
}

/// Rotates a slice by a signed cell count with wraparound.
fn rotate<T>(items: &mut [T], cells: i64) {
    let len = items.len();
    if len == 0 {
        return;
    }
    let left = cells.rem_euclid(len as i64) as usize;
    items.rotate_left(left);
}

/// Truncating shift: drops displaced elements and fills the vacated run
/// with clones of `blank`.
fn truncate<T: Clone>(items: &mut [T], cells: i64, blank: T) {
    let len = items.len();
    if len == 0 || cells == 0 {
        return;
    }
    let moved = (cells.unsigned_abs() as usize).min(len);
    let kept = len - moved;
    if cells > 0 {
        // Content slides toward index 0; the tail goes blank.
        for i in 0..kept {
            items[i] = items[i + moved].clone();
        }
        for item in items.iter_mut().skip(kept) {
            *item = blank.clone();
        }
    } else {
        // Content slides toward the end; the head goes blank.
        for i in (0..kept).rev() {
            items[i + moved] = items[i].clone();
        }
        for item in items.iter_mut().take(moved) {
            *item = blank.clone();
        }
    }
}

/// Shifts a line of pixels in place.
///
/// Empty lines are a no-op. For truncating shifts the blank unit is an
/// all-zero pixel with the line's channel count.
pub fn shift_pixels<R: Rng>(line: &mut [Pixel], offset: f64, opts: ShiftOptions, rng: &mut R) {
    if line.is_empty() {
        return;
    }
    let cells = resolve_offset(line.len(), offset, opts, rng);
    if opts.circular {
        rotate(line, cells);
    } else {
        let blank = Pixel::blank_like(&line[0]);
        truncate(line, cells, blank);
    }
}

/// Shifts a sequence of whole segments in place.
///
/// For truncating shifts the blank unit is an all-blank segment matching
/// the leading segment's length (segments are assumed equal-sized, as
/// produced by fixed-size chunking).
pub fn shift_segments<R: Rng>(
    segments: &mut [Vec<Pixel>],
    offset: f64,
    opts: ShiftOptions,
    rng: &mut R,
) {
    if segments.is_empty() {
        return;
    }
    let cells = resolve_offset(segments.len(), offset, opts, rng);
    if opts.circular {
        rotate(segments, cells);
    } else {
        let blank = match segments[0].first() {
            Some(first) => vec![Pixel::blank_like(first); segments[0].len()],
            None => Vec::new(),
        };
        truncate(segments, cells, blank);
    }
}
