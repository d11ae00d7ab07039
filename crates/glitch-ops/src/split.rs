//! Ghost-split effect: alternating lines are cut into sections and the
//! sections displaced, leaving a doubled, ghosted copy of the image.
//!
//! Only even-indexed lines are touched; odd lines keep the original
//! content, which is what produces the ghosting. An optional post-blend
//! folds adjacent line pairs together to soften the seam.

use glitch_core::{lines, merge, partition, Axis, Image};
use rand::Rng;
use tracing::debug;

use crate::blend::{blend_lines, BlendMode};
use crate::error::{OpsError, OpsResult};
use crate::shift::{self, ShiftOptions};
use crate::Direction;

/// Per-section displacement pattern for ghost-split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SplitPattern {
    /// All sections move toward the line start.
    #[default]
    TowardStart,
    /// All sections move toward the line end.
    TowardEnd,
    /// Sections alternate direction, starting toward the line start.
    Mirrored,
    /// Each section gets a random direction, fixed for the whole pass.
    RandomSections,
    /// The direction flips with probability 0.5 per processed line, and
    /// the flip is cumulative.
    RandomPerLine,
}

/// Post-blend applied to adjacent line pairs after splitting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GhostBlend {
    /// Leave the raw split lines.
    #[default]
    None,
    /// Average each line pair.
    Average,
    /// Channel-wise maximum of each pair.
    Lighten,
    /// Channel-wise minimum of each pair.
    Darken,
}

impl GhostBlend {
    fn mode(self) -> Option<BlendMode> {
        match self {
            GhostBlend::None => None,
            GhostBlend::Average => Some(BlendMode::Average),
            GhostBlend::Lighten => Some(BlendMode::Lighten),
            GhostBlend::Darken => Some(BlendMode::Darken),
        }
    }
}

/// Parameters for [`ghost_split`].
#[derive(Debug, Clone, Copy)]
pub struct GhostSplitParams {
    /// Axis (or cross) to split along.
    pub direction: Direction,
    /// Number of sections per line. Must be at least 1.
    pub splits: usize,
    /// Displacement as a fraction in `[0, 1]` of one section length; zero
    /// draws a random fraction once for the whole effect.
    pub offset: f64,
    /// Per-section direction pattern.
    pub pattern: SplitPattern,
    /// Wraparound policy for the section shifts.
    pub circular: bool,
    /// Seam-softening post-blend.
    pub blend: GhostBlend,
}

/// Splits alternating lines into displaced sections.
///
/// Cross directions run one pass per axis. The post-blend, when enabled,
/// runs after every pass in that pass's orientation.
///
/// # Errors
///
/// Returns [`OpsError::InvalidParameter`] if `splits` is zero.
pub fn ghost_split<R: Rng>(
    image: &Image,
    params: &GhostSplitParams,
    rng: &mut R,
) -> OpsResult<Image> {
    debug!(
        ?params.direction,
        params.splits,
        params.offset,
        ?params.pattern,
        "ghost_split"
    );
    if params.splits == 0 {
        return Err(OpsError::InvalidParameter(
            "split count must be at least 1".into(),
        ));
    }
    if image.is_empty() {
        return Ok(image.clone());
    }
    let offset = if params.offset == 0.0 {
        rng.gen_range(1..=100) as f64 / 100.0
    } else {
        params.offset
    };

    let mut horizontal = params.direction.horizontal_first();
    let mut result = image.clone();
    for _ in 0..params.direction.repetitions() {
        let axis = if horizontal { Axis::Rows } else { Axis::Columns };
        result = split_pass(&result, axis, params, offset, rng)?;
        if let Some(mode) = params.blend.mode() {
            result = blend_lines(&result, axis, 2, mode, 1.0)?;
        }
        horizontal = !horizontal;
    }
    Ok(result)
}

/// One ghost-split pass over every even-indexed line of one orientation.
fn split_pass<R: Rng>(
    image: &Image,
    axis: Axis,
    params: &GhostSplitParams,
    offset: f64,
    rng: &mut R,
) -> OpsResult<Image> {
    let mut all_lines = lines::extract(image, axis);
    let line_len = axis.line_len(image);
    let mut shift = line_len as f64 / params.splits as f64 * offset;

    // Fixed per-section signs, where the pattern defines them up front.
    let section_signs: Vec<f64> = match params.pattern {
        SplitPattern::TowardEnd => {
            shift = -shift;
            Vec::new()
        }
        SplitPattern::Mirrored => (0..params.splits)
            .map(|i| if i % 2 == 0 { 1.0 } else { -1.0 })
            .collect(),
        SplitPattern::RandomSections => (0..params.splits)
            .map(|_| if rng.gen_bool(0.5) { 1.0 } else { -1.0 })
            .collect(),
        _ => Vec::new(),
    };
    let opts = if params.circular {
        ShiftOptions::circular()
    } else {
        ShiftOptions::truncating()
    };

    for (i, line) in all_lines.iter_mut().enumerate() {
        if i % 2 == 1 {
            continue;
        }
        if params.pattern == SplitPattern::RandomPerLine && rng.gen_bool(0.5) {
            shift = -shift;
        }
        let mut sections = partition(std::mem::take(line), params.splits)?;
        for (k, section) in sections.iter_mut().enumerate() {
            if let Some(&sign) = section_signs.get(k) {
                shift = shift.abs() * sign;
            }
            shift::shift_pixels(section, shift, opts, rng);
        }
        *line = merge(sections);
    }

    let mut dest = Image::new(image.width(), image.height(), image.mode());
    lines::write_lines(&mut dest, &all_lines, axis)?;
    Ok(dest)
}
