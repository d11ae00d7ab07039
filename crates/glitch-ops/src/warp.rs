//! Wave-warp and mirror effect compositions.
//!
//! Wave-warp runs one phase-advancing [`WaveShifter`] across every line of
//! one orientation. A horizontal wave displaces *columns* (each column
//! slides up or down as the wave crosses the image), which is why the
//! extraction axis is the opposite of the wave direction.

use glitch_core::{lines, merge, partition, Axis, Image, Pixel};
use rand::Rng;
use tracing::debug;

use crate::error::{OpsError, OpsResult};
use crate::wave::{wave_pair, WaveKind, WaveShifter};
use crate::Direction;

/// Parameters for [`wave_warp`].
#[derive(Debug, Clone, Copy)]
pub struct WaveWarpParams {
    /// Wave direction (or cross for one pass per axis).
    pub direction: Direction,
    /// Peak displacement as a fraction in `[0, 1]` of the displaced
    /// dimension; zero draws a random fraction.
    pub amplitude: f64,
    /// Period as a fraction in `[0, 1]` of the traversed dimension; zero
    /// requests the natural period.
    pub period: f64,
    /// Waveform family.
    pub kind: WaveKind,
    /// Wraparound policy for the per-line shifts.
    pub circular: bool,
}

/// Ripples the image by shifting each line by a waveform sampled per line.
///
/// Cross directions run a second pass over the orthogonal orientation with
/// the pair's second, independently-phased shifter.
pub fn wave_warp<R: Rng>(image: &Image, params: &WaveWarpParams, rng: &mut R) -> OpsResult<Image> {
    debug!(
        ?params.direction,
        params.amplitude,
        params.period,
        ?params.kind,
        "wave_warp"
    );
    if image.is_empty() {
        return Ok(image.clone());
    }
    let mut horizontal = params.direction.horizontal_first();
    // A horizontal wave needs vertical displacement, so the pair is built
    // with the opposite orientation first.
    let (mut shifter, mut next_shifter) = wave_pair(
        image.width() as f64,
        image.height() as f64,
        params.amplitude,
        params.period,
        params.kind,
        params.circular,
        !horizontal,
        rng,
    );

    let mut result = image.clone();
    for _ in 0..params.direction.repetitions() {
        result = wave_pass(&result, &mut shifter, horizontal, rng)?;
        horizontal = !horizontal;
        std::mem::swap(&mut shifter, &mut next_shifter);
    }
    Ok(result)
}

/// One wave pass: shift every line of the orientation orthogonal to the
/// wave direction.
fn wave_pass<R: Rng>(
    image: &Image,
    shifter: &mut WaveShifter,
    horizontal: bool,
    rng: &mut R,
) -> OpsResult<Image> {
    let axis = if horizontal { Axis::Columns } else { Axis::Rows };
    let mut all_lines = lines::extract(image, axis);
    for line in &mut all_lines {
        shifter.apply(line, rng);
    }
    let mut dest = Image::new(image.width(), image.height(), image.mode());
    lines::write_lines(&mut dest, &all_lines, axis)?;
    Ok(dest)
}

/// Which half of each mirror group survives the reflection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeepSide {
    /// Keep the start (left/top) half.
    #[default]
    Start,
    /// Keep the end (right/bottom) half.
    End,
    /// Coin-flip per group.
    Random,
}

/// Parameters for [`mirror`].
#[derive(Debug, Clone, Copy)]
pub struct MirrorParams {
    /// Reflection direction; a horizontal reflection reflects over a
    /// vertical line (and therefore reorders columns).
    pub direction: Direction,
    /// Number of mirror groups. Must be at least 1.
    pub mirrors: usize,
    /// Which half of each group survives.
    pub side: KeepSide,
}

/// Reflects line groups, overwriting one half of each group with the
/// reverse of the kept half.
///
/// Groups too small to hold two halves (a single line) are left unchanged.
///
/// # Errors
///
/// Returns [`OpsError::InvalidParameter`] if `mirrors` is zero.
pub fn mirror<R: Rng>(image: &Image, params: &MirrorParams, rng: &mut R) -> OpsResult<Image> {
    debug!(?params.direction, params.mirrors, ?params.side, "mirror");
    if params.mirrors == 0 {
        return Err(OpsError::InvalidParameter(
            "mirror count must be at least 1".into(),
        ));
    }
    if image.is_empty() {
        return Ok(image.clone());
    }
    let mut horizontal = params.direction.horizontal_first();
    let mut result = image.clone();
    for _ in 0..params.direction.repetitions() {
        let axis = if horizontal { Axis::Columns } else { Axis::Rows };
        result = mirror_pass(&result, axis, params, rng)?;
        horizontal = !horizontal;
    }
    Ok(result)
}

/// One mirror pass over all line groups of one orientation.
fn mirror_pass<R: Rng>(
    image: &Image,
    axis: Axis,
    params: &MirrorParams,
    rng: &mut R,
) -> OpsResult<Image> {
    let all_lines = lines::extract(image, axis);
    let mut groups = partition(all_lines, params.mirrors)?;
    for group in &mut groups {
        let len = group.len();
        let half = len / 2;
        if half == 0 {
            continue;
        }
        let keep_start = match params.side {
            KeepSide::Start => true,
            KeepSide::End => false,
            KeepSide::Random => rng.gen_bool(0.5),
        };
        let reflected: Vec<Vec<Pixel>> = if keep_start {
            group[..len - half]
                .iter()
                .cloned()
                .chain(group[..half].iter().rev().cloned())
                .collect()
        } else {
            group[len - half..]
                .iter()
                .rev()
                .cloned()
                .chain(group[half..].iter().cloned())
                .collect()
        };
        *group = reflected;
    }
    let mut dest = Image::new(image.width(), image.height(), image.mode());
    lines::write_lines(&mut dest, &merge(groups), axis)?;
    Ok(dest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glitch_core::ChannelMode;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn gray_image(width: u32, height: u32, values: &[u8]) -> Image {
        let data = values.iter().map(|&v| Pixel::gray(v)).collect();
        Image::from_pixels(width, height, ChannelMode::Gray, data).unwrap()
    }

    fn values(image: &Image) -> Vec<u8> {
        image.data().iter().map(|p| p.channel(0)).collect()
    }

    #[test]
    fn test_vertical_wave_shifts_rows() {
        // Vertical wave, sine: displacement at phase 0 is 0, at phase pi/2
        // it is the full amplitude. Period fraction chosen so one row shifts
        // by exactly the amplitude.
        let img = gray_image(4, 2, &[1, 2, 3, 4, 5, 6, 7, 8]);
        let params = WaveWarpParams {
            direction: Direction::Vertical,
            amplitude: 0.25, // 1 pixel of a 4-wide row
            period: 2.0 / 2.0,
            kind: WaveKind::Sine,
            circular: true,
        };
        let mut rng = Pcg32::seed_from_u64(0);
        let out = wave_warp(&img, &params, &mut rng).unwrap();
        // Row 0: sin(0) = 0 -> unchanged. Row 1 shifts by some whole count;
        // rotation preserves content.
        assert_eq!(&values(&out)[..4], &[1, 2, 3, 4]);
        let mut row1 = values(&out)[4..].to_vec();
        row1.sort_unstable();
        assert_eq!(row1, vec![5, 6, 7, 8]);
    }

    #[test]
    fn test_horizontal_wave_shifts_columns() {
        // A truncating horizontal wave must blank cells within columns,
        // never within rows.
        let img = gray_image(2, 4, &[1, 2, 3, 4, 5, 6, 7, 8]);
        let params = WaveWarpParams {
            direction: Direction::Horizontal,
            amplitude: 0.5,
            period: 0.25,
            kind: WaveKind::Square,
            circular: false,
        };
        let mut rng = Pcg32::seed_from_u64(0);
        let out = wave_warp(&img, &params, &mut rng).unwrap();
        // Each output column is a shifted version of an input column: every
        // non-blank value keeps its original column parity.
        for (x, y, p) in out.pixels() {
            let v = p.channel(0);
            if v != 0 {
                assert_eq!(
                    (v - 1) % 2,
                    x as u8,
                    "value {v} moved out of column {x} (row {y})"
                );
            }
        }
    }

    #[test]
    fn test_mirror_keep_start_rows() {
        let img = gray_image(1, 4, &[1, 2, 3, 4]);
        let params = MirrorParams {
            direction: Direction::Vertical,
            mirrors: 1,
            side: KeepSide::Start,
        };
        let mut rng = Pcg32::seed_from_u64(0);
        let out = mirror(&img, &params, &mut rng).unwrap();
        assert_eq!(values(&out), vec![1, 2, 2, 1]);
    }

    #[test]
    fn test_mirror_keep_end_rows() {
        let img = gray_image(1, 4, &[1, 2, 3, 4]);
        let params = MirrorParams {
            direction: Direction::Vertical,
            mirrors: 1,
            side: KeepSide::End,
        };
        let mut rng = Pcg32::seed_from_u64(0);
        let out = mirror(&img, &params, &mut rng).unwrap();
        assert_eq!(values(&out), vec![4, 3, 3, 4]);
    }

    #[test]
    fn test_mirror_opposite_side_restores_structure() {
        // Keeping the start then mirroring the result with the end side
        // kept returns the mirrored image unchanged: both halves are
        // already reflections of each other.
        let img = gray_image(1, 6, &[9, 5, 7, 1, 3, 8]);
        let mut rng = Pcg32::seed_from_u64(0);
        let start = MirrorParams {
            direction: Direction::Vertical,
            mirrors: 1,
            side: KeepSide::Start,
        };
        let end = MirrorParams {
            side: KeepSide::End,
            ..start
        };
        let once = mirror(&img, &start, &mut rng).unwrap();
        let twice = mirror(&once, &end, &mut rng).unwrap();
        assert_eq!(values(&twice), values(&once));
    }

    #[test]
    fn test_mirror_horizontal_reflects_columns() {
        let img = gray_image(4, 1, &[1, 2, 3, 4]);
        let params = MirrorParams {
            direction: Direction::Horizontal,
            mirrors: 1,
            side: KeepSide::Start,
        };
        let mut rng = Pcg32::seed_from_u64(0);
        let out = mirror(&img, &params, &mut rng).unwrap();
        assert_eq!(values(&out), vec![1, 2, 2, 1]);
    }

    #[test]
    fn test_mirror_single_line_group_untouched() {
        // Three lines into three mirrors partition as [1, 2]: the lone
        // first group cannot hold two halves and stays as-is; the trailing
        // pair reflects normally.
        let img = gray_image(1, 3, &[4, 5, 6]);
        let params = MirrorParams {
            direction: Direction::Vertical,
            mirrors: 3,
            side: KeepSide::Start,
        };
        let mut rng = Pcg32::seed_from_u64(0);
        let out = mirror(&img, &params, &mut rng).unwrap();
        assert_eq!(values(&out), vec![4, 5, 5]);
    }

    #[test]
    fn test_mirror_zero_mirrors_rejected() {
        let img = gray_image(2, 2, &[1, 2, 3, 4]);
        let params = MirrorParams {
            direction: Direction::Vertical,
            mirrors: 0,
            side: KeepSide::Start,
        };
        let mut rng = Pcg32::seed_from_u64(0);
        assert!(mirror(&img, &params, &mut rng).is_err());
    }
}
