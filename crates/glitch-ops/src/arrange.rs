//! Sort/rearrange engine: key-based stable sorting and direct in-place
//! rearrangers.
//!
//! Effects order their material in one of two modes. **Key mode** stably
//! sorts items by a scalar key derived from their pixels. **Rearrangement
//! mode** mutates the list in place with an [`Arranger`]: a shuffle, a
//! shift, or a stateful waveform. The two modes are interchangeable at the
//! call site, which is what lets one effect offer "brightness sort" and
//! "wave shift" through the same parameter.

use glitch_core::Pixel;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::shift::{self, ShiftOptions};
use crate::wave::WaveShifter;

/// Scalar key extracted from a pixel for key-mode sorting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Perceptual luma (identity for grayscale pixels).
    #[default]
    Brightness,
    /// Red channel (channel 0).
    Red,
    /// Green channel (channel 1, or the only channel for grayscale).
    Green,
    /// Blue channel (channel 2, or the only channel for grayscale).
    Blue,
}

impl SortKey {
    /// Key value for a single pixel.
    pub fn pixel_key(self, pixel: &Pixel) -> u32 {
        let channel = |i: usize| pixel.channel(i.min(pixel.channels() - 1)) as u32;
        match self {
            SortKey::Brightness => pixel.brightness() as u32,
            SortKey::Red => channel(0),
            SortKey::Green => channel(1),
            SortKey::Blue => channel(2),
        }
    }

    /// Key value for a segment: the sum over its pixels. Sums compare the
    /// same way averages do, so there is no need to divide.
    pub fn segment_key(self, segment: &[Pixel]) -> u64 {
        segment.iter().map(|p| self.pixel_key(p) as u64).sum()
    }
}

/// In-place rearrangement function for rearrangement mode.
///
/// Shift and wave arrangers carry state (resolved random choices, wave
/// phase) across calls, so one arranger value is threaded through an entire
/// effect pass.
#[derive(Debug, Clone)]
pub enum Arranger {
    /// Uniform random permutation.
    Shuffle,
    /// Fixed-offset shift applied to every list.
    Shift {
        /// Raw displacement, resolved per list length.
        offset: f64,
        /// Circular/truncating and randomization switches.
        opts: ShiftOptions,
    },
    /// Phase-advancing periodic shift.
    Wave(WaveShifter),
}

impl Arranger {
    /// Rearranges a pixel list in place.
    ///
    /// Called with an empty list this still advances a wave arranger's
    /// phase, keeping the phase locked to the caller's line index.
    pub fn arrange_pixels<R: Rng>(&mut self, line: &mut [Pixel], rng: &mut R) {
        match self {
            Arranger::Shuffle => line.shuffle(rng),
            Arranger::Shift { offset, opts } => shift::shift_pixels(line, *offset, *opts, rng),
            Arranger::Wave(wave) => wave.apply(line, rng),
        }
    }

    /// Rearranges a list of whole segments in place.
    ///
    /// For truncating shifts the blank unit is a whole blank segment.
    pub fn arrange_segments<R: Rng>(&mut self, segments: &mut [Vec<Pixel>], rng: &mut R) {
        match self {
            Arranger::Shuffle => segments.shuffle(rng),
            Arranger::Shift { offset, opts } => {
                shift::shift_segments(segments, *offset, *opts, rng)
            }
            Arranger::Wave(wave) => {
                let offset = wave.displacement(wave.phase());
                wave.advance();
                shift::shift_segments(
                    segments,
                    offset,
                    if wave.is_circular() {
                        ShiftOptions::circular()
                    } else {
                        ShiftOptions::truncating()
                    },
                    rng,
                );
            }
        }
    }
}

/// Ordering policy: key-mode sort or rearrangement-mode mutation.
#[derive(Debug, Clone)]
pub enum Order {
    /// Stable sort by a scalar key.
    Key {
        /// Key extractor.
        key: SortKey,
        /// Ascending when true, descending otherwise. Both directions are
        /// stable: equal-key items keep their relative order.
        ascending: bool,
    },
    /// Direct in-place rearrangement.
    Arrange(Arranger),
}

impl Order {
    /// Applies this ordering to a pixel list.
    pub fn apply_pixels<R: Rng>(&mut self, line: &mut [Pixel], rng: &mut R) {
        match self {
            Order::Key { key, ascending } => {
                let key = *key;
                if *ascending {
                    line.sort_by_key(|p| key.pixel_key(p));
                } else {
                    line.sort_by(|a, b| key.pixel_key(b).cmp(&key.pixel_key(a)));
                }
            }
            Order::Arrange(arranger) => arranger.arrange_pixels(line, rng),
        }
    }

    /// Applies this ordering to a list of whole segments.
    pub fn apply_segments<R: Rng>(&mut self, segments: &mut [Vec<Pixel>], rng: &mut R) {
        match self {
            Order::Key { key, ascending } => {
                let key = *key;
                if *ascending {
                    segments.sort_by_key(|s| key.segment_key(s));
                } else {
                    segments.sort_by(|a, b| key.segment_key(b).cmp(&key.segment_key(a)));
                }
            }
            Order::Arrange(arranger) => arranger.arrange_segments(segments, rng),
        }
    }

    /// True when this is a rearrangement (non-key) ordering.
    pub fn is_rearrangement(&self) -> bool {
        matches!(self, Order::Arrange(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wave::WaveKind;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn grays(values: &[u8]) -> Vec<Pixel> {
        values.iter().map(|&v| Pixel::gray(v)).collect()
    }

    fn values(line: &[Pixel]) -> Vec<u8> {
        line.iter().map(|p| p.channel(0)).collect()
    }

    #[test]
    fn test_brightness_key_gray_identity() {
        assert_eq!(SortKey::Brightness.pixel_key(&Pixel::gray(42)), 42);
    }

    #[test]
    fn test_brightness_key_rgb_luma() {
        // 0.299*255 rounds to 76.
        assert_eq!(SortKey::Brightness.pixel_key(&Pixel::rgb(255, 0, 0)), 76);
    }

    #[test]
    fn test_channel_keys() {
        let p = Pixel::rgb(10, 20, 30);
        assert_eq!(SortKey::Red.pixel_key(&p), 10);
        assert_eq!(SortKey::Green.pixel_key(&p), 20);
        assert_eq!(SortKey::Blue.pixel_key(&p), 30);
    }

    #[test]
    fn test_key_sort_ascending_and_descending() {
        let mut rng = Pcg32::seed_from_u64(0);
        let mut line = grays(&[30, 10, 40, 20]);
        let mut asc = Order::Key {
            key: SortKey::Brightness,
            ascending: true,
        };
        asc.apply_pixels(&mut line, &mut rng);
        assert_eq!(values(&line), vec![10, 20, 30, 40]);

        let mut desc = Order::Key {
            key: SortKey::Brightness,
            ascending: false,
        };
        desc.apply_pixels(&mut line, &mut rng);
        assert_eq!(values(&line), vec![40, 30, 20, 10]);
    }

    #[test]
    fn test_segment_sort_by_summed_key() {
        let mut rng = Pcg32::seed_from_u64(0);
        let mut segments = vec![grays(&[50, 50]), grays(&[10, 10]), grays(&[30, 30])];
        let mut order = Order::Key {
            key: SortKey::Brightness,
            ascending: true,
        };
        order.apply_segments(&mut segments, &mut rng);
        assert_eq!(values(&segments[0]), vec![10, 10]);
        assert_eq!(values(&segments[2]), vec![50, 50]);
    }

    #[test]
    fn test_shuffle_is_permutation() {
        let mut rng = Pcg32::seed_from_u64(11);
        let mut line = grays(&[1, 2, 3, 4, 5, 6, 7, 8]);
        Arranger::Shuffle.arrange_pixels(&mut line, &mut rng);
        let mut sorted = values(&line);
        sorted.sort_unstable();
        assert_eq!(sorted, vec![1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn test_shift_arranger_reuses_offset_across_lines() {
        let mut rng = Pcg32::seed_from_u64(0);
        let mut arranger = Arranger::Shift {
            offset: 1.0,
            opts: ShiftOptions::circular(),
        };
        let mut a = grays(&[1, 2, 3]);
        let mut b = grays(&[4, 5, 6]);
        arranger.arrange_pixels(&mut a, &mut rng);
        arranger.arrange_pixels(&mut b, &mut rng);
        assert_eq!(values(&a), vec![2, 3, 1]);
        assert_eq!(values(&b), vec![5, 6, 4]);
    }

    #[test]
    fn test_wave_arranger_advances_on_empty_input() {
        let mut rng = Pcg32::seed_from_u64(0);
        let wave = WaveShifter::new(2.0, 16.0, WaveKind::Sine, true, false);
        let mut arranger = Arranger::Wave(wave);
        let mut empty: Vec<Pixel> = Vec::new();
        arranger.arrange_pixels(&mut empty, &mut rng);
        match arranger {
            Arranger::Wave(w) => assert!(w.phase() > 0.0),
            _ => unreachable!(),
        }
    }
}
