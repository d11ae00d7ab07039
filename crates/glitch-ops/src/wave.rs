//! Waveform shift generator: periodic per-line displacements.
//!
//! A [`WaveShifter`] carries its own phase and advances it by a quarter turn
//! (`PI / 2`) every time a line is processed, so successive lines sample
//! successive points on the waveform. Feeding lines in order produces the
//! characteristic ripple; feeding the same shifter two interleaved passes
//! keeps the two passes phase-locked.

use std::f64::consts::PI;

use glitch_core::Pixel;
use rand::Rng;

use crate::shift::{self, ShiftOptions};

/// Waveform families for periodic shifting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WaveKind {
    /// Smooth sinusoid.
    #[default]
    Sine,
    /// Linear ramp up and down.
    Triangle,
    /// Alternating plateaus at `+amplitude` / `-amplitude`.
    Square,
    /// Linear ramp with an instant reset.
    Sawtooth,
}

/// Stateful waveform displacement generator.
///
/// `amplitude` and `period` are in pixels of displacement and phase units
/// respectively. A zero amplitude or period degenerates to a zero
/// displacement but the phase still advances, so a degenerate shifter can
/// stand in for an active one without desynchronizing a paired shifter.
#[derive(Debug, Clone)]
pub struct WaveShifter {
    amplitude: f64,
    period: f64,
    kind: WaveKind,
    circular: bool,
    phase: f64,
}

impl WaveShifter {
    /// Creates a shifter starting at phase zero.
    ///
    /// `randomize_period` forces the period to one full turn (`2 * PI`),
    /// which reads as "natural" period for phase-stepped sampling.
    pub fn new(
        amplitude: f64,
        period: f64,
        kind: WaveKind,
        circular: bool,
        randomize_period: bool,
    ) -> Self {
        let period = if randomize_period { 2.0 * PI } else { period };
        Self {
            amplitude,
            period,
            kind,
            circular,
            phase: 0.0,
        }
    }

    /// Current phase, in the same units as the period.
    pub fn phase(&self) -> f64 {
        self.phase
    }

    /// Amplitude in pixels.
    pub fn amplitude(&self) -> f64 {
        self.amplitude
    }

    /// Whether applied shifts wrap around instead of truncating.
    pub fn is_circular(&self) -> bool {
        self.circular
    }

    /// Advances the phase by a quarter turn without shifting anything.
    pub fn advance(&mut self) {
        self.phase += PI / 2.0;
    }

    /// Evaluates the waveform at `x` without advancing the phase.
    pub fn displacement(&self, x: f64) -> f64 {
        let a = self.amplitude;
        let p = self.period;
        if a == 0.0 || p == 0.0 {
            return 0.0;
        }
        match self.kind {
            WaveKind::Sine => a * (2.0 * PI / p * x).sin(),
            WaveKind::Triangle => {
                (4.0 * a / p) * (((x - p / 4.0).rem_euclid(p)) - p / 2.0).abs() - a
            }
            WaveKind::Square => {
                let half = p / 2.0;
                a * (-2.0 * ((x / half).floor().rem_euclid(2.0)) + 1.0)
            }
            WaveKind::Sawtooth => ((2.0 * a * x / p) - a).rem_euclid(2.0 * a) - a,
        }
    }

    /// Shifts one line by the waveform value at the current phase, then
    /// advances the phase by a quarter turn.
    ///
    /// Empty lines still advance the phase.
    pub fn apply<R: Rng>(&mut self, line: &mut [Pixel], rng: &mut R) {
        let offset = self.displacement(self.phase);
        self.advance();
        if line.is_empty() {
            return;
        }
        let opts = if self.circular {
            ShiftOptions::circular()
        } else {
            ShiftOptions::truncating()
        };
        shift::shift_pixels(line, offset, opts, rng);
    }
}

/// Builds the horizontal/vertical shifter pair an image-sized wave effect
/// needs.
///
/// Amplitudes scale with the axis being displaced and periods with the axis
/// being traversed, so the ripple keeps its shape across aspect ratios. A
/// zero `amplitude_frac` draws a random fraction in `(0, 1]`; a zero
/// `period_frac` gives both shifters the natural one-turn period.
///
/// The first shifter of the returned pair is the one to run first:
/// horizontal when `horizontal_first`, vertical otherwise.
#[allow(clippy::too_many_arguments)]
pub fn wave_pair<R: Rng>(
    width: f64,
    height: f64,
    amplitude_frac: f64,
    period_frac: f64,
    kind: WaveKind,
    circular: bool,
    horizontal_first: bool,
    rng: &mut R,
) -> (WaveShifter, WaveShifter) {
    let amplitude_frac = if amplitude_frac == 0.0 {
        rng.gen_range(1..=100) as f64 / 100.0
    } else {
        amplitude_frac
    };
    let randomize_period = period_frac == 0.0;

    let horizontal_amp = width * amplitude_frac;
    let vertical_amp = height * amplitude_frac;
    let horizontal_period = height * period_frac * PI / 2.0;
    let vertical_period = width * period_frac * PI / 2.0;

    let horizontal = WaveShifter::new(
        horizontal_amp,
        horizontal_period,
        kind,
        circular,
        randomize_period,
    );
    let vertical = WaveShifter::new(
        vertical_amp,
        vertical_period,
        kind,
        circular,
        randomize_period,
    );
    if horizontal_first {
        (horizontal, vertical)
    } else {
        (vertical, horizontal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use glitch_core::Pixel;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_sine_periodicity() {
        let w = WaveShifter::new(10.0, 4.0, WaveKind::Sine, true, false);
        for x in [0.0, 0.7, 1.3, 2.9] {
            assert_relative_eq!(w.displacement(x), w.displacement(x + 4.0), epsilon = 1e-9);
        }
        assert_relative_eq!(w.displacement(1.0), 10.0, epsilon = 1e-9);
        assert_relative_eq!(w.displacement(3.0), -10.0, epsilon = 1e-9);
    }

    #[test]
    fn test_triangle_shape() {
        let w = WaveShifter::new(8.0, 8.0, WaveKind::Triangle, true, false);
        assert_relative_eq!(w.displacement(0.0), 0.0, epsilon = 1e-9);
        assert_relative_eq!(w.displacement(2.0), 8.0, epsilon = 1e-9);
        assert_relative_eq!(w.displacement(4.0), 0.0, epsilon = 1e-9);
        assert_relative_eq!(w.displacement(6.0), -8.0, epsilon = 1e-9);
    }

    #[test]
    fn test_square_plateaus() {
        let w = WaveShifter::new(5.0, 4.0, WaveKind::Square, true, false);
        assert_relative_eq!(w.displacement(0.5), 5.0, epsilon = 1e-9);
        assert_relative_eq!(w.displacement(1.9), 5.0, epsilon = 1e-9);
        assert_relative_eq!(w.displacement(2.1), -5.0, epsilon = 1e-9);
        assert_relative_eq!(w.displacement(3.9), -5.0, epsilon = 1e-9);
    }

    #[test]
    fn test_sawtooth_wraps() {
        // With a = p = 6 the ramp passes through 0 at the origin, climbs to
        // just under +a, and drops to -a at the half-period.
        let w = WaveShifter::new(6.0, 6.0, WaveKind::Sawtooth, true, false);
        assert_relative_eq!(w.displacement(0.0), 0.0, epsilon = 1e-9);
        assert_relative_eq!(w.displacement(2.9), 5.8, epsilon = 1e-9);
        assert_relative_eq!(w.displacement(3.0), -6.0, epsilon = 1e-9);
        // One full period later the ramp has wrapped back near zero.
        assert_relative_eq!(w.displacement(6.1), 0.2, epsilon = 1e-9);
    }

    #[test]
    fn test_degenerate_amplitude_is_zero() {
        let w = WaveShifter::new(0.0, 4.0, WaveKind::Sine, true, false);
        assert_eq!(w.displacement(1.0), 0.0);
        let w = WaveShifter::new(3.0, 0.0, WaveKind::Sine, true, false);
        assert_eq!(w.displacement(1.0), 0.0);
    }

    #[test]
    fn test_phase_advances_per_line_even_when_empty() {
        let mut w = WaveShifter::new(4.0, 16.0, WaveKind::Sine, true, false);
        let mut rng = Pcg32::seed_from_u64(1);
        let mut empty: Vec<Pixel> = Vec::new();
        let mut line = vec![Pixel::gray(1), Pixel::gray(2)];
        w.apply(&mut empty, &mut rng);
        w.apply(&mut line, &mut rng);
        assert_relative_eq!(w.phase(), PI, epsilon = 1e-9);
    }

    #[test]
    fn test_wave_pair_scaling() {
        let mut rng = Pcg32::seed_from_u64(0);
        let (first, second) =
            wave_pair(100.0, 50.0, 0.1, 1.0, WaveKind::Sine, true, true, &mut rng);
        // horizontal first: amplitude scales with width, period with height.
        assert_relative_eq!(first.amplitude(), 10.0, epsilon = 1e-9);
        assert_relative_eq!(second.amplitude(), 5.0, epsilon = 1e-9);
    }

    #[test]
    fn test_wave_pair_random_amplitude_in_range() {
        let mut rng = Pcg32::seed_from_u64(7);
        let (first, _) = wave_pair(100.0, 100.0, 0.0, 1.0, WaveKind::Sine, true, true, &mut rng);
        assert!(first.amplitude() >= 1.0 && first.amplitude() <= 100.0);
    }
}
