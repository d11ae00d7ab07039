//! Line-sort and glitch-sort effect compositions.
//!
//! Line-sort chunks the flattened image into equal segments (whole lines,
//! bands of lines, or raw pixel runs) and reorders the segments with the
//! sort/rearrange engine. Glitch-sort works inside individual lines: each
//! line is selected with a given probability and only a bounded window of
//! it (placed by an anchor policy, wrapping around the line end) is
//! reordered.

use glitch_core::{chunk, lines, Axis, Image, Pixel};
use rand::Rng;
use tracing::debug;

use crate::arrange::{Arranger, Order, SortKey};
use crate::error::{OpsError, OpsResult};
use crate::shift::ShiftOptions;
use crate::wave::{wave_pair, WaveKind};
use crate::Direction;

/// Sign of a caller-chosen shift direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShiftDirection {
    /// Toward lower indices (left/top).
    #[default]
    TowardStart,
    /// Toward higher indices (right/bottom).
    TowardEnd,
    /// Coin-flipped per application.
    Random,
}

impl ShiftDirection {
    fn sign(self) -> f64 {
        match self {
            ShiftDirection::TowardEnd => -1.0,
            _ => 1.0,
        }
    }
}

/// Magnitude and direction for shift-based sort methods.
///
/// `percent` is a fraction of the relevant dimension; zero requests a
/// random magnitude per application.
#[derive(Debug, Clone, Copy)]
pub struct ShiftSpec {
    /// Shift distance as a fraction in `[0, 1]` of the pass dimension.
    pub percent: f64,
    /// Which way to shift.
    pub direction: ShiftDirection,
}

/// Waveform parameters for wave-based sort methods, as fractions of the
/// pass dimensions.
#[derive(Debug, Clone, Copy)]
pub struct WaveSpec {
    /// Peak displacement as a fraction in `[0, 1]`; zero draws a random
    /// fraction.
    pub amplitude: f64,
    /// Period as a fraction in `[0, 1]`; zero requests the natural period.
    pub period: f64,
    /// Waveform family.
    pub kind: WaveKind,
    /// Wraparound policy for the applied shifts.
    pub circular: bool,
}

/// How segments or windowed pixels are reordered.
#[derive(Debug, Clone, Copy)]
pub enum SortMethod {
    /// Stable key sort.
    Key {
        /// Scalar key per pixel (summed over segments).
        key: SortKey,
        /// Sort direction.
        ascending: bool,
    },
    /// Uniform random permutation.
    Shuffle,
    /// Circular shift.
    Rotate(ShiftSpec),
    /// Truncating shift.
    Blank(ShiftSpec),
    /// Phase-advancing periodic shift.
    Wave(WaveSpec),
}

impl SortMethod {
    /// Builds the (first-pass, second-pass) order pair for this method.
    ///
    /// Shift and wave methods precompute separate magnitudes per pass axis;
    /// key and shuffle methods are axis-independent and the two orders are
    /// identical.
    fn orders<R: Rng>(
        &self,
        width: f64,
        height: f64,
        horizontal_first: bool,
        rng: &mut R,
    ) -> (Order, Order) {
        match *self {
            SortMethod::Key { key, ascending } => {
                let order = Order::Key { key, ascending };
                (order.clone(), order)
            }
            SortMethod::Shuffle => (
                Order::Arrange(Arranger::Shuffle),
                Order::Arrange(Arranger::Shuffle),
            ),
            SortMethod::Rotate(spec) | SortMethod::Blank(spec) => {
                let circular = matches!(self, SortMethod::Rotate(_));
                let opts = ShiftOptions {
                    circular,
                    randomize_magnitude: spec.percent == 0.0,
                    randomize_direction: spec.direction == ShiftDirection::Random,
                };
                let sign = spec.direction.sign();
                let horizontal_offset = width * spec.percent * sign;
                let vertical_offset = height * spec.percent * sign;
                let (first, second) = if horizontal_first {
                    (horizontal_offset, vertical_offset)
                } else {
                    (vertical_offset, horizontal_offset)
                };
                (
                    Order::Arrange(Arranger::Shift {
                        offset: first,
                        opts,
                    }),
                    Order::Arrange(Arranger::Shift {
                        offset: second,
                        opts,
                    }),
                )
            }
            SortMethod::Wave(spec) => {
                let (first, second) = wave_pair(
                    width,
                    height,
                    spec.amplitude,
                    spec.period,
                    spec.kind,
                    spec.circular,
                    horizontal_first,
                    rng,
                );
                (
                    Order::Arrange(Arranger::Wave(first)),
                    Order::Arrange(Arranger::Wave(second)),
                )
            }
        }
    }
}

/// How line-sort carves the image into sortable segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    /// Bands of whole rows.
    Rows,
    /// Bands of whole columns.
    Columns,
    /// Row bands, then column bands of the same width.
    Crosshatch,
    /// Fixed-size pixel runs in row-major order.
    HorizontalPixels,
    /// Fixed-size pixel runs in column-major order.
    VerticalPixels,
}

impl SegmentKind {
    fn has_row_pass(self) -> bool {
        matches!(
            self,
            SegmentKind::Rows | SegmentKind::Crosshatch | SegmentKind::HorizontalPixels
        )
    }

    fn has_column_pass(self) -> bool {
        matches!(
            self,
            SegmentKind::Columns | SegmentKind::Crosshatch | SegmentKind::VerticalPixels
        )
    }

    fn horizontal_first(self) -> bool {
        matches!(self, SegmentKind::Rows | SegmentKind::Crosshatch)
    }

    fn by_pixel(self) -> bool {
        matches!(
            self,
            SegmentKind::HorizontalPixels | SegmentKind::VerticalPixels
        )
    }
}

/// Parameters for [`line_sort`].
#[derive(Debug, Clone, Copy)]
pub struct LineSortParams {
    /// Segment carving scheme.
    pub kind: SegmentKind,
    /// Band thickness in lines, or run length in pixels for the pixel
    /// kinds. Must be at least 1.
    pub size: u32,
    /// Reordering method.
    pub method: SortMethod,
}

/// Sorts or rearranges whole segments of the image.
///
/// Runs a row-major pass, a column-major pass, or both, per
/// [`SegmentKind`]. The second pass always takes the second precomputed
/// order, whether or not a first pass ran.
///
/// # Errors
///
/// Returns [`OpsError::InvalidParameter`] if `size` is zero.
pub fn line_sort<R: Rng>(image: &Image, params: &LineSortParams, rng: &mut R) -> OpsResult<Image> {
    debug!(?params.kind, params.size, "line_sort");
    if params.size == 0 {
        return Err(OpsError::InvalidParameter(
            "segment size must be at least 1".into(),
        ));
    }
    if image.is_empty() {
        return Ok(image.clone());
    }
    let size = params.size as usize;
    let width = image.width() as f64;
    let height = image.height() as f64;
    // Shift magnitudes scale with how much material one segment spans.
    let (shift_w, shift_h) = if params.by_pixel() {
        let per = image.pixel_count() as f64 / size as f64;
        (per, per)
    } else {
        (width / size as f64, height / size as f64)
    };
    let (mut order, mut next_order) =
        params
            .method
            .orders(shift_w, shift_h, params.kind.horizontal_first(), rng);

    let mut result = image.clone();
    if params.kind.has_row_pass() {
        result = sort_pass(&result, &mut order, Axis::Rows, params, rng)?;
    }
    std::mem::swap(&mut order, &mut next_order);
    if params.kind.has_column_pass() {
        result = sort_pass(&result, &mut order, Axis::Columns, params, rng)?;
    }
    Ok(result)
}

impl LineSortParams {
    fn by_pixel(&self) -> bool {
        self.kind.by_pixel()
    }
}

/// One line-sort pass: chunk, reorder, rebuild.
fn sort_pass<R: Rng>(
    image: &Image,
    order: &mut Order,
    axis: Axis,
    params: &LineSortParams,
    rng: &mut R,
) -> OpsResult<Image> {
    let seg_size = if params.by_pixel() {
        params.size as usize
    } else {
        params.size as usize * axis.line_len(image)
    };
    let flat = lines::flatten(image, axis);
    let mut segments = chunk(&flat, seg_size)?;
    order.apply_segments(&mut segments, rng);
    let mut dest = Image::new(image.width(), image.height(), image.mode());
    lines::write_lines(&mut dest, &segments, axis)?;
    Ok(dest)
}

/// Where the glitch window is anchored within a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Anchor {
    /// Uniform random start position per line.
    #[default]
    Random,
    /// Anchored at the line start, pushed in by the offset fraction.
    Start,
    /// Anchored at the line end, pushed back by the offset fraction.
    End,
    /// Centered, nudged by the offset fraction.
    Center,
}

/// Parameters for [`glitch_sort`].
#[derive(Debug, Clone, Copy)]
pub struct GlitchParams {
    /// Axis (or cross) to glitch along.
    pub direction: Direction,
    /// Probability in `[0, 1]` that a given line is glitched.
    pub frequency: f64,
    /// Fraction in `[0, 1]` of each glitched line covered by the window.
    pub coverage: f64,
    /// Window placement policy.
    pub anchor: Anchor,
    /// Placement offset fraction; meaning depends on the anchor.
    pub anchor_offset: f64,
    /// Reordering method for window contents.
    pub method: SortMethod,
}

/// Reorders a windowed sub-range of randomly selected lines.
///
/// Frequency and coverage are clamped to `[0, 1]`. Cross directions run
/// one pass per axis; a complete glitch (full frequency and coverage) in
/// each direction reaches a state no further sorting can change.
/// Rearrangement methods are invoked with an empty window on unselected
/// lines so a wave method's phase stays locked to the line index.
pub fn glitch_sort<R: Rng>(image: &Image, params: &GlitchParams, rng: &mut R) -> OpsResult<Image> {
    debug!(
        ?params.direction,
        params.frequency,
        params.coverage,
        ?params.anchor,
        "glitch_sort"
    );
    if image.is_empty() {
        return Ok(image.clone());
    }
    let params = GlitchParams {
        frequency: params.frequency.clamp(0.0, 1.0),
        coverage: params.coverage.clamp(0.0, 1.0),
        ..*params
    };
    let width = image.width() as f64 * params.coverage;
    let height = image.height() as f64 * params.coverage;
    let mut horizontal = params.direction.horizontal_first();
    let (mut order, mut next_order) = params.method.orders(width, height, horizontal, rng);

    let mut result = image.clone();
    for _ in 0..params.direction.repetitions() {
        result = glitch_pass(&result, &mut order, horizontal, &params, rng)?;
        horizontal = !horizontal;
        std::mem::swap(&mut order, &mut next_order);
    }
    Ok(result)
}

/// One glitch pass over every line of one orientation.
fn glitch_pass<R: Rng>(
    image: &Image,
    order: &mut Order,
    horizontal: bool,
    params: &GlitchParams,
    rng: &mut R,
) -> OpsResult<Image> {
    let axis = if horizontal { Axis::Rows } else { Axis::Columns };
    let mut all_lines = lines::extract(image, axis);
    for line in &mut all_lines {
        if rng.gen_range(0.0..1.0) <= params.frequency {
            glitch_line(line, order, params, rng);
        } else if order.is_rearrangement() {
            // Phase parity: unselected lines still count as one call.
            order.apply_pixels(&mut [], rng);
        }
    }
    let mut dest = Image::new(image.width(), image.height(), image.mode());
    lines::write_lines(&mut dest, &all_lines, axis)?;
    Ok(dest)
}

/// Extracts the anchored window (wrapping past the line end), reorders it,
/// and writes it back split at the wrap point.
fn glitch_line<R: Rng>(line: &mut [Pixel], order: &mut Order, params: &GlitchParams, rng: &mut R) {
    let len = line.len();
    if len == 0 {
        return;
    }
    let window_len = ((len as f64 * params.coverage).round() as usize).min(len);
    let offset = params.anchor_offset;
    let start = match params.anchor {
        Anchor::Start => (len as f64 * offset).trunc() as i64,
        Anchor::End => (len as f64 * (1.0 - offset) - window_len as f64).trunc() as i64,
        Anchor::Center => {
            (len as f64 * (0.5 + offset) - window_len as f64 / 2.0).trunc() as i64
        }
        Anchor::Random => rng.gen_range(0..len as i64),
    };
    let start = start.rem_euclid(len as i64) as usize;
    let end = start + window_len;
    // Window may continue past the line end and wrap to index 0.
    let (end, wrap) = if end > len { (len, end - len) } else { (end, 0) };

    let mut window = Vec::with_capacity(window_len);
    window.extend_from_slice(&line[start..end]);
    window.extend_from_slice(&line[..wrap]);

    order.apply_pixels(&mut window, rng);

    line[start..end].copy_from_slice(&window[..end - start]);
    line[..wrap].copy_from_slice(&window[end - start..]);
}
