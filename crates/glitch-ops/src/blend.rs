//! Blend reducer: collapses an ordered pixel stack into one pixel.
//!
//! The first pixel of the stack is the bottom layer. Most modes normalize
//! channels to `[0, 1]` and fold the stack bottom-up with a binary operator;
//! the fold is deliberately unclamped so that, e.g., three linear-dodged
//! pixels accumulate before the final rounding. [`BlendMode::Normal`] and
//! [`BlendMode::Average`] bypass the fold entirely. The blended value is
//! then composited against the bottom layer by the opacity factor.
//!
//! Division-shaped modes (ColorBurn, ColorDodge, Divide) special-case their
//! singular operand so no NaN or infinity ever reaches a channel.

use glitch_core::{clamp_intensity, lines, Axis, Image, Pixel};
use tracing::debug;

use crate::error::{OpsError, OpsResult};

/// Pixel-combination formula for the blend reducer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlendMode {
    /// Top layer wins outright.
    Normal,
    /// Arithmetic mean of raw channel values.
    #[default]
    Average,
    /// `top * bottom`.
    Multiply,
    /// `1 - (1 - bottom) / top`, or 0 when `top` is 0.
    ColorBurn,
    /// `top + bottom - 1`.
    LinearBurn,
    /// `1 - (1 - top) * (1 - bottom)`.
    Screen,
    /// `bottom / (1 - top)`, or 1 when `top` is 1.
    ColorDodge,
    /// `top + bottom`.
    LinearDodge,
    /// `bottom - top`.
    Subtract,
    /// `bottom / top`, or 1 when `top` is 0.
    Divide,
    /// Channel-wise minimum.
    Darken,
    /// Channel-wise maximum.
    Lighten,
    /// `1 - |1 - top - bottom|`.
    Negation,
}

impl BlendMode {
    /// Binary operator for fold-based modes; `None` for Normal/Average.
    fn operator(self) -> Option<fn(f64, f64) -> f64> {
        let op: fn(f64, f64) -> f64 = match self {
            BlendMode::Normal | BlendMode::Average => return None,
            BlendMode::Multiply => |top, bottom| top * bottom,
            BlendMode::ColorBurn => |top, bottom| {
                if top != 0.0 {
                    1.0 - (1.0 - bottom) / top
                } else {
                    0.0
                }
            },
            BlendMode::LinearBurn => |top, bottom| top + bottom - 1.0,
            BlendMode::Screen => |top, bottom| 1.0 - (1.0 - top) * (1.0 - bottom),
            BlendMode::ColorDodge => |top, bottom| {
                if top != 1.0 {
                    bottom / (1.0 - top)
                } else {
                    1.0
                }
            },
            BlendMode::LinearDodge => |top, bottom| top + bottom,
            BlendMode::Subtract => |top, bottom| bottom - top,
            BlendMode::Divide => |top, bottom| if top != 0.0 { bottom / top } else { 1.0 },
            BlendMode::Darken => f64::min,
            BlendMode::Lighten => f64::max,
            BlendMode::Negation => |top, bottom| 1.0 - (1.0 - top - bottom).abs(),
        };
        Some(op)
    }
}

/// Raw (0-255 scale) channel values of a pixel.
fn raw_channels(pixel: &Pixel) -> [f64; 4] {
    let mut raw = [0.0; 4];
    for c in 0..pixel.channels() {
        raw[c] = pixel.channel(c) as f64;
    }
    raw
}

/// Collapses an ordered pixel stack into one pixel.
///
/// `pixels[0]` is the bottom layer and the opacity-composite base. Returns
/// `Ok(None)` for an empty stack and the sole pixel unchanged for a
/// single-element stack. Opacity is clamped to `[0, 1]`.
///
/// # Errors
///
/// Returns [`OpsError::ChannelMismatch`] if the stack mixes channel counts.
pub fn blend(pixels: &[Pixel], mode: BlendMode, opacity: f64) -> OpsResult<Option<Pixel>> {
    let Some(base) = pixels.first() else {
        return Ok(None);
    };
    let channels = base.channels();
    for pixel in &pixels[1..] {
        if pixel.channels() != channels {
            return Err(OpsError::ChannelMismatch {
                expected: channels,
                got: pixel.channels(),
            });
        }
    }
    if pixels.len() == 1 {
        return Ok(Some(*base));
    }

    // Blended raw channel values, rounded and clamped before compositing.
    let blended: [f64; 4] = match mode.operator() {
        None => match mode {
            BlendMode::Normal => raw_channels(&pixels[pixels.len() - 1]),
            _ => {
                // Average: mean of raw values.
                let mut sum = [0.0; 4];
                for pixel in pixels {
                    for c in 0..channels {
                        sum[c] += pixel.channel(c) as f64;
                    }
                }
                let mut mean = [0.0; 4];
                for c in 0..channels {
                    mean[c] = clamp_intensity((sum[c] / pixels.len() as f64).round()) as f64;
                }
                mean
            }
        },
        Some(op) => {
            let mut mix = base.to_f64();
            for pixel in &pixels[1..] {
                let top = pixel.to_f64();
                for c in 0..channels {
                    mix[c] = op(top[c], mix[c]);
                }
            }
            let mut raw = [0.0; 4];
            for c in 0..channels {
                raw[c] = clamp_intensity((mix[c] * 255.0).round()) as f64;
            }
            raw
        }
    };

    let opacity = opacity.clamp(0.0, 1.0);
    let base_raw = raw_channels(base);
    let mut out = [0.0; 4];
    for c in 0..channels {
        out[c] = blended[c] * opacity + base_raw[c] * (1.0 - opacity);
    }
    Ok(Some(Pixel::from_f64(out, channels)?))
}

/// Blends each run of `num_lines` adjacent lines into a uniform band.
///
/// Lines are grouped with the fractional partitioner, then every aligned
/// position across a group is replaced by the group's blended pixel at that
/// position.
///
/// # Errors
///
/// Returns [`OpsError::InvalidParameter`] if `num_lines` is zero.
pub fn blend_lines(
    image: &Image,
    axis: Axis,
    num_lines: usize,
    mode: BlendMode,
    opacity: f64,
) -> OpsResult<Image> {
    debug!(?axis, num_lines, ?mode, opacity, "blend_lines");
    if num_lines == 0 {
        return Err(OpsError::InvalidParameter(
            "line group size must be at least 1".into(),
        ));
    }
    if image.is_empty() {
        return Ok(image.clone());
    }
    let lines = lines::extract(image, axis);
    let line_len = axis.line_len(image);
    let total_lines = lines.len();
    let mut groups = glitch_core::partition_by(lines, total_lines as f64 / num_lines as f64)?;
    for group in &mut groups {
        for i in 0..line_len {
            let aligned: Vec<Pixel> = group.iter().map(|line| line[i]).collect();
            if let Some(pixel) = blend(&aligned, mode, opacity)? {
                for line in group.iter_mut() {
                    line[i] = pixel;
                }
            }
        }
    }
    let mut dest = Image::new(image.width(), image.height(), image.mode());
    lines::write_lines(&mut dest, &glitch_core::merge(groups), axis)?;
    Ok(dest)
}

/// Replaces each `box_size` square with the average of its in-bounds
/// pixels.
///
/// # Errors
///
/// Returns [`OpsError::InvalidParameter`] if `box_size` is zero.
pub fn pixelate(image: &Image, box_size: u32) -> OpsResult<Image> {
    debug!(box_size, "pixelate");
    if box_size == 0 {
        return Err(OpsError::InvalidParameter(
            "pixelate box size must be at least 1".into(),
        ));
    }
    if image.is_empty() {
        return Ok(image.clone());
    }
    let width = image.width();
    let height = image.height();
    let mut flat = lines::flatten(image, Axis::Rows);
    for x in (0..width).step_by(box_size as usize) {
        for y in (0..height).step_by(box_size as usize) {
            let mut stack = Vec::with_capacity((box_size * box_size) as usize);
            for box_x in x..(x + box_size).min(width) {
                for box_y in y..(y + box_size).min(height) {
                    stack.push(flat[(width * box_y + box_x) as usize]);
                }
            }
            if let Some(pixel) = blend(&stack, BlendMode::Average, 1.0)? {
                for box_x in x..(x + box_size).min(width) {
                    for box_y in y..(y + box_size).min(height) {
                        flat[(width * box_y + box_x) as usize] = pixel;
                    }
                }
            }
        }
    }
    let mut dest = Image::new(width, height, image.mode());
    lines::write_pixels(&mut dest, &flat, Axis::Rows, 0)?;
    Ok(dest)
}
