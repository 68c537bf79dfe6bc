use rayon::prelude::*;

use crate::render::blend::blend;
use crate::render::buffer::PixelBuffer;

/// Hold time of the leading start frame.
pub const START_HOLD_MS: f64 = 1500.0;
/// Hold time of the trailing end frame.
pub const END_HOLD_MS: f64 = 2000.0;
/// Hold time of the optional tail frame after the end hold.
pub const TAIL_HOLD_MS: f64 = 1.0;
/// Largest interpolated frame count a render accepts.
pub const MAX_TOTAL_FRAMES: u64 = 10_000;

/// One output frame: pixels plus how long to display them.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    /// Frame pixels.
    pub buffer: PixelBuffer,
    /// Display time in milliseconds.
    pub hold_ms: f64,
}

/// Transition length and frame rate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Timing {
    /// Transition duration in seconds.
    pub duration_secs: f64,
    /// Interpolated frames per second.
    pub framerate: f64,
}

impl Timing {
    /// `ceil(duration * framerate)`, or 0 when that product is not a positive finite number.
    pub fn total_frames(self) -> u64 {
        let product = self.duration_secs * self.framerate;
        if !product.is_finite() || product <= 0.0 {
            return 0;
        }
        product.ceil() as u64
    }

    /// Hold time of one interpolated frame, `1000 / framerate`, or 0 for a non-positive rate.
    pub fn frame_hold_ms(self) -> f64 {
        if self.framerate.is_finite() && self.framerate > 0.0 {
            1000.0 / self.framerate
        } else {
            0.0
        }
    }
}

/// Shape of the generated frame sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SequenceOpts {
    /// Emit the interpolated frame at blend factor 1, which duplicates the end hold.
    pub include_redundant_final_blend: bool,
    /// Append a 1 ms copy of the end frame after the end hold.
    pub include_tail_frame: bool,
    /// Compute blends on the rayon pool.
    pub parallel: bool,
}

impl Default for SequenceOpts {
    fn default() -> Self {
        Self {
            include_redundant_final_blend: true,
            include_tail_frame: false,
            parallel: false,
        }
    }
}

/// Blend factors of the interpolated frames, in playback order.
///
/// With `total_frames >= 1` this is `frame / total_frames` for `frame` in `0..=total_frames`
/// (the last one dropped unless `include_final`). With `total_frames == 0` it is a single
/// factor of 1, or nothing when the final blend is excluded.
pub fn blend_factors(total_frames: u64, include_final: bool) -> Vec<f32> {
    if total_frames == 0 {
        return if include_final { vec![1.0] } else { Vec::new() };
    }
    let last = if include_final {
        total_frames
    } else {
        total_frames - 1
    };
    (0..=last)
        .map(|frame| (frame as f64 / total_frames as f64) as f32)
        .collect()
}

/// Assemble the playback sequence: held start frame, interpolated frames, held end frame.
///
/// # Panics
///
/// If `start` and `end` differ in size.
pub fn build_sequence(
    timing: Timing,
    start: &PixelBuffer,
    end: &PixelBuffer,
    opts: &SequenceOpts,
) -> Vec<Frame> {
    let total = timing.total_frames();
    let factors = blend_factors(total, opts.include_redundant_final_blend);
    let hold_ms = timing.frame_hold_ms();

    let blended: Vec<PixelBuffer> = if opts.parallel {
        factors.par_iter().map(|&t| blend(start, end, t)).collect()
    } else {
        factors.iter().map(|&t| blend(start, end, t)).collect()
    };

    let mut frames = Vec::with_capacity(blended.len() + 3);
    frames.push(Frame {
        buffer: start.clone(),
        hold_ms: START_HOLD_MS,
    });
    frames.extend(blended.into_iter().map(|buffer| Frame { buffer, hold_ms }));
    frames.push(Frame {
        buffer: end.clone(),
        hold_ms: END_HOLD_MS,
    });
    if opts.include_tail_frame {
        frames.push(Frame {
            buffer: end.clone(),
            hold_ms: TAIL_HOLD_MS,
        });
    }

    tracing::debug!(total_frames = total, frames = frames.len(), "built sequence");
    frames
}

#[cfg(test)]
#[path = "../../tests/unit/sequence/builder.rs"]
mod tests;
