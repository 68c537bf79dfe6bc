use rayon::prelude::*;

use crate::encode::encoder::FrameEncoder;
use crate::foundation::core::Size;
use crate::foundation::error::{TweenError, TweenResult};
use crate::sequence::builder::Frame;

/// Options for [`GifEncoder`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GifEncoderOpts {
    /// Threads used to quantize frames in parallel.
    pub workers: usize,
    /// NeuQuant sampling factor, 1 (best, slowest) to 30 (fastest).
    pub quality: u8,
}

impl Default for GifEncoderOpts {
    fn default() -> Self {
        Self {
            workers: 4,
            quality: 10,
        }
    }
}

impl GifEncoderOpts {
    /// Check worker count and quality range.
    pub fn validate(&self) -> TweenResult<()> {
        if self.workers == 0 {
            return Err(TweenError::validation("gif encoder workers must be >= 1"));
        }
        if !(1..=30).contains(&self.quality) {
            return Err(TweenError::validation(format!(
                "gif encoder quality must be in 1..=30, got {}",
                self.quality
            )));
        }
        Ok(())
    }
}

/// Looping animated GIF encoder built on the `gif` crate.
///
/// Frames are quantized to 256-color palettes in parallel, then written in playback order.
#[derive(Debug)]
pub struct GifEncoder {
    opts: GifEncoderOpts,
    pool: rayon::ThreadPool,
}

impl GifEncoder {
    /// Create an encoder with its own worker pool.
    pub fn new(opts: GifEncoderOpts) -> TweenResult<Self> {
        opts.validate()?;
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(opts.workers)
            .thread_name(|i| format!("tweengif-quantize-{i}"))
            .build()
            .map_err(|e| TweenError::encode(format!("failed to build rayon thread pool: {e}")))?;
        Ok(Self { opts, pool })
    }

    /// Options this encoder was built with.
    pub fn opts(&self) -> GifEncoderOpts {
        self.opts
    }
}

impl FrameEncoder for GifEncoder {
    fn encode(&self, size: Size, frames: &[Frame]) -> TweenResult<Vec<u8>> {
        let (width, height) = gif_dimensions(size)?;
        if let Some(bad) = frames.iter().find(|f| f.buffer.size() != size) {
            return Err(TweenError::validation(format!(
                "frame size mismatch: got {}, expected {size}",
                bad.buffer.size()
            )));
        }

        let speed = i32::from(self.opts.quality);
        let gif_frames: Vec<gif::Frame<'static>> = self.pool.install(|| {
            frames
                .par_iter()
                .map(|f| {
                    let mut rgba = f.buffer.data().to_vec();
                    let mut frame = gif::Frame::from_rgba_speed(width, height, &mut rgba, speed);
                    frame.delay = delay_centis(f.hold_ms);
                    // Every frame covers the full canvas; clearing keeps fully transparent
                    // pixels from showing the previous frame.
                    frame.dispose = gif::DisposalMethod::Background;
                    frame
                })
                .collect()
        });

        let mut out = Vec::new();
        {
            let mut encoder = gif::Encoder::new(&mut out, width, height, &[])
                .map_err(|e| TweenError::encode(format!("gif header: {e}")))?;
            encoder
                .set_repeat(gif::Repeat::Infinite)
                .map_err(|e| TweenError::encode(format!("gif repeat extension: {e}")))?;
            for (i, frame) in gif_frames.iter().enumerate() {
                encoder
                    .write_frame(frame)
                    .map_err(|e| TweenError::encode(format!("gif frame {i}: {e}")))?;
            }
        }
        Ok(out)
    }
}

/// GIF delays are whole centiseconds.
pub fn delay_centis(hold_ms: f64) -> u16 {
    if !hold_ms.is_finite() || hold_ms <= 0.0 {
        return 0;
    }
    (hold_ms / 10.0).round().min(f64::from(u16::MAX)) as u16
}

fn gif_dimensions(size: Size) -> TweenResult<(u16, u16)> {
    let width = u16::try_from(size.width).ok();
    let height = u16::try_from(size.height).ok();
    match (width, height) {
        (Some(w), Some(h)) => Ok((w, h)),
        _ => Err(TweenError::validation(format!(
            "gif canvas {size} exceeds the format limit of 65535x65535"
        ))),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/gif.rs"]
mod tests;
