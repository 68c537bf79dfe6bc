use crate::foundation::core::Size;
use crate::foundation::error::TweenResult;
use crate::render::canvas::{Canvas, ResampleFilter};
use crate::render::place::place_frames;
use crate::sequence::builder::{Frame, SequenceOpts, build_sequence};
use crate::session::settings::{GenerationSettings, MissingImage};

/// Options shared by every render.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderOpts {
    /// Resampling filter for scaled draws.
    pub filter: ResampleFilter,
    /// Frame sequence shape.
    pub sequence: SequenceOpts,
}

/// Frames of one transition, ready for an encoder.
#[derive(Clone, Debug, PartialEq)]
pub struct Transition {
    /// Canvas size of every frame.
    pub size: Size,
    /// Frames in playback order.
    pub frames: Vec<Frame>,
}

/// Result of one pipeline run.
#[derive(Clone, Debug, PartialEq)]
pub enum RenderOutcome {
    /// A source image was absent; nothing was rendered.
    Skipped(MissingImage),
    /// Frames were produced.
    Rendered(Transition),
}

/// Synchronous render pipeline: output sizing, placement, blending and sequencing.
///
/// Owns the scratch [`Canvas`], which is reused across renders.
#[derive(Debug)]
pub struct Renderer {
    opts: RenderOpts,
    canvas: Canvas,
}

impl Renderer {
    /// Renderer with a fresh scratch canvas.
    pub fn new(opts: RenderOpts) -> Self {
        Self {
            canvas: Canvas::new(opts.filter),
            opts,
        }
    }

    /// Options in use.
    pub fn opts(&self) -> RenderOpts {
        self.opts
    }

    /// Render `settings` into a frame sequence.
    ///
    /// A snapshot missing either image is not an error: it logs and returns
    /// [`RenderOutcome::Skipped`].
    #[tracing::instrument(skip_all, fields(mode = ?settings.crop_mode))]
    pub fn render(&mut self, settings: &GenerationSettings) -> TweenResult<RenderOutcome> {
        let (start, end) = match (&settings.start_image, &settings.end_image) {
            (Some(start), Some(end)) => (start, end),
            (None, _) => return Ok(skipped(MissingImage::Start)),
            (_, None) => return Ok(skipped(MissingImage::End)),
        };
        settings.validate()?;

        let placed = place_frames(start, end, settings.crop_mode, &mut self.canvas);
        let timing = settings.timing();
        tracing::info!(
            size = %placed.size,
            total_frames = timing.total_frames(),
            "rendering"
        );

        let frames = build_sequence(timing, &placed.start, &placed.end, &self.opts.sequence);
        Ok(RenderOutcome::Rendered(Transition {
            size: placed.size,
            frames,
        }))
    }
}

fn skipped(missing: MissingImage) -> RenderOutcome {
    tracing::info!(%missing, "missing image, skipping render");
    RenderOutcome::Skipped(missing)
}

/// One-shot render with a throwaway canvas.
pub fn render_transition(
    settings: &GenerationSettings,
    opts: &RenderOpts,
) -> TweenResult<RenderOutcome> {
    Renderer::new(*opts).render(settings)
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
