use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Instant;

use crate::assets::decode::SourceImage;
use crate::encode::encoder::{EncodeTask, FrameEncoder, spawn_encode};
use crate::foundation::core::{CropMode, Size};
use crate::render::pipeline::{RenderOpts, RenderOutcome, Renderer};
use crate::session::debounce::TrailingDebounce;
use crate::session::preview::PreviewSink;
use crate::session::settings::{GenerationSettings, MissingImage};

/// What a fired render did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RenderTrigger {
    /// An image was missing; no encode was started.
    Skipped(MissingImage),
    /// Frames were rendered and handed to a background encode.
    Started {
        /// Canvas size.
        size: Size,
        /// Number of frames sent to the encoder.
        frames: usize,
    },
    /// Rendering failed; the preview shows the failure.
    Failed(String),
}

/// Summary of one [`TransitionSession::poll`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PollReport {
    /// Set when the debounce fired during this poll.
    pub triggered: Option<RenderTrigger>,
    /// Encodes handed to the preview.
    pub delivered: usize,
    /// Encodes that finished with an error.
    pub failed: usize,
}

/// Interactive transition store.
///
/// Every setter re-arms a trailing debounce. When it fires, [`poll`](Self::poll) renders a
/// snapshot of the settings and starts an encode in the background. Running encodes are never
/// cancelled; their results reach the preview in the order they were started.
pub struct TransitionSession<P: PreviewSink> {
    settings: GenerationSettings,
    debounce: TrailingDebounce,
    renderer: Renderer,
    encoder: Arc<dyn FrameEncoder>,
    in_flight: VecDeque<EncodeTask>,
    preview: P,
}

impl<P: PreviewSink> TransitionSession<P> {
    /// Session with default settings and no images.
    pub fn new(
        opts: RenderOpts,
        debounce: TrailingDebounce,
        encoder: Arc<dyn FrameEncoder>,
        preview: P,
    ) -> Self {
        Self {
            settings: GenerationSettings::default(),
            debounce,
            renderer: Renderer::new(opts),
            encoder,
            in_flight: VecDeque::new(),
            preview,
        }
    }

    /// Replace the starting settings. Does not arm the debounce.
    pub fn with_settings(mut self, settings: GenerationSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Current settings.
    pub fn settings(&self) -> &GenerationSettings {
        &self.settings
    }

    /// The display collaborator.
    pub fn preview(&self) -> &P {
        &self.preview
    }

    /// Number of encodes not yet delivered.
    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    /// When the pending render is due, if one is pending.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.debounce.deadline()
    }

    /// Transition length in seconds.
    pub fn set_duration(&mut self, duration_secs: f64, now: Instant) {
        self.settings.duration_secs = duration_secs;
        self.debounce.arm(now);
    }

    /// Interpolated frames per second.
    pub fn set_framerate(&mut self, framerate: f64, now: Instant) {
        self.settings.framerate = framerate;
        self.debounce.arm(now);
    }

    /// Alignment policy.
    pub fn set_crop_mode(&mut self, crop_mode: CropMode, now: Instant) {
        self.settings.crop_mode = crop_mode;
        self.debounce.arm(now);
    }

    /// Replace the start image; the previous one is dropped once no snapshot holds it.
    pub fn set_start_image(&mut self, image: SourceImage, now: Instant) {
        self.settings.start_image = Some(image);
        self.debounce.arm(now);
    }

    /// Replace the end image.
    pub fn set_end_image(&mut self, image: SourceImage, now: Instant) {
        self.settings.end_image = Some(image);
        self.debounce.arm(now);
    }

    /// Back to defaults with no images.
    pub fn reset(&mut self, now: Instant) {
        self.settings = GenerationSettings::default();
        self.debounce.arm(now);
    }

    /// Fire a due render, then deliver finished encodes in start order.
    pub fn poll(&mut self, now: Instant) -> PollReport {
        let mut report = PollReport::default();
        if self.debounce.fire_if_due(now) {
            report.triggered = Some(self.trigger());
        }
        while self.in_flight.front().is_some_and(EncodeTask::is_finished) {
            if let Some(task) = self.in_flight.pop_front() {
                self.deliver(task, &mut report);
            }
        }
        report
    }

    /// Block until every in-flight encode has been delivered.
    pub fn flush(&mut self) -> PollReport {
        let mut report = PollReport::default();
        while let Some(task) = self.in_flight.pop_front() {
            self.deliver(task, &mut report);
        }
        report
    }

    fn trigger(&mut self) -> RenderTrigger {
        let snapshot = self.settings.clone();
        let transition = match self.renderer.render(&snapshot) {
            Ok(RenderOutcome::Rendered(t)) => t,
            Ok(RenderOutcome::Skipped(missing)) => return RenderTrigger::Skipped(missing),
            Err(e) => return self.fail(e.to_string()),
        };

        let size = transition.size;
        let frames = transition.frames.len();
        match spawn_encode(Arc::clone(&self.encoder), size, transition.frames) {
            Ok(task) => {
                self.in_flight.push_back(task);
                RenderTrigger::Started { size, frames }
            }
            Err(e) => self.fail(e.to_string()),
        }
    }

    fn fail(&mut self, reason: String) -> RenderTrigger {
        tracing::error!(%reason, "render failed");
        self.preview.show_failure(&reason);
        RenderTrigger::Failed(reason)
    }

    fn deliver(&mut self, task: EncodeTask, report: &mut PollReport) {
        let shown = task.wait().and_then(|gif| self.preview.show(&gif));
        match shown {
            Ok(()) => report.delivered += 1,
            Err(e) => {
                tracing::error!(error = %e, "encode failed");
                self.preview.show_failure(&e.to_string());
                report.failed += 1;
            }
        }
    }
}

impl<P: PreviewSink + std::fmt::Debug> std::fmt::Debug for TransitionSession<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransitionSession")
            .field("settings", &self.settings)
            .field("debounce", &self.debounce)
            .field("in_flight", &self.in_flight.len())
            .field("preview", &self.preview)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/render_session.rs"]
mod tests;
