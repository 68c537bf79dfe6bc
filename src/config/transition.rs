use std::path::Path;
use std::time::Duration;

use anyhow::Context as _;

use crate::encode::gif::GifEncoderOpts;
use crate::foundation::core::CropMode;
use crate::foundation::error::{TweenError, TweenResult};
use crate::render::canvas::ResampleFilter;
use crate::render::pipeline::RenderOpts;
use crate::sequence::builder::SequenceOpts;
use crate::session::debounce::TrailingDebounce;
use crate::session::settings::{DEFAULT_DURATION_SECS, DEFAULT_FRAMERATE, GenerationSettings};

/// File-level configuration for a transition, loaded from JSON.
///
/// Every field is optional in the file; missing fields take the interactive defaults.
/// Unknown fields are rejected.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TransitionConfig {
    /// Transition length in seconds.
    pub duration_secs: f64,
    /// Interpolated frames per second.
    pub framerate: f64,
    /// Alignment policy.
    pub crop_mode: CropMode,
    /// Resampling filter for scaled draws.
    pub filter: ResampleFilter,
    /// Frame sequence shape.
    pub sequence: SequenceOpts,
    /// GIF encoder parameters.
    pub encoder: GifEncoderOpts,
    /// Quiet period before an interactive re-render, in milliseconds.
    pub debounce_ms: u64,
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self {
            duration_secs: DEFAULT_DURATION_SECS,
            framerate: DEFAULT_FRAMERATE,
            crop_mode: CropMode::default(),
            filter: ResampleFilter::default(),
            sequence: SequenceOpts::default(),
            encoder: GifEncoderOpts::default(),
            debounce_ms: 500,
        }
    }
}

impl TransitionConfig {
    /// Parse and validate a JSON document.
    pub fn from_json_str(s: &str) -> TweenResult<Self> {
        let cfg: Self =
            serde_json::from_str(s).map_err(|e| TweenError::serde(format!("config JSON: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read, parse and validate a JSON file.
    pub fn from_path(path: &Path) -> TweenResult<Self> {
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        Self::from_json_str(&s).map_err(|e| match e {
            TweenError::Serde(msg) => TweenError::serde(format!("{}: {msg}", path.display())),
            other => other,
        })
    }

    /// Check timing and encoder parameters.
    pub fn validate(&self) -> TweenResult<()> {
        self.settings().validate()?;
        self.encoder.validate()
    }

    /// Render options derived from this config.
    pub fn render_opts(&self) -> RenderOpts {
        RenderOpts {
            filter: self.filter,
            sequence: self.sequence,
        }
    }

    /// Settings snapshot without images.
    pub fn settings(&self) -> GenerationSettings {
        GenerationSettings {
            duration_secs: self.duration_secs,
            framerate: self.framerate,
            crop_mode: self.crop_mode,
            ..GenerationSettings::default()
        }
    }

    /// Debounce timer with the configured quiet period.
    pub fn debounce(&self) -> TrailingDebounce {
        TrailingDebounce::new(Duration::from_millis(self.debounce_ms))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/transition.rs"]
mod tests;
