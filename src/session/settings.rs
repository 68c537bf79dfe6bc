use crate::assets::decode::SourceImage;
use crate::foundation::core::CropMode;
use crate::foundation::error::{TweenError, TweenResult};
use crate::sequence::builder::{MAX_TOTAL_FRAMES, Timing};

/// Transition duration used when nothing else is configured.
pub const DEFAULT_DURATION_SECS: f64 = 3.0;
/// Frame rate used when nothing else is configured.
pub const DEFAULT_FRAMERATE: f64 = 10.0;

/// Which source image is absent from a settings snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MissingImage {
    /// No start image yet.
    Start,
    /// No end image yet.
    End,
}

impl std::fmt::Display for MissingImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MissingImage::Start => f.write_str("start image"),
            MissingImage::End => f.write_str("end image"),
        }
    }
}

/// Everything a render needs. Cloning takes a snapshot; images are shared, not copied.
#[derive(Clone, Debug)]
pub struct GenerationSettings {
    /// Transition duration in seconds.
    pub duration_secs: f64,
    /// Interpolated frames per second.
    pub framerate: f64,
    /// Alignment policy.
    pub crop_mode: CropMode,
    /// First image, if chosen.
    pub start_image: Option<SourceImage>,
    /// Second image, if chosen.
    pub end_image: Option<SourceImage>,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            duration_secs: DEFAULT_DURATION_SECS,
            framerate: DEFAULT_FRAMERATE,
            crop_mode: CropMode::default(),
            start_image: None,
            end_image: None,
        }
    }
}

impl GenerationSettings {
    /// Duration and frame rate as a [`Timing`].
    pub fn timing(&self) -> Timing {
        Timing {
            duration_secs: self.duration_secs,
            framerate: self.framerate,
        }
    }

    /// Reject non-finite or negative timing, and timing that asks for more than
    /// [`MAX_TOTAL_FRAMES`] frames. Zero is allowed and yields a degenerate sequence.
    pub fn validate(&self) -> TweenResult<()> {
        validate_non_negative("duration_secs", self.duration_secs)?;
        validate_non_negative("framerate", self.framerate)?;

        let requested = (self.duration_secs * self.framerate).ceil();
        if !requested.is_finite() || requested > MAX_TOTAL_FRAMES as f64 {
            return Err(TweenError::validation(format!(
                "duration_secs * framerate must be at most {MAX_TOTAL_FRAMES} frames, got {} * {}",
                self.duration_secs, self.framerate
            )));
        }
        Ok(())
    }
}

fn validate_non_negative(name: &str, v: f64) -> TweenResult<()> {
    if !v.is_finite() || v < 0.0 {
        return Err(TweenError::validation(format!(
            "{name} must be a finite number >= 0, got {v}"
        )));
    }
    Ok(())
}
