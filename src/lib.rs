//! tweengif builds cross-fade transitions between two still images and encodes them as looping
//! animated GIFs.
//!
//! The pipeline is synchronous and deterministic:
//!
//! - Resolve an output size from the image that dictates it (capped at one megapixel)
//! - Place both images on a shared canvas, cropping or letterboxing the other one
//! - Blend them per channel into a held start frame, interpolated frames and a held end frame
//!
//! Encoding runs in the background through a [`FrameEncoder`]. [`TransitionSession`] adds the
//! interactive layer: a settings store whose changes re-render after a quiet period.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod config;
mod foundation;
mod geometry;
mod sequence;

/// Encoding sinks for finished frame sequences.
pub mod encode;
pub(crate) mod render;
pub(crate) mod session;

pub use crate::assets::decode::{SourceImage, decode_image, load_image};
pub use crate::config::transition::TransitionConfig;
pub use crate::foundation::core::{CropMode, DrawRect, FitSize, Size};
pub use crate::foundation::error::{TweenError, TweenResult};
pub use crate::geometry::fit::fit_size;
pub use crate::geometry::size::{
    CAPPED_LONG_SIDE, MAX_OUTPUT_AREA, dictating_size, resolve_output_size,
};
pub use crate::sequence::builder::{
    END_HOLD_MS, Frame, MAX_TOTAL_FRAMES, START_HOLD_MS, SequenceOpts, TAIL_HOLD_MS, Timing,
    blend_factors, build_sequence,
};

pub use crate::encode::encoder::{EncodeTask, EncodedTransition, FrameEncoder, spawn_encode};
pub use crate::encode::gif::{GifEncoder, GifEncoderOpts, delay_centis};
pub use crate::render::blend::{blend, blend_bytes};
pub use crate::render::buffer::PixelBuffer;
pub use crate::render::canvas::{Canvas, OPAQUE_BLACK, ResampleFilter};
pub use crate::render::pipeline::{
    RenderOpts, RenderOutcome, Renderer, Transition, render_transition,
};
pub use crate::render::place::{PlacedFrames, place_frames};
pub use crate::session::debounce::{DEFAULT_QUIET, TrailingDebounce};
pub use crate::session::preview::{
    FilePreview, PreviewSink, PreviewSlot, PreviewState, ensure_parent_dir,
};
pub use crate::session::render_session::{PollReport, RenderTrigger, TransitionSession};
pub use crate::session::settings::{
    DEFAULT_DURATION_SECS, DEFAULT_FRAMERATE, GenerationSettings, MissingImage,
};
