use std::sync::Arc;
use std::thread::JoinHandle;

use anyhow::Context as _;

use crate::foundation::core::Size;
use crate::foundation::error::{TweenError, TweenResult};
use crate::sequence::builder::Frame;

/// Consumes an ordered frame sequence and produces encoded bytes.
///
/// Ordering contract: `frames` is in playback order and every buffer has size `size`.
pub trait FrameEncoder: Send + Sync {
    /// Encode all frames into a single byte stream.
    fn encode(&self, size: Size, frames: &[Frame]) -> TweenResult<Vec<u8>>;
}

/// Result of a finished encode.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodedTransition {
    /// Canvas size of the animation.
    pub size: Size,
    /// Number of frames that were encoded.
    pub frame_count: usize,
    /// Encoded bytes.
    pub bytes: Vec<u8>,
}

/// An encode running on a background thread.
#[derive(Debug)]
pub struct EncodeTask {
    handle: JoinHandle<TweenResult<EncodedTransition>>,
}

impl EncodeTask {
    /// `true` once the encode has completed (successfully or not).
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Block until the encode completes.
    pub fn wait(self) -> TweenResult<EncodedTransition> {
        self.handle
            .join()
            .map_err(|_| TweenError::encode("encoder thread panicked"))?
    }
}

/// Run `encoder` over `frames` on a new thread.
pub fn spawn_encode(
    encoder: Arc<dyn FrameEncoder>,
    size: Size,
    frames: Vec<Frame>,
) -> TweenResult<EncodeTask> {
    let handle = std::thread::Builder::new()
        .name("tweengif-encode".to_string())
        .spawn(move || {
            let frame_count = frames.len();
            let bytes = encoder.encode(size, &frames)?;
            tracing::info!(frames = frame_count, bytes = bytes.len(), "encode finished");
            Ok(EncodedTransition {
                size,
                frame_count,
                bytes,
            })
        })
        .context("spawn encoder thread")?;
    Ok(EncodeTask { handle })
}

#[cfg(test)]
#[path = "../../tests/unit/encode/encoder.rs"]
mod tests;
