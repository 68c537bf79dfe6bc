//! Encoding of finished frame sequences.
//!
//! The pipeline hands an ordered frame list to a [`FrameEncoder`](encoder::FrameEncoder); encoding
//! runs off the caller's thread through [`spawn_encode`](encoder::spawn_encode).

/// Encoder contract and background encode tasks.
pub mod encoder;
/// Animated GIF encoder.
pub mod gif;
