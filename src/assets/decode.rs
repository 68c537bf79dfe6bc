use std::path::Path;
use std::sync::Arc;

use anyhow::Context;

use crate::foundation::core::Size;
use crate::foundation::error::{TweenError, TweenResult};

/// A decoded source image: straight-alpha RGBA8, immutable once loaded.
///
/// Cloning is cheap; snapshots share the pixel data.
#[derive(Clone, Debug)]
pub struct SourceImage {
    pixels: Arc<image::RgbaImage>,
}

impl SourceImage {
    /// Wrap already-decoded pixels. Zero-sized images are rejected.
    pub fn from_rgba(pixels: image::RgbaImage) -> TweenResult<Self> {
        let (w, h) = pixels.dimensions();
        if w == 0 || h == 0 {
            return Err(TweenError::decode(format!(
                "image must be at least 1x1, got {w}x{h}"
            )));
        }
        Ok(Self {
            pixels: Arc::new(pixels),
        })
    }

    /// Native pixel size.
    pub fn size(&self) -> Size {
        let (width, height) = self.pixels.dimensions();
        Size { width, height }
    }

    /// Borrow the decoded pixels.
    pub fn pixels(&self) -> &image::RgbaImage {
        &self.pixels
    }
}

/// Decode any format supported by `image` into a [`SourceImage`].
pub fn decode_image(bytes: &[u8]) -> TweenResult<SourceImage> {
    let dyn_img = image::load_from_memory(bytes)
        .map_err(|e| TweenError::decode(format!("decode image from memory: {e}")))?;
    SourceImage::from_rgba(dyn_img.to_rgba8())
}

/// Read and decode an image file.
pub fn load_image(path: &Path) -> TweenResult<SourceImage> {
    let bytes =
        std::fs::read(path).with_context(|| format!("read image '{}'", path.display()))?;
    let img = decode_image(&bytes).map_err(|e| match e {
        TweenError::Decode(msg) => TweenError::decode(format!("{}: {msg}", path.display())),
        other => other,
    })?;
    tracing::debug!(path = %path.display(), size = %img.size(), "loaded image");
    Ok(img)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
