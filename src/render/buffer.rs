use std::sync::Arc;

use crate::foundation::core::Size;
use crate::foundation::error::{TweenError, TweenResult};

/// Straight-alpha RGBA8 pixels, tightly packed, row-major.
///
/// The byte length always equals `width * height * 4`. Clones share the underlying bytes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    size: Size,
    data: Arc<Vec<u8>>,
}

impl PixelBuffer {
    /// Wrap `data` as a buffer of `size`, checking the byte length.
    pub fn new(size: Size, data: Vec<u8>) -> TweenResult<Self> {
        if data.len() != size.rgba_len() {
            return Err(TweenError::validation(format!(
                "pixel buffer of {size} expects {} bytes, got {}",
                size.rgba_len(),
                data.len()
            )));
        }
        Ok(Self {
            size,
            data: Arc::new(data),
        })
    }

    /// Buffer filled with a single RGBA color.
    pub fn solid(size: Size, rgba: [u8; 4]) -> Self {
        Self {
            size,
            data: Arc::new(rgba.repeat(size.rgba_len() / 4)),
        }
    }

    pub(crate) fn from_rgba_image(img: image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            size: Size { width, height },
            data: Arc::new(img.into_raw()),
        }
    }

    /// Pixel dimensions.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.size.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.size.height
    }

    /// Raw RGBA bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// RGBA value at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let idx = ((y as usize) * (self.size.width as usize) + (x as usize)) * 4;
        [
            self.data[idx],
            self.data[idx + 1],
            self.data[idx + 2],
            self.data[idx + 3],
        ]
    }

    /// Copy into an owned `image::RgbaImage`, e.g. for PNG output.
    pub fn to_rgba_image(&self) -> image::RgbaImage {
        image::RgbaImage::from_raw(self.size.width, self.size.height, self.data.to_vec())
            .unwrap_or_else(|| unreachable!("length checked at construction"))
    }
}
