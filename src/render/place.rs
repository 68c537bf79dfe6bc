use crate::assets::decode::SourceImage;
use crate::foundation::core::{CropMode, DrawRect, FitSize, Size};
use crate::geometry::fit::fit_size;
use crate::geometry::size::{dictating_size, resolve_output_size};
use crate::render::buffer::PixelBuffer;
use crate::render::canvas::{Canvas, OPAQUE_BLACK};

/// Both source images rasterized onto the shared output canvas.
#[derive(Clone, Debug)]
pub struct PlacedFrames {
    /// Output canvas size shared by both buffers.
    pub size: Size,
    /// Real-valued size the non-dictating image was drawn at.
    pub other_fit: FitSize,
    /// Start image on the canvas.
    pub start: PixelBuffer,
    /// End image on the canvas.
    pub end: PixelBuffer,
}

/// Rasterize `start` and `end` onto a canvas sized by the dictating image of `mode`.
///
/// The dictating image fills the canvas exactly. The other one is scaled to cover (crop modes)
/// or fit inside (pad modes) the canvas and drawn centered over opaque black.
pub fn place_frames(
    start: &SourceImage,
    end: &SourceImage,
    mode: CropMode,
    canvas: &mut Canvas,
) -> PlacedFrames {
    let size = resolve_output_size(dictating_size(mode, start.size(), end.size()));
    let (dictating, other) = if mode.start_dictates() {
        (start, end)
    } else {
        (end, start)
    };

    canvas.reset(size);
    canvas.draw_image(dictating.pixels(), DrawRect::full(size));
    let dictating_buf = canvas.snapshot();

    let other_fit = fit_size(size, other.size(), mode.covers());
    canvas.fill(OPAQUE_BLACK);
    canvas.draw_image(other.pixels(), DrawRect::centered(size, other_fit));
    let other_buf = canvas.snapshot();

    tracing::debug!(
        ?mode,
        %size,
        fit_w = other_fit.width,
        fit_h = other_fit.height,
        "placed frames"
    );

    let (start, end) = if mode.start_dictates() {
        (dictating_buf, other_buf)
    } else {
        (other_buf, dictating_buf)
    };
    PlacedFrames {
        size,
        other_fit,
        start,
        end,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/place.rs"]
mod tests;
