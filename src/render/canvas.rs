use image::imageops::{self, FilterType};

use crate::foundation::core::{DrawRect, Size};
use crate::render::buffer::PixelBuffer;

/// Opaque black, the letterbox color for pad modes.
pub const OPAQUE_BLACK: [u8; 4] = [0, 0, 0, 255];

/// Resampling filter used when drawing a source image at a different size.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ResampleFilter {
    /// Nearest neighbour.
    Nearest,
    /// Linear (bilinear) filtering.
    #[default]
    Triangle,
    /// Cubic filtering.
    CatmullRom,
    /// Lanczos with a window of 3.
    Lanczos3,
}

impl ResampleFilter {
    fn filter_type(self) -> FilterType {
        match self {
            ResampleFilter::Nearest => FilterType::Nearest,
            ResampleFilter::Triangle => FilterType::Triangle,
            ResampleFilter::CatmullRom => FilterType::CatmullRom,
            ResampleFilter::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

/// Reusable scratch drawing surface.
///
/// Drawing takes `&mut self` and [`Canvas::snapshot`] returns an owned copy, so pixel data is
/// always copied out before the surface is cleared or resized for the next pass.
#[derive(Debug)]
pub struct Canvas {
    surface: image::RgbaImage,
    filter: ResampleFilter,
}

impl Canvas {
    /// Create a 1x1 transparent canvas; call [`Canvas::reset`] before drawing.
    pub fn new(filter: ResampleFilter) -> Self {
        Self {
            surface: image::RgbaImage::new(1, 1),
            filter,
        }
    }

    /// Current pixel size.
    pub fn size(&self) -> Size {
        let (width, height) = self.surface.dimensions();
        Size { width, height }
    }

    /// Resize to `size` and clear to transparent black.
    pub fn reset(&mut self, size: Size) {
        if self.size() == size {
            self.surface.fill(0);
        } else {
            self.surface = image::RgbaImage::new(size.width, size.height);
        }
    }

    /// Overwrite every pixel with `rgba`.
    pub fn fill(&mut self, rgba: [u8; 4]) {
        for px in self.surface.pixels_mut() {
            px.0 = rgba;
        }
    }

    /// Draw `src` scaled into `dest`, compositing source-over.
    ///
    /// `dest` may extend past the canvas; only the part of `src` that lands on the canvas is
    /// resampled. Destination edges snap to the nearest pixel.
    pub fn draw_image(&mut self, src: &image::RgbaImage, dest: DrawRect) {
        let Some(clip) = clip_to_canvas(dest, self.size()) else {
            return;
        };

        let (sw, sh) = src.dimensions();
        let scale_x = dest.width / f64::from(sw);
        let scale_y = dest.height / f64::from(sh);

        let (src_x, src_w) = source_span(clip.x0, clip.x1, dest.x, 1.0 / scale_x, sw);
        let (src_y, src_h) = source_span(clip.y0, clip.y1, dest.y, 1.0 / scale_y, sh);

        // The whole-pixel region is resampled at the true scale, then copied from the offset
        // where the clip starts inside it.
        let region = imageops::crop_imm(src, src_x, src_y, src_w, src_h).to_image();
        let (region_w, region_h) = (scaled_len(src_w, scale_x), scaled_len(src_h, scale_y));
        let scaled = if region.dimensions() == (region_w, region_h) {
            region
        } else {
            imageops::resize(&region, region_w, region_h, self.filter.filter_type())
        };
        let off_x = region_offset(clip.x0, dest.x, src_x, scale_x);
        let off_y = region_offset(clip.y0, dest.y, src_y, scale_y);

        for y in clip.y0..clip.y1 {
            let ry = (y - clip.y0 + off_y).min(region_h - 1);
            for x in clip.x0..clip.x1 {
                let rx = (x - clip.x0 + off_x).min(region_w - 1);
                let dst = self.surface.get_pixel_mut(x, y);
                dst.0 = over_straight(dst.0, scaled.get_pixel(rx, ry).0);
            }
        }
    }

    /// Copy the current pixels out.
    pub fn snapshot(&self) -> PixelBuffer {
        PixelBuffer::from_rgba_image(self.surface.clone())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct PixelClip {
    x0: u32,
    y0: u32,
    x1: u32,
    y1: u32,
}

fn clip_to_canvas(dest: DrawRect, canvas: Size) -> Option<PixelClip> {
    let finite = [dest.x, dest.y, dest.width, dest.height]
        .iter()
        .all(|v| v.is_finite());
    if !finite || dest.width <= 0.0 || dest.height <= 0.0 {
        return None;
    }

    let cw = f64::from(canvas.width);
    let ch = f64::from(canvas.height);
    let x0 = dest.x.clamp(0.0, cw).round();
    let x1 = (dest.x + dest.width).clamp(0.0, cw).round();
    let y0 = dest.y.clamp(0.0, ch).round();
    let y1 = (dest.y + dest.height).clamp(0.0, ch).round();
    if x1 <= x0 || y1 <= y0 {
        return None;
    }

    Some(PixelClip {
        x0: x0 as u32,
        y0: y0 as u32,
        x1: x1 as u32,
        y1: y1 as u32,
    })
}

/// Source-over for straight-alpha RGBA8. Over transparent black this returns `src` unchanged.
fn over_straight(dst: [u8; 4], src: [u8; 4]) -> [u8; 4] {
    let sa = u32::from(src[3]);
    if sa == 255 {
        return src;
    }
    if sa == 0 {
        return dst;
    }

    let da = mul_div255(u32::from(dst[3]), 255 - sa);
    let oa = sa + da;
    let mut out = [0u8; 4];
    for i in 0..3 {
        let c = u32::from(src[i]) * sa + u32::from(dst[i]) * da;
        out[i] = ((c + oa / 2) / oa) as u8;
    }
    out[3] = oa as u8;
    out
}

fn mul_div255(x: u32, y: u32) -> u32 {
    (x * y + 127) / 255
}

/// Map the destination pixel span `[d0, d1)` back to a source span `(start, len)`.
fn source_span(d0: u32, d1: u32, origin: f64, src_per_px: f64, src_len: u32) -> (u32, u32) {
    let s0 = ((f64::from(d0) - origin) * src_per_px).floor();
    let s1 = ((f64::from(d1) - origin) * src_per_px).ceil();
    let start = (s0.max(0.0) as u32).min(src_len - 1);
    let end = (s1.max(0.0) as u32).clamp(start + 1, src_len);
    (start, end - start)
}

/// Length of `src_len` source pixels drawn at `scale`, at least one pixel.
fn scaled_len(src_len: u32, scale: f64) -> u32 {
    ((f64::from(src_len) * scale).round() as u32).max(1)
}

/// Offset of canvas pixel `clip_start` inside the scaled region that begins at source pixel
/// `src_start`.
fn region_offset(clip_start: u32, dest_origin: f64, src_start: u32, scale: f64) -> u32 {
    let region_origin = dest_origin + f64::from(src_start) * scale;
    (f64::from(clip_start) - region_origin).round().max(0.0) as u32
}

#[cfg(test)]
#[path = "../../tests/unit/render/canvas.rs"]
mod tests;
