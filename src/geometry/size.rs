use crate::foundation::core::{CropMode, Size};

/// Dictating images above this pixel count are downscaled.
pub const MAX_OUTPUT_AREA: u64 = 1_000_000;

/// Longer side of a downscaled output canvas.
pub const CAPPED_LONG_SIDE: u32 = 1000;

/// Size of the image whose dimensions drive the output canvas for `mode`.
pub fn dictating_size(mode: CropMode, start: Size, end: Size) -> Size {
    if mode.start_dictates() { start } else { end }
}

/// Derive the shared output canvas size from the dictating image.
///
/// Sizes up to [`MAX_OUTPUT_AREA`] pixels pass through unchanged. Larger ones are scaled so the
/// longer side becomes [`CAPPED_LONG_SIDE`], the shorter side rounded to the nearest pixel and
/// never below 1.
pub fn resolve_output_size(dictating: Size) -> Size {
    if dictating.area() <= MAX_OUTPUT_AREA {
        return dictating;
    }

    let long = f64::from(CAPPED_LONG_SIDE);
    let aspect = dictating.aspect();
    if aspect > 1.0 {
        Size {
            width: CAPPED_LONG_SIDE,
            height: scaled_side(long / aspect),
        }
    } else {
        Size {
            width: scaled_side(long * aspect),
            height: CAPPED_LONG_SIDE,
        }
    }
}

fn scaled_side(v: f64) -> u32 {
    (v.round() as u32).clamp(1, CAPPED_LONG_SIDE)
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/size.rs"]
mod tests;
