use crate::foundation::error::{TweenError, TweenResult};

/// Integer pixel dimensions, both sides at least 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Size {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Size {
    /// Create a validated size; zero on either axis is rejected.
    pub fn new(width: u32, height: u32) -> TweenResult<Self> {
        if width == 0 || height == 0 {
            return Err(TweenError::validation(format!(
                "size must be at least 1x1, got {width}x{height}"
            )));
        }
        Ok(Self { width, height })
    }

    /// Pixel count, computed without overflow.
    pub fn area(self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    /// `width / height`.
    pub fn aspect(self) -> f64 {
        f64::from(self.width) / f64::from(self.height)
    }

    /// Byte length of a tightly packed RGBA8 buffer of this size.
    pub fn rgba_len(self) -> usize {
        (self.width as usize) * (self.height as usize) * 4
    }

    /// Real-valued copy of this size.
    pub fn to_fit(self) -> FitSize {
        FitSize {
            width: f64::from(self.width),
            height: f64::from(self.height),
        }
    }
}

impl std::fmt::Display for Size {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Real-valued size produced by aspect fitting, before rasterization snaps it to pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FitSize {
    /// Width in (fractional) pixels.
    pub width: f64,
    /// Height in (fractional) pixels.
    pub height: f64,
}

/// Destination rectangle on a canvas in (fractional) pixels. May extend past the canvas edges.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawRect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

impl DrawRect {
    /// Rectangle of `size` centered inside `canvas`.
    pub fn centered(canvas: Size, size: FitSize) -> Self {
        Self {
            x: f64::from(canvas.width) / 2.0 - size.width / 2.0,
            y: f64::from(canvas.height) / 2.0 - size.height / 2.0,
            width: size.width,
            height: size.height,
        }
    }

    /// Rectangle exactly covering `canvas`.
    pub fn full(canvas: Size) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: f64::from(canvas.width),
            height: f64::from(canvas.height),
        }
    }
}

/// Alignment policy between the two source images.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum CropMode {
    /// Canvas follows the start image; the end image covers it and overflow is clipped.
    #[default]
    CropToStart,
    /// Canvas follows the end image; the start image covers it and overflow is clipped.
    CropToEnd,
    /// Canvas follows the start image; the end image fits inside it on black.
    PadToStart,
    /// Canvas follows the end image; the start image fits inside it on black.
    PadToEnd,
}

impl CropMode {
    /// All modes, in declaration order.
    pub const ALL: [CropMode; 4] = [
        CropMode::CropToStart,
        CropMode::CropToEnd,
        CropMode::PadToStart,
        CropMode::PadToEnd,
    ];

    /// `true` when the start image dictates the output size.
    pub fn start_dictates(self) -> bool {
        matches!(self, CropMode::CropToStart | CropMode::PadToStart)
    }

    /// `true` for crop modes, where the other image covers the canvas.
    pub fn covers(self) -> bool {
        matches!(self, CropMode::CropToStart | CropMode::CropToEnd)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
