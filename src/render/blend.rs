use crate::render::buffer::PixelBuffer;

/// Per-byte linear interpolation between two equal-length RGBA8 buffers.
///
/// Every channel, alpha included, is mixed as `round(a * (1 - t) + b * t)`, so the result is a
/// plain cross-fade rather than an alpha composite. `t` is clamped to `[0, 1]`; `t = 0` yields
/// `a` and `t = 1` yields `b` exactly.
///
/// # Panics
///
/// If the buffers differ in length or `t` is not finite.
pub fn blend_bytes(a: &[u8], b: &[u8], t: f32) -> Vec<u8> {
    assert_eq!(
        a.len(),
        b.len(),
        "blend expects equal-length rgba8 buffers ({} vs {})",
        a.len(),
        b.len()
    );
    assert!(t.is_finite(), "blend factor must be finite, got {t}");

    let t = t.clamp(0.0, 1.0);
    let it = 1.0 - t;
    a.iter()
        .zip(b.iter())
        .map(|(&a, &b)| mix_u8(a, b, t, it))
        .collect()
}

/// Cross-fade two same-size buffers at blend factor `t`.
///
/// # Panics
///
/// If the buffer sizes differ or `t` is not finite.
pub fn blend(a: &PixelBuffer, b: &PixelBuffer, t: f32) -> PixelBuffer {
    assert_eq!(
        a.size(),
        b.size(),
        "blend expects same-size buffers ({} vs {})",
        a.size(),
        b.size()
    );
    if t <= 0.0 {
        return a.clone();
    }
    if t >= 1.0 {
        return b.clone();
    }
    let data = blend_bytes(a.data(), b.data(), t);
    PixelBuffer::new(a.size(), data)
        .unwrap_or_else(|e| unreachable!("blend preserves buffer length: {e}"))
}

fn mix_u8(a: u8, b: u8, t: f32, it: f32) -> u8 {
    (f32::from(a) * it + f32::from(b) * t).round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/render/blend.rs"]
mod tests;
