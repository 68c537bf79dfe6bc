use std::cmp::Ordering;

use crate::foundation::core::{FitSize, Size};

/// Scale `source` to `target`, preserving the source aspect ratio.
///
/// With `cover_target` the result fully covers `target` (one axis matches, the other overflows);
/// without it the result fits inside `target` (one axis matches, the other underflows). Equal
/// aspect ratios return `target` exactly. The result is real-valued; snapping to pixels is left
/// to the rasterizer.
pub fn fit_size(target: Size, source: Size, cover_target: bool) -> FitSize {
    // Cross-multiplied comparison of target.w/target.h against source.w/source.h.
    let target_cross = u64::from(target.width) * u64::from(source.height);
    let source_cross = u64::from(source.width) * u64::from(target.height);

    let tw = f64::from(target.width);
    let th = f64::from(target.height);
    let sw = f64::from(source.width);
    let sh = f64::from(source.height);

    let match_width = |scale: f64| FitSize {
        width: tw,
        height: sh * scale,
    };
    let match_height = |scale: f64| FitSize {
        width: sw * scale,
        height: th,
    };

    match target_cross.cmp(&source_cross) {
        // Target is relatively wider than the source.
        Ordering::Greater => {
            if cover_target {
                match_width(tw / sw)
            } else {
                match_height(th / sh)
            }
        }
        // Target is relatively taller than the source.
        Ordering::Less => {
            if cover_target {
                match_height(th / sh)
            } else {
                match_width(tw / sw)
            }
        }
        Ordering::Equal => target.to_fit(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/fit.rs"]
mod tests;
