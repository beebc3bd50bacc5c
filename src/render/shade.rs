//! Per-pixel shading stages applied after neighbour bleeding.
//!
//! Colours are unclamped `f32` triples in `0..=255` space; only [`to_rgb8`] clamps.

/// Linear colour carried between stages.
pub type Rgbf = [f32; 3];

/// Bevel the base colour using the bump map weight (`bump / 256`).
///
/// Above 0.5 the colour is pulled toward white, below toward black; 0.5 is the identity.
#[inline]
pub fn bump(base: Rgbf, bump_alpha: f32) -> Rgbf {
    if bump_alpha > 0.5 {
        let factor = 1.0 - 2.0 * (bump_alpha - 0.5);
        base.map(|c| 255.0 - (255.0 - c) * factor)
    } else {
        base.map(|c| c * bump_alpha * 2.0)
    }
}

/// Darken toward piece seams: full weight passes through, zero weight keeps 10%.
#[inline]
pub fn stroke(pixel: Rgbf, stroke_alpha: f32) -> Rgbf {
    let k = 0.1 + 0.9 * stroke_alpha;
    pixel.map(|c| c * k)
}

/// Straight-alpha "over" of an RGBA8 overlay pixel; alpha is scaled by `1/256`.
#[inline]
pub fn overlay(dst: Rgbf, src: [u8; 4]) -> Rgbf {
    let a = f32::from(src[3]) / 256.0;
    let inv = 1.0 - a;
    [
        dst[0] * inv + f32::from(src[0]) * a,
        dst[1] * inv + f32::from(src[1]) * a,
        dst[2] * inv + f32::from(src[2]) * a,
    ]
}

/// Clamp to `0..=255` and truncate.
#[inline]
pub fn to_rgb8(px: Rgbf) -> [u8; 3] {
    px.map(|c| {
        if c.is_nan() {
            0
        } else {
            c.clamp(0.0, 255.0) as u8
        }
    })
}

#[cfg(test)]
#[path = "../../tests/unit/render/shade.rs"]
mod tests;
