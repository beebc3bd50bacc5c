//! Bicubic rotation and cropping of RGB rasters.

use kurbo::{Affine, Point, Rect};

use crate::foundation::core::TileImage;
use crate::render::fill_rows;

/// Catmull-Rom kernel (`a = -0.5`).
#[inline]
fn cubic_weight(t: f64) -> f64 {
    const A: f64 = -0.5;
    let t = t.abs();
    if t <= 1.0 {
        ((A + 2.0) * t - (A + 3.0)) * t * t + 1.0
    } else if t < 2.0 {
        ((A * t - 5.0 * A) * t + 8.0 * A) * t - 4.0 * A
    } else {
        0.0
    }
}

/// Bicubic sample at pixel-centre coordinates `(sx, sy)`; taps clamp to the edge.
fn sample_bicubic(img: &TileImage, sx: f64, sy: f64) -> [u8; 3] {
    let x0 = sx.floor();
    let y0 = sy.floor();
    let fx = sx - x0;
    let fy = sy - y0;
    let max_x = i64::from(img.width) - 1;
    let max_y = i64::from(img.height) - 1;

    let mut acc = [0.0f64; 3];
    for j in -1..=2i64 {
        let wy = cubic_weight(fy - j as f64);
        if wy == 0.0 {
            continue;
        }
        let ty = (y0 as i64 + j).clamp(0, max_y) as u32;
        for i in -1..=2i64 {
            let w = wy * cubic_weight(fx - i as f64);
            if w == 0.0 {
                continue;
            }
            let tx = (x0 as i64 + i).clamp(0, max_x) as u32;
            let px = img.pixel(tx, ty);
            for c in 0..3 {
                acc[c] += w * f64::from(px[c]);
            }
        }
    }
    acc.map(|v| (v + 0.5).clamp(0.0, 255.0) as u8)
}

/// Rotate counter-clockwise by `angle_deg`, growing the canvas to the rotated bounding box.
///
/// Uncovered pixels are black.
pub fn rotate_expand(img: &TileImage, angle_deg: f64, parallel: bool) -> TileImage {
    if img.width == 0 || img.height == 0 {
        return img.clone();
    }
    let theta = angle_deg.to_radians();
    let (w, h) = (f64::from(img.width), f64::from(img.height));

    let src_rect = Rect::new(-w / 2.0, -h / 2.0, w / 2.0, h / 2.0);
    let bbox = Affine::rotate(-theta).transform_rect_bbox(src_rect);
    let out_w = (bbox.width() - 1e-6).ceil().max(1.0) as u32;
    let out_h = (bbox.height() - 1e-6).ceil().max(1.0) as u32;
    let (ow, oh) = (f64::from(out_w), f64::from(out_h));

    // maps destination offsets from the canvas centre back into the source
    let inverse = Affine::rotate(theta);

    let mut out = TileImage::black(out_w, out_h);
    fill_rows(&mut out.data, out_w as usize * 3, parallel, |y, row| {
        for (x, px) in row.chunks_exact_mut(3).enumerate() {
            let d = Point::new(x as f64 + 0.5 - ow / 2.0, f64::from(y) + 0.5 - oh / 2.0);
            let s = inverse * d;
            let sx = s.x + w / 2.0 - 0.5;
            let sy = s.y + h / 2.0 - 0.5;
            if sx < -0.5 || sy < -0.5 || sx >= w - 0.5 || sy >= h - 0.5 {
                continue;
            }
            px.copy_from_slice(&sample_bicubic(img, sx, sy));
        }
    });
    out
}

/// Crop a `width x height` window centred on `img`; parts outside `img` are black.
pub fn center_crop(img: &TileImage, width: u32, height: u32) -> TileImage {
    let left = (i64::from(img.width) - i64::from(width)).div_euclid(2);
    let top = (i64::from(img.height) - i64::from(height)).div_euclid(2);

    let mut out = TileImage::black(width, height);
    for y in 0..height {
        let sy = top + i64::from(y);
        if sy < 0 || sy >= i64::from(img.height) {
            continue;
        }
        for x in 0..width {
            let sx = left + i64::from(x);
            if sx < 0 || sx >= i64::from(img.width) {
                continue;
            }
            let src = (sy as usize * img.width as usize + sx as usize) * 3;
            let dst = (y as usize * width as usize + x as usize) * 3;
            out.data[dst..dst + 3].copy_from_slice(&img.data[src..src + 3]);
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/resample.rs"]
mod tests;
