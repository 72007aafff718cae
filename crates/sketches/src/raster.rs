//! Pure-computation CPU rasterizer for [`Scene`] draw commands.
//!
//! This module is always available (no feature gate) so that both the `png`
//! snapshot path and any front end needing a pixel buffer share the same
//! conversion. Circles are filled with a center-distance test and composited
//! source-over; label rasterization needs font metrics and is left to
//! text-capable front ends.

use pixel_swarm_core::scene::{Scene, Shape};
use pixel_swarm_core::Rgba;

/// Half-width of the stroked debug ring, in pixels.
const RING_THICKNESS: f64 = 1.0;

/// Rasterizes a scene to an RGBA8 pixel buffer of `width * height * 4` bytes.
///
/// The background is painted first, then shapes in list order. Shapes
/// extending past the canvas are clipped. Labels are skipped.
pub fn scene_to_rgba(scene: &Scene) -> Vec<u8> {
    let (w, h) = (scene.width(), scene.height());
    let bg = scene.background();
    let mut buf = vec![0u8; w * h * 4];
    for px in buf.chunks_exact_mut(4) {
        px.copy_from_slice(&[bg.r, bg.g, bg.b, 255]);
    }
    for shape in scene.shapes() {
        match shape {
            Shape::Circle {
                center,
                radius,
                color,
            } => {
                paint_disc(&mut buf, w, h, (center.x, center.y), *radius, *color, false);
            }
            Shape::Ring {
                center,
                radius,
                color,
            } => {
                paint_disc(&mut buf, w, h, (center.x, center.y), *radius, *color, true);
            }
            Shape::Rect {
                position,
                size,
                corner_radius,
                color,
            } => {
                paint_rect(
                    &mut buf,
                    w,
                    h,
                    (position.x, position.y),
                    (size.x, size.y),
                    *corner_radius,
                    *color,
                );
            }
            Shape::Ellipse {
                center,
                radii,
                color,
            } => {
                paint_ellipse(&mut buf, w, h, (center.x, center.y), (radii.x, radii.y), *color);
            }
            Shape::Label { .. } => {}
        }
    }
    buf
}

/// Paints a filled disc, or only its outline when `ring` is set.
///
/// Iterates the clipped bounding box and tests each pixel center against
/// the radius.
fn paint_disc(
    buf: &mut [u8],
    w: usize,
    h: usize,
    (cx, cy): (f64, f64),
    radius: f64,
    color: Rgba,
    ring: bool,
) {
    if radius <= 0.0 {
        return;
    }
    let reach = radius + RING_THICKNESS;
    let x0 = (cx - reach).floor().max(0.0) as usize;
    let y0 = (cy - reach).floor().max(0.0) as usize;
    let x1 = ((cx + reach).ceil().min(w as f64)).max(0.0) as usize;
    let y1 = ((cy + reach).ceil().min(h as f64)).max(0.0) as usize;
    for y in y0..y1 {
        for x in x0..x1 {
            let dx = x as f64 + 0.5 - cx;
            let dy = y as f64 + 0.5 - cy;
            let dist = (dx * dx + dy * dy).sqrt();
            let covered = if ring {
                (dist - radius).abs() <= RING_THICKNESS
            } else {
                dist <= radius
            };
            if covered {
                blend_pixel(buf, (y * w + x) * 4, color);
            }
        }
    }
}

/// Paints a filled axis-aligned rectangle with rounded corners.
///
/// A pixel center is covered when it lies inside the rectangle and, within
/// a corner square, inside the corner's quarter circle. The radius is
/// clamped to half the shorter side.
fn paint_rect(
    buf: &mut [u8],
    w: usize,
    h: usize,
    (rx, ry): (f64, f64),
    (rw, rh): (f64, f64),
    corner_radius: f64,
    color: Rgba,
) {
    if rw <= 0.0 || rh <= 0.0 {
        return;
    }
    let r = corner_radius.clamp(0.0, rw.min(rh) / 2.0);
    let x0 = rx.floor().max(0.0) as usize;
    let y0 = ry.floor().max(0.0) as usize;
    let x1 = ((rx + rw).ceil().min(w as f64)).max(0.0) as usize;
    let y1 = ((ry + rh).ceil().min(h as f64)).max(0.0) as usize;
    for y in y0..y1 {
        for x in x0..x1 {
            let px = x as f64 + 0.5;
            let py = y as f64 + 0.5;
            if px < rx || px > rx + rw || py < ry || py > ry + rh {
                continue;
            }
            // Distance from the pixel to the nearest corner-arc center,
            // measured only inside the corner squares.
            let dx = (rx + r - px).max(px - (rx + rw - r)).max(0.0);
            let dy = (ry + r - py).max(py - (ry + rh - r)).max(0.0);
            if dx * dx + dy * dy <= r * r {
                blend_pixel(buf, (y * w + x) * 4, color);
            }
        }
    }
}

/// Paints a filled axis-aligned ellipse via the normalized distance test
/// `(dx/rx)^2 + (dy/ry)^2 <= 1`.
fn paint_ellipse(
    buf: &mut [u8],
    w: usize,
    h: usize,
    (cx, cy): (f64, f64),
    (ex, ey): (f64, f64),
    color: Rgba,
) {
    if ex <= 0.0 || ey <= 0.0 {
        return;
    }
    let x0 = (cx - ex).floor().max(0.0) as usize;
    let y0 = (cy - ey).floor().max(0.0) as usize;
    let x1 = ((cx + ex).ceil().min(w as f64)).max(0.0) as usize;
    let y1 = ((cy + ey).ceil().min(h as f64)).max(0.0) as usize;
    for y in y0..y1 {
        for x in x0..x1 {
            let dx = (x as f64 + 0.5 - cx) / ex;
            let dy = (y as f64 + 0.5 - cy) / ey;
            if dx * dx + dy * dy <= 1.0 {
                blend_pixel(buf, (y * w + x) * 4, color);
            }
        }
    }
}

/// Source-over composite of `color` onto the opaque pixel at `idx`.
fn blend_pixel(buf: &mut [u8], idx: usize, color: Rgba) {
    let a = color.a as f64 / 255.0;
    let mix = |src: u8, dst: u8| (src as f64 * a + dst as f64 * (1.0 - a)).round() as u8;
    buf[idx] = mix(color.r, buf[idx]);
    buf[idx + 1] = mix(color.g, buf[idx + 1]);
    buf[idx + 2] = mix(color.b, buf[idx + 2]);
    buf[idx + 3] = 255;
}
