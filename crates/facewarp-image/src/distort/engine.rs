// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Radial warp filters (bump, pinch) built on imageproc's inverse-mapping
// warp. Each filter reads one image and produces a new one of the same size.

use facewarp_core::{DistortionKind, DistortionSpec, Sampling};
use image::{DynamicImage, Rgba, imageops};
use imageproc::geometric_transformations::{Interpolation, warp_with};
use tracing::{debug, instrument, warn};

const EDGE_EPSILON: f32 = 1e-3;

/// Something that can render a single distortion step.
///
/// Returning `None` means the engine cannot produce output for these
/// parameters; the pipeline skips the step.
pub trait FilterEngine: Send + Sync {
    fn apply(&self, image: &DynamicImage, spec: &DistortionSpec) -> Option<DynamicImage>;
}

/// Built-in engine implementing both distortions as radial remaps.
///
/// For a destination pixel at distance `d` from the center, with
/// `t = d / radius < 1`, the source is read at distance `radius * t'`:
///
/// - bump:  `t' = t^(1 + scale)`, defined for `scale > -1`
/// - pinch: `t' = t * (1 - scale * (1 - t))`, defined for `-1 < scale < 1`
///
/// Both are the identity at `scale == 0` and at the rim (`t == 1`).
///
/// Output is always 8-bit RGBA, whatever the input's colour type. Only the
/// disc's bounding box is resampled, so cost scales with the radius rather
/// than the photo.
#[derive(Debug, Clone, Copy)]
pub struct WarpEngine {
    interpolation: Interpolation,
}

impl Default for WarpEngine {
    fn default() -> Self {
        Self::new(Sampling::default())
    }
}

impl WarpEngine {
    pub fn new(sampling: Sampling) -> Self {
        let interpolation = match sampling {
            Sampling::Nearest => Interpolation::Nearest,
            Sampling::Bilinear => Interpolation::Bilinear,
        };
        Self { interpolation }
    }
}

/// Whether `scale` is inside the range the kind's profile is monotonic on.
pub fn scale_supported(kind: DistortionKind, scale: f64) -> bool {
    match kind {
        DistortionKind::Bump => scale > -1.0,
        DistortionKind::Pinch => scale > -1.0 && scale < 1.0,
    }
}

/// Normalized source radius for a normalized destination radius `t` in `[0, 1)`.
fn profile(kind: DistortionKind, scale: f32, t: f32) -> f32 {
    match kind {
        DistortionKind::Bump => t.powf(1.0 + scale),
        DistortionKind::Pinch => t * (1.0 - scale * (1.0 - t)),
    }
}

impl FilterEngine for WarpEngine {
    #[instrument(skip(self, image), fields(kind = %spec.kind, radius = spec.radius, scale = spec.scale))]
    fn apply(&self, image: &DynamicImage, spec: &DistortionSpec) -> Option<DynamicImage> {
        let params_finite = spec.center.x.is_finite()
            && spec.center.y.is_finite()
            && spec.radius.is_finite()
            && spec.scale.is_finite();
        if !params_finite || spec.radius <= 0.0 || !scale_supported(spec.kind, spec.scale) {
            warn!("Unsupported distortion parameters");
            return None;
        }
        if image.width() == 0 || image.height() == 0 {
            warn!("Cannot distort an empty image");
            return None;
        }

        let mut warped = image.to_rgba8();
        let (width, height) = warped.dimensions();
        let (cx, cy) = (spec.center.x as f32, spec.center.y as f32);
        let radius = spec.radius as f32;
        let scale = spec.scale as f32;
        let kind = spec.kind;

        // Every source sample lies inside the disc, so only its bounding box
        // (clipped to the image) needs remapping.
        let x0 = (cx - radius).floor().clamp(0.0, width as f32) as u32;
        let y0 = (cy - radius).floor().clamp(0.0, height as f32) as u32;
        let x1 = (cx + radius).ceil().clamp(0.0, width as f32) as u32;
        let y1 = (cy + radius).ceil().clamp(0.0, height as f32) as u32;
        if x0 >= x1 || y0 >= y1 {
            debug!("Distortion disc lies outside the image");
            return Some(DynamicImage::ImageRgba8(warped));
        }
        let window = imageops::crop_imm(&warped, x0, y0, x1 - x0, y1 - y0).to_image();
        let (ox, oy) = (x0 as f32, y0 as f32);
        // Bilinear sampling needs a right/bottom neighbour inside the buffer.
        let max_x = ((window.width() - 1) as f32 - EDGE_EPSILON).max(0.0);
        let max_y = ((window.height() - 1) as f32 - EDGE_EPSILON).max(0.0);

        let inside = move |x: f32, y: f32| -> Option<(f32, f32, f32)> {
            let (dx, dy) = (x - cx, y - cy);
            let dist = (dx * dx + dy * dy).sqrt();
            (dist > 0.0 && dist < radius).then_some((dx, dy, dist))
        };

        // Window-local destination to window-local source.
        let mapping = move |x: f32, y: f32| -> (f32, f32) {
            let Some((dx, dy, dist)) = inside(x + ox, y + oy) else {
                return (x, y);
            };
            let t = dist / radius;
            let ratio = profile(kind, scale, t) / t;
            let sx = cx + dx * ratio - ox;
            let sy = cy + dy * ratio - oy;
            (sx.clamp(0.0, max_x), sy.clamp(0.0, max_y))
        };

        let sampled = warp_with(&window, mapping, self.interpolation, Rgba([0, 0, 0, 0]));

        // Only the disc is remapped; everything else is carried over verbatim.
        for (x, y, pixel) in sampled.enumerate_pixels() {
            let (gx, gy) = (x + x0, y + y0);
            if inside(gx as f32, gy as f32).is_some() {
                warped.put_pixel(gx, gy, *pixel);
            }
        }

        debug!(width = warped.width(), height = warped.height(), "Distortion rendered");
        Some(DynamicImage::ImageRgba8(warped))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use facewarp_core::PixelPoint;
    use image::RgbaImage;

    /// Horizontal gradient so any radial displacement changes pixel values.
    fn gradient(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_fn(width, height, |x, y| {
            Rgba([(x * 4 % 256) as u8, (y * 4 % 256) as u8, 128, 255])
        }))
    }

    fn spec(kind: DistortionKind, x: f64, y: f64, radius: f64, scale: f64) -> DistortionSpec {
        DistortionSpec {
            kind,
            center: PixelPoint::new(x, y),
            radius,
            scale,
        }
    }

    #[test]
    fn bump_keeps_extent_and_pixels_outside_radius() {
        let src = gradient(64, 48);
        let engine = WarpEngine::new(Sampling::Nearest);
        let out = engine
            .apply(&src, &spec(DistortionKind::Bump, 32.0, 24.0, 10.0, 1.8))
            .unwrap();
        assert_eq!((out.width(), out.height()), (64, 48));

        let (src, out) = (src.to_rgba8(), out.to_rgba8());
        assert_eq!(src.get_pixel(0, 0), out.get_pixel(0, 0));
        assert_eq!(src.get_pixel(63, 47), out.get_pixel(63, 47));
        assert_eq!(src.get_pixel(32, 24), out.get_pixel(32, 24));
    }

    #[test]
    fn bump_magnifies_near_center() {
        let src = gradient(64, 64);
        let engine = WarpEngine::new(Sampling::Nearest);
        let out = engine
            .apply(&src, &spec(DistortionKind::Bump, 32.0, 32.0, 20.0, 1.8))
            .unwrap()
            .to_rgba8();
        // Ten pixels right of center now shows content much closer to it.
        let red = out.get_pixel(42, 32)[0];
        assert!(red < (42 * 4) as u8, "expected magnification, got red={red}");
        assert!(red >= (32 * 4) as u8);
    }

    #[test]
    fn pinch_compresses_toward_center() {
        let src = gradient(64, 64);
        let engine = WarpEngine::new(Sampling::Nearest);
        let out = engine
            .apply(&src, &spec(DistortionKind::Pinch, 32.0, 32.0, 20.0, -0.3))
            .unwrap()
            .to_rgba8();
        let red = out.get_pixel(42, 32)[0];
        assert!(red > (42 * 4) as u8, "expected compression, got red={red}");
    }

    #[test]
    fn zero_scale_is_identity() {
        let src = gradient(32, 32);
        let engine = WarpEngine::new(Sampling::Nearest);
        let out = engine
            .apply(&src, &spec(DistortionKind::Pinch, 16.0, 16.0, 8.0, 0.0))
            .unwrap();
        assert_eq!(src.to_rgba8(), out.to_rgba8());
    }

    #[test]
    fn rejects_unsupported_parameters() {
        let src = gradient(16, 16);
        let engine = WarpEngine::default();
        assert!(engine.apply(&src, &spec(DistortionKind::Bump, 8.0, 8.0, 0.0, 1.0)).is_none());
        assert!(engine.apply(&src, &spec(DistortionKind::Bump, 8.0, 8.0, 4.0, -1.0)).is_none());
        assert!(engine.apply(&src, &spec(DistortionKind::Pinch, 8.0, 8.0, 4.0, 1.5)).is_none());
        assert!(
            engine
                .apply(&src, &spec(DistortionKind::Bump, f64::NAN, 8.0, 4.0, 1.0))
                .is_none()
        );
    }

    #[test]
    fn disc_clear_of_image_changes_nothing() {
        let src = gradient(40, 30);
        let out = WarpEngine::default()
            .apply(&src, &spec(DistortionKind::Bump, 200.0, 200.0, 25.0, 1.8))
            .unwrap();
        assert_eq!(out.to_rgba8(), src.to_rgba8());
    }

    #[test]
    fn small_disc_leaves_rest_of_large_image_alone() {
        let src = gradient(400, 300);
        let out = WarpEngine::new(Sampling::Nearest)
            .apply(&src, &spec(DistortionKind::Bump, 200.0, 150.0, 12.0, 1.8))
            .unwrap()
            .to_rgba8();
        let src = src.to_rgba8();
        for (x, y, pixel) in out.enumerate_pixels() {
            let (dx, dy) = (x as f32 - 200.0, y as f32 - 150.0);
            if (dx * dx + dy * dy).sqrt() >= 12.0 {
                assert_eq!(pixel, src.get_pixel(x, y), "changed at ({x}, {y})");
            }
        }
        // Inside the disc the bump magnifies toward the center.
        assert!(out.get_pixel(206, 150)[0] < src.get_pixel(206, 150)[0]);
    }

    #[test]
    fn output_is_rgba8_for_rgb_input() {
        let src = DynamicImage::ImageRgb8(gradient(32, 32).to_rgb8());
        let out = WarpEngine::default()
            .apply(&src, &spec(DistortionKind::Pinch, 16.0, 16.0, 8.0, -0.3))
            .unwrap();
        assert!(matches!(out, DynamicImage::ImageRgba8(_)));
        assert_eq!((out.width(), out.height()), (32, 32));
    }

    #[test]
    fn center_outside_image_keeps_extent() {
        let src = gradient(40, 30);
        let engine = WarpEngine::default();
        let out = engine
            .apply(&src, &spec(DistortionKind::Bump, -5.0, 35.0, 25.0, 1.8))
            .unwrap();
        assert_eq!((out.width(), out.height()), (40, 30));
    }
}
