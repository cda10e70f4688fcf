// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Distortion parameter calculator — turns normalized face landmarks into
// pixel-space distortion specs for the retouching effects.

use facewarp_core::error::{FaceWarpError, Result};
use facewarp_core::{
    DistortionKind, DistortionSpec, FaceLandmarks, LandmarkRegion, NormalizedPoint, PixelPoint,
    RegionName, WarpConfig,
};
use tracing::{debug, instrument};

/// Arithmetic mean of a region's points, per axis.
///
/// Returns `None` for an empty region. Callers must treat that as a failed
/// request rather than substituting the origin.
pub fn average(region: &LandmarkRegion) -> Option<NormalizedPoint> {
    if region.is_empty() {
        return None;
    }
    let (sum_x, sum_y) = region
        .points()
        .iter()
        .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
    let count = region.len() as f64;
    Some(NormalizedPoint::new(sum_x / count, sum_y / count))
}

/// Map a detector point into pixel space.
///
/// The detector's Y axis points up while the pixel buffer's points down, so
/// Y is flipped here and nowhere else.
pub fn to_pixel_space(normalized: NormalizedPoint, width: u32, height: u32) -> PixelPoint {
    PixelPoint::new(
        normalized.x * f64::from(width),
        (1.0 - normalized.y) * f64::from(height),
    )
}

/// Bump specs for both eyes using the stock strengths.
pub fn build_eye_enlargement_specs(
    landmarks: &FaceLandmarks,
    width: u32,
    height: u32,
) -> Result<Vec<DistortionSpec>> {
    build_eye_enlargement_specs_with(landmarks, width, height, &WarpConfig::default())
}

/// Bump specs for both eyes, left eye first.
///
/// Steps run sequentially and each reads the previous output, so the order
/// is part of the result. Nothing is emitted unless both eyes resolve.
#[instrument(skip(landmarks, config))]
pub fn build_eye_enlargement_specs_with(
    landmarks: &FaceLandmarks,
    width: u32,
    height: u32,
    config: &WarpConfig,
) -> Result<Vec<DistortionSpec>> {
    let left = landmarks
        .left_eye
        .as_ref()
        .ok_or(FaceWarpError::MissingLandmarkRegion(RegionName::LeftEye))?;
    let right = landmarks
        .right_eye
        .as_ref()
        .ok_or(FaceWarpError::MissingLandmarkRegion(RegionName::RightEye))?;

    let specs = [(RegionName::LeftEye, left), (RegionName::RightEye, right)]
        .into_iter()
        .map(|(name, region)| {
            let center = average(region).ok_or(FaceWarpError::EmptyRegion(name))?;
            let pixel = to_pixel_space(center, width, height);
            debug!(region = %name, x = pixel.x, y = pixel.y, "Eye center resolved");
            Ok(DistortionSpec {
                kind: DistortionKind::Bump,
                center: pixel,
                radius: config.eye_radius,
                scale: config.eye_scale,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(specs)
}

/// Pinch spec over the face bounding box using the stock strengths.
pub fn build_face_slim_spec(
    landmarks: &FaceLandmarks,
    width: u32,
    height: u32,
) -> Result<DistortionSpec> {
    build_face_slim_spec_with(landmarks, width, height, &WarpConfig::default())
}

/// Pinch spec centered on the face, radius proportional to face width.
#[instrument(skip(landmarks, config))]
pub fn build_face_slim_spec_with(
    landmarks: &FaceLandmarks,
    width: u32,
    height: u32,
    config: &WarpConfig,
) -> Result<DistortionSpec> {
    let bbox = landmarks
        .bounding_box
        .ok_or(FaceWarpError::MissingLandmarkRegion(RegionName::BoundingBox))?;

    let center = to_pixel_space(NormalizedPoint::new(bbox.mid_x(), bbox.mid_y()), width, height);
    let face_width = bbox.width * f64::from(width);
    debug!(x = center.x, y = center.y, face_width, "Face center resolved");

    Ok(DistortionSpec {
        kind: DistortionKind::Pinch,
        center,
        radius: face_width * config.slim_radius_ratio,
        scale: config.slim_scale,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use facewarp_core::NormalizedRect;

    fn region(points: &[(f64, f64)]) -> LandmarkRegion {
        points
            .iter()
            .map(|&(x, y)| NormalizedPoint::new(x, y))
            .collect()
    }

    fn face() -> FaceLandmarks {
        FaceLandmarks {
            left_eye: Some(region(&[(0.30, 0.62), (0.34, 0.60), (0.38, 0.62)])),
            right_eye: Some(region(&[(0.62, 0.62), (0.66, 0.60), (0.70, 0.62)])),
            bounding_box: Some(NormalizedRect::new(0.25, 0.3, 0.5, 0.5)),
        }
    }

    #[test]
    fn average_lies_within_point_bounds() {
        let r = region(&[(0.1, 0.9), (0.4, 0.2), (0.3, 0.5), (0.2, 0.35)]);
        let avg = average(&r).unwrap();
        assert!((0.1..=0.4).contains(&avg.x), "x out of bounds: {}", avg.x);
        assert!((0.2..=0.9).contains(&avg.y), "y out of bounds: {}", avg.y);
        assert!((avg.x - 0.25).abs() < 1e-12);
        assert!((avg.y - 0.4875).abs() < 1e-12);
    }

    #[test]
    fn average_of_empty_region_is_rejected() {
        assert!(average(&LandmarkRegion::default()).is_none());
    }

    #[test]
    fn pixel_space_center() {
        let p = to_pixel_space(NormalizedPoint::new(0.5, 0.5), 200, 100);
        assert_eq!(p, PixelPoint::new(100.0, 50.0));
    }

    #[test]
    fn pixel_space_flips_vertical_axis() {
        let p = to_pixel_space(NormalizedPoint::new(0.0, 0.0), 200, 100);
        assert_eq!(p, PixelPoint::new(0.0, 100.0));
    }

    #[test]
    fn eye_specs_are_left_then_right() {
        let specs = build_eye_enlargement_specs(&face(), 1000, 1000).unwrap();
        assert_eq!(specs.len(), 2);
        assert!(specs[0].center.x < specs[1].center.x);
        assert!((specs[0].center.x - 340.0).abs() < 1e-9);
        assert!((specs[1].center.x - 660.0).abs() < 1e-9);
        for spec in &specs {
            assert_eq!(spec.kind, DistortionKind::Bump);
            assert_eq!(spec.radius, 120.0);
            assert_eq!(spec.scale, 1.8);
        }
    }

    #[test]
    fn eye_specs_empty_when_an_eye_is_missing() {
        let mut landmarks = face();
        landmarks.right_eye = None;
        let err = build_eye_enlargement_specs(&landmarks, 1000, 1000).unwrap_err();
        assert!(matches!(
            err,
            FaceWarpError::MissingLandmarkRegion(RegionName::RightEye)
        ));

        let mut landmarks = face();
        landmarks.left_eye = None;
        assert!(build_eye_enlargement_specs(&landmarks, 1000, 1000).is_err());
    }

    #[test]
    fn eye_specs_reject_empty_region() {
        let mut landmarks = face();
        landmarks.left_eye = Some(LandmarkRegion::default());
        let err = build_eye_enlargement_specs(&landmarks, 1000, 1000).unwrap_err();
        assert!(matches!(err, FaceWarpError::EmptyRegion(RegionName::LeftEye)));
    }

    #[test]
    fn slim_spec_geometry() {
        let spec = build_face_slim_spec(&face(), 1000, 800).unwrap();
        assert_eq!(spec.kind, DistortionKind::Pinch);
        assert!((spec.center.x - 500.0).abs() < 1e-9);
        // mid_y = 0.55, flipped = 0.45 * 800
        assert!((spec.center.y - 360.0).abs() < 1e-9);
        assert!((spec.radius - 300.0).abs() < 1e-9);
        assert_eq!(spec.scale, -0.3);
    }

    #[test]
    fn slim_radius_scales_with_image_width() {
        let narrow = build_face_slim_spec(&face(), 400, 600).unwrap();
        let wide = build_face_slim_spec(&face(), 800, 600).unwrap();
        assert!((wide.radius - 2.0 * narrow.radius).abs() < 1e-9);
    }

    #[test]
    fn slim_spec_requires_bounding_box() {
        let mut landmarks = face();
        landmarks.bounding_box = None;
        let err = build_face_slim_spec(&landmarks, 100, 100).unwrap_err();
        assert!(matches!(
            err,
            FaceWarpError::MissingLandmarkRegion(RegionName::BoundingBox)
        ));
    }

    #[test]
    fn custom_strengths_are_used() {
        let config = WarpConfig {
            eye_radius: 40.0,
            eye_scale: 0.5,
            ..WarpConfig::default()
        };
        let specs = build_eye_enlargement_specs_with(&face(), 500, 500, &config).unwrap();
        assert!(specs.iter().all(|s| s.radius == 40.0 && s.scale == 0.5));
    }
}
