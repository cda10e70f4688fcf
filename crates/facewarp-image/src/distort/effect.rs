// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Effect dispatch: plan the distortion steps for a user-facing effect and run
// them over an image.

use facewarp_core::error::{FaceWarpError, Result};
use facewarp_core::{DistortionSpec, Effect, FaceLandmarks, ImageExtent, WarpConfig};
use image::DynamicImage;
use tracing::{info, instrument};

use super::engine::FilterEngine;
use super::params::{build_eye_enlargement_specs_with, build_face_slim_spec_with};
use super::pipeline::run_pipeline;

/// Distortion steps for `effect`, in the order they must run.
pub fn plan(
    effect: Effect,
    landmarks: &FaceLandmarks,
    extent: ImageExtent,
    config: &WarpConfig,
) -> Result<Vec<DistortionSpec>> {
    match effect {
        Effect::EnlargeEyes => {
            build_eye_enlargement_specs_with(landmarks, extent.width, extent.height, config)
        }
        Effect::SlimFace => {
            build_face_slim_spec_with(landmarks, extent.width, extent.height, config)
                .map(|spec| vec![spec])
        }
    }
}

/// Plan `effect` against `landmarks` and render it over `image`.
///
/// Planning failures abort the request. Skipped steps do not: eye
/// enlargement returns whatever the remaining steps produced, even the
/// untouched photo. Face slimming has a single step, so when it is skipped
/// `FilterUnavailable` is reported.
#[instrument(skip(image, landmarks, engine, config), fields(effect = %effect))]
pub fn retouch(
    image: &DynamicImage,
    landmarks: &FaceLandmarks,
    effect: Effect,
    engine: &dyn FilterEngine,
    config: &WarpConfig,
) -> Result<DynamicImage> {
    let extent = ImageExtent::new(image.width(), image.height());
    let specs = plan(effect, landmarks, extent, config)?;
    let run = run_pipeline(image, &specs, engine);

    if effect == Effect::SlimFace && !specs.is_empty() && run.skipped.len() == specs.len() {
        return Err(FaceWarpError::FilterUnavailable(specs[0].kind));
    }

    info!(steps = specs.len(), skipped = run.skipped.len(), "Effect applied");
    Ok(run.image)
}
