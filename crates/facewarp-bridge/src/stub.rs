// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Stub detector for builds without a native vision framework and no
// landmarks file. Every call returns `PlatformUnavailable`.

use facewarp_core::FaceLandmarks;
use facewarp_core::error::{FaceWarpError, Result};
use image::DynamicImage;

use crate::traits::LandmarkDetector;

/// No-op detector.
pub struct StubDetector;

impl LandmarkDetector for StubDetector {
    fn backend_name(&self) -> &str {
        "stub"
    }

    fn detect(&self, _image: &DynamicImage) -> Result<Option<FaceLandmarks>> {
        tracing::warn!("LandmarkDetector::detect called on stub detector");
        Err(FaceWarpError::PlatformUnavailable)
    }
}
