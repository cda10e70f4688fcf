// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Platform-agnostic trait definitions for face landmark detection.

use facewarp_core::FaceLandmarks;
use facewarp_core::error::Result;
use image::DynamicImage;

/// Locates a face and its landmarks in a photo.
///
/// Implementations may block (model inference, file I/O); callers run them
/// off the interactive thread.
pub trait LandmarkDetector: Send + Sync {
    /// Human-readable backend name for logs (e.g. "sidecar", "stub").
    fn backend_name(&self) -> &str;

    /// Detect the primary face in `image`.
    ///
    /// Returns `Ok(None)` when no face was found and `Err` when the detector
    /// itself failed. Coordinates are normalized with Y increasing upward.
    fn detect(&self, image: &DynamicImage) -> Result<Option<FaceLandmarks>>;
}
