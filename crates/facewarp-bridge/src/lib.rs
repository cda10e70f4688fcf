// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>

//! Facewarp — face landmark detector abstractions.
//!
//! Detection is a collaborator of the retoucher: it turns a photo into
//! normalized landmark regions. This crate defines the trait and the
//! backends available without a native vision SDK.

pub mod sidecar;
pub mod stub;
pub mod traits;

use std::path::Path;

pub use sidecar::SidecarDetector;
pub use stub::StubDetector;
pub use traits::LandmarkDetector;

/// Select a detector backend.
///
/// With a landmarks file the sidecar backend is used; otherwise the stub,
/// which reports that detection is unavailable on this platform.
pub fn platform_detector(landmarks: Option<&Path>) -> Box<dyn LandmarkDetector> {
    match landmarks {
        Some(path) => Box::new(SidecarDetector::new(path)),
        None => Box::new(StubDetector),
    }
}
