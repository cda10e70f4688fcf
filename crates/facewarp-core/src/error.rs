// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Facewarp.

use thiserror::Error;

use crate::types::{DistortionKind, RegionName};

/// Top-level error type for all Facewarp operations.
#[derive(Debug, Error)]
pub enum FaceWarpError {
    // -- Retouch request errors --
    #[error("no face detected")]
    NoFaceDetected,

    #[error("landmark region missing: {0}")]
    MissingLandmarkRegion(RegionName),

    #[error("landmark region has no points: {0}")]
    EmptyRegion(RegionName),

    #[error("{0} filter produced no output")]
    FilterUnavailable(DistortionKind),

    // -- Image I/O --
    #[error("image processing failed: {0}")]
    ImageError(String),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    Config(String),

    // -- Session --
    #[error("no image loaded")]
    NoImageLoaded,

    #[error("a retouch request is already in progress")]
    Busy,

    // -- Platform bridge --
    #[error("platform bridge error: {0}")]
    Bridge(String),

    #[error("feature not available on this platform")]
    PlatformUnavailable,
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, FaceWarpError>;
