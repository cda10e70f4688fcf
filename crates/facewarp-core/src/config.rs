// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Application configuration.

use serde::{Deserialize, Serialize};

use crate::error::{FaceWarpError, Result};

/// Pixel sampling used when a warp reads between source pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sampling {
    Nearest,
    #[default]
    Bilinear,
}

/// Distortion strengths used by the retouching effects.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WarpConfig {
    /// Bump radius around each eye center, in pixels.
    pub eye_radius: f64,
    /// Bump scale for eye enlargement.
    pub eye_scale: f64,
    /// Pinch radius as a fraction of the face width in pixels.
    pub slim_radius_ratio: f64,
    /// Pinch scale for face slimming (negative compresses).
    pub slim_scale: f64,
}

impl Default for WarpConfig {
    fn default() -> Self {
        Self {
            eye_radius: 120.0,
            eye_scale: 1.8,
            slim_radius_ratio: 0.6,
            slim_scale: -0.3,
        }
    }
}

/// Persistent application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Effect strengths.
    pub warp: WarpConfig,
    /// Interpolation used by the built-in warp engine.
    pub sampling: Sampling,
    /// Quality (1-100) used when the output path asks for JPEG.
    pub jpeg_quality: u8,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            warp: WarpConfig::default(),
            sampling: Sampling::default(),
            jpeg_quality: 90,
        }
    }
}

impl AppConfig {
    /// Reject settings the engine can never honour.
    pub fn validate(&self) -> Result<()> {
        let w = &self.warp;
        let finite = [w.eye_radius, w.eye_scale, w.slim_radius_ratio, w.slim_scale]
            .iter()
            .all(|v| v.is_finite());
        if !finite {
            return Err(FaceWarpError::Config("warp values must be finite".into()));
        }
        if w.eye_radius <= 0.0 {
            return Err(FaceWarpError::Config(format!(
                "eye_radius must be > 0, got {}",
                w.eye_radius
            )));
        }
        if w.slim_radius_ratio <= 0.0 {
            return Err(FaceWarpError::Config(format!(
                "slim_radius_ratio must be > 0, got {}",
                w.slim_radius_ratio
            )));
        }
        if w.eye_scale <= -1.0 {
            return Err(FaceWarpError::Config(format!(
                "eye_scale must be > -1, got {}",
                w.eye_scale
            )));
        }
        if w.slim_scale <= -1.0 || w.slim_scale >= 1.0 {
            return Err(FaceWarpError::Config(format!(
                "slim_scale must be between -1 and 1 (exclusive), got {}",
                w.slim_scale
            )));
        }
        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(FaceWarpError::Config(format!(
                "jpeg_quality must be between 1 and 100, got {}",
                self.jpeg_quality
            )));
        }
        Ok(())
    }
}
