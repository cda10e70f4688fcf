// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for Facewarp: landmark geometry, distortion parameters
// and the user-facing effects.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier for a single user action (one detect + retouch round trip).
///
/// Only used to correlate log lines; nothing is keyed on it after the
/// request completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestId(pub Uuid);

impl RequestId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Point in detector coordinates: both axes in `[0, 1]`, Y increasing upward.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct NormalizedPoint {
    pub x: f64,
    pub y: f64,
}

impl NormalizedPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Point in pixel space: origin top-left, Y increasing downward.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

impl PixelPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Face bounding box in detector coordinates (origin bottom-left).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizedRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl NormalizedRect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn mid_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    pub fn mid_y(&self) -> f64 {
        self.y + self.height / 2.0
    }
}

/// Named landmark regions the retouching effects read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegionName {
    LeftEye,
    RightEye,
    BoundingBox,
}

impl std::fmt::Display for RegionName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::LeftEye => "left eye",
            Self::RightEye => "right eye",
            Self::BoundingBox => "face bounding box",
        };
        f.write_str(name)
    }
}

/// Ordered cluster of detected points belonging to one facial feature.
///
/// Detectors always report at least one point, but a region deserialised
/// from an external source may be empty; averaging rejects that case.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LandmarkRegion {
    points: Vec<NormalizedPoint>,
}

impl LandmarkRegion {
    pub fn new(points: Vec<NormalizedPoint>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[NormalizedPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl FromIterator<NormalizedPoint> for LandmarkRegion {
    fn from_iter<I: IntoIterator<Item = NormalizedPoint>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Landmarks for a single detected face.
///
/// Every field is optional: a detector may find a face but fail to
/// localise a particular feature.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FaceLandmarks {
    #[serde(default)]
    pub left_eye: Option<LandmarkRegion>,
    #[serde(default)]
    pub right_eye: Option<LandmarkRegion>,
    #[serde(default)]
    pub bounding_box: Option<NormalizedRect>,
}

/// Radial distortion filters supported by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistortionKind {
    /// Outward bulge around the center.
    Bump,
    /// Inward compression toward the center.
    Pinch,
}

impl std::fmt::Display for DistortionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bump => f.write_str("bump"),
            Self::Pinch => f.write_str("pinch"),
        }
    }
}

/// Fully parameterised distortion step, in pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistortionSpec {
    pub kind: DistortionKind,
    pub center: PixelPoint,
    pub radius: f64,
    /// Positive = outward bulge, negative = inward pinch.
    pub scale: f64,
}

/// Pixel dimensions of an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageExtent {
    pub width: u32,
    pub height: u32,
}

impl ImageExtent {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl std::fmt::Display for ImageExtent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Retouching actions offered to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Effect {
    EnlargeEyes,
    SlimFace,
}

impl std::fmt::Display for Effect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EnlargeEyes => f.write_str("enlarge-eyes"),
            Self::SlimFace => f.write_str("slim-face"),
        }
    }
}
