// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Sidecar detector — reads landmarks produced ahead of time by an external
// vision tool from a JSON file next to the photo.
//
// Expected shape (every key optional, `null` means "not found"):
//
//   {
//     "face": {
//       "left_eye":  [{ "x": 0.31, "y": 0.62 }, ...],
//       "right_eye": [{ "x": 0.67, "y": 0.61 }, ...],
//       "bounding_box": { "x": 0.2, "y": 0.25, "width": 0.6, "height": 0.55 }
//     }
//   }

use std::path::{Path, PathBuf};

use facewarp_core::FaceLandmarks;
use facewarp_core::error::{FaceWarpError, Result};
use image::DynamicImage;
use serde_json::Value;
use tracing::{debug, info, instrument};

use crate::traits::LandmarkDetector;

/// Detector backed by a landmarks JSON file.
#[derive(Debug, Clone)]
pub struct SidecarDetector {
    path: PathBuf,
}

impl SidecarDetector {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Conventional sidecar location for `image_path`: `photo.jpg` →
    /// `photo.landmarks.json`.
    pub fn beside(image_path: &Path) -> Self {
        Self::new(image_path.with_extension("landmarks.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Parse sidecar JSON. `{"face": null}` and `{}` both mean no face.
pub fn parse_sidecar(json: &str) -> Result<Option<FaceLandmarks>> {
    let root: Value = serde_json::from_str(json)?;
    let Value::Object(mut map) = root else {
        return Err(FaceWarpError::Bridge(
            "landmarks file must contain a JSON object".into(),
        ));
    };
    match map.remove("face") {
        None | Some(Value::Null) => Ok(None),
        Some(face) => Ok(Some(serde_json::from_value(face)?)),
    }
}

impl LandmarkDetector for SidecarDetector {
    fn backend_name(&self) -> &str {
        "sidecar"
    }

    #[instrument(skip_all, fields(path = %self.path.display()))]
    fn detect(&self, image: &DynamicImage) -> Result<Option<FaceLandmarks>> {
        let json = std::fs::read_to_string(&self.path)?;
        let face = parse_sidecar(&json)?;
        match &face {
            Some(_) => info!(
                width = image.width(),
                height = image.height(),
                "Landmarks loaded from sidecar"
            ),
            None => debug!("Sidecar reports no face"),
        }
        Ok(face)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbaImage;

    fn blank() -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::new(4, 4))
    }

    #[test]
    fn parses_full_face() {
        let json = r#"{
            "face": {
                "left_eye": [{ "x": 0.3, "y": 0.6 }, { "x": 0.34, "y": 0.61 }],
                "right_eye": [{ "x": 0.66, "y": 0.6 }],
                "bounding_box": { "x": 0.2, "y": 0.2, "width": 0.6, "height": 0.6 }
            }
        }"#;
        let face = parse_sidecar(json).unwrap().unwrap();
        assert_eq!(face.left_eye.unwrap().len(), 2);
        assert_eq!(face.right_eye.unwrap().len(), 1);
        assert_eq!(face.bounding_box.unwrap().width, 0.6);
    }

    #[test]
    fn null_or_absent_face_means_none() {
        assert!(parse_sidecar(r#"{ "face": null }"#).unwrap().is_none());
        assert!(parse_sidecar("{}").unwrap().is_none());
    }

    #[test]
    fn non_object_is_bridge_error() {
        assert!(matches!(
            parse_sidecar("[1, 2]"),
            Err(FaceWarpError::Bridge(_))
        ));
    }

    #[test]
    fn malformed_json_is_serialization_error() {
        assert!(matches!(
            parse_sidecar("{ face: "),
            Err(FaceWarpError::Serialization(_))
        ));
    }

    #[test]
    fn detect_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("portrait.landmarks.json");
        std::fs::write(
            &path,
            r#"{ "face": { "bounding_box": { "x": 0.1, "y": 0.1, "width": 0.5, "height": 0.5 } } }"#,
        )
        .unwrap();

        let detector = SidecarDetector::new(&path);
        let face = detector.detect(&blank()).unwrap().unwrap();
        assert!(face.bounding_box.is_some());
        assert!(face.left_eye.is_none());
    }

    #[test]
    fn detect_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let detector = SidecarDetector::new(dir.path().join("absent.json"));
        assert!(matches!(detector.detect(&blank()), Err(FaceWarpError::Io(_))));
    }

    #[test]
    fn beside_replaces_extension() {
        let detector = SidecarDetector::beside(Path::new("/photos/me.jpg"));
        assert_eq!(detector.path(), Path::new("/photos/me.landmarks.json"));
    }
}
