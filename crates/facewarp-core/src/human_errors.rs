// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable error messages for the front end.
//
// Every technical error is mapped to a plain message with a suggestion. The
// severity drives how the front end presents it.

use crate::error::FaceWarpError;
use crate::types::RegionName;

/// Severity of an error from the user's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Trying again as-is may work.
    Transient,
    /// User must do something (pick another photo, wait, fix a setting).
    ActionRequired,
    /// Cannot be fixed by retrying or user action.
    Permanent,
}

/// A human-readable error with plain message and actionable suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    /// Short summary (shown as a heading).
    pub message: String,
    /// What the user should try (shown as body text).
    pub suggestion: String,
    /// Whether repeating the same action could succeed.
    pub retriable: bool,
    /// Severity level.
    pub severity: Severity,
}

/// Generic failure shown when a face could not be found or processed.
const FACE_FAILURE: &str = "We couldn't find a face or process the image.";

/// Convert a `FaceWarpError` into a `HumanError`.
pub fn humanize_error(err: &FaceWarpError) -> HumanError {
    match err {
        FaceWarpError::NoFaceDetected => HumanError {
            message: FACE_FAILURE.into(),
            suggestion: "Use a well-lit photo where the face looks toward the camera.".into(),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        FaceWarpError::MissingLandmarkRegion(region) | FaceWarpError::EmptyRegion(region) => {
            let suggestion = match region {
                RegionName::LeftEye | RegionName::RightEye => {
                    "Both eyes need to be visible. Try a photo without sunglasses or hair covering the eyes."
                }
                RegionName::BoundingBox => "Try a photo where the whole face is in frame.",
            };
            HumanError {
                message: FACE_FAILURE.into(),
                suggestion: suggestion.into(),
                retriable: false,
                severity: Severity::ActionRequired,
            }
        }

        FaceWarpError::FilterUnavailable(kind) => HumanError {
            message: FACE_FAILURE.into(),
            suggestion: format!("The {kind} effect could not be applied with the current settings."),
            retriable: false,
            severity: Severity::Permanent,
        },

        FaceWarpError::ImageError(_) => HumanError {
            message: "There's a problem with this image.".into(),
            suggestion: "The image may be damaged or in an unusual format. Try saving it as a JPEG or PNG first.".into(),
            retriable: false,
            severity: Severity::Permanent,
        },

        FaceWarpError::Io(io_err) => HumanError {
            message: "A file couldn't be read or written.".into(),
            suggestion: format!("Check the file exists and that you have permission to use it. ({io_err})"),
            retriable: true,
            severity: Severity::ActionRequired,
        },

        FaceWarpError::Serialization(_) => HumanError {
            message: "The landmark or settings file is not valid.".into(),
            suggestion: "Check the JSON file for typos, or regenerate it.".into(),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        FaceWarpError::Config(detail) => HumanError {
            message: "A setting is out of range.".into(),
            suggestion: format!("Fix the configuration file and try again. ({detail})"),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        FaceWarpError::NoImageLoaded => HumanError {
            message: "No photo is loaded.".into(),
            suggestion: "Pick a photo first, then choose an effect.".into(),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        FaceWarpError::Busy => HumanError {
            message: "Still working on the previous effect.".into(),
            suggestion: "Wait for it to finish, then try again.".into(),
            retriable: true,
            severity: Severity::Transient,
        },

        FaceWarpError::Bridge(_) => HumanError {
            message: FACE_FAILURE.into(),
            suggestion: "Face detection had a problem. Try again.".into(),
            retriable: true,
            severity: Severity::Transient,
        },

        FaceWarpError::PlatformUnavailable => HumanError {
            message: "Face detection isn't available on this device.".into(),
            suggestion: "Provide a landmarks file with --landmarks.".into(),
            retriable: false,
            severity: Severity::Permanent,
        },
    }
}
