// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Distortion module — landmark-to-pixel parameter calculation, radial warp
// engine, sequential pipeline and effect dispatch.

pub mod effect;
pub mod engine;
pub mod params;
pub mod pipeline;

pub use effect::{plan, retouch};
pub use engine::{FilterEngine, WarpEngine};
pub use params::{
    average, build_eye_enlargement_specs, build_eye_enlargement_specs_with, build_face_slim_spec,
    build_face_slim_spec_with, to_pixel_space,
};
pub use pipeline::{PipelineRun, apply_pipeline, run_pipeline};
