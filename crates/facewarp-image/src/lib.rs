// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// facewarp-image — Face-relative distortion for the Facewarp retoucher.
//
// Provides the distortion parameter calculator (landmarks to pixel-space
// bump/pinch specs), a radial warp engine, the sequential pipeline that
// threads images through it, and an image processor for load/save.

pub mod distort;
pub mod image;

// Re-export the primary items so callers can use `facewarp_image::WarpEngine` etc.
pub use distort::{FilterEngine, PipelineRun, WarpEngine, apply_pipeline, plan, retouch};
pub use crate::image::processor::ImageProcessor;
