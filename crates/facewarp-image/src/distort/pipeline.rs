// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Sequential distortion pipeline. Each step reads the previous step's output;
// a step the engine cannot render is skipped and the previous image carries
// forward unchanged.

use facewarp_core::{DistortionSpec, ImageExtent};
use image::{DynamicImage, GenericImageView, RgbaImage, imageops};
use tracing::{debug, info, instrument, warn};

use super::engine::FilterEngine;

/// Output of a pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineRun {
    /// Final image, always at the source extent.
    pub image: DynamicImage,
    /// Indices into `specs` of steps the engine could not render.
    pub skipped: Vec<usize>,
}

impl PipelineRun {
    /// Number of steps that actually changed the running image.
    pub fn applied(&self, total: usize) -> usize {
        total - self.skipped.len()
    }
}

/// Apply `specs` in order and return the final image.
///
/// Steps rendered by [`WarpEngine`](super::engine::WarpEngine) produce 8-bit
/// RGBA, so once any step applies the result is RGBA8. When every step is
/// skipped the source comes back with its own colour type.
pub fn apply_pipeline(
    image: &DynamicImage,
    specs: &[DistortionSpec],
    engine: &dyn FilterEngine,
) -> DynamicImage {
    run_pipeline(image, specs, engine).image
}

/// Apply `specs` in order, reporting which steps were skipped.
#[instrument(skip_all, fields(steps = specs.len(), width = image.width(), height = image.height()))]
pub fn run_pipeline(
    image: &DynamicImage,
    specs: &[DistortionSpec],
    engine: &dyn FilterEngine,
) -> PipelineRun {
    let extent = ImageExtent::new(image.width(), image.height());
    let mut current = image.clone();
    let mut skipped = Vec::new();

    for (index, spec) in specs.iter().enumerate() {
        match engine.apply(&current, spec) {
            Some(output) => {
                debug!(step = index, kind = %spec.kind, "Step applied");
                current = output;
            }
            None => {
                warn!(step = index, kind = %spec.kind, "Filter produced no output, skipping step");
                skipped.push(index);
            }
        }
    }

    let image = fit_to_extent(current, extent);
    info!(
        applied = specs.len() - skipped.len(),
        skipped = skipped.len(),
        "Pipeline finished"
    );
    PipelineRun { image, skipped }
}

/// Render `image` onto a canvas of exactly `extent`, anchored top-left.
///
/// Larger output is cropped; smaller output is padded with transparent
/// pixels.
pub fn fit_to_extent(image: DynamicImage, extent: ImageExtent) -> DynamicImage {
    let (w, h) = image.dimensions();
    if (w, h) == (extent.width, extent.height) {
        return image;
    }
    debug!(from = %ImageExtent::new(w, h), to = %extent, "Restoring source extent");
    if w >= extent.width && h >= extent.height {
        return image.crop_imm(0, 0, extent.width, extent.height);
    }
    let mut canvas = RgbaImage::new(extent.width, extent.height);
    imageops::overlay(&mut canvas, &image.to_rgba8(), 0, 0);
    DynamicImage::ImageRgba8(canvas)
}
