// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image processor — load, retouch and encode a single photo. Operates on
// in-memory images using the `image` crate; distortions go through a
// `FilterEngine`.

use facewarp_core::error::FaceWarpError;
use facewarp_core::{Effect, FaceLandmarks, ImageExtent, WarpConfig};
use image::{DynamicImage, ImageFormat};
use tracing::{debug, info, instrument};

use crate::distort::{FilterEngine, retouch};

/// Retouching wrapper around a single in-memory photo.
///
/// Operations are non-destructive: each method consumes `self` and returns a
/// new `ImageProcessor` wrapping the transformed image.
///
/// ```ignore
/// let bytes = ImageProcessor::open("portrait.jpg")?
///     .retouch(Effect::EnlargeEyes, &landmarks, &WarpEngine::default(), &WarpConfig::default())?
///     .to_png_bytes()?;
/// ```
pub struct ImageProcessor {
    /// The current working image.
    image: DynamicImage,
}

impl ImageProcessor {
    // -- Construction ---------------------------------------------------------

    /// Load an image from a file path.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<std::path::Path>) -> Result<Self, FaceWarpError> {
        let img = image::open(path.as_ref()).map_err(|err| {
            FaceWarpError::ImageError(format!(
                "failed to open {}: {}",
                path.as_ref().display(),
                err
            ))
        })?;
        info!(width = img.width(), height = img.height(), "Image loaded");
        Ok(Self { image: img })
    }

    /// Create a processor from raw encoded bytes (JPEG, PNG, etc.).
    #[instrument(skip(data), fields(data_len = data.len()))]
    pub fn from_bytes(data: &[u8]) -> Result<Self, FaceWarpError> {
        let img = image::load_from_memory(data).map_err(|err| {
            FaceWarpError::ImageError(format!("failed to decode image: {}", err))
        })?;
        debug!(
            width = img.width(),
            height = img.height(),
            "Image decoded from bytes"
        );
        Ok(Self { image: img })
    }

    /// Wrap an already-decoded `DynamicImage`.
    pub fn from_dynamic(image: DynamicImage) -> Self {
        Self { image }
    }

    // -- Accessors ------------------------------------------------------------

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn extent(&self) -> ImageExtent {
        ImageExtent::new(self.image.width(), self.image.height())
    }

    /// Borrow the underlying `DynamicImage`.
    pub fn as_dynamic(&self) -> &DynamicImage {
        &self.image
    }

    /// Consume the processor and return the underlying `DynamicImage`.
    pub fn into_dynamic(self) -> DynamicImage {
        self.image
    }

    // -- Transformations (consume self, return new Self) -----------------------

    /// Apply a retouching effect. On error the original image is dropped
    /// with `self`; callers that need it should keep their own copy.
    pub fn retouch(
        self,
        effect: Effect,
        landmarks: &FaceLandmarks,
        engine: &dyn FilterEngine,
        config: &WarpConfig,
    ) -> Result<Self, FaceWarpError> {
        let image = retouch(&self.image, landmarks, effect, engine, config)?;
        Ok(Self { image })
    }

    // -- Output ---------------------------------------------------------------

    /// Encode the current image as PNG bytes.
    pub fn to_png_bytes(&self) -> Result<Vec<u8>, FaceWarpError> {
        encode_to_format(&self.image, ImageFormat::Png)
    }

    /// Encode the current image as JPEG bytes with the given quality (1-100).
    pub fn to_jpeg_bytes(&self, quality: u8) -> Result<Vec<u8>, FaceWarpError> {
        let mut buffer = Vec::new();
        let rgb = self.image.to_rgb8();
        let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut buffer, quality);
        rgb.write_with_encoder(encoder).map_err(|err| {
            FaceWarpError::ImageError(format!("JPEG encoding failed: {}", err))
        })?;
        Ok(buffer)
    }

    /// Write the image to a file, choosing the encoder from the extension.
    ///
    /// JPEG output honours `jpeg_quality`; JPEG has no alpha channel, so the
    /// image is flattened to RGB first.
    #[instrument(skip(self), fields(path = %path.as_ref().display()))]
    pub fn save(
        &self,
        path: impl AsRef<std::path::Path>,
        jpeg_quality: u8,
    ) -> Result<(), FaceWarpError> {
        let path = path.as_ref();
        let format = ImageFormat::from_path(path).map_err(|err| {
            FaceWarpError::ImageError(format!(
                "cannot infer image format for {}: {}",
                path.display(),
                err
            ))
        })?;
        let bytes = match format {
            ImageFormat::Jpeg => self.to_jpeg_bytes(jpeg_quality)?,
            other => encode_to_format(&self.image, other)?,
        };
        std::fs::write(path, &bytes)?;
        info!(bytes = bytes.len(), "Image saved");
        Ok(())
    }
}

/// Encode a `DynamicImage` into the specified format, returning the raw bytes.
fn encode_to_format(image: &DynamicImage, format: ImageFormat) -> Result<Vec<u8>, FaceWarpError> {
    let mut buffer = Vec::new();
    let mut cursor = std::io::Cursor::new(&mut buffer);
    image
        .write_to(&mut cursor, format)
        .map_err(|err| FaceWarpError::ImageError(format!("image encoding failed: {}", err)))?;
    Ok(buffer)
}
