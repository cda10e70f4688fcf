// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Central service layer — owns configuration and the warp engine, and runs
// retouch requests (detection + distortion) on tokio's blocking pool so the
// calling task is never stalled by image work.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use facewarp_bridge::LandmarkDetector;
use facewarp_core::error::{FaceWarpError, Result};
use facewarp_core::{AppConfig, Effect, RequestId};
use facewarp_image::{WarpEngine, retouch};
use tokio::task::JoinError;
use tracing::{Instrument, Span, error, info, info_span, warn};

use super::data_dir;
use crate::state::EditSession;

const CONFIG_FILE: &str = "config.json";

/// Shared application services.
///
/// Cheaply cloneable so it can be moved into spawned tasks.
#[derive(Debug, Clone)]
pub struct AppServices {
    config: Arc<AppConfig>,
    engine: WarpEngine,
    /// Where `save_config` writes.
    config_path: PathBuf,
}

impl AppServices {
    /// Initialise services from an explicit config file or the default
    /// location. A missing default file means stock settings. Saving writes
    /// back to whichever file was chosen.
    pub fn init(config_path: Option<&Path>) -> Result<Self> {
        match config_path {
            Some(path) => Self::build(read_config(path)?, path.to_path_buf()),
            None => {
                let dir = data_dir::config_dir();
                Self::with_config(load_config(&dir).unwrap_or_default(), dir)
            }
        }
    }

    /// Build services around an already-loaded configuration that saves
    /// into `config_dir`.
    pub fn with_config(config: AppConfig, config_dir: PathBuf) -> Result<Self> {
        Self::build(config, config_dir.join(CONFIG_FILE))
    }

    fn build(config: AppConfig, config_path: PathBuf) -> Result<Self> {
        config.validate()?;
        info!(
            sampling = ?config.sampling,
            eye_radius = config.warp.eye_radius,
            slim_scale = config.warp.slim_scale,
            "app services initialised"
        );
        Ok(Self {
            engine: WarpEngine::new(config.sampling),
            config: Arc::new(config),
            config_path,
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Write the current configuration to the file it came from (or the
    /// default location).
    pub fn save_config(&self) -> Result<PathBuf> {
        persist_config(&self.config_path, &self.config)?;
        Ok(self.config_path.clone())
    }

    // -- Retouching -----------------------------------------------------------

    /// Detect a face in the session's photo and render `effect` over it.
    ///
    /// Runs on the blocking pool. On success the result becomes the
    /// session's displayed image; on failure the displayed image is left
    /// untouched and the error is returned for the front end to present.
    pub async fn retouch(
        &self,
        session: &EditSession,
        effect: Effect,
        detector: Arc<dyn LandmarkDetector>,
    ) -> Result<()> {
        let request = RequestId::new();
        let span = info_span!("retouch", %request, %effect, backend = detector.backend_name());
        self.run_retouch(session, effect, detector)
            .instrument(span)
            .await
    }

    async fn run_retouch(
        &self,
        session: &EditSession,
        effect: Effect,
        detector: Arc<dyn LandmarkDetector>,
    ) -> Result<()> {
        let (original, guard) = session.begin()?;
        let services = self.clone();
        let span = Span::current();

        let rendered = tokio::task::spawn_blocking(move || {
            let _guard = guard;
            let _entered = span.enter();
            let landmarks = match detector.detect(&original) {
                Ok(Some(face)) => face,
                Ok(None) => return Err(FaceWarpError::NoFaceDetected),
                Err(err) => {
                    warn!(error = %err, "landmark detection failed");
                    return Err(FaceWarpError::NoFaceDetected);
                }
            };
            retouch(
                &original,
                &landmarks,
                effect,
                &services.engine,
                &services.config.warp,
            )
        })
        .await
        .map_err(worker_failure)?;

        match rendered {
            Ok(image) => {
                info!(width = image.width(), height = image.height(), "retouch complete");
                session.show(image);
                Ok(())
            }
            Err(err) => {
                error!(error = %err, "retouch failed");
                Err(err)
            }
        }
    }
}

/// A blocking worker that panicked or was cancelled failed mid-render.
fn worker_failure(err: JoinError) -> FaceWarpError {
    FaceWarpError::ImageError(format!("retouch worker failed: {err}"))
}

/// Read and parse a config file, failing loudly.
fn read_config(path: &Path) -> Result<AppConfig> {
    let data = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&data)?)
}

fn load_config(config_dir: &Path) -> Option<AppConfig> {
    let path = config_dir.join(CONFIG_FILE);
    let data = std::fs::read_to_string(&path).ok()?;
    match serde_json::from_str(&data) {
        Ok(config) => Some(config),
        Err(err) => {
            warn!(path = %path.display(), error = %err, "ignoring unreadable config");
            None
        }
    }
}

fn persist_config(path: &Path, config: &AppConfig) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(config)?;
    std::fs::write(path, json)?;
    Ok(())
}
