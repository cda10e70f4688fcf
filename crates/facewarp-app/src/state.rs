// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Edit session state — the picked photo, what is currently shown, and the
// single-request-in-flight guard.

use std::sync::{Arc, Mutex, MutexGuard};

use facewarp_core::error::{FaceWarpError, Result};
use image::DynamicImage;

#[derive(Debug, Default)]
struct SessionState {
    /// Photo as picked. Every effect starts from this, so effects never stack.
    original: Option<Arc<DynamicImage>>,
    /// Latest successfully rendered image (or the original).
    displayed: Option<Arc<DynamicImage>>,
    /// A request is running; new requests are refused until it finishes.
    busy: bool,
}

/// Shared, cheaply cloneable edit session.
#[derive(Debug, Clone, Default)]
pub struct EditSession {
    inner: Arc<Mutex<SessionState>>,
}

/// Marks the session busy for its lifetime.
#[derive(Debug)]
pub struct RequestGuard {
    session: EditSession,
}

impl Drop for RequestGuard {
    fn drop(&mut self) {
        self.session.lock().busy = false;
    }
}

impl EditSession {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Replace the photo; it becomes both the original and the displayed image.
    pub fn load(&self, image: DynamicImage) {
        let image = Arc::new(image);
        let mut state = self.lock();
        state.original = Some(Arc::clone(&image));
        state.displayed = Some(image);
    }

    /// Whether effect actions are currently available.
    pub fn can_retouch(&self) -> bool {
        let state = self.lock();
        state.original.is_some() && !state.busy
    }

    pub fn is_busy(&self) -> bool {
        self.lock().busy
    }

    pub fn displayed(&self) -> Option<Arc<DynamicImage>> {
        self.lock().displayed.clone()
    }

    /// Start a request against the original photo.
    pub fn begin(&self) -> Result<(Arc<DynamicImage>, RequestGuard)> {
        let mut state = self.lock();
        let original = state.original.clone().ok_or(FaceWarpError::NoImageLoaded)?;
        if state.busy {
            return Err(FaceWarpError::Busy);
        }
        state.busy = true;
        drop(state);
        Ok((
            original,
            RequestGuard {
                session: self.clone(),
            },
        ))
    }

    /// Show a freshly rendered image.
    pub fn show(&self, image: DynamicImage) {
        self.lock().displayed = Some(Arc::new(image));
    }
}
