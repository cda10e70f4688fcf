// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for the facewarp-image crate. Measures the two stock
// effects on a synthetic 640x480 portrait-sized frame.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use image::{DynamicImage, Rgba, RgbaImage};

use facewarp_core::{
    Effect, FaceLandmarks, LandmarkRegion, NormalizedPoint, NormalizedRect, WarpConfig,
};
use facewarp_image::{WarpEngine, retouch};

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

fn frame() -> DynamicImage {
    DynamicImage::ImageRgba8(RgbaImage::from_fn(640, 480, |x, y| {
        Rgba([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8, 255])
    }))
}

fn landmarks() -> FaceLandmarks {
    let eye = |cx: f64| -> LandmarkRegion {
        (0..6)
            .map(|i| {
                let angle = f64::from(i) * std::f64::consts::PI / 3.0;
                NormalizedPoint::new(cx + 0.03 * angle.cos(), 0.6 + 0.015 * angle.sin())
            })
            .collect()
    };
    FaceLandmarks {
        left_eye: Some(eye(0.4)),
        right_eye: Some(eye(0.6)),
        bounding_box: Some(NormalizedRect::new(0.3, 0.25, 0.4, 0.5)),
    }
}

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

/// Two sequential bumps with the stock radius.
fn bench_enlarge_eyes(c: &mut Criterion) {
    let image = frame();
    let face = landmarks();
    let engine = WarpEngine::default();
    let config = WarpConfig::default();

    c.bench_function("enlarge_eyes (640x480)", |b| {
        b.iter(|| {
            let out = retouch(black_box(&image), &face, Effect::EnlargeEyes, &engine, &config);
            black_box(out.ok());
        });
    });
}

/// One pinch over the face box.
fn bench_slim_face(c: &mut Criterion) {
    let image = frame();
    let face = landmarks();
    let engine = WarpEngine::default();
    let config = WarpConfig::default();

    c.bench_function("slim_face (640x480)", |b| {
        b.iter(|| {
            let out = retouch(black_box(&image), &face, Effect::SlimFace, &engine, &config);
            black_box(out.ok());
        });
    });
}

criterion_group!(benches, bench_enlarge_eyes, bench_slim_face);
criterion_main!(benches);
