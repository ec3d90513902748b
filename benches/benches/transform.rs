// Copyright 2025 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use easel_view::{HitTestMode, TransformEngine, TransformState, Viewport, to_content_space};
use kurbo::Point;

fn bench_transform(c: &mut Criterion) {
    let mut group = c.benchmark_group("easel_view");
    let viewport = Viewport::new(1920.0, 1080.0, 2.0);

    let state = TransformState::new(1.37, Point::new(-220.0, 410.0)).unwrap_or_default();
    group.bench_function("to_content_space", |b| {
        b.iter(|| {
            to_content_space(
                black_box(Point::new(640.5, 311.25)),
                &state,
                viewport.device_pixel_ratio,
                HitTestMode::Fill,
            )
        });
    });

    group.bench_function("change_scale_round_trip", |b| {
        let mut engine = TransformEngine::<String>::new();
        let anchor = Some(Point::new(300.0, 200.0));
        b.iter(|| {
            engine.change_scale(black_box(0.25), viewport, anchor);
            engine.change_scale(black_box(-0.25), viewport, anchor);
        });
    });

    group.bench_function("fit_content(n=1000)", |b| {
        let mut engine = TransformEngine::<u32>::new();
        for key in 0..1_000_u32 {
            let f = f64::from(key);
            engine.track_shape(key, Point::new(f * 3.0, f * 7.0 % 500.0));
        }
        b.iter(|| {
            engine.change_offset(kurbo::Vec2::new(1.0, 0.0));
            black_box(engine.fit_content(viewport))
        });
    });

    group.finish();
}

criterion_group!(benches, bench_transform);
criterion_main!(benches);
