// Copyright 2025 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use easel_tracker::ContentTracker;
use kurbo::Point;

#[derive(Clone)]
struct Lcg(u64);

impl Lcg {
    fn next_u32(&mut self) -> u32 {
        // Numerical Recipes LCG parameters.
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 32) as u32
    }

    fn point(&mut self) -> Point {
        Point::new(
            f64::from(self.next_u32() % 10_000),
            f64::from(self.next_u32() % 10_000),
        )
    }
}

fn filled(n: u32, seed: u64) -> ContentTracker<u32> {
    let mut rng = Lcg(seed);
    let mut tracker = ContentTracker::new();
    for key in 0..n {
        tracker.track_shape(key, rng.point());
    }
    tracker
}

/// Key of a shape that defines the current minimum x.
fn extremum_key(tracker: &ContentTracker<u32>) -> u32 {
    let min_x = tracker.content_bounds().map_or(0.0, |b| b.x0);
    tracker
        .iter()
        .find(|(_, fp)| fp.bounds().x0 == min_x)
        .map_or(0, |(k, _)| *k)
}

fn bench_tracker(c: &mut Criterion) {
    let mut group = c.benchmark_group("easel_tracker");
    group.sample_size(50);

    for &n in &[100_u32, 1_000, 10_000] {
        group.bench_function(format!("track_fresh(n={n})"), |b| {
            b.iter_batched(
                || (Lcg(7), ContentTracker::<u32>::new()),
                |(mut rng, mut tracker)| {
                    for key in 0..n {
                        tracker.track_shape(key, rng.point());
                    }
                    black_box(tracker.content_bounds())
                },
                BatchSize::SmallInput,
            );
        });

        group.bench_function(format!("untrack_interior(n={n})"), |b| {
            b.iter_batched(
                || {
                    let mut tracker = filled(n, 11);
                    tracker.track_shape(u32::MAX, Point::new(5_000.0, 5_000.0));
                    tracker
                },
                |mut tracker| black_box(tracker.untrack_shape(&u32::MAX)),
                BatchSize::SmallInput,
            );
        });

        group.bench_function(format!("untrack_extremum(n={n})"), |b| {
            b.iter_batched(
                || {
                    let tracker = filled(n, 11);
                    let key = extremum_key(&tracker);
                    (tracker, key)
                },
                |(mut tracker, key)| black_box(tracker.untrack_shape(&key)),
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, bench_tracker);
criterion_main!(benches);
