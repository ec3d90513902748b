// Copyright 2025 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use easel_middleware::{Flow, MiddlewareChain};

fn bench_middleware(c: &mut Criterion) {
    let mut group = c.benchmark_group("easel_middleware");

    for &n in &[1_usize, 8, 32] {
        let chain = MiddlewareChain::<u64>::new();
        for _ in 0..n {
            chain.register(|ev: &mut u64| {
                *ev = ev.wrapping_add(1);
                Flow::Continue
            });
        }
        group.bench_function(format!("dispatch_all(n={n})"), |b| {
            b.iter(|| {
                let mut ev = black_box(0_u64);
                black_box(chain.handle_event(&mut ev))
            });
        });

        let stopping = MiddlewareChain::<u64>::builder()
            .handler(|_: &mut u64| Flow::Stop)
            .build();
        for _ in 0..n {
            stopping.register(|_: &mut u64| Flow::Continue);
        }
        group.bench_function(format!("dispatch_stop_first(n={n})"), |b| {
            b.iter(|| {
                let mut ev = black_box(0_u64);
                black_box(stopping.handle_event(&mut ev))
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_middleware);
criterion_main!(benches);
