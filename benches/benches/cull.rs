// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use kurbo::Rect;

use canopy_pack::{pack_hierarchical, CulledDiagram, PackOptions};

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_f64(&mut self) -> f64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        ((x >> 11) as f64) / ((1u64 << 53) as f64)
    }
}

fn gen_tree(n: usize) -> Vec<usize> {
    let mut rng = Rng::new(0xC1A5_7E55_9999_ABCD);
    let mut parents = vec![0_usize];
    for i in 1..n {
        let a = rng.next_f64();
        let b = rng.next_f64();
        parents.push((i as f64 * a * b) as usize);
    }
    parents
}

fn bench_cull(c: &mut Criterion) {
    let mut group = c.benchmark_group("cull");
    let parents = gen_tree(100_000);
    let global = pack_hierarchical(&parents, &PackOptions::default()).unwrap();
    let viewports = [
        ("full", Rect::new(-1.0, -1.0, 1.0, 1.0), 0.0),
        ("full_minradius", Rect::new(-1.0, -1.0, 1.0, 1.0), 1e-3),
        ("quadrant", Rect::new(0.0, 0.0, 1.0, 1.0), 0.0),
    ];
    for (name, aabb, minradius) in viewports {
        group.bench_function(format!("global_100k_{}", name), |b| {
            let mut dst = CulledDiagram::new();
            b.iter(|| {
                global.cull(black_box(aabb), minradius, &mut dst);
                black_box(dst.len());
            });
        });
    }
    group.finish();
}

fn bench_cull_local(c: &mut Criterion) {
    let mut group = c.benchmark_group("cull_local");
    let parents = gen_tree(100_000);
    let local = pack_hierarchical(&parents, &PackOptions::local()).unwrap();
    group.bench_function("local_100k_root_frame", |b| {
        let mut dst = CulledDiagram::new();
        b.iter(|| {
            local.cull_local(Rect::new(-1.0, -1.0, 1.0, 1.0), 1e-3, 0, &mut dst);
            black_box(dst.len());
        });
    });
    group.finish();
}

criterion_group!(benches, bench_cull, bench_cull_local);
criterion_main!(benches);
