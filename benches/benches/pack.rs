// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

use canopy_pack::{pack_flat, pack_hierarchical, PackOptions};

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}

fn gen_radii(n: usize) -> Vec<f64> {
    let mut rng = Rng::new(0xCAFE_F00D_DEAD_BEEF);
    (0..n).map(|_| 0.1 + 2.0 * rng.next_f64()).collect()
}

fn gen_tree(n: usize) -> Vec<usize> {
    let mut rng = Rng::new(0xBADC_F00D_1234_5678);
    let mut parents = vec![0_usize];
    for i in 1..n {
        let a = rng.next_f64();
        let b = rng.next_f64();
        parents.push((i as f64 * a * b) as usize);
    }
    parents
}

fn bench_pack_flat(c: &mut Criterion) {
    let mut group = c.benchmark_group("pack_flat");
    for &n in &[1_000_usize, 10_000, 100_000] {
        let radii = gen_radii(n);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("radii_n{}", n), |b| {
            b.iter(|| {
                let d = pack_flat(black_box(&radii));
                black_box(d.len());
            });
        });
    }
    group.finish();
}

fn bench_pack_hierarchical(c: &mut Criterion) {
    let mut group = c.benchmark_group("pack_hierarchical");
    for &n in &[10_000_usize, 100_000] {
        let parents = gen_tree(n);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("global_n{}", n), |b| {
            b.iter(|| {
                let d = pack_hierarchical(black_box(&parents), &PackOptions::default()).unwrap();
                black_box(d.len());
            });
        });
        group.bench_function(format!("local_n{}", n), |b| {
            b.iter(|| {
                let d = pack_hierarchical(black_box(&parents), &PackOptions::local()).unwrap();
                black_box(d.len());
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_pack_flat, bench_pack_hierarchical);
criterion_main!(benches);
