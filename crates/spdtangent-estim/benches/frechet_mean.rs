//! Benchmarks for the Fréchet mean and the tangent-space transform
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::{rngs::StdRng, SeedableRng};
use spdtangent_estim::{FrechetMean, FrechetMeanConfig, TangentSpace};
use spdtangent_manifolds::{SPDMetric, SPD};

fn benchmark_frechet_mean(c: &mut Criterion) {
    let mut group = c.benchmark_group("frechet_mean");
    group.sample_size(20);

    for &samples in &[16, 128] {
        let spd = SPD::<f64>::new(8).unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        let points: Vec<_> = (0..samples).map(|_| spd.random_point_with(&mut rng)).collect();

        for parallel in [false, true] {
            let estimator = FrechetMean::with_config(
                SPDMetric::AffineInvariant.build(spd.clone()),
                FrechetMeanConfig::new(1e-10, 100).with_parallel(parallel),
            )
            .unwrap();
            let id = if parallel { "parallel" } else { "sequential" };
            group.bench_with_input(BenchmarkId::new(id, samples), &samples, |b, _| {
                b.iter(|| estimator.estimate(black_box(&points)).unwrap())
            });
        }
    }

    group.finish();
}

fn benchmark_transform(c: &mut Criterion) {
    let spd = SPD::<f64>::new(8).unwrap();
    let mut rng = StdRng::seed_from_u64(7);
    let points: Vec<_> = (0..64).map(|_| spd.random_point_with(&mut rng)).collect();

    let mut embedder = TangentSpace::new(SPDMetric::AffineInvariant.build(spd), 1e-10, 100).unwrap();
    embedder.fit(&points).unwrap();

    c.bench_function("tangent_space_transform", |b| {
        b.iter(|| embedder.transform(black_box(&points)).unwrap())
    });
}

criterion_group!(benches, benchmark_frechet_mean, benchmark_transform);
criterion_main!(benches);
