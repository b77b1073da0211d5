//! Benchmarks for interpolation methods

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use surfit_algorithms::interpolation::{interpolate_batch, Method, ThinPlateSpline, TpsParams};
use surfit_core::{Interpolator, SamplePoint, TargetPoint};

fn create_points(n: usize) -> Vec<SamplePoint> {
    // Deterministic scatter over a 100 × 100 square
    let mut rng = 42_u64;
    let mut next = move || {
        rng = rng
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (rng >> 33) as f64 / (1u64 << 31) as f64 * 100.0
    };
    (0..n)
        .map(|_| {
            let x = next();
            let y = next();
            SamplePoint::new(x, y, (x / 15.0).sin() * 20.0 + y * 0.3)
        })
        .collect()
}

fn create_targets(side: usize) -> Vec<TargetPoint> {
    let step = 80.0 / side as f64;
    (0..side)
        .flat_map(|i| {
            (0..side).map(move |j| TargetPoint::new(10.0 + i as f64 * step, 10.0 + j as f64 * step))
        })
        .collect()
}

fn bench_tps_fit(c: &mut Criterion) {
    let mut group = c.benchmark_group("tps_fit");

    for n in [50, 100, 200, 400].iter() {
        let points = create_points(*n);
        group.bench_with_input(BenchmarkId::from_parameter(n), n, |b, _| {
            b.iter(|| ThinPlateSpline::fit(black_box(&points), TpsParams::default()).unwrap())
        });
    }

    group.finish();
}

fn bench_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("batch_64x64");
    let points = create_points(200);
    let targets = create_targets(64);

    for method in Method::all() {
        group.bench_function(method.name(), |b| {
            b.iter(|| interpolate_batch(black_box(&method), &points, &targets))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_tps_fit, bench_batch);
criterion_main!(benches);
