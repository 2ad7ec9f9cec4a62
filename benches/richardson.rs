//! Stepper and Richardson Benchmarks with SIMD vs Scalar Comparison
//!
//! Integrates a batch of logistic trajectories `dy/dx = r y (1 - y / k)` over
//! `[0, 2]` and compares:
//!
//! ## 1. **Plain steppers**
//! - A scalar RK4 loop, one trajectory at a time (baseline)
//! - RK4, Gill and Nyström over `F64x4` and `F64x8` registers
//!
//! ## 2. **Extrapolation cost**
//! - RK4 under 1 to 4 Richardson columns; column `c` costs about `2^c - 1`
//!   times a single stepper run

use std::hint::black_box;
use std::time::Instant;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use simdode::ode::{extrapolate_slice, integrate_slice, Derivative, Gill, Nystrom, Rk4};
use simdode::simd::{F64x4, F64x8, SimdLanes};

// ================================================================================================
// BENCHMARK CONFIGURATION
// ================================================================================================

/// Number of trajectories integrated per iteration.
const BATCH_SIZES: &[usize] = &[64, 1_024, 16_384];

const STEP: f64 = 0.02;
const STEPS: usize = 100;

const RATE: f64 = 1.5;
const CAPACITY: f64 = 10.0;

struct Logistic;

impl<V: SimdLanes<Scalar = f64>> Derivative<V> for Logistic {
    #[inline(always)]
    fn eval(&self, _x: V, y: V) -> V {
        V::splat(RATE) * y * (V::splat(1.0) - y / V::splat(CAPACITY))
    }
}

// ================================================================================================
// TEST DATA GENERATION
// ================================================================================================

/// Reproducible initial states in `[0.1, 5)` with every trajectory starting at 0.
fn generate_test_data(len: usize) -> (Vec<f64>, Vec<f64>) {
    let mut rng = StdRng::seed_from_u64(42);

    let y0 = (0..len).map(|_| rng.random_range(0.1..5.0)).collect();
    (y0, vec![0.0; len])
}

/// Scalar classical RK4, the baseline every vector kernel is measured against.
fn scalar_rk4(y0: &[f64], x0: &[f64]) -> Vec<f64> {
    let f = |_x: f64, y: f64| RATE * y * (1.0 - y / CAPACITY);

    y0.iter()
        .zip(x0)
        .map(|(&y0, &x0)| {
            let (mut x, mut y) = (x0, y0);
            for _ in 0..STEPS {
                let k1 = f(x, y);
                let k2 = f(x + STEP / 2.0, y + STEP / 2.0 * k1);
                let k3 = f(x + STEP / 2.0, y + STEP / 2.0 * k2);
                let k4 = f(x + STEP, y + STEP * k3);
                y += STEP / 6.0 * (k1 + 2.0 * k2 + 2.0 * k3 + k4);
                x += STEP;
            }
            y
        })
        .collect()
}

// ================================================================================================
// BENCHMARK IMPLEMENTATIONS
// ================================================================================================

fn benchmark_steppers(c: &mut Criterion) {
    for &size in BATCH_SIZES {
        let mut group = c.benchmark_group(format!("Stepper_{size}"));
        group.throughput(Throughput::Elements(size as u64));

        let (y0, x0) = generate_test_data(size);
        let input = (y0.as_slice(), x0.as_slice());

        group.bench_with_input(BenchmarkId::new("scalar rk4", size), &input, |b, (y0, x0)| {
            b.iter(|| black_box(scalar_rk4(black_box(y0), black_box(x0))))
        });

        group.bench_with_input(BenchmarkId::new("rk4 f64x4", size), &input, |b, (y0, x0)| {
            b.iter(|| black_box(integrate_slice::<Rk4, F64x4, _>(&Logistic, y0, x0, STEP, STEPS)))
        });

        group.bench_with_input(BenchmarkId::new("rk4 f64x8", size), &input, |b, (y0, x0)| {
            b.iter(|| black_box(integrate_slice::<Rk4, F64x8, _>(&Logistic, y0, x0, STEP, STEPS)))
        });

        group.bench_with_input(BenchmarkId::new("gill f64x4", size), &input, |b, (y0, x0)| {
            b.iter(|| black_box(integrate_slice::<Gill, F64x4, _>(&Logistic, y0, x0, STEP, STEPS)))
        });

        group.bench_with_input(BenchmarkId::new("nystrom f64x4", size), &input, |b, (y0, x0)| {
            b.iter(|| black_box(integrate_slice::<Nystrom, F64x4, _>(&Logistic, y0, x0, STEP, STEPS)))
        });

        group.finish();
    }
}

fn benchmark_richardson_columns(c: &mut Criterion) {
    let size = 1_024;
    let (y0, x0) = generate_test_data(size);

    let mut group = c.benchmark_group("Richardson_rk4_f64x4");
    group.throughput(Throughput::Elements(size as u64));

    for columns in 1..=4 {
        group.bench_with_input(BenchmarkId::new("columns", columns), &columns, |b, &columns| {
            b.iter(|| {
                black_box(extrapolate_slice::<Rk4, F64x4, _>(
                    &Logistic, &y0, &x0, STEP, STEPS, columns,
                ))
            })
        });
    }

    group.finish();
}

fn all_benchmarks(c: &mut Criterion) {
    println!("Starting stepper benchmarks over {} batch sizes", BATCH_SIZES.len());

    let start_time = Instant::now();

    benchmark_steppers(c);
    benchmark_richardson_columns(c);

    println!(
        "Benchmark suite completed in {:.2} seconds",
        start_time.elapsed().as_secs_f64()
    );
}

// ================================================================================================
// CRITERION INTEGRATION
// ================================================================================================

criterion_group!(benches, all_benchmarks);
criterion_main!(benches);
