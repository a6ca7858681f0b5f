//! Distance-cache benchmarks.
//!
//! Compares a clustering pass that recomputes every pairwise distance with
//! one that reads a precomputed all-pairs matrix.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use qtclust_benches::{
    error::BenchSetupError,
    source::{SyntheticConfig, SyntheticValues},
};
use qtclust_core::{CachingCalculator, ExecutionStrategy, QtClustererBuilder};

const SEED: u64 = 42;
const SPREAD: f64 = 100.0;
const THRESHOLD: f64 = 5.0;
const INSTANCE_COUNTS: &[usize] = &[50, 100];

fn cache_impl(c: &mut Criterion) -> Result<(), BenchSetupError> {
    let mut group = c.benchmark_group("distance_cache");
    group.sample_size(20);

    for &instance_count in INSTANCE_COUNTS {
        let source = SyntheticValues::generate(&SyntheticConfig {
            instance_count,
            spread: SPREAD,
            seed: SEED,
        })?;

        group.bench_with_input(
            BenchmarkId::new("uncached", instance_count),
            &source,
            |b, source| {
                let mut clusterer = QtClustererBuilder::new(instance_count)
                    .with_execution_strategy(ExecutionStrategy::Sequential)
                    .build()
                    .expect("builder configuration is valid");
                b.iter(|| {
                    let mut calculator = source.clone();
                    clusterer
                        .cluster(&mut calculator, THRESHOLD)
                        .expect("clustering must succeed")
                });
            },
        );

        group.bench_with_input(
            BenchmarkId::new("cached", instance_count),
            &source,
            |b, source| {
                let mut clusterer = QtClustererBuilder::new(instance_count)
                    .with_execution_strategy(ExecutionStrategy::Sequential)
                    .build()
                    .expect("builder configuration is valid");
                // The cache is built once here; passes after the first reuse it.
                let mut calculator = CachingCalculator::new(source.clone());
                b.iter(|| {
                    clusterer
                        .cluster(&mut calculator, THRESHOLD)
                        .expect("clustering must succeed")
                });
            },
        );
    }

    group.finish();
    Ok(())
}

fn cache_pass(c: &mut Criterion) {
    cache_impl(c).expect("benchmark setup must succeed");
}

criterion_group!(benches, cache_pass);
criterion_main!(benches);
