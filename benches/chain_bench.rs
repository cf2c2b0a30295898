//! Benchmark for the lazy chain engine.
//!
//! Measures the cost of recording operator steps versus forcing them, and
//! compares a chained map/filter pipeline against calling the standalone
//! operators directly.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use lodars::Value;
use lodars::chain::chain;
use lodars::collection::{filter, map};
use std::hint::black_box;

fn number_list(length: usize) -> Value {
    #[allow(clippy::cast_precision_loss)]
    Value::list((0..length).map(|n| Value::number(n as f64)).collect())
}

fn doubler() -> Value {
    Value::function(1, |_, args| {
        Ok(Value::number(args[0].as_number().unwrap_or(0.0) * 2.0))
    })
}

fn above(threshold: f64) -> Value {
    Value::function(1, move |_, args| {
        Ok(Value::bool(args[0].as_number().unwrap_or(0.0) > threshold))
    })
}

// =============================================================================
// 1. Recording vs Forcing
// =============================================================================

fn benchmark_recording(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("chain_recording");

    group.bench_function("record_two_steps", |bencher| {
        let numbers = number_list(1_000);
        bencher.iter(|| {
            let wrapper = chain(black_box(&numbers))
                .map(doubler())
                .filter(above(500.0));
            black_box(wrapper.pending_operations())
        });
    });

    group.finish();
}

fn benchmark_forcing(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("chain_forcing");

    for length in [100, 1_000, 10_000] {
        group.bench_with_input(
            BenchmarkId::new("map_filter_value", length),
            &length,
            |bencher, &length| {
                let numbers = number_list(length);
                bencher.iter(|| {
                    let result = chain(black_box(&numbers))
                        .map(doubler())
                        .filter(above(500.0))
                        .value();
                    black_box(result)
                });
            },
        );
    }

    group.finish();
}

// =============================================================================
// 2. Chain vs Direct Operators
// =============================================================================

fn benchmark_chain_vs_direct(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("chain_vs_direct");
    let numbers = number_list(1_000);

    group.bench_function("chained", |bencher| {
        bencher.iter(|| {
            let result = chain(black_box(&numbers))
                .map(doubler())
                .filter(above(500.0))
                .value();
            black_box(result)
        });
    });

    group.bench_function("direct", |bencher| {
        bencher.iter(|| {
            let mapped = map(black_box(&numbers), &doubler()).unwrap();
            let result = filter(&mapped, &above(500.0));
            black_box(result)
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_recording,
    benchmark_forcing,
    benchmark_chain_vs_direct
);
criterion_main!(benches);
