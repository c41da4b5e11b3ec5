//! Performance benchmarks for Sysdiag
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use sysdiag::analysis::{mean, population_variance, Advisor, AdvisorInputs};

fn bench_variance(c: &mut Criterion) {
    let mut group = c.benchmark_group("population_variance");

    for size in [5usize, 64, 1024].iter() {
        let values: Vec<f64> = (0..*size).map(|i| (i % 17) as f64 * 0.37).collect();

        group.bench_with_input(BenchmarkId::from_parameter(size), &values, |b, values| {
            b.iter(|| population_variance(black_box(values)));
        });
    }

    group.finish();
}

fn bench_mean(c: &mut Criterion) {
    let values: Vec<f64> = (0..1024).map(|i| i as f64).collect();

    c.bench_function("mean_1024", |b| {
        b.iter(|| mean(black_box(&values)));
    });
}

fn bench_advisor(c: &mut Criterion) {
    let inputs = AdvisorInputs {
        cores: 2,
        total_memory_gib: 4.0,
        memory_usage_pct: 92.0,
        write_mbps: Some(35.0),
        avg_load: Some(3.2),
    };

    c.bench_function("advisor_all_rules_firing", |b| {
        b.iter(|| Advisor::new(black_box(inputs.clone())).analyze());
    });
}

criterion_group!(benches, bench_variance, bench_mean, bench_advisor);
criterion_main!(benches);
