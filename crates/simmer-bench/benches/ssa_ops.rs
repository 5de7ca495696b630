//! Criterion micro-benchmarks for the Gillespie event loop.

use criterion::{criterion_group, criterion_main, Criterion};
use simmer_core::ExpressionEvaluator;
use simmer_ssa::{GillespieEngine, NullTrajectoryWriter, SsaConfig, TimeLimitDecider};
use simmer_test_utils::birth_death;

/// Benchmark: one birth-death run to t = 10 at roughly 50 events per
/// unit time, snapshots discarded.
fn bench_birth_death_run(c: &mut Criterion) {
    let net = birth_death(50.0, 1.0);
    let eval = ExpressionEvaluator::new(&net).unwrap();
    let config = SsaConfig {
        time_limit: 10.0,
        print_interval: 10.0,
        seed: 1,
        runs: 1,
    };
    let engine = GillespieEngine::new(&net, &eval, config).unwrap();

    c.bench_function("ssa_birth_death_10s", |b| {
        b.iter(|| {
            let mut decider = TimeLimitDecider::new(10.0);
            let mut writer = NullTrajectoryWriter;
            let stats = engine.run_all(&mut decider, &mut writer).unwrap();
            std::hint::black_box(&stats);
        });
    });
}

criterion_group!(benches, bench_birth_death_run);
criterion_main!(benches);
