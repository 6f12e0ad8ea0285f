use criterion::{black_box, criterion_group, criterion_main, Criterion};
use encore::{exponential_backoff, InstantSleeper, Outcome, Retrier, StrategyId, StrategyRegistry};
use std::sync::Arc;
use std::time::Duration;

fn bench_backoff(c: &mut Criterion) {
    c.bench_function("exponential_backoff", |b| {
        b.iter(|| exponential_backoff(black_box(7), black_box(42)))
    });

    let mut registry = StrategyRegistry::new();
    let ids: Vec<StrategyId> = (0..32)
        .map(|n| registry.register(format!("constant-{n}"), move |_, j| Duration::from_millis(n + j)))
        .collect();
    let last = *ids.last().expect("registered");
    c.bench_function("registry_resolve", |b| {
        b.iter(|| registry.resolve(black_box(last))(black_box(3), black_box(1)))
    });
}

fn bench_execute(c: &mut Criterion) {
    let retrier = Retrier::builder()
        .registry(Arc::new(StrategyRegistry::new()))
        .with_sleeper(InstantSleeper)
        .build()
        .expect("builder");

    c.bench_function("execute_success_first_try", |b| {
        b.iter(|| retrier.execute(black_box(3), StrategyId::EXPONENTIAL, || Outcome::<()>::Success))
    });

    c.bench_function("execute_exhaust_5", |b| {
        b.iter(|| retrier.execute(black_box(5), StrategyId::EXPONENTIAL, || Outcome::Failure(())))
    });
}

criterion_group!(benches, bench_backoff, bench_execute);
criterion_main!(benches);
