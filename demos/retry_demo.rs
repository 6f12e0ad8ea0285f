//! Registers a custom strategy and retries a flaky operation with both strategies.
use encore::prelude::*;
use std::sync::Arc;
use std::time::Duration;

fn main() {
    tracing_subscriber::fmt().with_max_level(tracing::Level::DEBUG).init();

    let mut registry = StrategyRegistry::new();
    let linear = registry.register("linear", |attempt, jitter| {
        Duration::from_millis(u64::from(attempt) * 50 + jitter)
    });
    let retrier = Retrier::builder()
        .registry(Arc::new(registry))
        .build()
        .expect("valid retrier");

    for strategy in [StrategyId::EXPONENTIAL, linear] {
        let mut calls = 0;
        let result = retrier.execute(4, strategy, || {
            calls += 1;
            // Replace with your real fallible work
            if calls < 3 {
                Outcome::Failure(std::io::Error::new(std::io::ErrorKind::Other, "flaky"))
            } else {
                Outcome::Success
            }
        });
        println!("{}: {:?} after {} calls", retrier.registry().name(strategy), result, calls);
    }
}
