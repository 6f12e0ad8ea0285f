//! Compile-time prelude coverage test.
use encore::prelude::*;
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug)]
struct Quiet;

impl Sleeper for Quiet {
    fn sleep(&self, _duration: Duration) {}
}

#[test]
fn prelude_reexports_core_types() {
    let mut registry = StrategyRegistry::new();
    let id: StrategyId = registry.register("exp-copy", exponential_backoff);
    let backoff: &BackoffFn = registry.resolve(id);
    assert_eq!(backoff(1, 0), Duration::from_millis(200));

    let retrier = Retrier::builder()
        .registry(Arc::new(registry))
        .with_sleeper(Quiet)
        .build()
        .expect("builder");
    let result: Result<(), RetryError<std::io::Error>> =
        retrier.execute(2, id, || Outcome::from(Ok(())));
    assert!(result.is_ok());

    let result = retry(1, StrategyId::EXPONENTIAL, || Outcome::<&str>::Stop);
    assert!(result.is_ok());
}
