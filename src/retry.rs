//! Blocking retry executor.
//!
//! Semantics:
//! - `attempts` counts total calls of the operation (initial try + retries).
//! - `attempts < 0` and `attempts == 0` are usage errors; the operation is never called.
//! - [`Outcome::Success`] and [`Outcome::Stop`] both end the loop with `Ok(())`. Stop means the
//!   operation decided further attempts are pointless; it is not reported as an error.
//! - [`Outcome::Failure`] on the last attempt is returned as [`RetryError::Inner`]. Earlier
//!   failures trigger a sleep of `backoff(attempt, jitter)` with `jitter` drawn uniformly from
//!   `[0, jitter_range)`.
//! - One random generator is created per call; every jitter value of that call comes from it.
//!
//! Invariants:
//! - The operation runs at most `attempts` times and at least once when `attempts >= 1`.
//! - An all-failing run sleeps exactly `attempts - 1` times; the final failure never sleeps.
//! - Resolving an unregistered [`StrategyId`] panics before the operation runs.
//!
//! Example
//! ```rust
//! use encore::{Outcome, Retrier, RetryError, StrategyId, InstantSleeper};
//!
//! let retrier = Retrier::builder().with_sleeper(InstantSleeper).build().unwrap();
//! let mut calls = 0;
//! let result: Result<(), RetryError<&str>> =
//!     retrier.execute(3, StrategyId::EXPONENTIAL, || {
//!         calls += 1;
//!         if calls < 2 { Outcome::Failure("busy") } else { Outcome::Success }
//!     });
//! assert!(result.is_ok());
//! assert_eq!(calls, 2);
//! ```

use std::sync::Arc;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::backoff::{BackoffFn, JITTER_RANGE_MILLIS};
use crate::error::{BuildError, RetryError};
use crate::registry::{default_registry, StrategyId, StrategyRegistry};
use crate::sleeper::{Sleeper, ThreadSleeper};

/// Result of a single attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<E> {
    /// The operation succeeded; stop retrying.
    Success,
    /// The operation asks to stop retrying; reported to the caller as success.
    Stop,
    /// The operation failed and may be retried.
    Failure(E),
}

impl<E> From<Result<(), E>> for Outcome<E> {
    fn from(result: Result<(), E>) -> Self {
        match result {
            Ok(()) => Outcome::Success,
            Err(e) => Outcome::Failure(e),
        }
    }
}

enum Step<E> {
    Done(Result<(), RetryError<E>>),
    Sleep(Duration),
}

/// Retry executor combining a frozen strategy registry, jitter range, and sleeper.
#[derive(Debug, Clone)]
pub struct Retrier {
    registry: Arc<StrategyRegistry>,
    jitter_range: u64,
    sleeper: Arc<dyn Sleeper>,
}

impl Retrier {
    /// Construct a new builder with defaults.
    pub fn builder() -> RetrierBuilder {
        RetrierBuilder::new()
    }

    /// Registry this executor resolves strategies from.
    pub fn registry(&self) -> &Arc<StrategyRegistry> {
        &self.registry
    }

    /// Run `operation` up to `attempts` times, backing off with `strategy` between failures.
    ///
    /// # Panics
    /// Panics if `strategy` is not registered in this executor's registry.
    pub fn execute<E, Op>(
        &self,
        attempts: i64,
        strategy: StrategyId,
        operation: Op,
    ) -> Result<(), RetryError<E>>
    where
        Op: FnMut() -> Outcome<E>,
    {
        let attempts = validate(attempts)?;
        let mut rng = StdRng::from_os_rng();
        self.run(attempts, strategy, &mut rng, operation)
    }

    /// Same as [`execute`](Self::execute) but draws jitter from the supplied generator.
    pub fn execute_with_rng<E, R, Op>(
        &self,
        attempts: i64,
        strategy: StrategyId,
        rng: &mut R,
        operation: Op,
    ) -> Result<(), RetryError<E>>
    where
        R: Rng,
        Op: FnMut() -> Outcome<E>,
    {
        let attempts = validate(attempts)?;
        self.run(attempts, strategy, rng, operation)
    }

    /// Async form of [`execute`](Self::execute); suspends on `tokio::time::sleep` between
    /// attempts instead of blocking the thread.
    #[cfg(feature = "tokio")]
    pub async fn execute_async<E, Fut, Op>(
        &self,
        attempts: i64,
        strategy: StrategyId,
        mut operation: Op,
    ) -> Result<(), RetryError<E>>
    where
        Fut: std::future::Future<Output = Outcome<E>>,
        Op: FnMut() -> Fut,
    {
        let attempts = validate(attempts)?;
        let mut rng = StdRng::from_os_rng();
        let backoff = self.registry.resolve(strategy);
        let mut attempt = 1;
        loop {
            let outcome = operation().await;
            match self.advance(outcome, attempt, attempts, strategy, backoff, &mut rng) {
                Step::Done(result) => return result,
                Step::Sleep(delay) => tokio::time::sleep(delay).await,
            }
            attempt += 1;
        }
    }

    fn run<E, R, Op>(
        &self,
        attempts: u64,
        strategy: StrategyId,
        rng: &mut R,
        mut operation: Op,
    ) -> Result<(), RetryError<E>>
    where
        R: Rng,
        Op: FnMut() -> Outcome<E>,
    {
        let backoff = self.registry.resolve(strategy);
        let mut attempt = 1;
        loop {
            match self.advance(operation(), attempt, attempts, strategy, backoff, rng) {
                Step::Done(result) => return result,
                Step::Sleep(delay) => self.sleeper.sleep(delay),
            }
            attempt += 1;
        }
    }

    fn advance<E, R: Rng>(
        &self,
        outcome: Outcome<E>,
        attempt: u64,
        attempts: u64,
        strategy: StrategyId,
        backoff: &BackoffFn,
        rng: &mut R,
    ) -> Step<E> {
        match outcome {
            Outcome::Success => {
                if attempt > 1 {
                    debug!(target: "encore::retry", attempt, "operation succeeded after retries");
                }
                Step::Done(Ok(()))
            }
            Outcome::Stop => {
                debug!(target: "encore::retry", attempt, "operation requested stop");
                Step::Done(Ok(()))
            }
            Outcome::Failure(e) if attempt >= attempts => {
                debug!(target: "encore::retry", attempts, "retry budget exhausted");
                Step::Done(Err(RetryError::Inner(e)))
            }
            Outcome::Failure(_) => {
                let jitter = rng.random_range(0..self.jitter_range);
                let delay = backoff(u32::try_from(attempt).unwrap_or(u32::MAX), jitter);
                debug!(
                    target: "encore::retry",
                    attempt,
                    attempts,
                    ?delay,
                    strategy = self.registry.name(strategy),
                    "attempt failed; backing off"
                );
                Step::Sleep(delay)
            }
        }
    }
}

impl Default for Retrier {
    fn default() -> Self {
        Self {
            registry: default_registry(),
            jitter_range: JITTER_RANGE_MILLIS,
            sleeper: Arc::new(ThreadSleeper),
        }
    }
}

fn validate<E>(attempts: i64) -> Result<u64, RetryError<E>> {
    match attempts {
        n if n < 0 => Err(RetryError::InvalidAttempts(n)),
        0 => Err(RetryError::ZeroAttempts),
        n => Ok(n as u64),
    }
}

/// Retry `operation` with the default executor and the built-in strategy registry.
///
/// # Panics
/// Panics if `strategy` is not the built-in [`StrategyId::EXPONENTIAL`]; custom strategies need
/// a [`Retrier`] built over their own registry.
pub fn retry<E, Op>(attempts: i64, strategy: StrategyId, operation: Op) -> Result<(), RetryError<E>>
where
    Op: FnMut() -> Outcome<E>,
{
    Retrier::default().execute(attempts, strategy, operation)
}

/// Builder for `Retrier`.
#[derive(Debug)]
pub struct RetrierBuilder {
    registry: Option<Arc<StrategyRegistry>>,
    jitter_range: u64,
    sleeper: Arc<dyn Sleeper>,
}

impl RetrierBuilder {
    /// Create a builder with the built-in registry, 100ms jitter range, and a thread sleeper.
    pub fn new() -> Self {
        Self { registry: None, jitter_range: JITTER_RANGE_MILLIS, sleeper: Arc::new(ThreadSleeper) }
    }

    /// Resolve strategies from this registry. Registration must be finished before this call.
    pub fn registry(mut self, registry: Arc<StrategyRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Exclusive upper bound of the jitter in milliseconds. Must be > 0.
    pub fn jitter_range(mut self, millis: u64) -> Self {
        self.jitter_range = millis;
        self
    }

    /// Provide a custom sleeper implementation.
    pub fn with_sleeper<S>(mut self, sleeper: S) -> Self
    where
        S: Sleeper + 'static,
    {
        self.sleeper = Arc::new(sleeper);
        self
    }

    /// Build the executor, validating inputs.
    pub fn build(self) -> Result<Retrier, BuildError> {
        if self.jitter_range == 0 {
            return Err(BuildError::ZeroJitterRange);
        }
        Ok(Retrier {
            registry: self.registry.unwrap_or_else(default_registry),
            jitter_range: self.jitter_range,
            sleeper: self.sleeper,
        })
    }
}

impl Default for RetrierBuilder {
    fn default() -> Self {
        Self::new()
    }
}
