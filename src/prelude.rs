//! Convenient re-exports for common Encore types.
pub use crate::{
    backoff::{exponential_backoff, BackoffFn},
    error::RetryError,
    registry::{StrategyId, StrategyRegistry},
    retry::{retry, Outcome, Retrier},
    sleeper::Sleeper,
};
