#![forbid(unsafe_code)]
#![cfg_attr(not(test), deny(clippy::all))]

//! # Encore
//!
//! Blocking retry helper with randomized exponential backoff and a pluggable registry of
//! backoff strategies.
//!
//! ## Features
//!
//! - **Retry executor** that calls an operation until it succeeds, asks to stop, or runs out of
//!   attempts
//! - **Exponential backoff** (`2^attempt * 100ms + jitter`) built in
//! - **Strategy registry** for custom backoff functions, frozen once shared
//! - **Injectable sleepers and RNGs** for deterministic tests
//! - **Async executor** on tokio behind the `tokio` feature
//!
//! ## Quick Start
//!
//! ```rust
//! use encore::{Outcome, Retrier, StrategyRegistry};
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! let mut registry = StrategyRegistry::new();
//! let fixed = registry.register("fixed", |_attempt, jitter| Duration::from_millis(jitter));
//!
//! let retrier = Retrier::builder()
//!     .registry(Arc::new(registry))
//!     .jitter_range(5)
//!     .build()
//!     .unwrap();
//!
//! let mut remaining = 2;
//! let result = retrier.execute(3, fixed, || {
//!     remaining -= 1;
//!     if remaining > 0 { Outcome::Failure("not yet") } else { Outcome::Success }
//! });
//! assert!(result.is_ok());
//! ```

pub mod backoff;
pub mod error;
pub mod prelude;
pub mod registry;
pub mod retry;
pub mod sleeper;

// Re-exports
pub use backoff::{exponential_backoff, BackoffFn, JITTER_RANGE_MILLIS, SLOT};
pub use error::{BuildError, RetryError};
pub use registry::{default_registry, RegistryError, StrategyId, StrategyRegistry, UNKNOWN_STRATEGY};
pub use retry::{retry, Outcome, Retrier, RetrierBuilder};
pub use sleeper::{InstantSleeper, Sleeper, ThreadSleeper, TrackingSleeper};
