//! Backoff functions and the built-in exponential strategy.
//!
//! A backoff function maps `(attempt, jitter_millis)` to the delay slept before the next
//! attempt. Attempts are 1-based: `attempt = 1` is the delay after the first failure. Functions
//! must be pure; the executor draws the jitter and passes it in, so the same inputs always
//! produce the same delay.
//!
//! Example
//! ```rust
//! use std::time::Duration;
//! use encore::backoff::exponential_backoff;
//!
//! assert_eq!(exponential_backoff(1, 0), Duration::from_millis(200));
//! assert_eq!(exponential_backoff(2, 37), Duration::from_millis(437));
//! assert_eq!(exponential_backoff(3, 99), Duration::from_millis(899));
//! ```
//!
//! Overflow behavior: for very large attempts the millisecond arithmetic saturates to
//! `u64::MAX` instead of wrapping.

use std::time::Duration;

/// Base slot multiplied by `2^attempt` in exponential backoff.
pub const SLOT: Duration = Duration::from_millis(100);

/// Default upper bound (exclusive) of the jitter drawn per retry, in milliseconds.
pub const JITTER_RANGE_MILLIS: u64 = 100;

/// Signature shared by all registered backoff strategies.
pub type BackoffFn = dyn Fn(u32, u64) -> Duration + Send + Sync;

/// Exponential backoff: `2^attempt * SLOT + jitter_millis`.
pub fn exponential_backoff(attempt: u32, jitter_millis: u64) -> Duration {
    let slot_millis = SLOT.as_millis() as u64;
    let millis = 2u64
        .saturating_pow(attempt)
        .saturating_mul(slot_millis)
        .saturating_add(jitter_millis);
    Duration::from_millis(millis)
}
