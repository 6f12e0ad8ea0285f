//! Registry of named backoff strategies.
//!
//! The registry is an index-aligned table: a [`StrategyId`] is the position of its entry.
//! It starts with the built-in exponential strategy at [`StrategyId::EXPONENTIAL`] and only
//! grows. Registration takes `&mut self`, so once the registry is shared behind an `Arc` (for
//! example inside a [`Retrier`](crate::Retrier)) it is frozen.
//!
//! Example
//! ```rust
//! use std::sync::Arc;
//! use std::time::Duration;
//! use encore::{StrategyId, StrategyRegistry};
//!
//! let mut registry = StrategyRegistry::new();
//! let linear = registry.register("linear", |attempt, jitter| {
//!     Duration::from_millis(u64::from(attempt) * 50 + jitter)
//! });
//! assert_eq!(linear, StrategyId::new(1));
//! assert_eq!(registry.name(linear), "linear");
//! let registry = Arc::new(registry); // frozen from here on
//! assert_eq!(registry.resolve(linear)(2, 0), Duration::from_millis(100));
//! ```

use std::fmt;
use std::sync::{Arc, OnceLock};

use tracing::{debug, warn};

use crate::backoff::{exponential_backoff, BackoffFn};

/// Name returned by [`StrategyRegistry::name`] for ids that were never registered.
pub const UNKNOWN_STRATEGY: &str = "<unknown backoff strategy>";

/// Identifier of a registered backoff strategy (its index in the registry).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StrategyId(usize);

impl StrategyId {
    /// The built-in exponential backoff strategy, present in every registry.
    pub const EXPONENTIAL: StrategyId = StrategyId(0);

    /// Wrap a raw index. Ids are normally obtained from [`StrategyRegistry::register`].
    pub const fn new(index: usize) -> Self {
        StrategyId(index)
    }

    /// Raw index into the registry.
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for StrategyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Errors from the non-panicking lookup path.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// The id is not present in this registry.
    #[error("backoff strategy {id} is not registered ({registered} known)")]
    UnknownStrategy {
        /// Id that could not be resolved.
        id: StrategyId,
        /// Number of strategies in the registry.
        registered: usize,
    },
}

struct Entry {
    name: String,
    backoff: Box<BackoffFn>,
}

/// Ordered table of `(name, backoff function)` pairs.
pub struct StrategyRegistry {
    entries: Vec<Entry>,
}

impl StrategyRegistry {
    /// Registry containing only the built-in exponential strategy.
    pub fn new() -> Self {
        let mut registry = Self { entries: Vec::new() };
        let id = registry.push("ExponentialBackoff".to_string(), Box::new(exponential_backoff));
        assert_eq!(id, StrategyId::EXPONENTIAL, "built-in strategy must occupy index 0");
        registry
    }

    /// Append a strategy and return its id (`len - 1` after the push).
    ///
    /// Duplicate names are accepted; the id, not the name, identifies a strategy.
    pub fn register<F>(&mut self, name: impl Into<String>, backoff: F) -> StrategyId
    where
        F: Fn(u32, u64) -> std::time::Duration + Send + Sync + 'static,
    {
        let name = name.into();
        if self.entries.iter().any(|e| e.name == name) {
            warn!(target: "encore::registry", name = %name, "backoff strategy name already registered; ids stay distinct");
        }
        let id = self.push(name, Box::new(backoff));
        debug!(target: "encore::registry", id = id.index(), name = self.name(id), "registered backoff strategy");
        id
    }

    fn push(&mut self, name: String, backoff: Box<BackoffFn>) -> StrategyId {
        let before = self.entries.len();
        self.entries.push(Entry { name, backoff });
        assert_eq!(
            self.entries.len(),
            before + 1,
            "strategy registry names and functions out of step"
        );
        StrategyId(before)
    }

    /// Backoff function for `id`.
    ///
    /// # Panics
    /// Panics if `id` was not issued by this registry. Ids are startup-time constants, so an
    /// unknown id is a bug in the calling program.
    pub fn resolve(&self, id: StrategyId) -> &BackoffFn {
        match self.try_resolve(id) {
            Ok(backoff) => backoff,
            Err(err) => panic!("encore: {err}"),
        }
    }

    /// Backoff function for `id`, or an error if it is unknown.
    pub fn try_resolve(&self, id: StrategyId) -> Result<&BackoffFn, RegistryError> {
        self.entries
            .get(id.0)
            .map(|e| e.backoff.as_ref())
            .ok_or(RegistryError::UnknownStrategy { id, registered: self.entries.len() })
    }

    /// Display name for `id`, or [`UNKNOWN_STRATEGY`]. Meant for logs and diagnostics.
    pub fn name(&self, id: StrategyId) -> &str {
        self.entries.get(id.0).map(|e| e.name.as_str()).unwrap_or(UNKNOWN_STRATEGY)
    }

    /// Number of registered strategies (always at least one).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false`; the built-in strategy is never removed.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All issued ids in registration order.
    pub fn ids(&self) -> impl Iterator<Item = StrategyId> + '_ {
        (0..self.entries.len()).map(StrategyId)
    }
}

impl Default for StrategyRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for StrategyRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.entries.iter().map(|e| &e.name)).finish()
    }
}

/// Process-wide registry holding only the built-in strategy.
///
/// Used by [`crate::retry`] and by [`RetrierBuilder`](crate::RetrierBuilder) when no registry is
/// injected. Custom strategies need an explicitly constructed registry.
pub fn default_registry() -> Arc<StrategyRegistry> {
    static DEFAULT: OnceLock<Arc<StrategyRegistry>> = OnceLock::new();
    DEFAULT.get_or_init(|| Arc::new(StrategyRegistry::new())).clone()
}
