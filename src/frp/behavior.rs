// Copyright (c) 2025 - Cowboy AI, Inc.
//! Behavior - Continuous-Time Signals
//!
//! A `Behavior<T>` represents a value that exists at all points in time.
//! You can sample a Behavior at any moment to get its current value.
//!
//! ```text
//! Behavior<T> ≅ Time → T
//! ```
//!
//! # Examples
//!
//! ```rust
//! use matching_sync::frp::Behavior;
//!
//! let numbers = Behavior::constant(5);
//! let doubled = numbers.map(|x| x * 2);
//! assert_eq!(doubled.sample(), 10);
//! ```

use std::fmt::Debug;
use std::sync::Arc;

/// Continuous-time signal that always has a value
///
/// Implemented as a shared sampling function, so clones are cheap and
/// observe the same source.
#[derive(Clone)]
pub struct Behavior<T> {
    sampler: Arc<dyn Fn() -> T + Send + Sync>,
}

impl<T: Debug> Debug for Behavior<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Behavior<{}>", std::any::type_name::<T>())
    }
}

impl<T: Clone + Send + Sync + 'static> Behavior<T> {
    /// Create a constant behavior with a fixed value
    pub fn constant(value: T) -> Self {
        Self {
            sampler: Arc::new(move || value.clone()),
        }
    }

    /// Create a behavior from a sampling function
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn() -> T + Send + Sync + 'static,
    {
        Self {
            sampler: Arc::new(f),
        }
    }

    /// Current value
    pub fn sample(&self) -> T {
        (self.sampler)()
    }

    /// Derive a behavior by applying `f` to every sample
    pub fn map<U, F>(self, f: F) -> Behavior<U>
    where
        U: Clone + Send + Sync + 'static,
        F: Fn(T) -> U + Send + Sync + 'static,
    {
        let sampler = self.sampler;
        Behavior {
            sampler: Arc::new(move || f(sampler())),
        }
    }
}
