// Copyright (c) 2025 - Cowboy AI, Inc.
//! Aggregates derived from a collection
//!
//! An aggregate is a pure function of the whole collection. Stores call it
//! after every successful load; nothing ever patches a previous result.

/// Derive a scalar from a collection
pub trait Aggregator<R>: Send + Sync {
    /// Must return a finite number for every input, including `[]`
    fn aggregate(&self, items: &[R]) -> f64;
}

/// Arithmetic mean of a numeric field, `0.0` for an empty collection
pub struct Mean<R> {
    select: fn(&R) -> f64,
}

impl<R> Mean<R> {
    pub fn of(select: fn(&R) -> f64) -> Self {
        Self { select }
    }
}

impl<R> Clone for Mean<R> {
    fn clone(&self) -> Self {
        Self {
            select: self.select,
        }
    }
}

impl<R> std::fmt::Debug for Mean<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Mean<{}>", std::any::type_name::<R>())
    }
}

impl<R> Aggregator<R> for Mean<R> {
    fn aggregate(&self, items: &[R]) -> f64 {
        if items.is_empty() {
            return 0.0;
        }
        let sum: f64 = items.iter().map(self.select).sum();
        let mean = sum / items.len() as f64;
        if mean.is_finite() {
            mean
        } else {
            0.0
        }
    }
}

/// Number of records in the collection
#[derive(Debug, Clone, Copy, Default)]
pub struct Count;

impl<R> Aggregator<R> for Count {
    fn aggregate(&self, items: &[R]) -> f64 {
        items.len() as f64
    }
}
