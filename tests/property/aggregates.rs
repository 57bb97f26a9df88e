// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests for Collection Aggregates
//!
//! The mean is a pure function of the whole collection: finite for every
//! input, zero for the empty collection, and bounded by the extremes.

use matching_sync::store::{Aggregator, Count, Mean};
use proptest::prelude::*;

// ============================================================================
// Generators
// ============================================================================

/// Half-step star ratings in (0, 5]
fn star() -> impl Strategy<Value = f64> {
    (1u8..=10).prop_map(|halves| f64::from(halves) / 2.0)
}

fn stars() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(star(), 0..64)
}

fn mean() -> Mean<f64> {
    Mean::of(|x: &f64| *x)
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    /// Property: the mean is sum / len, and 0 for no items
    #[test]
    fn prop_mean_is_sum_over_len(items in stars()) {
        let result = mean().aggregate(&items);

        if items.is_empty() {
            prop_assert_eq!(result, 0.0);
        } else {
            let expected = items.iter().sum::<f64>() / items.len() as f64;
            prop_assert!((result - expected).abs() < 1e-9);
        }
    }

    /// Property: the mean lies between the smallest and largest rating
    #[test]
    fn prop_mean_is_bounded(items in prop::collection::vec(star(), 1..64)) {
        let result = mean().aggregate(&items);
        let min = items.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = items.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

        prop_assert!(result >= min - 1e-9);
        prop_assert!(result <= max + 1e-9);
    }

    /// Property: the aggregate is finite for any input, even non-finite fields
    #[test]
    fn prop_mean_is_always_finite(items in prop::collection::vec(any::<f64>(), 0..16)) {
        prop_assert!(mean().aggregate(&items).is_finite());
    }

    /// Property: the mean does not depend on item order
    #[test]
    fn prop_mean_ignores_order(items in stars()) {
        let mut reversed = items.clone();
        reversed.reverse();

        let a = mean().aggregate(&items);
        let b = mean().aggregate(&reversed);
        prop_assert!((a - b).abs() < 1e-9);
    }

    /// Property: Count is the collection length
    #[test]
    fn prop_count_is_len(items in stars()) {
        prop_assert_eq!(Count.aggregate(&items), items.len() as f64);
    }
}
