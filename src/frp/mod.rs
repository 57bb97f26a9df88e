// Copyright (c) 2025 - Cowboy AI, Inc.
//! Time-Varying Values
//!
//! A [`Behavior<T>`] is a value that exists at every instant and can be
//! sampled at any moment. The polling refresher samples a clock behavior on
//! every tick; a session card's live countdown is a behavior mapped from
//! that clock.
//!
//! ```text
//! Time: ────────────────────────────→
//! now:    ≈≈≈≈≈≈≈≈≈≈≈≈≈≈≈≈≈≈≈≈≈≈≈≈≈     (sampled every tick)
//! window: now.map(|t| TimeWindow::new(event_at, t))
//! ```
//!
//! Tests replace the system clock with a constant or a hand-advanced
//! behavior so countdowns are deterministic.

pub mod behavior;

pub use behavior::Behavior;

use chrono::{DateTime, Utc};

/// Wall clock as a behavior
pub fn system_clock() -> Behavior<DateTime<Utc>> {
    Behavior::from_fn(Utc::now)
}
