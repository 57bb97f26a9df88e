// Copyright (c) 2025 - Cowboy AI, Inc.
//! Countdown windows
//!
//! `remaining = floor((event_at - now) / 1 minute)`. A window is active while
//! `remaining >= 0`, so it is still active at exactly the event instant and
//! expired from the first moment after it.

use chrono::{DateTime, Utc};
use std::fmt;

const MILLIS_PER_MINUTE: i64 = 60_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowStatus {
    Active { remaining_minutes: i64 },
    Expired,
}

impl fmt::Display for WindowStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WindowStatus::Active { remaining_minutes } => {
                write!(f, "{} min left", remaining_minutes)
            }
            WindowStatus::Expired => write!(f, "expired"),
        }
    }
}

/// An event instant observed from a particular `now`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub event_at: DateTime<Utc>,
    pub now: DateTime<Utc>,
}

impl TimeWindow {
    pub fn new(event_at: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        Self { event_at, now }
    }

    /// Same event, fresh `now`
    pub fn at(self, now: DateTime<Utc>) -> Self {
        Self { now, ..self }
    }

    /// Whole minutes until the event, floor-rounded; negative once past
    pub fn remaining_minutes(&self) -> i64 {
        (self.event_at - self.now)
            .num_milliseconds()
            .div_euclid(MILLIS_PER_MINUTE)
    }

    pub fn status(&self) -> WindowStatus {
        let remaining_minutes = self.remaining_minutes();
        if remaining_minutes < 0 {
            WindowStatus::Expired
        } else {
            WindowStatus::Active { remaining_minutes }
        }
    }

    pub fn is_expired(&self) -> bool {
        self.status() == WindowStatus::Expired
    }
}
