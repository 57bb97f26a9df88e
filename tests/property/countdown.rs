// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests for Countdown Windows

use chrono::{DateTime, Duration, TimeZone, Utc};
use matching_sync::{TimeWindow, WindowStatus};
use proptest::prelude::*;

fn base() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 19, 12, 0, 0).unwrap()
}

/// Offsets within a week either side of the event, in milliseconds
fn offset_ms() -> impl Strategy<Value = i64> {
    -604_800_000i64..604_800_000i64
}

proptest! {
    /// Property: a window is expired exactly when the event is in the past
    #[test]
    fn prop_expired_iff_event_passed(offset in offset_ms()) {
        let now = base();
        let window = TimeWindow::new(now + Duration::milliseconds(offset), now);

        prop_assert_eq!(window.is_expired(), offset < 0);
    }

    /// Property: remaining minutes are floor-rounded
    #[test]
    fn prop_remaining_is_floor(offset in offset_ms()) {
        let now = base();
        let remaining = TimeWindow::new(now + Duration::milliseconds(offset), now)
            .remaining_minutes();

        prop_assert!(remaining * 60_000 <= offset);
        prop_assert!(offset < (remaining + 1) * 60_000);
    }

    /// Property: time only moves the countdown down
    #[test]
    fn prop_remaining_never_increases(
        offset in offset_ms(),
        later in 0i64..3_600_000,
    ) {
        let now = base();
        let window = TimeWindow::new(now + Duration::milliseconds(offset), now);
        let after = window.at(now + Duration::milliseconds(later));

        prop_assert!(after.remaining_minutes() <= window.remaining_minutes());
        if window.is_expired() {
            prop_assert_eq!(after.status(), WindowStatus::Expired);
        }
    }
}
