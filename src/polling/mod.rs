// Copyright (c) 2025 - Cowboy AI, Inc.
//! Polling Refresher
//!
//! Re-samples the clock on a fixed interval so time-relative values
//! ("12 min left", "expired") stay fresh without re-fetching anything.
//!
//! The timer is an owned resource: [`PollingRefresher::start`] acquires it,
//! [`PollingRefresher::stop`] releases it, and dropping the refresher stops
//! it too. A stopped refresher never invokes its callback again.

pub mod window;

pub use window::{TimeWindow, WindowStatus};

use chrono::{DateTime, Utc};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tracing::debug;

use crate::errors::{SyncError, SyncResult};
use crate::frp::{system_clock, Behavior};

/// Interval the matching card refreshes its countdown at
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(5_000);

/// Repeating timer that hands the current instant to a callback
#[derive(Debug)]
pub struct PollingRefresher {
    clock: Behavior<DateTime<Utc>>,
    handle: Option<JoinHandle<()>>,
}

impl Default for PollingRefresher {
    fn default() -> Self {
        Self::new(system_clock())
    }
}

impl PollingRefresher {
    pub fn new(clock: Behavior<DateTime<Utc>>) -> Self {
        Self {
            clock,
            handle: None,
        }
    }

    /// Start ticking every `interval`
    ///
    /// The first call to `on_tick` happens one interval after start. `on_tick`
    /// runs on the runtime and must not block. Starting a running refresher
    /// replaces the previous timer.
    pub fn start<F>(&mut self, interval: Duration, mut on_tick: F) -> SyncResult<()>
    where
        F: FnMut(DateTime<Utc>) + Send + 'static,
    {
        if interval.is_zero() {
            return Err(SyncError::Configuration(
                "polling interval must be greater than zero".to_string(),
            ));
        }
        let runtime = tokio::runtime::Handle::try_current().map_err(|e| {
            SyncError::Configuration(format!("polling needs a tokio runtime: {}", e))
        })?;

        self.stop();

        let clock = self.clock.clone();
        let handle = runtime.spawn(async move {
            let mut timer = time::interval(interval);
            timer.set_missed_tick_behavior(MissedTickBehavior::Skip);
            timer.tick().await;

            loop {
                timer.tick().await;
                on_tick(clock.sample());
            }
        });

        debug!("Polling started every {:?}", interval);
        self.handle = Some(handle);
        Ok(())
    }

    /// Cancel the timer; safe to call any number of times
    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            debug!("Polling stopped");
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Sample the clock now, outside the tick schedule
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.sample()
    }
}

impl Drop for PollingRefresher {
    fn drop(&mut self) {
        self.stop();
    }
}
