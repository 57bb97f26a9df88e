// Copyright (c) 2025 - Cowboy AI, Inc.
//! Quick-matching card
//!
//! One matching session with a join/cancel toggle and a countdown to the
//! meetup. Joining and leaving are disabled once the countdown expires.

use chrono::{DateTime, Utc};
use std::time::Duration;
use tokio::sync::watch;
use tracing::debug;

use crate::action::{OptimisticActionRunner, ToggleEndpoints, WidgetScope};
use crate::api::ApiClient;
use crate::errors::{SyncResult, ValidationError};
use crate::frp::Behavior;
use crate::model::{CurrentUser, MatchingSession, Participant};
use crate::polling::{PollingRefresher, TimeWindow, WindowStatus};
use crate::state_machine::{ActionState, Membership};

pub struct SessionCard {
    session: MatchingSession,
    runner: OptimisticActionRunner,
    refresher: PollingRefresher,
    countdown: Behavior<TimeWindow>,
    now: watch::Receiver<DateTime<Utc>>,
    scope: WidgetScope,
}

impl SessionCard {
    /// Mount the card and start its countdown timer
    ///
    /// The viewer's initial membership comes from the session's participant
    /// list; afterwards only the toggle changes it.
    pub fn mount(
        api: ApiClient,
        session: MatchingSession,
        viewer: &CurrentUser,
        clock: Behavior<DateTime<Utc>>,
        interval: Duration,
    ) -> SyncResult<Self> {
        let scope = WidgetScope::new();
        let initial = Membership::from(session.has_participant(viewer.id));
        let runner = OptimisticActionRunner::with_membership(
            api,
            ToggleEndpoints::matching(session.id),
            scope.clone(),
            initial,
        );

        let event_at = session.matching_date;
        let countdown = clock.clone().map(move |now| TimeWindow::new(event_at, now));

        let mut refresher = PollingRefresher::new(clock);
        let (tx, now) = watch::channel(refresher.now());
        refresher.start(interval, move |instant| {
            let _ = tx.send(instant);
        })?;

        debug!("Mounted session card {} ({:?})", session.id, initial);
        Ok(Self {
            session,
            runner,
            refresher,
            countdown,
            now,
            scope,
        })
    }

    pub fn session(&self) -> &MatchingSession {
        &self.session
    }

    pub fn participants(&self) -> &[Participant] {
        &self.session.user_matchings
    }

    /// Countdown as of the last tick
    pub fn window(&self) -> TimeWindow {
        TimeWindow::new(self.session.matching_date, *self.now.borrow())
    }

    pub fn status(&self) -> WindowStatus {
        self.window().status()
    }

    /// Countdown sampled from the clock right now, between ticks
    pub fn live_window(&self) -> TimeWindow {
        self.countdown.sample()
    }

    /// Receiver that changes on every tick, for renderers that redraw on time
    pub fn ticks(&self) -> watch::Receiver<DateTime<Utc>> {
        self.now.clone()
    }

    pub fn membership(&self) -> Membership {
        self.runner.membership()
    }

    pub fn action_state(&self) -> ActionState {
        self.runner.state()
    }

    /// Handle for reading action state from another task
    pub fn runner(&self) -> &OptimisticActionRunner {
        &self.runner
    }

    /// Join if not joined, cancel if joined
    pub async fn toggle_join(&self) -> SyncResult<Membership> {
        if self.live_window().is_expired() {
            return Err(ValidationError::SessionExpired(self.session.id).into());
        }
        self.runner.toggle().await
    }

    pub fn is_mounted(&self) -> bool {
        self.scope.is_alive()
    }

    /// Stop the countdown and detach pending completions; idempotent
    pub fn teardown(&mut self) {
        self.refresher.stop();
        self.scope.close();
    }
}

impl Drop for SessionCard {
    fn drop(&mut self) {
        self.teardown();
    }
}
