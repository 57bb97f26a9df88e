// Copyright (c) 2025 - Cowboy AI, Inc.
//! Optimistic Action Runner
//!
//! Runs user-triggered mutations against the API. The local state flips
//! before the network call resolves; the call's outcome then either
//! confirms the flip or reverts it.
//!
//! # Toggle Flow
//!
//! ```text
//! toggle()
//!   1. Request   Settled(m) → Pending(m → !m)      (visible immediately)
//!   2. PATCH     enter or exit endpoint            (task suspends here)
//!   3. scope     widget torn down? → Detached, no mutation
//!   4. Confirm   Pending → Settled(!m)   on success
//!      Fail      Pending → Settled(m)    on failure, error surfaced
//! ```
//!
//! Dropping a `toggle()` future mid-call (a timeout, a losing `select!`
//! branch) counts as a failure: the flip is reverted so the runner is free
//! for the next toggle.
//!
//! Overlapping toggles are rejected with [`SyncError::ActionInFlight`] and
//! fire no second call.

pub mod submit;

pub use submit::{Draft, NoReconcile, Reconcile, SubmitMethod, Submitted, Submitter};

use serde_json::Value;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, info, warn};

use crate::api::ApiClient;
use crate::errors::{SyncError, SyncResult};
use crate::model::RecordId;
use crate::state_machine::{
    ActionInput, ActionState, Direction, Membership, StateMachine, TransitionError,
    TransitionResult,
};

/// Liveness flag shared by everything a widget instance spawns
///
/// Closing the scope marks the widget as torn down; completions that arrive
/// afterwards must not touch widget state.
#[derive(Debug, Clone)]
pub struct WidgetScope {
    alive: Arc<AtomicBool>,
}

impl Default for WidgetScope {
    fn default() -> Self {
        Self::new()
    }
}

impl WidgetScope {
    pub fn new() -> Self {
        Self {
            alive: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Tear down; idempotent
    pub fn close(&self) {
        if self.alive.swap(false, Ordering::SeqCst) {
            debug!("Widget scope closed");
        }
    }

    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::SeqCst)
    }
}

/// The pair of endpoints a toggle switches between
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleEndpoints {
    pub enter: String,
    pub exit: String,
}

impl ToggleEndpoints {
    pub fn new(enter: impl Into<String>, exit: impl Into<String>) -> Self {
        Self {
            enter: enter.into(),
            exit: exit.into(),
        }
    }

    /// `PATCH /{resource}/{enter_verb}/{id}` and `PATCH /{resource}/{exit_verb}/{id}`
    pub fn for_resource(resource: &str, enter_verb: &str, exit_verb: &str, id: RecordId) -> Self {
        let resource = resource.trim_matches('/');
        Self::new(
            format!("/{}/{}/{}", resource, enter_verb, id),
            format!("/{}/{}/{}", resource, exit_verb, id),
        )
    }

    /// Join/leave endpoints of a matching session
    pub fn matching(id: RecordId) -> Self {
        Self::for_resource("matching", "join", "leave", id)
    }

    pub fn path(&self, direction: Direction) -> &str {
        match direction {
            Direction::Enter => &self.enter,
            Direction::Exit => &self.exit,
        }
    }
}

/// Optimistic join/leave toggle for one widget instance
///
/// Cloning shares the state, so a renderer can hold a clone and read
/// [`state`](Self::state) while a toggle is suspended on the network.
#[derive(Debug, Clone)]
pub struct OptimisticActionRunner {
    api: ApiClient,
    endpoints: ToggleEndpoints,
    state: Arc<Mutex<ActionState>>,
    scope: WidgetScope,
}

impl OptimisticActionRunner {
    /// Start in `NotJoined`
    pub fn new(api: ApiClient, endpoints: ToggleEndpoints, scope: WidgetScope) -> Self {
        Self::with_membership(api, endpoints, scope, Membership::default())
    }

    /// Start from a membership known at mount time
    pub fn with_membership(
        api: ApiClient,
        endpoints: ToggleEndpoints,
        scope: WidgetScope,
        initial: Membership,
    ) -> Self {
        Self {
            api,
            endpoints,
            state: Arc::new(Mutex::new(ActionState::Settled(initial))),
            scope,
        }
    }

    pub fn state(&self) -> ActionState {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Membership as the UI should render it, optimistic while pending
    pub fn membership(&self) -> Membership {
        self.state().displayed()
    }

    pub fn is_pending(&self) -> bool {
        self.state().is_pending()
    }

    pub fn endpoints(&self) -> &ToggleEndpoints {
        &self.endpoints
    }

    pub fn scope(&self) -> &WidgetScope {
        &self.scope
    }

    /// Flip membership now, then reconcile with the server
    ///
    /// Returns the settled membership on success. On failure the previous
    /// membership is restored and the error returned.
    pub async fn toggle(&self) -> SyncResult<Membership> {
        if !self.scope.is_alive() {
            return Err(SyncError::Detached(self.endpoints.enter.clone()));
        }

        let direction = match self.apply(ActionInput::Request) {
            Ok(Some(direction)) => direction,
            Err(TransitionError::PreconditionFailed(reason)) => {
                debug!("Rejected overlapping toggle on {}: {}", self.endpoints.enter, reason);
                return Err(SyncError::ActionInFlight(self.endpoints.enter.clone()));
            }
            Err(e) => return Err(SyncError::Application(e.to_string())),
            Ok(None) => {
                return Err(SyncError::Application(format!(
                    "toggle on {} selected no call",
                    self.endpoints.enter
                )))
            }
        };
        let mut pending = PendingGuard::arm(self);
        let path = self.endpoints.path(direction).to_string();
        info!("Optimistic {} via {}", direction, path);

        let result = self.api.patch::<Value, Value>(&path, None).await;

        if !self.scope.is_alive() {
            pending.disarm();
            warn!("Dropping {} completion after teardown", path);
            return Err(SyncError::Detached(path));
        }

        let outcome = match &result {
            Ok(_) => ActionInput::Confirm,
            Err(_) => ActionInput::Fail,
        };
        pending.disarm();
        self.apply(outcome)
            .map_err(|e| SyncError::Application(e.to_string()))?;

        match result {
            Ok(_) => {
                let membership = self.membership();
                debug!("Confirmed {} -> {:?}", path, membership);
                Ok(membership)
            }
            Err(e) => {
                warn!(
                    "Rolled back {} to {:?}: {}",
                    path,
                    self.membership(),
                    e
                );
                Err(e)
            }
        }
    }

    fn apply(&self, input: ActionInput) -> TransitionResult<Option<Direction>> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let (next, output) = state.transition(&input)?;
        *state = next;
        Ok(output)
    }
}

/// Rolls a pending toggle back if its future is dropped before the call
/// settles
struct PendingGuard<'a> {
    runner: &'a OptimisticActionRunner,
    armed: bool,
}

impl<'a> PendingGuard<'a> {
    fn arm(runner: &'a OptimisticActionRunner) -> Self {
        Self {
            runner,
            armed: true,
        }
    }

    fn disarm(&mut self) {
        self.armed = false;
    }
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        if !self.armed || !self.runner.scope.is_alive() {
            return;
        }
        if self.runner.apply(ActionInput::Fail).is_ok() {
            warn!(
                "Toggle on {} cancelled in flight, rolled back to {:?}",
                self.runner.endpoints.enter,
                self.runner.membership()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matching_endpoints() {
        let endpoints = ToggleEndpoints::matching(7);
        assert_eq!(endpoints.path(Direction::Enter), "/matching/join/7");
        assert_eq!(endpoints.path(Direction::Exit), "/matching/leave/7");
    }

    #[test]
    fn test_generic_endpoints() {
        let endpoints = ToggleEndpoints::for_resource("/event/", "enter", "exit", 3);
        assert_eq!(endpoints.enter, "/event/enter/3");
        assert_eq!(endpoints.exit, "/event/exit/3");
    }

    #[test]
    fn test_scope_close_is_idempotent() {
        let scope = WidgetScope::new();
        let clone = scope.clone();
        assert!(clone.is_alive());

        scope.close();
        scope.close();
        assert!(!clone.is_alive());
    }
}
