// Copyright (c) 2025 - Cowboy AI, Inc.
//! Join Lifecycle State Machine
//!
//! Tracks whether the current user belongs to a parent resource (a matching
//! session) while a join or leave call is in flight.
//!
//! # States
//!
//! - Settled(NotJoined) / Settled(Joined): no call outstanding
//! - Pending { previous, target }: optimistic flip applied, call in flight
//!
//! # Inputs
//!
//! - Request: user clicked join/cancel; output names the call to fire
//! - Confirm: call succeeded, keep the target
//! - Fail: call failed, restore the previous membership
//!
//! ```text
//! NotJoined ──Request──> Pending(NotJoined → Joined) ──Confirm──> Joined
//!                                                    ──Fail─────> NotJoined
//! Joined ────Request──> Pending(Joined → NotJoined) ──Confirm──> NotJoined
//!                                                    ──Fail─────> Joined
//! ```
//!
//! `Request` while pending is rejected, which is what blocks overlapping
//! toggles.

use std::fmt;

use super::{StateMachine, TransitionError, TransitionResult};

/// The user's relationship to the parent resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Membership {
    #[default]
    NotJoined,
    Joined,
}

impl Membership {
    pub fn flipped(self) -> Self {
        match self {
            Membership::NotJoined => Membership::Joined,
            Membership::Joined => Membership::NotJoined,
        }
    }

    pub fn is_joined(self) -> bool {
        self == Membership::Joined
    }
}

impl From<bool> for Membership {
    fn from(joined: bool) -> Self {
        if joined {
            Membership::Joined
        } else {
            Membership::NotJoined
        }
    }
}

/// Which remote call a request fires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Enter,
    Exit,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Enter => write!(f, "enter"),
            Direction::Exit => write!(f, "exit"),
        }
    }
}

/// Per-widget action state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionState {
    Settled(Membership),
    Pending {
        previous: Membership,
        target: Membership,
    },
}

impl Default for ActionState {
    fn default() -> Self {
        ActionState::Settled(Membership::NotJoined)
    }
}

impl ActionState {
    /// What the UI shows: pending states display their optimistic target
    pub fn displayed(&self) -> Membership {
        match self {
            ActionState::Settled(m) => *m,
            ActionState::Pending { target, .. } => *target,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, ActionState::Pending { .. })
    }
}

/// FSM input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionInput {
    Request,
    Confirm,
    Fail,
}

impl StateMachine for ActionState {
    type Input = ActionInput;
    type Output = Option<Direction>;

    fn transition(&self, input: &Self::Input) -> TransitionResult<(Self, Self::Output)> {
        use ActionInput::*;
        use ActionState::*;

        match (*self, *input) {
            (Settled(current), Request) => {
                let direction = match current {
                    Membership::NotJoined => Direction::Enter,
                    Membership::Joined => Direction::Exit,
                };
                Ok((
                    Pending {
                        previous: current,
                        target: current.flipped(),
                    },
                    Some(direction),
                ))
            }
            (Pending { .. }, Request) => Err(TransitionError::PreconditionFailed(
                "an action is already in flight".to_string(),
            )),
            (Pending { target, .. }, Confirm) => Ok((Settled(target), None)),
            (Pending { previous, .. }, Fail) => Ok((Settled(previous), None)),
            (Settled(current), input) => Err(TransitionError::InvalidTransition {
                from: format!("{:?}", current),
                input: format!("{:?}", input),
            }),
        }
    }
}
