// Copyright (c) 2025 - Cowboy AI, Inc.
//! Finite State Machine Abstractions
//!
//! Widget-local action state is modelled as a pure state machine. The
//! transition function decides; the action runner performs the I/O the
//! output asks for.
//!
//! ```text
//! (State, Input) → (State, Output)
//! ```
//!
//! # Example
//!
//! ```rust
//! use matching_sync::state_machine::*;
//!
//! #[derive(Debug, Clone, PartialEq)]
//! enum Switch {
//!     Off,
//!     On,
//! }
//!
//! struct Press;
//!
//! impl StateMachine for Switch {
//!     type Input = Press;
//!     type Output = ();
//!
//!     fn transition(&self, _input: &Press) -> TransitionResult<(Self, ())> {
//!         match self {
//!             Switch::Off => Ok((Switch::On, ())),
//!             Switch::On => Ok((Switch::Off, ())),
//!         }
//!     }
//! }
//!
//! assert!(Switch::Off.can_transition(&Press));
//! ```

pub mod join_lifecycle;

pub use join_lifecycle::{ActionInput, ActionState, Direction, Membership};

/// Result of a state transition
pub type TransitionResult<S> = Result<S, TransitionError>;

/// Errors that can occur during state transitions
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransitionError {
    /// Transition from current state to target state is not allowed
    #[error("Invalid transition from {from} on {input}")]
    InvalidTransition { from: String, input: String },

    /// Precondition not met for transition
    #[error("Precondition failed: {0}")]
    PreconditionFailed(String),
}

/// Trait for finite state machines
pub trait StateMachine: Sized + Clone {
    /// Input type that triggers transitions
    type Input;

    /// Output type produced by transitions (use () if none)
    type Output;

    /// Attempt to transition to a new state given an input
    ///
    /// # Returns
    /// - Ok((new_state, output)) if transition is valid
    /// - Err(TransitionError) if transition is invalid
    fn transition(&self, input: &Self::Input) -> TransitionResult<(Self, Self::Output)>;

    /// Check if a transition is valid without performing it
    fn can_transition(&self, input: &Self::Input) -> bool {
        self.transition(input).is_ok()
    }
}
