// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests for the Toggle State Machine
//!
//! Any sequence of inputs leaves the machine in a state where the displayed
//! membership is either confirmed by the server or the optimistic target of
//! the one call in flight.

use matching_sync::state_machine::{ActionInput, StateMachine};
use matching_sync::{ActionState, Membership};
use proptest::prelude::*;

fn input() -> impl Strategy<Value = ActionInput> {
    prop_oneof![
        Just(ActionInput::Request),
        Just(ActionInput::Confirm),
        Just(ActionInput::Fail),
    ]
}

fn membership() -> impl Strategy<Value = Membership> {
    any::<bool>().prop_map(Membership::from)
}

/// Apply inputs, skipping rejected ones as the runner does
fn run(start: Membership, inputs: &[ActionInput]) -> (ActionState, Membership) {
    let mut state = ActionState::Settled(start);
    let mut confirmed = start;
    for input in inputs {
        if let Ok((next, _)) = state.transition(input) {
            state = next;
            if let ActionState::Settled(m) = state {
                confirmed = m;
            }
        }
    }
    (state, confirmed)
}

proptest! {
    /// Property: a failed call always restores what was shown before it
    #[test]
    fn prop_fail_restores_previous(start in membership()) {
        let (state, _) = run(start, &[ActionInput::Request, ActionInput::Fail]);
        prop_assert_eq!(state, ActionState::Settled(start));
    }

    /// Property: a confirmed call always shows the flipped membership
    #[test]
    fn prop_confirm_keeps_flip(start in membership()) {
        let (state, _) = run(start, &[ActionInput::Request, ActionInput::Confirm]);
        prop_assert_eq!(state, ActionState::Settled(start.flipped()));
    }

    /// Property: pending states differ from their last settled value by one flip
    #[test]
    fn prop_pending_is_one_flip_from_confirmed(
        start in membership(),
        inputs in prop::collection::vec(input(), 0..32),
    ) {
        let (state, confirmed) = run(start, &inputs);
        match state {
            ActionState::Settled(m) => prop_assert_eq!(m, confirmed),
            ActionState::Pending { previous, target } => {
                prop_assert_eq!(previous, confirmed);
                prop_assert_eq!(target, confirmed.flipped());
            }
        }
    }
}
