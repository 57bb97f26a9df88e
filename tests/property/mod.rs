// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests Module
//!
//! Pure parts of the synchronization core, checked over generated inputs.

mod action_state;
mod aggregates;
mod countdown;
