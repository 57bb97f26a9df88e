// Copyright (c) 2025 - Cowboy AI, Inc.
//! Widget models
//!
//! Render-free state holders for the client's interactive widgets. Each
//! instance owns its collection, its action state and its timer; a renderer
//! reads from it and forwards user input to it. Dropping a widget tears it
//! down: the timer stops and late network completions are discarded.

pub mod profile_editor;
pub mod review_panel;
pub mod session_card;

pub use profile_editor::{validate_avatar, ProfileDraft, ProfileEditor, MAX_AVATAR_BYTES};
pub use review_panel::{star_rating, ReviewDraft, ReviewPanel};
pub use session_card::SessionCard;
