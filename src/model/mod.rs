// Copyright (c) 2025 - Cowboy AI, Inc.
//! Remote records
//!
//! Wire types for the matching API. Field names follow the API's camelCase
//! JSON; Rust names are snake_case.

pub mod identity;
pub mod matching;
pub mod review;

pub use identity::{CurrentUser, ShortUser};
pub use matching::{MatchingSession, Participant};
pub use review::Review;

use chrono::{DateTime, Utc};

/// Record identifier, unique within one collection
pub type RecordId = i64;

/// A remote entity inside a fetched collection
///
/// Records are immutable on the client; only a server response replaces
/// them.
pub trait Record: Clone + Send + Sync + 'static {
    fn id(&self) -> RecordId;

    /// The user who authored the record
    fn author_id(&self) -> RecordId;

    /// Creation time, when the endpoint reports one
    fn created_at(&self) -> Option<DateTime<Utc>>;
}
