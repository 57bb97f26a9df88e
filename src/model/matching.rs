// Copyright (c) 2025 - Cowboy AI, Inc.
//! Quick-matching sessions and their participants

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Record, RecordId, ShortUser};

/// One user's membership in a matching session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    pub user_id: RecordId,
    pub user: ShortUser,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Record for Participant {
    fn id(&self) -> RecordId {
        self.user_id
    }

    fn author_id(&self) -> RecordId {
        self.user_id
    }

    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }
}

/// A meal meetup other users can join
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchingSession {
    pub id: RecordId,
    pub address: String,
    #[serde(default)]
    pub desired_food: String,
    #[serde(default)]
    pub conversation_topics: String,
    pub matching_date: DateTime<Utc>,
    pub owner: ShortUser,
    #[serde(default)]
    pub user_matchings: Vec<Participant>,
}

impl MatchingSession {
    pub fn participant_count(&self) -> usize {
        self.user_matchings.len()
    }

    /// Whether the server lists `user_id` among the participants
    pub fn has_participant(&self, user_id: RecordId) -> bool {
        self.user_matchings.iter().any(|p| p.user_id == user_id)
    }
}

impl Record for MatchingSession {
    fn id(&self) -> RecordId {
        self.id
    }

    fn author_id(&self) -> RecordId {
        self.owner.id
    }

    fn created_at(&self) -> Option<DateTime<Utc>> {
        None
    }
}
