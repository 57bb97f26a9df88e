// Copyright (c) 2025 - Cowboy AI, Inc.
//! Reviews one user wrote about another

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Record, RecordId, ShortUser};

/// A star rating plus comment, authored by `user1` about `user2`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: RecordId,
    /// Half-step rating in (0, 5]
    pub star: f64,
    #[serde(default)]
    pub content: String,
    pub user1_id: RecordId,
    pub user1: ShortUser,
    pub user2_id: RecordId,
    #[serde(default)]
    pub user2: Option<ShortUser>,
    #[serde(default)]
    pub parent_comment_id: Option<RecordId>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Record for Review {
    fn id(&self) -> RecordId {
        self.id
    }

    fn author_id(&self) -> RecordId {
        self.user1_id
    }

    fn created_at(&self) -> Option<DateTime<Utc>> {
        Some(self.created_at)
    }
}
