// Copyright (c) 2025 - Cowboy AI, Inc.
//! Users as the API reports them
//!
//! [`CurrentUser`] is supplied by the auth collaborator and passed into the
//! widgets that need it. Nothing in this crate looks it up on its own.

use serde::{Deserialize, Serialize};

use super::RecordId;

/// Separator the API uses for the `languageSkills` string
pub const LANGUAGE_SEPARATOR: &str = ", ";

/// Compact user embedded in other records
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortUser {
    pub id: RecordId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

/// The signed-in user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUser {
    pub id: RecordId,
    pub name: String,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub nationality: Option<String>,
    /// Comma-joined language codes, e.g. "en, ja"
    #[serde(default)]
    pub language_skills: String,
}

impl CurrentUser {
    /// Language codes split out of the wire string
    pub fn languages(&self) -> Vec<String> {
        split_languages(&self.language_skills)
    }

    pub fn short(&self) -> ShortUser {
        ShortUser {
            id: self.id,
            name: self.name.clone(),
            avatar: self.avatar.clone(),
        }
    }
}

pub fn split_languages(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn join_languages(languages: &[String]) -> String {
    languages.join(LANGUAGE_SEPARATOR)
}
