// Copyright (c) 2025 - Cowboy AI, Inc.
//! Profile editor
//!
//! Edits the injected current user and sends the changes as a partial
//! update (`PATCH /users/{id}`). The server's answer replaces the held user.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::action::{Draft, NoReconcile, SubmitMethod, Submitter, WidgetScope};
use crate::api::ApiClient;
use crate::errors::{SyncResult, ValidationError};
use crate::model::identity::join_languages;
use crate::model::CurrentUser;

pub const MIN_AGE: u32 = 18;

/// Upload limit for avatars
pub const MAX_AVATAR_BYTES: u64 = 2 * 1024 * 1024;

const AVATAR_TYPES: [&str; 2] = ["image/jpeg", "image/png"];

/// Check an avatar file before it is uploaded
pub fn validate_avatar(content_type: &str, size_bytes: u64) -> Result<(), ValidationError> {
    if !AVATAR_TYPES.contains(&content_type) {
        return Err(ValidationError::UnsupportedImage(content_type.to_string()));
    }
    if size_bytes >= MAX_AVATAR_BYTES {
        return Err(ValidationError::ImageTooLarge {
            limit: MAX_AVATAR_BYTES,
            actual: size_bytes,
        });
    }
    Ok(())
}

/// Body of `PATCH /users/{id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfilePayload {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub nationality: String,
    /// Joined with ", " as the API stores it
    pub language_skills: String,
}

/// Editable copy of the user's profile fields
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProfileDraft {
    pub name: String,
    pub age: Option<u32>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub description: Option<String>,
    pub nationality: Option<String>,
    pub language_skills: Vec<String>,
}

impl ProfileDraft {
    pub fn from_user(user: &CurrentUser) -> Self {
        Self {
            name: user.name.clone(),
            age: user.age,
            phone: user.phone.clone(),
            address: user.address.clone(),
            description: user.description.clone(),
            nationality: user.nationality.clone(),
            language_skills: user.languages(),
        }
    }
}

impl Draft for ProfileDraft {
    type Payload = ProfilePayload;
    type Created = CurrentUser;

    fn validate(&self) -> Result<(), ValidationError> {
        if let Some(age) = self.age {
            if age < MIN_AGE {
                return Err(ValidationError::Underage {
                    min: MIN_AGE,
                    actual: age,
                });
            }
        }
        if self
            .nationality
            .as_deref()
            .map_or(true, |n| n.trim().is_empty())
        {
            return Err(ValidationError::MissingField("nationality"));
        }
        if self.language_skills.is_empty() {
            return Err(ValidationError::MissingField("languageSkills"));
        }
        Ok(())
    }

    fn payload(&self) -> ProfilePayload {
        ProfilePayload {
            name: self.name.trim().to_string(),
            age: self.age,
            phone: self.phone.clone(),
            address: self.address.clone(),
            description: self.description.clone(),
            nationality: self.nationality.clone().unwrap_or_default(),
            language_skills: join_languages(&self.language_skills),
        }
    }

    // The form keeps the submitted values; they now match the server.
    fn reset(&mut self) {}

    fn method(&self) -> SubmitMethod {
        SubmitMethod::Update
    }
}

pub struct ProfileEditor {
    user: CurrentUser,
    draft: ProfileDraft,
    submitter: Submitter,
    scope: WidgetScope,
}

impl ProfileEditor {
    pub fn new(api: ApiClient, user: CurrentUser) -> Self {
        let scope = WidgetScope::new();
        Self {
            draft: ProfileDraft::from_user(&user),
            user,
            submitter: Submitter::new(api, scope.clone()),
            scope,
        }
    }

    /// The user as last confirmed by the server
    pub fn user(&self) -> &CurrentUser {
        &self.user
    }

    pub fn draft(&self) -> &ProfileDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut ProfileDraft {
        &mut self.draft
    }

    pub fn is_saving(&self) -> bool {
        self.submitter.is_submitting()
    }

    /// Send the draft; on success the returned user replaces the held one
    pub async fn save(&mut self) -> SyncResult<&CurrentUser> {
        let endpoint = format!("/users/{}", self.user.id);
        let submitted = self
            .submitter
            .submit(&mut self.draft, &endpoint, &mut NoReconcile)
            .await?;

        self.user = submitted.created;
        info!("Profile {} updated", self.user.id);
        Ok(&self.user)
    }

    /// Drop local edits and start again from the confirmed user
    pub fn discard(&mut self) {
        self.draft = ProfileDraft::from_user(&self.user);
    }

    pub fn teardown(&mut self) {
        self.scope.close();
    }
}

impl Drop for ProfileEditor {
    fn drop(&mut self) {
        self.teardown();
    }
}
