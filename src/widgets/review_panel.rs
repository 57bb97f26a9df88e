// Copyright (c) 2025 - Cowboy AI, Inc.
//! User review panel
//!
//! Reviews written about one user, their mean star rating, and the viewer's
//! review draft. Submitting a review reloads the list so the average
//! includes it.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::action::{Draft, Submitted, Submitter, WidgetScope};
use crate::api::ApiClient;
use crate::errors::{SyncResult, ValidationError};
use crate::model::{CurrentUser, RecordId, Review};
use crate::store::{CollectionQuery, Mean, RemoteCollectionStore};

const REVIEW_ENDPOINT: &str = "/review";
const MAX_STAR: f64 = 5.0;

/// Mean of `star` across reviews
pub fn star_rating() -> Mean<Review> {
    Mean::of(|review: &Review| review.star)
}

/// Body of `POST /review`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewPayload {
    pub star: f64,
    pub content: String,
    pub user2_id: RecordId,
}

/// The viewer's in-progress review
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewDraft {
    reviewer_id: RecordId,
    reviewee_id: RecordId,
    pub star: f64,
    pub content: String,
}

impl ReviewDraft {
    pub fn new(reviewer_id: RecordId, reviewee_id: RecordId) -> Self {
        Self {
            reviewer_id,
            reviewee_id,
            star: 0.0,
            content: String::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.star == 0.0 && self.content.is_empty()
    }
}

impl Draft for ReviewDraft {
    type Payload = ReviewPayload;
    type Created = Review;

    fn validate(&self) -> Result<(), ValidationError> {
        if self.reviewer_id == self.reviewee_id {
            return Err(ValidationError::SelfReview);
        }
        let half_steps = self.star * 2.0;
        if !(self.star > 0.0 && self.star <= MAX_STAR) || half_steps.fract() != 0.0 {
            return Err(ValidationError::InvalidRating(self.star));
        }
        Ok(())
    }

    fn payload(&self) -> ReviewPayload {
        ReviewPayload {
            star: self.star,
            content: self.content.trim().to_string(),
            user2_id: self.reviewee_id,
        }
    }

    fn reset(&mut self) {
        self.star = 0.0;
        self.content.clear();
    }
}

pub struct ReviewPanel {
    viewer: CurrentUser,
    subject_id: RecordId,
    store: RemoteCollectionStore<Review>,
    submitter: Submitter,
    draft: ReviewDraft,
    scope: WidgetScope,
}

impl ReviewPanel {
    /// Create the panel for reviews about `subject_id`; call
    /// [`refresh`](Self::refresh) to fetch them
    pub fn new(api: ApiClient, viewer: CurrentUser, subject_id: RecordId) -> Self {
        let scope = WidgetScope::new();
        let store = RemoteCollectionStore::new(
            api.clone(),
            CollectionQuery::reviews_of(subject_id),
            star_rating(),
        );
        let draft = ReviewDraft::new(viewer.id, subject_id);

        Self {
            viewer,
            subject_id,
            store,
            submitter: Submitter::new(api, scope.clone()),
            draft,
            scope,
        }
    }

    pub async fn refresh(&mut self) -> SyncResult<()> {
        self.store.load().await?;
        debug!(
            "Review panel for {} shows {} reviews",
            self.subject_id,
            self.store.items().len()
        );
        Ok(())
    }

    pub fn reviews(&self) -> &[Review] {
        self.store.items()
    }

    pub fn average_rating(&self) -> f64 {
        self.store.aggregate()
    }

    pub fn store(&self) -> &RemoteCollectionStore<Review> {
        &self.store
    }

    /// The viewer may not review their own profile
    pub fn can_review(&self) -> bool {
        self.viewer.id != self.subject_id
    }

    pub fn draft(&self) -> &ReviewDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut ReviewDraft {
        &mut self.draft
    }

    pub fn is_submitting(&self) -> bool {
        self.submitter.is_submitting()
    }

    /// Post the draft and reload the reviews
    pub async fn submit_review(&mut self) -> SyncResult<Submitted<Review>> {
        self.submitter
            .submit(&mut self.draft, REVIEW_ENDPOINT, &mut self.store)
            .await
    }

    pub fn teardown(&mut self) {
        self.scope.close();
    }
}

impl Drop for ReviewPanel {
    fn drop(&mut self) {
        self.teardown();
    }
}
