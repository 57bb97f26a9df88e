// Copyright (c) 2025 - Cowboy AI, Inc.
//! Draft submission
//!
//! A draft is local form input. Submitting it:
//!
//! 1. validates locally; a [`ValidationError`] dispatches nothing
//! 2. sends a create (POST) or update (PATCH)
//! 3. on success resets the draft and reloads the dependent collection once
//! 4. on failure leaves the draft untouched so the user can retry

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::WidgetScope;
use crate::api::ApiClient;
use crate::errors::{SyncError, SyncResult, ValidationError};

/// Something that can re-fetch itself after a successful mutation
#[async_trait]
pub trait Reconcile: Send {
    async fn reconcile(&mut self) -> SyncResult<()>;
}

/// For submissions whose result needs no follow-up fetch
#[derive(Debug, Clone, Copy, Default)]
pub struct NoReconcile;

#[async_trait]
impl Reconcile for NoReconcile {
    async fn reconcile(&mut self) -> SyncResult<()> {
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitMethod {
    /// POST a new record
    Create,
    /// PATCH an existing record with a partial payload
    Update,
}

/// Local form input that can be submitted
pub trait Draft: Send {
    type Payload: Serialize + Send + Sync;
    type Created: DeserializeOwned + Send;

    fn validate(&self) -> Result<(), ValidationError>;

    fn payload(&self) -> Self::Payload;

    /// Clear input after a successful submit
    fn reset(&mut self);

    fn method(&self) -> SubmitMethod {
        SubmitMethod::Create
    }
}

/// Outcome of a successful submit
#[derive(Debug, Clone, PartialEq)]
pub struct Submitted<T> {
    /// Record the server returned
    pub created: T,
    /// Whether the dependent reload succeeded; a failed reload keeps the
    /// previous snapshot and is logged
    pub reconciled: bool,
}

/// Runs draft submissions for one widget instance
#[derive(Debug, Clone)]
pub struct Submitter {
    api: ApiClient,
    scope: WidgetScope,
    in_flight: Arc<AtomicBool>,
}

struct InFlightGuard(Arc<AtomicBool>);

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl Submitter {
    pub fn new(api: ApiClient, scope: WidgetScope) -> Self {
        Self {
            api,
            scope,
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Validate, send and reconcile a draft
    pub async fn submit<D, R>(
        &self,
        draft: &mut D,
        endpoint: &str,
        dependent: &mut R,
    ) -> SyncResult<Submitted<D::Created>>
    where
        D: Draft,
        R: Reconcile + ?Sized,
    {
        draft.validate()?;

        if !self.scope.is_alive() {
            return Err(SyncError::Detached(endpoint.to_string()));
        }
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(SyncError::ActionInFlight(endpoint.to_string()));
        }
        let _guard = InFlightGuard(Arc::clone(&self.in_flight));

        let payload = draft.payload();
        let result: SyncResult<D::Created> = match draft.method() {
            SubmitMethod::Create => self.api.post(endpoint, &payload).await,
            SubmitMethod::Update => self.api.patch(endpoint, Some(&payload)).await,
        };

        if !self.scope.is_alive() {
            warn!("Dropping {} completion after teardown", endpoint);
            return Err(SyncError::Detached(endpoint.to_string()));
        }

        let created = match result {
            Ok(created) => created,
            Err(e) => {
                warn!("Submit to {} failed, draft kept: {}", endpoint, e);
                return Err(e);
            }
        };
        draft.reset();
        info!("Submitted to {}", endpoint);

        let reconciled = match dependent.reconcile().await {
            Ok(()) => true,
            Err(e) => {
                warn!("Reload after submit to {} failed: {}", endpoint, e);
                false
            }
        };
        debug!("Submit to {} reconciled: {}", endpoint, reconciled);

        Ok(Submitted {
            created,
            reconciled,
        })
    }
}
