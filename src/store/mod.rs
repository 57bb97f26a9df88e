// Copyright (c) 2025 - Cowboy AI, Inc.
//! Remote Collection Store
//!
//! Holds one collection of records fetched from `(resource, parent id)` and
//! the aggregate derived from it.
//!
//! # Load Semantics
//!
//! ```text
//! load() ──GET /{resource}?{parentKey}={id}──> Page { items, count }
//!    │
//!    ├─ Ok  → replace items wholesale, recompute aggregate once
//!    └─ Err → keep previous items and aggregate, surface the error
//! ```
//!
//! A failed load never clears the store: the widget keeps rendering the
//! last good (stale but consistent) snapshot.

pub mod aggregate;

pub use aggregate::{Aggregator, Count, Mean};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::fmt;
use tracing::{debug, warn};

use crate::action::Reconcile;
use crate::api::{ApiClient, ApiRequest, Page};
use crate::errors::SyncResult;
use crate::model::{Record, RecordId};

/// Where a collection lives: `GET /{resource}?{parent_key}={parent_id}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionQuery {
    pub resource: String,
    pub parent_key: String,
    pub parent_id: RecordId,
}

impl CollectionQuery {
    pub fn new(
        resource: impl Into<String>,
        parent_key: impl Into<String>,
        parent_id: RecordId,
    ) -> Self {
        Self {
            resource: resource.into(),
            parent_key: parent_key.into(),
            parent_id,
        }
    }

    /// Reviews written about `user_id`
    pub fn reviews_of(user_id: RecordId) -> Self {
        Self::new("review", "user2Id", user_id)
    }

    pub fn path(&self) -> String {
        format!("/{}", self.resource.trim_matches('/'))
    }

    pub fn request(&self) -> ApiRequest {
        ApiRequest::get(self.path()).with_query(self.parent_key.clone(), self.parent_id)
    }
}

impl fmt::Display for CollectionQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}={}]", self.resource, self.parent_key, self.parent_id)
    }
}

/// A fetched collection and its derived aggregate
pub struct RemoteCollectionStore<R, A = Mean<R>> {
    api: ApiClient,
    query: CollectionQuery,
    aggregator: A,
    items: Vec<R>,
    count: u64,
    aggregate: f64,
    load_count: u64,
}

impl<R, A> RemoteCollectionStore<R, A>
where
    R: Record + DeserializeOwned,
    A: Aggregator<R>,
{
    /// Create an empty store; nothing is fetched until [`load`](Self::load)
    pub fn new(api: ApiClient, query: CollectionQuery, aggregator: A) -> Self {
        let aggregate = aggregator.aggregate(&[]);
        Self {
            api,
            query,
            aggregator,
            items: Vec::new(),
            count: 0,
            aggregate,
            load_count: 0,
        }
    }

    /// Fetch the collection and replace local state on success
    pub async fn load(&mut self) -> SyncResult<&[R]> {
        let page: Page<R> = match self.api.send(self.query.request()).await {
            Ok(page) => page,
            Err(e) => {
                warn!("Load of {} failed, keeping previous snapshot: {}", self.query, e);
                return Err(e);
            }
        };

        self.replace(page);
        Ok(&self.items)
    }

    fn replace(&mut self, page: Page<R>) {
        self.items = page.items;
        self.count = page.count;
        self.aggregate = self.aggregator.aggregate(&self.items);
        self.load_count += 1;

        debug!(
            "Loaded {} ({} items, aggregate {:.2})",
            self.query,
            self.items.len(),
            self.aggregate
        );
    }

    /// Aggregate of the current collection; `0` when empty
    pub fn aggregate(&self) -> f64 {
        self.aggregate
    }

    pub fn items(&self) -> &[R] {
        &self.items
    }

    pub fn get(&self, id: RecordId) -> Option<&R> {
        self.items.iter().find(|r| r.id() == id)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total the server declared on the last successful load
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Number of successful loads so far
    pub fn load_count(&self) -> u64 {
        self.load_count
    }

    pub fn query(&self) -> &CollectionQuery {
        &self.query
    }
}

#[async_trait]
impl<R, A> Reconcile for RemoteCollectionStore<R, A>
where
    R: Record + DeserializeOwned,
    A: Aggregator<R> + 'static,
{
    async fn reconcile(&mut self) -> SyncResult<()> {
        self.load().await.map(|_| ())
    }
}
