// Copyright (c) 2025 - Cowboy AI, Inc.
//! Test Fixtures for matching-sync
//!
//! Provides deterministic wire data and a scripted in-memory transport.
//!
//! # Design Principles
//! - All test data is deterministic (no `Utc::now()`)
//! - The transport replays scripted responses in order and records every
//!   request it receives
//! - A gated response holds its request open until the test releases it,
//!   which is how tests observe state while a call is in flight

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::oneshot;

use matching_sync::api::{ApiClient, ApiRequest, Method, RawResponse, Transport};
use matching_sync::model::CurrentUser;
use matching_sync::{SyncError, SyncResult};

// Fixed test timestamp (2026-01-19T12:00:00Z)
pub const FIXED_TIMESTAMP: &str = "2026-01-19T12:00:00Z";

pub const VIEWER_ID: i64 = 3;
pub const SUBJECT_ID: i64 = 9;
pub const MATCHING_ID: i64 = 7;

/// Parse the fixed timestamp
pub fn fixed_timestamp() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(FIXED_TIMESTAMP)
        .expect("Invalid timestamp in test fixture")
        .with_timezone(&Utc)
}

pub fn viewer() -> CurrentUser {
    CurrentUser {
        id: VIEWER_ID,
        name: "Aiko".to_string(),
        avatar: None,
        age: Some(27),
        phone: None,
        address: Some("Shibuya".to_string()),
        description: None,
        nationality: Some("jp".to_string()),
        language_skills: "ja, en".to_string(),
    }
}

/// `{ success: true, data }`
pub fn ok(data: Value) -> Value {
    json!({ "success": true, "data": data })
}

/// `{ success: false, message }`
pub fn rejected(message: &str) -> Value {
    json!({ "success": false, "message": message })
}

pub fn review_json(id: i64, star: f64, author_id: i64) -> Value {
    json!({
        "id": id,
        "star": star,
        "content": format!("review {}", id),
        "user1Id": author_id,
        "user1": { "id": author_id, "name": format!("user {}", author_id) },
        "user2Id": SUBJECT_ID,
        "parentCommentId": null,
        "createdAt": FIXED_TIMESTAMP,
        "updatedAt": FIXED_TIMESTAMP
    })
}

/// `{ success, data: { items, count } }` for the given reviews
pub fn review_page(reviews: Vec<Value>) -> Value {
    let count = reviews.len();
    ok(json!({ "items": reviews, "count": count }))
}

pub fn session_json(matching_date: DateTime<Utc>, participant_ids: &[i64]) -> Value {
    let participants: Vec<Value> = participant_ids
        .iter()
        .map(|id| json!({ "userId": id, "user": { "id": id, "name": format!("user {}", id) } }))
        .collect();
    json!({
        "id": MATCHING_ID,
        "address": "1 Chome Shibuya",
        "desiredFood": "Ramen",
        "conversationTopics": "Football",
        "matchingDate": matching_date.to_rfc3339(),
        "owner": { "id": 1, "name": "Host" },
        "userMatchings": participants
    })
}

enum Scripted {
    Reply(RawResponse),
    Fail(String),
    Gated(oneshot::Receiver<()>, Box<Scripted>),
}

/// Scripted in-memory [`Transport`]
#[derive(Default)]
pub struct FakeTransport {
    script: Mutex<VecDeque<Scripted>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl FakeTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn client(self: &Arc<Self>) -> ApiClient {
        ApiClient::new(self.clone())
    }

    /// Reply 200 with `body`
    pub fn push(&self, body: Value) {
        self.push_scripted(Scripted::Reply(RawResponse::ok(body)));
    }

    pub fn push_status(&self, status: u16, body: Value) {
        self.push_scripted(Scripted::Reply(RawResponse { status, body }));
    }

    /// Fail at the transport level
    pub fn push_network_error(&self, reason: &str) {
        self.push_scripted(Scripted::Fail(reason.to_string()));
    }

    /// Reply 200 with `body`, but only once the returned sender fires
    pub fn push_gated(&self, body: Value) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.push_scripted(Scripted::Gated(
            rx,
            Box::new(Scripted::Reply(RawResponse::ok(body))),
        ));
        tx
    }

    /// Transport failure, delivered once the returned sender fires
    pub fn push_gated_error(&self, reason: &str) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.push_scripted(Scripted::Gated(rx, Box::new(Scripted::Fail(reason.to_string()))));
        tx
    }

    fn push_scripted(&self, scripted: Scripted) {
        self.script.lock().unwrap().push_back(scripted);
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// `"METHOD /path?query"` for every recorded request
    pub fn request_lines(&self) -> Vec<String> {
        self.requests().iter().map(|r| r.to_string()).collect()
    }

    pub fn count(&self, method: Method) -> usize {
        self.requests()
            .iter()
            .filter(|r| r.method == method)
            .count()
    }

    /// Yield until `n` requests have arrived
    pub async fn wait_for_requests(&self, n: usize) {
        for _ in 0..10_000 {
            if self.requests.lock().unwrap().len() >= n {
                return;
            }
            tokio::task::yield_now().await;
        }
        panic!("expected {} requests, saw {:?}", n, self.request_lines());
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn execute(&self, request: &ApiRequest) -> SyncResult<RawResponse> {
        self.requests.lock().unwrap().push(request.clone());
        let scripted = self.script.lock().unwrap().pop_front();

        let mut scripted = match scripted {
            Some(s) => s,
            None => return Err(SyncError::Fetch(format!("no scripted response for {}", request))),
        };

        if let Scripted::Gated(gate, inner) = scripted {
            let _ = tokio::time::timeout(Duration::from_secs(3600), gate).await;
            scripted = *inner;
        }

        match scripted {
            Scripted::Reply(raw) => Ok(raw),
            Scripted::Fail(reason) => Err(SyncError::Fetch(reason)),
            Scripted::Gated(..) => Err(SyncError::Fetch("nested gate".to_string())),
        }
    }
}
