// Copyright (c) 2025 - Cowboy AI, Inc.

//! API boundary
//!
//! Every response from the matching API is wrapped in the same envelope:
//!
//! ```text
//! { "success": bool, "data": T?, "message": string? }
//! ```
//!
//! The envelope is decoded exactly once, here, into a [`SyncResult`]. Callers
//! never look at the `success` flag themselves.
//!
//! The [`Transport`] trait is the seam between the core and the network. The
//! production implementation is [`HttpTransport`] (reqwest); tests script a
//! transport in memory.

#[cfg(feature = "http")]
pub mod http;

#[cfg(feature = "http")]
pub use http::HttpTransport;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

use crate::errors::{SyncError, SyncResult};

/// HTTP verbs used by the matching API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Patch,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::Get => write!(f, "GET"),
            Method::Post => write!(f, "POST"),
            Method::Patch => write!(f, "PATCH"),
        }
    }
}

/// A transport-agnostic API request
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Path relative to the API base URL, e.g. "/matching/join/7"
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self {
            method: Method::Post,
            path: path.into(),
            query: Vec::new(),
            body: Some(body),
        }
    }

    pub fn patch(path: impl Into<String>, body: Option<Value>) -> Self {
        Self {
            method: Method::Patch,
            path: path.into(),
            query: Vec::new(),
            body,
        }
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    /// Path with the URL-encoded query string appended
    pub fn path_and_query(&self) -> String {
        if self.query.is_empty() {
            return self.path.clone();
        }
        let query = self
            .query
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");
        format!("{}?{}", self.path, query)
    }
}

impl fmt::Display for ApiRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.path_and_query())
    }
}

/// Undecoded transport response
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    pub status: u16,
    /// Parsed JSON body, `Value::Null` when the body was empty
    pub body: Value,
}

impl RawResponse {
    pub fn ok(body: Value) -> Self {
        Self { status: 200, body }
    }

    pub fn is_success_status(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Network seam for the synchronization core
#[async_trait]
pub trait Transport: Send + Sync {
    /// Perform the request; transport failures are [`SyncError::Fetch`]
    async fn execute(&self, request: &ApiRequest) -> SyncResult<RawResponse>;
}

/// The `{ success, data, message }` wrapper every endpoint returns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiEnvelope<T = Value> {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiEnvelope<T> {
    /// Collapse the envelope into a tagged result
    ///
    /// `success = false` (or missing) is an [`SyncError::Application`]
    /// carrying the server message when there is one.
    pub fn into_result(self) -> SyncResult<Option<T>> {
        if self.success {
            Ok(self.data)
        } else {
            Err(SyncError::Application(
                self.message
                    .unwrap_or_else(|| "request was not successful".to_string()),
            ))
        }
    }
}

/// Paged list payload: `{ items, count }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    #[serde(default)]
    pub count: u64,
}

/// Decode a raw response into the typed payload
pub fn decode_response<T: DeserializeOwned>(raw: RawResponse) -> SyncResult<T> {
    let status = raw.status;
    let success_status = raw.is_success_status();
    let envelope = serde_json::from_value::<ApiEnvelope<Value>>(raw.body);

    if !success_status {
        return match envelope {
            Ok(env) if !env.success => Err(SyncError::Application(
                env.message.unwrap_or_else(|| format!("HTTP {status}")),
            )),
            _ => Err(SyncError::Fetch(format!("HTTP {status}"))),
        };
    }

    let envelope = envelope.map_err(|e| {
        SyncError::Application(format!("response carried no success envelope: {e}"))
    })?;
    let data = envelope.into_result()?.unwrap_or(Value::Null);
    serde_json::from_value(data).map_err(|e| SyncError::Decode(e.to_string()))
}

/// Typed client over a [`Transport`]
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient").finish_non_exhaustive()
    }
}

impl ApiClient {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Send a request and decode the envelope payload as `T`
    pub async fn send<T: DeserializeOwned>(&self, request: ApiRequest) -> SyncResult<T> {
        debug!("-> {}", request);
        let raw = self.transport.execute(&request).await?;
        debug!("<- {} ({})", request, raw.status);
        decode_response(raw)
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> SyncResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(ApiRequest::post(path, serde_json::to_value(body)?))
            .await
    }

    pub async fn patch<B, T>(&self, path: &str, body: Option<&B>) -> SyncResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = body.map(serde_json::to_value).transpose()?;
        self.send(ApiRequest::patch(path, body)).await
    }
}
