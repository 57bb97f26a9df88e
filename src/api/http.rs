// Copyright (c) 2025 - Cowboy AI, Inc.

//! reqwest-backed [`Transport`]
//!
//! # Example
//!
//! ```rust,no_run
//! use matching_sync::api::{ApiClient, HttpTransport};
//! use matching_sync::ClientConfig;
//! use std::sync::Arc;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ClientConfig::from_env()?;
//! let api = ApiClient::new(Arc::new(HttpTransport::new(config)?));
//! # let _ = api;
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, info, warn};

use super::{ApiRequest, Method, RawResponse, Transport};
use crate::config::ClientConfig;
use crate::errors::{SyncError, SyncResult};

/// HTTP transport for the matching API
pub struct HttpTransport {
    config: ClientConfig,
    client: Client,
}

impl HttpTransport {
    /// Build the HTTP client from configuration
    pub fn new(config: ClientConfig) -> SyncResult<Self> {
        config.validate()?;
        info!("Using matching API at {}", config.base_url);

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(token) = &config.bearer_token {
            let value: HeaderValue = format!("Bearer {}", token).parse().map_err(|e| {
                SyncError::Configuration(format!("Invalid bearer token: {}", e))
            })?;
            headers.insert(AUTHORIZATION, value);
        }

        let client = Client::builder()
            .timeout(config.timeout())
            .default_headers(headers)
            .build()
            .map_err(|e| {
                SyncError::Configuration(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self { config, client })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, request: &ApiRequest) -> SyncResult<RawResponse> {
        let url = self.config.url_for(&request.path_and_query());

        let builder = match request.method {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
            Method::Patch => self.client.patch(&url),
        };
        let builder = match &request.body {
            Some(body) => builder.json(body),
            None => builder,
        };

        let response = builder
            .send()
            .await
            .map_err(|e| SyncError::Fetch(format!("{} failed: {}", request, e)))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| SyncError::Fetch(format!("{} body unreadable: {}", request, e)))?;

        Ok(RawResponse {
            status,
            body: parse_body(&text, status),
        })
    }
}

fn parse_body(text: &str, status: u16) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    match serde_json::from_str(text) {
        Ok(value) => value,
        Err(e) => {
            warn!("Non-JSON body with status {}: {}", status, e);
            debug!("Body: {}", text);
            Value::String(text.to_string())
        }
    }
}
