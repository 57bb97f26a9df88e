// Copyright (c) 2025 - Cowboy AI, Inc.
//! Matching API Probe
//!
//! Exercises the synchronization core against a live matching API.
//!
//! Run with: cargo run --bin matching-probe -- <command> [args]
//!
//! Commands:
//! - `reviews <user-id>`        list reviews about a user and their average
//! - `toggle <matching-id>`     join a session (or leave it, if joined)
//! - `countdown <rfc3339-time>` print the countdown on every poll tick
//!
//! Configuration comes from the environment:
//! 1. MATCHING_API_URL (default: http://localhost:3000/api/v1)
//! 2. MATCHING_API_TOKEN (optional bearer token)
//! 3. MATCHING_TIMEOUT_SECS, MATCHING_POLL_INTERVAL_MS
//! 4. MATCHING_PROBE_TICKS: ticks before `countdown` exits (default: 3)

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use matching_sync::api::HttpTransport;
use matching_sync::frp::system_clock;
use matching_sync::widgets::star_rating;
use matching_sync::{
    ApiClient, ClientConfig, CollectionQuery, OptimisticActionRunner, PollingRefresher,
    RemoteCollectionStore, TimeWindow, ToggleEndpoints, WidgetScope,
};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (command, arg) = match args.as_slice() {
        [command, arg] => (command.as_str(), arg.as_str()),
        _ => bail!("usage: matching-probe <reviews|toggle|countdown> <arg>"),
    };

    let config = ClientConfig::from_env().context("Invalid configuration")?;
    info!("📋 API: {}", config.base_url);

    match command {
        "reviews" => reviews(&config, parse_id(arg)?).await,
        "toggle" => toggle(&config, parse_id(arg)?).await,
        "countdown" => {
            let event_at = DateTime::parse_from_rfc3339(arg)
                .with_context(|| format!("Not an RFC 3339 timestamp: {}", arg))?
                .with_timezone(&Utc);
            countdown(&config, event_at).await
        }
        other => bail!("unknown command: {}", other),
    }
}

fn parse_id(raw: &str) -> Result<i64> {
    raw.parse()
        .with_context(|| format!("Not a numeric id: {}", raw))
}

fn api_client(config: &ClientConfig) -> Result<ApiClient> {
    let transport = HttpTransport::new(config.clone()).context("Failed to build HTTP client")?;
    Ok(ApiClient::new(Arc::new(transport)))
}

async fn reviews(config: &ClientConfig, user_id: i64) -> Result<()> {
    let mut store = RemoteCollectionStore::new(
        api_client(config)?,
        CollectionQuery::reviews_of(user_id),
        star_rating(),
    );
    store.load().await.context("Failed to load reviews")?;

    for review in store.items() {
        info!(
            "⭐ {:.1} by {} at {}: {}",
            review.star,
            review.user1.name,
            review.created_at.format("%-I:%M %p %Y/%m/%d"),
            review.content
        );
    }
    info!(
        "📊 {} reviews, average {:.2}",
        store.count(),
        store.aggregate()
    );
    Ok(())
}

async fn toggle(config: &ClientConfig, matching_id: i64) -> Result<()> {
    let runner = OptimisticActionRunner::new(
        api_client(config)?,
        ToggleEndpoints::matching(matching_id),
        WidgetScope::new(),
    );

    match runner.toggle().await {
        Ok(membership) => {
            info!("✅ Session {} is now {:?}", matching_id, membership);
            Ok(())
        }
        Err(e) => {
            warn!("❌ Rolled back to {:?}", runner.membership());
            Err(e).context("Toggle failed")
        }
    }
}

async fn countdown(config: &ClientConfig, event_at: DateTime<Utc>) -> Result<()> {
    let ticks: usize = std::env::var("MATCHING_PROBE_TICKS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(3);

    let mut refresher = PollingRefresher::new(system_clock());
    let window = TimeWindow::new(event_at, refresher.now());
    info!("⏱️  {}", window.status());

    let (tx, mut rx) = mpsc::unbounded_channel();
    refresher.start(config.poll_interval(), move |now| {
        let _ = tx.send(now);
    })?;

    for _ in 0..ticks {
        let Some(now) = rx.recv().await else {
            break;
        };
        info!("⏱️  {}", window.at(now).status());
    }

    refresher.stop();
    Ok(())
}
