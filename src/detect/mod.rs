//! Live-status detection
//!
//! A single idempotent query per poll tick: is the monitored account
//! broadcasting right now? Network failures are surfaced as errors and
//! downgraded to "not live" by the controller, so a flaky connection never
//! kills the polling loop.

use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::debug;

/// Result of one live-status poll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiveStatus {
    Live,
    NotLive,
}

/// Source of live/not-live signals for one account
#[async_trait]
pub trait LiveStatusSource: Send + Sync {
    async fn poll(&self, account: &str) -> Result<LiveStatus>;
}

/// Polls TikTok's public room-status endpoint.
pub struct TikTokLiveProbe {
    client: reqwest::Client,
}

impl TikTokLiveProbe {
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(15))
            .user_agent("Mozilla/5.0 (X11; Linux x86_64)")
            .build()
            .context("Failed to build HTTP client for live probe")?;

        Ok(Self { client })
    }
}

#[async_trait]
impl LiveStatusSource for TikTokLiveProbe {
    async fn poll(&self, account: &str) -> Result<LiveStatus> {
        let url = format!(
            "https://www.tiktok.com/api-live/user/room/?aid=1988&uniqueId={}",
            account
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .context("Live-status request failed")?
            .error_for_status()
            .context("Live-status request returned an error status")?;

        let body: serde_json::Value = response
            .json()
            .await
            .context("Failed to parse live-status response")?;

        // status 2 = broadcasting, 4 = ended
        let status = body
            .pointer("/data/liveRoom/status")
            .and_then(|v| v.as_i64());

        debug!("Room status for {}: {:?}", account, status);

        match status {
            Some(2) => Ok(LiveStatus::Live),
            _ => Ok(LiveStatus::NotLive),
        }
    }
}
