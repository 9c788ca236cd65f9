//! Broadcast capture
//!
//! Drives an external `streamlink` process for the full duration of a live
//! session. The call blocks (from the controller's point of view) until the
//! broadcast ends; success requires both a clean exit and a non-trivial
//! output file on disk.

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use std::path::Path;
use tokio::process::Command;
use tracing::info;

/// Anything smaller than this is a connection stub, not a recording.
const MIN_CAPTURE_BYTES: u64 = 1024;

/// Records one live session to a local media file
#[async_trait]
pub trait CaptureBackend: Send + Sync {
    /// Blocks until the live session ends. On `Ok`, `destination` holds a
    /// complete, playable media file. On `Err`, no assumption is made about
    /// partial output.
    async fn record(&self, account: &str, destination: &Path) -> Result<()>;
}

/// Capture via the `streamlink` CLI
pub struct StreamlinkCapture;

impl StreamlinkCapture {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CaptureBackend for StreamlinkCapture {
    async fn record(&self, account: &str, destination: &Path) -> Result<()> {
        let live_url = format!("https://www.tiktok.com/@{}/live", account);

        info!("Starting capture of {} -> {}", live_url, destination.display());

        let status = Command::new("streamlink")
            .arg("--output")
            .arg(destination)
            .arg(&live_url)
            .arg("best")
            .status()
            .await
            .context("Failed to launch streamlink (is it installed?)")?;

        if !status.success() {
            bail!("streamlink exited with status {}", status);
        }

        let size = tokio::fs::metadata(destination)
            .await
            .context("Capture produced no output file")?
            .len();

        if size < MIN_CAPTURE_BYTES {
            bail!("Capture output is too small to be a recording ({} bytes)", size);
        }

        info!("Capture complete: {} ({} bytes)", destination.display(), size);

        Ok(())
    }
}
