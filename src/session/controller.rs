use super::artifacts::ArtifactSet;
use crate::archive::{ArtifactPublisher, CounterStore};
use crate::capture::CaptureBackend;
use crate::detect::{LiveStatus, LiveStatusSource};
use crate::keywords;
use crate::report;
use crate::transcribe::SpeechToText;
use anyhow::{Context, Result};
use chrono::Local;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info};

/// Pipeline stage at which a session was abandoned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Recording,
    Transcribing,
    Publishing,
    Committing,
}

/// Result of one poll tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    /// Account was not broadcasting (or the poll failed transiently)
    NotLive,
    /// Session fully archived and counter committed
    Completed { sequence: u64 },
    /// Session failed at `stage`; the reserved sequence number was never
    /// committed and will be reused by the next session
    Abandoned { stage: Stage },
}

#[derive(Debug, Clone)]
pub struct ControllerConfig {
    pub account: String,
    /// Lowercase keyword set
    pub keywords: Vec<String>,
    /// Language hint for transcription
    pub language: String,
    pub poll_interval: Duration,
    /// Directory for in-progress recordings
    pub recordings_dir: PathBuf,
}

/// The session lifecycle controller.
///
/// One session at a time, end to end: polling pauses for the full duration
/// of capture, transcription, and upload. The counter is read exactly once
/// at startup and advanced in memory only after a successful commit, so a
/// crash mid-session never consumes a sequence number.
pub struct SessionController {
    config: ControllerConfig,
    detector: Box<dyn LiveStatusSource>,
    capture: Box<dyn CaptureBackend>,
    stt: Arc<dyn SpeechToText>,
    counter: CounterStore,
    publisher: ArtifactPublisher,
    /// Last committed counter value; `committed + 1` is the next reservation
    committed: u64,
    started: bool,
}

impl SessionController {
    pub fn new(
        config: ControllerConfig,
        detector: Box<dyn LiveStatusSource>,
        capture: Box<dyn CaptureBackend>,
        stt: Arc<dyn SpeechToText>,
        counter: CounterStore,
        publisher: ArtifactPublisher,
    ) -> Self {
        Self {
            config,
            detector,
            capture,
            stt,
            counter,
            publisher,
            committed: 0,
            started: false,
        }
    }

    /// Read the last committed counter value. Must run before any session is
    /// processed; a restart that skipped this could reuse already-archived
    /// sequence numbers.
    pub async fn bootstrap(&mut self) -> Result<()> {
        self.committed = self
            .counter
            .read()
            .await
            .context("Failed to read session counter")?;
        self.started = true;

        info!(
            "Controller ready: monitoring @{}, last committed session {}",
            self.config.account, self.committed
        );

        Ok(())
    }

    /// Run forever: poll, process a session when live, sleep, repeat.
    pub async fn run(&mut self) -> Result<()> {
        if !self.started {
            self.bootstrap().await?;
        }

        loop {
            self.tick().await;
            tokio::time::sleep(self.config.poll_interval).await;
        }
    }

    /// One cycle of the polling loop. Per-session failures are logged and
    /// absorbed here; only the outcome is reported.
    pub async fn tick(&mut self) -> SessionOutcome {
        debug!("Checking if @{} is live...", self.config.account);

        let status = match self.detector.poll(&self.config.account).await {
            Ok(status) => status,
            Err(e) => {
                // Transient connectivity loss is steady-state noise for a
                // polling loop; try again next tick.
                debug!("Live poll failed, treating as not live: {:#}", e);
                LiveStatus::NotLive
            }
        };

        match status {
            LiveStatus::NotLive => {
                debug!("@{} is not live", self.config.account);
                SessionOutcome::NotLive
            }
            LiveStatus::Live => self.run_session().await,
        }
    }

    /// Drive one detected session through the full pipeline.
    async fn run_session(&mut self) -> SessionOutcome {
        let start = Local::now();
        // Reserved in memory only; persisted in the Committing stage
        let sequence = self.committed + 1;
        let artifacts = ArtifactSet::new(sequence, &self.config.account, start);

        info!(
            "Live detected! Session {} recording to {}",
            sequence, artifacts.video_name
        );

        let video_path = self.config.recordings_dir.join(&artifacts.video_name);

        if let Err(e) = tokio::fs::create_dir_all(&self.config.recordings_dir).await {
            error!("Cannot create recordings directory: {}", e);
            return SessionOutcome::Abandoned {
                stage: Stage::Recording,
            };
        }

        // Recording: blocks until the broadcast ends
        if let Err(e) = self.capture.record(&self.config.account, &video_path).await {
            error!("Capture failed, abandoning session {}: {:#}", sequence, e);
            return SessionOutcome::Abandoned {
                stage: Stage::Recording,
            };
        }

        // Transcribing. On failure the media file is left behind on purpose,
        // for manual inspection; cleanup only runs after full success.
        info!("Transcribing...");
        let segments = match self
            .stt
            .transcribe(&video_path, &self.config.language)
            .await
        {
            Ok(segments) => segments,
            Err(e) => {
                error!(
                    "Transcription failed, abandoning session {}: {:#}",
                    sequence, e
                );
                return SessionOutcome::Abandoned {
                    stage: Stage::Transcribing,
                };
            }
        };

        // Extracting
        let occurrences = keywords::extract(&segments, &self.config.keywords, start);
        info!(
            "Session {}: {} keyword occurrences",
            sequence,
            occurrences.len()
        );

        let transcript_doc = report::render_transcript(&segments);
        let keyword_csv = report::render_keyword_report(&occurrences);

        // Publishing: all three artifacts must land before the session counts
        if let Err(e) = self
            .publisher
            .publish_session(&artifacts, &video_path, &transcript_doc, &keyword_csv)
            .await
        {
            error!(
                "Publication failed, abandoning session {}: {:#}",
                sequence, e
            );
            return SessionOutcome::Abandoned {
                stage: Stage::Publishing,
            };
        }

        self.publisher.cleanup(&[video_path]).await;

        // Committing: only now does the sequence number become consumed
        if let Err(e) = self.counter.commit(sequence).await {
            error!(
                "Counter commit failed, abandoning session {}: {:#}",
                sequence, e
            );
            return SessionOutcome::Abandoned {
                stage: Stage::Committing,
            };
        }

        self.committed = sequence;

        info!("Session {} archived, resuming polling", sequence);

        SessionOutcome::Completed { sequence }
    }
}
