//! Batch transcription of captured media
//!
//! The whisper model is loaded once per process and reused across sessions
//! as shared read-only state. Transcription is post-capture batch work, not
//! streaming: the whole recording goes in, a time-aligned transcript comes
//! out.

mod whisper;

pub use whisper::WhisperTranscriber;

use anyhow::Result;
use async_trait::async_trait;
use std::path::Path;

/// One transcribed word with its offset from the start of the recording
#[derive(Debug, Clone, PartialEq)]
pub struct TimedWord {
    pub text: String,
    pub start_secs: f64,
}

/// One utterance: the sentence text plus its words in order
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub text: String,
    pub words: Vec<TimedWord>,
}

/// Converts a recorded media file into an ordered, time-aligned transcript
#[async_trait]
pub trait SpeechToText: Send + Sync {
    async fn transcribe(&self, media_path: &Path, language: &str) -> Result<Vec<Segment>>;
}
