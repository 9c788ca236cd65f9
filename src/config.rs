use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Config {
    pub monitor: MonitorConfig,
    pub transcription: TranscriptionConfig,
    pub archive: ArchiveConfig,
}

#[derive(Debug, Deserialize)]
pub struct MonitorConfig {
    /// Account to watch, without the leading @
    pub account: String,
    /// Keywords to flag in transcripts (matched lowercase)
    pub keywords: Vec<String>,
    /// Seconds between live-status polls
    pub poll_interval_secs: u64,
    /// Directory for in-progress recordings
    pub recordings_path: String,
}

#[derive(Debug, Deserialize)]
pub struct TranscriptionConfig {
    /// Path to a ggml whisper model file (e.g. ggml-base.bin)
    pub model_path: String,
    /// Language hint passed to whisper (e.g. "en")
    pub language: String,
}

#[derive(Debug, Deserialize)]
pub struct ArchiveConfig {
    /// Remote folder id that holds the date partitions and counter file
    pub root_folder_id: String,
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path))
            .build()?;

        let mut cfg: Config = settings.try_deserialize()?;

        // Keyword matching is case-insensitive; normalize once at startup.
        for kw in &mut cfg.monitor.keywords {
            *kw = kw.trim().to_lowercase();
        }

        Ok(cfg)
    }
}
