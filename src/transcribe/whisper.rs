use super::{Segment, SpeechToText, TimedWord};
use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::process::Command;
use tracing::{info, warn};
use whisper_rs::{FullParams, SamplingStrategy, WhisperContext, WhisperContextParameters};

/// Whisper expects 16kHz mono PCM
const WHISPER_SAMPLE_RATE: u32 = 16000;

/// whisper.cpp token timestamps are in units of 10ms
const TOKEN_TIME_UNIT_SECS: f64 = 0.01;

/// Local whisper.cpp transcription via whisper-rs.
///
/// The context holds the loaded model; it is immutable after load and safe
/// to share across sessions.
pub struct WhisperTranscriber {
    ctx: Arc<WhisperContext>,
}

impl WhisperTranscriber {
    /// Load a ggml model file. Done once at startup; a missing model is a
    /// fatal configuration error.
    pub fn load(model_path: &str) -> Result<Self> {
        if !Path::new(model_path).exists() {
            bail!("Whisper model not found at: {}", model_path);
        }

        info!("Loading whisper model from {}", model_path);

        let ctx = WhisperContext::new_with_params(model_path, WhisperContextParameters::default())
            .context("Failed to load whisper model")?;

        Ok(Self { ctx: Arc::new(ctx) })
    }

    /// Extract the audio track as 16kHz mono WAV next to the media file.
    async fn extract_audio(media_path: &Path) -> Result<PathBuf> {
        let wav_path = media_path.with_extension("wav");

        let status = Command::new("ffmpeg")
            .arg("-y")
            .arg("-i")
            .arg(media_path)
            .arg("-vn")
            .arg("-ar")
            .arg(WHISPER_SAMPLE_RATE.to_string())
            .arg("-ac")
            .arg("1")
            .arg("-f")
            .arg("wav")
            .arg(&wav_path)
            .status()
            .await
            .context("Failed to launch ffmpeg (is it installed?)")?;

        if !status.success() {
            bail!("ffmpeg audio extraction exited with status {}", status);
        }

        Ok(wav_path)
    }

    fn read_samples(wav_path: &Path) -> Result<Vec<f32>> {
        let reader = hound::WavReader::open(wav_path)
            .context("Failed to open extracted audio")?;

        let pcm: Vec<i16> = reader
            .into_samples::<i16>()
            .collect::<Result<Vec<_>, _>>()
            .context("Failed to read audio samples")?;

        let mut samples = vec![0.0f32; pcm.len()];
        whisper_rs::convert_integer_to_float_audio(&pcm, &mut samples)
            .context("Failed to convert PCM to float")?;

        Ok(samples)
    }

    fn run_model(ctx: &WhisperContext, samples: &[f32], language: &str) -> Result<Vec<Segment>> {
        let mut state = ctx
            .create_state()
            .context("Failed to create whisper state")?;

        let mut params = FullParams::new(SamplingStrategy::Greedy { best_of: 1 });
        params.set_language(Some(language));
        params.set_print_special(false);
        params.set_print_progress(false);
        params.set_print_realtime(false);
        params.set_print_timestamps(false);
        params.set_suppress_blank(true);
        params.set_token_timestamps(true);

        state
            .full(params, samples)
            .context("Transcription failed")?;

        let num_segments = state.full_n_segments().context("Failed to read segments")?;

        let mut segments = Vec::with_capacity(num_segments as usize);
        for i in 0..num_segments {
            let text = state
                .full_get_segment_text_lossy(i)
                .context("Failed to read segment text")?;

            let words = Self::collect_words(&state, i)?;

            segments.push(Segment {
                text: text.trim().to_string(),
                words,
            });
        }

        Ok(segments)
    }

    /// Group token timestamps into words. Whisper tokens open a new word
    /// with a leading space; special tokens ("[_BEG_]" etc.) carry no text.
    fn collect_words(state: &whisper_rs::WhisperState, segment: i32) -> Result<Vec<TimedWord>> {
        let n_tokens = state
            .full_n_tokens(segment)
            .context("Failed to read token count")?;

        let mut words: Vec<TimedWord> = Vec::new();

        for j in 0..n_tokens {
            let token_text = match state.full_get_token_text(segment, j) {
                Ok(t) => t,
                Err(_) => continue, // non-UTF8 byte fragment, no word boundary info
            };

            if token_text.starts_with("[_") {
                continue;
            }

            let data = state
                .full_get_token_data(segment, j)
                .context("Failed to read token timing")?;
            let start_secs = data.t0 as f64 * TOKEN_TIME_UNIT_SECS;

            let opens_word = token_text.starts_with(' ') || words.is_empty();
            if opens_word {
                words.push(TimedWord {
                    text: token_text.trim_start().to_string(),
                    start_secs,
                });
            } else if let Some(last) = words.last_mut() {
                last.text.push_str(&token_text);
            }
        }

        words.retain(|w| !w.text.is_empty());

        Ok(words)
    }
}

#[async_trait]
impl SpeechToText for WhisperTranscriber {
    async fn transcribe(&self, media_path: &Path, language: &str) -> Result<Vec<Segment>> {
        info!("Transcribing {}", media_path.display());

        let wav_path = Self::extract_audio(media_path).await?;
        let samples = Self::read_samples(&wav_path)?;

        let ctx = Arc::clone(&self.ctx);
        let language = language.to_string();

        // whisper is CPU-bound; keep it off the async runtime threads
        let segments = tokio::task::spawn_blocking(move || {
            Self::run_model(&ctx, &samples, &language)
        })
        .await
        .context("Transcription task panicked")??;

        if let Err(e) = tokio::fs::remove_file(&wav_path).await {
            warn!("Failed to remove extracted audio {}: {}", wav_path.display(), e);
        }

        info!("Transcription complete: {} segments", segments.len());

        Ok(segments)
    }
}
