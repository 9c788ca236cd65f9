use anyhow::{Context, Result};
use clap::Parser;
use livescribe::{
    ArtifactPublisher, Config, ControllerConfig, CounterStore, DriveStore, RemoteStore,
    SessionController, StreamlinkCapture, TikTokLiveProbe, WhisperTranscriber,
};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

#[derive(Parser)]
#[command(name = "livescribe", about = "Monitor a live account, archive and transcribe broadcasts")]
struct Cli {
    /// Config file (without extension), e.g. config/livescribe
    #[arg(long, default_value = "config/livescribe")]
    config: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let cfg = Config::load(&cli.config)?;

    info!("Livescribe v0.1.0");
    info!(
        "Monitoring @{} every {}s, keywords: {:?}",
        cfg.monitor.account, cfg.monitor.poll_interval_secs, cfg.monitor.keywords
    );

    let token = std::env::var("DRIVE_ACCESS_TOKEN")
        .context("DRIVE_ACCESS_TOKEN must be set for the remote archive")?;

    let store: Arc<dyn RemoteStore> = Arc::new(DriveStore::new(token)?);
    let counter = CounterStore::new(Arc::clone(&store), cfg.archive.root_folder_id.clone());
    let publisher = ArtifactPublisher::new(Arc::clone(&store), cfg.archive.root_folder_id.clone());

    // Model is loaded once and shared across all sessions
    let transcriber = Arc::new(WhisperTranscriber::load(&cfg.transcription.model_path)?);

    let controller_config = ControllerConfig {
        account: cfg.monitor.account.clone(),
        keywords: cfg.monitor.keywords.clone(),
        language: cfg.transcription.language.clone(),
        poll_interval: Duration::from_secs(cfg.monitor.poll_interval_secs),
        recordings_dir: PathBuf::from(&cfg.monitor.recordings_path),
    };

    let mut controller = SessionController::new(
        controller_config,
        Box::new(TikTokLiveProbe::new()?),
        Box::new(StreamlinkCapture::new()),
        transcriber,
        counter,
        publisher,
    );

    controller.run().await
}
