use super::store::{FileId, RemoteStore};
use crate::session::ArtifactSet;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

const VIDEO_MIME: &str = "video/mp4";
const TRANSCRIPT_MIME: &str = "text/plain";
const REPORT_MIME: &str = "text/csv";

/// Uploads one session's artifacts into the date-partitioned archive.
pub struct ArtifactPublisher {
    store: Arc<dyn RemoteStore>,
    root: String,
}

impl ArtifactPublisher {
    pub fn new(store: Arc<dyn RemoteStore>, root: String) -> Self {
        Self { store, root }
    }

    /// Get or create the folder for a date partition.
    ///
    /// Lookup-then-create is racy under concurrent writers; when the create
    /// fails we re-query before giving up, so a folder created by someone
    /// else between our two calls counts as success.
    pub async fn ensure_folder(&self, date_partition: &str) -> Result<FileId> {
        if let Some(id) = self.store.find_folder(&self.root, date_partition).await? {
            return Ok(id);
        }

        match self.store.create_folder(&self.root, date_partition).await {
            Ok(id) => Ok(id),
            Err(create_err) => match self.store.find_folder(&self.root, date_partition).await? {
                Some(id) => Ok(id),
                None => Err(create_err),
            },
        }
    }

    /// Upload video, transcript, and keyword report. Publication is only
    /// successful once all three are committed; a partial upload leaves
    /// self-describing orphans that an idempotent retry overwrites by name.
    pub async fn publish_session(
        &self,
        artifacts: &ArtifactSet,
        video_path: &Path,
        transcript_doc: &str,
        keyword_csv: &str,
    ) -> Result<()> {
        let folder = self
            .ensure_folder(&artifacts.date_partition)
            .await
            .context("Failed to resolve date-partition folder")?;

        self.store
            .upload_from_path(&folder, &artifacts.video_name, VIDEO_MIME, video_path)
            .await
            .context("Failed to upload video")?;
        info!("Uploaded {}", artifacts.video_name);

        self.store
            .create_file(
                &folder,
                &artifacts.transcript_name,
                TRANSCRIPT_MIME,
                transcript_doc.as_bytes().to_vec(),
            )
            .await
            .context("Failed to upload transcript")?;
        info!("Uploaded {}", artifacts.transcript_name);

        self.store
            .create_file(
                &folder,
                &artifacts.report_name,
                REPORT_MIME,
                keyword_csv.as_bytes().to_vec(),
            )
            .await
            .context("Failed to upload keyword report")?;
        info!("Uploaded {}", artifacts.report_name);

        Ok(())
    }

    /// Best-effort removal of local temporaries after a successful publish.
    pub async fn cleanup(&self, local_paths: &[PathBuf]) {
        for path in local_paths {
            if let Err(e) = tokio::fs::remove_file(path).await {
                warn!("Failed to remove {}: {}", path.display(), e);
            }
        }
    }
}
