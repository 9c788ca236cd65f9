use super::store::{FileId, RemoteStore};
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::path::Path;
use tracing::info;

const API_BASE: &str = "https://www.googleapis.com/drive/v3";
const UPLOAD_BASE: &str = "https://www.googleapis.com/upload/drive/v3";
const FOLDER_MIME: &str = "application/vnd.google-apps.folder";

#[derive(Debug, Deserialize)]
struct FileList {
    #[serde(default)]
    files: Vec<FileRef>,
}

#[derive(Debug, Deserialize)]
struct FileRef {
    id: String,
}

/// Google Drive v3 client. Token acquisition is outside this crate; a
/// bearer access token is supplied at startup.
pub struct DriveStore {
    client: reqwest::Client,
    token: String,
}

impl DriveStore {
    pub fn new(token: String) -> Result<Self> {
        let client = reqwest::Client::builder()
            .build()
            .context("Failed to build HTTP client for Drive")?;

        Ok(Self { client, token })
    }

    async fn query(&self, q: &str) -> Result<Option<FileId>> {
        let list: FileList = self
            .client
            .get(format!("{}/files", API_BASE))
            .bearer_auth(&self.token)
            .query(&[("q", q), ("fields", "files(id)")])
            .send()
            .await
            .context("Drive list request failed")?
            .error_for_status()
            .context("Drive list request rejected")?
            .json()
            .await
            .context("Failed to parse Drive list response")?;

        Ok(list.files.into_iter().next().map(|f| f.id))
    }

    /// Create file metadata only; content is sent in a follow-up media upload.
    async fn create_metadata(&self, body: serde_json::Value) -> Result<FileId> {
        let created: FileRef = self
            .client
            .post(format!("{}/files", API_BASE))
            .bearer_auth(&self.token)
            .query(&[("fields", "id")])
            .json(&body)
            .send()
            .await
            .context("Drive create request failed")?
            .error_for_status()
            .context("Drive create request rejected")?
            .json()
            .await
            .context("Failed to parse Drive create response")?;

        Ok(created.id)
    }

    async fn upload_media(&self, id: &str, mime_type: &str, body: reqwest::Body) -> Result<()> {
        self.client
            .patch(format!("{}/files/{}", UPLOAD_BASE, id))
            .bearer_auth(&self.token)
            .query(&[("uploadType", "media")])
            .header(reqwest::header::CONTENT_TYPE, mime_type)
            .body(body)
            .send()
            .await
            .context("Drive media upload failed")?
            .error_for_status()
            .context("Drive media upload rejected")?;

        Ok(())
    }
}

#[async_trait]
impl RemoteStore for DriveStore {
    async fn find_folder(&self, parent: &str, name: &str) -> Result<Option<FileId>> {
        let q = format!(
            "name='{}' and mimeType='{}' and '{}' in parents and trashed=false",
            name, FOLDER_MIME, parent
        );
        self.query(&q).await
    }

    async fn find_file(&self, parent: &str, name: &str) -> Result<Option<FileId>> {
        let q = format!(
            "name='{}' and '{}' in parents and trashed=false",
            name, parent
        );
        self.query(&q).await
    }

    async fn create_folder(&self, parent: &str, name: &str) -> Result<FileId> {
        let id = self
            .create_metadata(serde_json::json!({
                "name": name,
                "mimeType": FOLDER_MIME,
                "parents": [parent],
            }))
            .await?;

        info!("Created remote folder {} ({})", name, id);

        Ok(id)
    }

    async fn create_file(
        &self,
        parent: &str,
        name: &str,
        mime_type: &str,
        bytes: Vec<u8>,
    ) -> Result<FileId> {
        let id = self
            .create_metadata(serde_json::json!({
                "name": name,
                "parents": [parent],
            }))
            .await?;

        self.upload_media(&id, mime_type, bytes.into()).await?;

        Ok(id)
    }

    async fn upload_from_path(
        &self,
        parent: &str,
        name: &str,
        mime_type: &str,
        local_path: &Path,
    ) -> Result<FileId> {
        let id = self
            .create_metadata(serde_json::json!({
                "name": name,
                "parents": [parent],
            }))
            .await?;

        let file = tokio::fs::File::open(local_path)
            .await
            .with_context(|| format!("Failed to open {}", local_path.display()))?;

        self.upload_media(&id, mime_type, reqwest::Body::from(file))
            .await?;

        Ok(id)
    }

    async fn update_file(&self, id: &str, bytes: Vec<u8>) -> Result<()> {
        self.upload_media(id, "text/plain", bytes.into()).await
    }

    async fn download(&self, id: &str) -> Result<Vec<u8>> {
        let bytes = self
            .client
            .get(format!("{}/files/{}", API_BASE, id))
            .bearer_auth(&self.token)
            .query(&[("alt", "media")])
            .send()
            .await
            .context("Drive download failed")?
            .error_for_status()
            .context("Drive download rejected")?
            .bytes()
            .await
            .context("Failed to read Drive download body")?;

        Ok(bytes.to_vec())
    }
}
