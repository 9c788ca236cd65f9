use anyhow::Result;
use async_trait::async_trait;
use std::path::Path;

/// Opaque identifier of a remote file or folder
pub type FileId = String;

/// Hierarchical folder-and-file store (Google Drive in production, an
/// in-memory fake in tests).
///
/// Lookups are by name within a parent; uploads either send bytes directly
/// (small documents) or stream from a local path (captured media).
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// Find a folder by name under `parent`.
    async fn find_folder(&self, parent: &str, name: &str) -> Result<Option<FileId>>;

    /// Find a regular file by name under `parent`.
    async fn find_file(&self, parent: &str, name: &str) -> Result<Option<FileId>>;

    /// Create a folder under `parent`.
    async fn create_folder(&self, parent: &str, name: &str) -> Result<FileId>;

    /// Create a file under `parent` with the given bytes.
    async fn create_file(
        &self,
        parent: &str,
        name: &str,
        mime_type: &str,
        bytes: Vec<u8>,
    ) -> Result<FileId>;

    /// Create a file under `parent`, streaming content from a local path.
    async fn upload_from_path(
        &self,
        parent: &str,
        name: &str,
        mime_type: &str,
        local_path: &Path,
    ) -> Result<FileId>;

    /// Replace the content of an existing file.
    async fn update_file(&self, id: &str, bytes: Vec<u8>) -> Result<()>;

    /// Fetch the content of a file.
    async fn download(&self, id: &str) -> Result<Vec<u8>>;
}
