use super::store::{FileId, RemoteStore};
use anyhow::{Context, Result};
use std::sync::Arc;
use std::sync::Mutex;
use tracing::info;

const COUNTER_FILE: &str = "counter.txt";

/// Durable monotonic session counter, stored as a small text file in the
/// archive root.
///
/// `read` tolerates the file not existing yet (a fresh archive starts at 0).
/// `commit` is called strictly after a session's artifacts are confirmed
/// uploaded, so the stored value never runs ahead of what was archived.
pub struct CounterStore {
    store: Arc<dyn RemoteStore>,
    root: String,
    // Remote file id, cached after first lookup so commits skip the query.
    file_id: Mutex<Option<FileId>>,
}

impl CounterStore {
    pub fn new(store: Arc<dyn RemoteStore>, root: String) -> Self {
        Self {
            store,
            root,
            file_id: Mutex::new(None),
        }
    }

    /// Last committed value, or 0 if no counter file exists yet.
    pub async fn read(&self) -> Result<u64> {
        let found = self.store.find_file(&self.root, COUNTER_FILE).await?;

        let Some(id) = found else {
            info!("No counter file in archive; starting at 0");
            return Ok(0);
        };

        let bytes = self.store.download(&id).await?;
        let text = String::from_utf8(bytes).context("Counter file is not UTF-8")?;
        let value: u64 = text
            .trim()
            .parse()
            .with_context(|| format!("Counter file holds non-numeric content: {:?}", text))?;

        *self.file_id.lock().unwrap() = Some(id);

        Ok(value)
    }

    /// Durably persist `value`, replacing any prior counter.
    pub async fn commit(&self, value: u64) -> Result<()> {
        let cached = self.file_id.lock().unwrap().clone();

        let existing = match cached {
            Some(id) => Some(id),
            None => self.store.find_file(&self.root, COUNTER_FILE).await?,
        };

        let bytes = value.to_string().into_bytes();

        match existing {
            Some(id) => {
                self.store.update_file(&id, bytes).await?;
                *self.file_id.lock().unwrap() = Some(id);
            }
            None => {
                let id = self
                    .store
                    .create_file(&self.root, COUNTER_FILE, "text/plain", bytes)
                    .await?;
                *self.file_id.lock().unwrap() = Some(id);
            }
        }

        info!("Committed session counter {}", value);

        Ok(())
    }
}
