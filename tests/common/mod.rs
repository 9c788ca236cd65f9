// Shared in-memory fakes for the remote store and the external
// collaborators (live probe, capture tool, speech-to-text model).

#![allow(dead_code)]

use anyhow::{anyhow, bail, Result};
use async_trait::async_trait;
use livescribe::{CaptureBackend, FileId, LiveStatus, LiveStatusSource, RemoteStore, Segment, SpeechToText, TimedWord};
use std::collections::{HashMap, VecDeque};
use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone)]
pub struct Node {
    pub parent: String,
    pub name: String,
    pub folder: bool,
    pub mime: String,
    pub bytes: Vec<u8>,
}

#[derive(Default)]
struct Inner {
    next_id: u64,
    nodes: HashMap<FileId, Node>,
}

/// Hierarchical in-memory stand-in for the Drive store, with failure
/// injection for upload and folder-creation paths.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
    fail_uploads: AtomicBool,
    folder_create_conflict: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Make every file creation/upload fail (publication failure scenario).
    pub fn set_fail_uploads(&self, fail: bool) {
        self.fail_uploads.store(fail, Ordering::SeqCst);
    }

    /// Make `create_folder` insert the folder but still report an
    /// "already exists" error, simulating a lost lookup-then-create race.
    pub fn set_folder_create_conflict(&self, conflict: bool) {
        self.folder_create_conflict.store(conflict, Ordering::SeqCst);
    }

    pub fn folder_count(&self, parent: &str, name: &str) -> usize {
        let inner = self.inner.lock().unwrap();
        inner
            .nodes
            .values()
            .filter(|n| n.folder && n.parent == parent && n.name == name)
            .count()
    }

    pub fn file_names_in(&self, parent: &str) -> Vec<String> {
        let inner = self.inner.lock().unwrap();
        let mut names: Vec<String> = inner
            .nodes
            .values()
            .filter(|n| !n.folder && n.parent == parent)
            .map(|n| n.name.clone())
            .collect();
        names.sort();
        names
    }

    pub fn file_bytes(&self, parent: &str, name: &str) -> Option<Vec<u8>> {
        let inner = self.inner.lock().unwrap();
        inner
            .nodes
            .values()
            .find(|n| !n.folder && n.parent == parent && n.name == name)
            .map(|n| n.bytes.clone())
    }

    fn find(&self, parent: &str, name: &str, folder: bool) -> Option<FileId> {
        let inner = self.inner.lock().unwrap();
        inner
            .nodes
            .iter()
            .find(|(_, n)| n.folder == folder && n.parent == parent && n.name == name)
            .map(|(id, _)| id.clone())
    }

    fn insert(&self, node: Node) -> FileId {
        let mut inner = self.inner.lock().unwrap();
        inner.next_id += 1;
        let id = format!("id-{}", inner.next_id);
        inner.nodes.insert(id.clone(), node);
        id
    }
}

#[async_trait]
impl RemoteStore for MemoryStore {
    async fn find_folder(&self, parent: &str, name: &str) -> Result<Option<FileId>> {
        Ok(self.find(parent, name, true))
    }

    async fn find_file(&self, parent: &str, name: &str) -> Result<Option<FileId>> {
        Ok(self.find(parent, name, false))
    }

    async fn create_folder(&self, parent: &str, name: &str) -> Result<FileId> {
        let id = self.insert(Node {
            parent: parent.to_string(),
            name: name.to_string(),
            folder: true,
            mime: String::new(),
            bytes: Vec::new(),
        });

        if self.folder_create_conflict.load(Ordering::SeqCst) {
            bail!("folder already exists");
        }

        Ok(id)
    }

    async fn create_file(
        &self,
        parent: &str,
        name: &str,
        mime_type: &str,
        bytes: Vec<u8>,
    ) -> Result<FileId> {
        if self.fail_uploads.load(Ordering::SeqCst) {
            bail!("injected upload failure");
        }

        Ok(self.insert(Node {
            parent: parent.to_string(),
            name: name.to_string(),
            folder: false,
            mime: mime_type.to_string(),
            bytes,
        }))
    }

    async fn upload_from_path(
        &self,
        parent: &str,
        name: &str,
        mime_type: &str,
        local_path: &Path,
    ) -> Result<FileId> {
        let bytes = tokio::fs::read(local_path).await?;
        self.create_file(parent, name, mime_type, bytes).await
    }

    async fn update_file(&self, id: &str, bytes: Vec<u8>) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();
        let node = inner
            .nodes
            .get_mut(id)
            .ok_or_else(|| anyhow!("no such file: {}", id))?;
        node.bytes = bytes;
        Ok(())
    }

    async fn download(&self, id: &str) -> Result<Vec<u8>> {
        let inner = self.inner.lock().unwrap();
        inner
            .nodes
            .get(id)
            .map(|n| n.bytes.clone())
            .ok_or_else(|| anyhow!("no such file: {}", id))
    }
}

/// Live detector that replays a scripted sequence of poll results, then
/// reports not-live forever.
pub struct ScriptedDetector {
    script: Mutex<VecDeque<Result<LiveStatus>>>,
    polls: Arc<AtomicUsize>,
}

impl ScriptedDetector {
    pub fn new(script: Vec<Result<LiveStatus>>) -> (Self, Arc<AtomicUsize>) {
        let polls = Arc::new(AtomicUsize::new(0));
        (
            Self {
                script: Mutex::new(script.into()),
                polls: Arc::clone(&polls),
            },
            polls,
        )
    }
}

#[async_trait]
impl LiveStatusSource for ScriptedDetector {
    async fn poll(&self, _account: &str) -> Result<LiveStatus> {
        self.polls.fetch_add(1, Ordering::SeqCst);
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok(LiveStatus::NotLive))
    }
}

/// Capture backend that writes fixed bytes to the destination, or fails.
/// Call count and failure switch are shared handles so tests keep control
/// after the backend is boxed into the controller.
pub struct FakeCapture {
    bytes: Vec<u8>,
    fail: Arc<AtomicBool>,
    calls: Arc<AtomicUsize>,
}

impl FakeCapture {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self {
            bytes,
            fail: Arc::new(AtomicBool::new(false)),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn calls_handle(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }

    pub fn fail_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.fail)
    }
}

#[async_trait]
impl CaptureBackend for FakeCapture {
    async fn record(&self, _account: &str, destination: &Path) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if self.fail.load(Ordering::SeqCst) {
            bail!("stream ended abnormally");
        }

        tokio::fs::write(destination, &self.bytes).await?;
        Ok(())
    }
}

/// Speech-to-text that returns a canned transcript.
pub struct FakeTranscriber {
    segments: Vec<Segment>,
    fail: bool,
}

impl FakeTranscriber {
    pub fn new(segments: Vec<Segment>) -> Self {
        Self {
            segments,
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            segments: Vec::new(),
            fail: true,
        }
    }
}

#[async_trait]
impl SpeechToText for FakeTranscriber {
    async fn transcribe(&self, _media_path: &Path, _language: &str) -> Result<Vec<Segment>> {
        if self.fail {
            bail!("decode error");
        }
        Ok(self.segments.clone())
    }
}

/// "call wally now" with wally at 0.4s, the canonical happy-path transcript.
pub fn wally_transcript() -> Vec<Segment> {
    vec![Segment {
        text: "call wally now".to_string(),
        words: vec![
            TimedWord {
                text: "call".to_string(),
                start_secs: 0.0,
            },
            TimedWord {
                text: "wally".to_string(),
                start_secs: 0.4,
            },
            TimedWord {
                text: "now".to_string(),
                start_secs: 0.9,
            },
        ],
    }]
}
