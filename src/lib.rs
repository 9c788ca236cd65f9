pub mod archive;
pub mod capture;
pub mod config;
pub mod detect;
pub mod keywords;
pub mod report;
pub mod session;
pub mod transcribe;

pub use archive::{ArtifactPublisher, CounterStore, DriveStore, FileId, RemoteStore};
pub use capture::{CaptureBackend, StreamlinkCapture};
pub use config::Config;
pub use detect::{LiveStatus, LiveStatusSource, TikTokLiveProbe};
pub use keywords::KeywordOccurrence;
pub use session::{ArtifactSet, ControllerConfig, SessionController, SessionOutcome, Stage};
pub use transcribe::{Segment, SpeechToText, TimedWord, WhisperTranscriber};
