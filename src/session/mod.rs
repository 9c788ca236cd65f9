//! Session lifecycle
//!
//! This module provides the orchestrating state machine that turns live
//! detections into archived sessions:
//! - Polling the live detector on a fixed interval
//! - Driving capture -> transcription -> extraction -> publication per session
//! - Reserving and committing the durable session counter
//! - Deterministic artifact naming that makes retries idempotent

mod artifacts;
mod controller;

pub use artifacts::ArtifactSet;
pub use controller::{ControllerConfig, SessionController, SessionOutcome, Stage};
