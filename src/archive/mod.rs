//! Remote archive
//!
//! This module owns everything that touches the remote store: the store
//! client itself, the durable session counter, and the publisher that puts
//! each session's artifacts into its date-partitioned folder.

mod counter;
mod drive;
mod publisher;
mod store;

pub use counter::CounterStore;
pub use drive::DriveStore;
pub use publisher::ArtifactPublisher;
pub use store::{FileId, RemoteStore};
