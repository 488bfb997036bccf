//! # Ingest Module
//!
//! - `tracking` - Tracking JSONL stream -> frame map (with git-lfs pointer guard)
//! - `events` - Dynamic-events CSV -> possession events

pub mod events;
pub mod tracking;

pub use events::{load_events, load_events_path, EventLoad, EventLoadStats};
pub use tracking::{FrameIngestor, IngestOutcome, IngestStats, LFS_POINTER_SIGNATURE};
