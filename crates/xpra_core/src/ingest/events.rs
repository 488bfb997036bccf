//! Dynamic-events CSV -> [`PossessionEvent`] list.
//!
//! Rows that cannot be read as an event (missing frame bounds, broken
//! quoting) are skipped and counted; only failing to read the source at all
//! is an error.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Serialize;
use tracing::{debug, info};

use crate::error::EventLoadError;
use crate::models::PossessionEvent;

/// Row accounting for one event load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EventLoadStats {
    pub total_rows: u64,
    pub parsed: u64,
    pub failed: u64,
}

/// Events read from one match's event feed.
#[derive(Debug, Clone, Default)]
pub struct EventLoad {
    pub events: Vec<PossessionEvent>,
    pub stats: EventLoadStats,
}

impl EventLoad {
    /// Keep only events whose `event_type` is one of `types`.
    ///
    /// An empty filter keeps everything.
    pub fn retain_types(&mut self, types: &[String]) {
        if types.is_empty() {
            return;
        }
        self.events.retain(|event| {
            event
                .event_type
                .as_deref()
                .is_some_and(|t| types.iter().any(|wanted| wanted == t))
        });
    }
}

/// Parse a CSV event feed with a header row. Unknown columns are ignored.
pub fn load_events<R: Read>(reader: R) -> Result<EventLoad, EventLoadError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    // Fail early when even the header cannot be read
    csv_reader.headers()?;

    let mut load = EventLoad::default();
    for (row, result) in csv_reader.deserialize::<PossessionEvent>().enumerate() {
        load.stats.total_rows += 1;
        match result {
            Ok(event) => {
                load.stats.parsed += 1;
                load.events.push(event);
            }
            Err(err) => {
                load.stats.failed += 1;
                debug!(row = row + 1, error = %err, "skipping unreadable event row");
            }
        }
    }

    info!(
        events = load.stats.parsed,
        failed = load.stats.failed,
        "events loaded"
    );
    Ok(load)
}

pub fn load_events_path(path: &Path) -> Result<EventLoad, EventLoadError> {
    let file = File::open(path)?;
    load_events(file)
}
