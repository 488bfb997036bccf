//! # Tracking Ingestor
//!
//! Newline-delimited JSON tracking feed -> [`FrameMap`].
//!
//! ## Algorithm
//! 1. Read a fixed-size prefix and reject the stream if it is a git-lfs
//!    pointer stub instead of real tracking payload
//! 2. Re-chain the prefix in front of the remaining stream
//! 3. Decode one record per line; skip blank, undecodable and
//!    player-less lines
//! 4. Last write wins on repeated frame numbers
//!
//! A record is accepted or skipped as a whole: one player with a missing or
//! `null` coordinate makes the entire line malformed, and none of that
//! frame's players are kept.
//!
//! The stream is consumed line by line; it is never buffered whole.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Cursor, Read};
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, info, info_span, warn};

use crate::config::{AnalysisConfig, MAX_PROBE_LEN, MIN_PROBE_LEN};
use crate::error::IngestError;
use crate::models::{CoordinateOrigin, FrameMap, PlayerSample, Roster, UNKNOWN_ID};

/// Text a large-file storage server returns instead of the real object.
pub const LFS_POINTER_SIGNATURE: &[u8] = b"version https://git-lfs";

/// Line-level accounting for one ingestion run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IngestStats {
    pub total_lines: u64,
    pub blank_lines: u64,
    /// Lines stored in the frame map (duplicates included)
    pub parsed_frames: u64,
    /// Lines that were not valid frame records
    pub malformed_lines: u64,
    /// Valid records without a `player_data` list
    pub missing_player_data: u64,
    /// Records that overwrote an earlier record of the same frame
    pub duplicate_frames: u64,
    /// Samples whose team id was filled in from the roster
    pub backfilled_teams: u64,
}

/// Result of a successful ingestion.
#[derive(Debug, Clone, Default)]
pub struct IngestOutcome {
    pub frames: FrameMap,
    pub stats: IngestStats,
}

#[derive(Deserialize)]
struct FrameRecord {
    frame: u64,
    #[serde(default)]
    player_data: Option<Vec<TrackedPlayer>>,
}

#[derive(Deserialize)]
struct TrackedPlayer {
    #[serde(default = "unknown_id", deserialize_with = "nullable_id")]
    player_id: i64,
    #[serde(default = "unknown_id", deserialize_with = "nullable_id")]
    team_id: i64,
    x: f64,
    y: f64,
}

fn unknown_id() -> i64 {
    UNKNOWN_ID
}

fn nullable_id<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<i64>::deserialize(deserializer)?.unwrap_or(UNKNOWN_ID))
}

/// Builds a [`FrameMap`] from a tracking byte stream.
#[derive(Debug, Clone)]
pub struct FrameIngestor<'a> {
    probe_len: usize,
    origin: CoordinateOrigin,
    roster: Option<&'a Roster>,
    match_id: Option<&'a str>,
}

impl Default for FrameIngestor<'_> {
    fn default() -> Self {
        Self {
            probe_len: MIN_PROBE_LEN,
            origin: CoordinateOrigin::Corner,
            roster: None,
            match_id: None,
        }
    }
}

impl<'a> FrameIngestor<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &'a AnalysisConfig) -> Self {
        Self {
            probe_len: config.ingest.probe_len.clamp(MIN_PROBE_LEN, MAX_PROBE_LEN),
            origin: config.ingest.origin,
            roster: None,
            match_id: config.match_id.as_deref(),
        }
    }

    /// Fill unaffiliated samples' team ids from match metadata.
    pub fn with_roster(mut self, roster: &'a Roster) -> Self {
        self.roster = Some(roster);
        self
    }

    pub fn with_origin(mut self, origin: CoordinateOrigin) -> Self {
        self.origin = origin;
        self
    }

    /// Ingest a whole stream.
    ///
    /// Fails with [`IngestError::CorruptedStream`] before any parsing when the
    /// prefix carries a git-lfs pointer. An empty or short stream is not an
    /// error and yields an empty map.
    pub fn ingest<R: Read>(&self, mut reader: R) -> Result<IngestOutcome, IngestError> {
        let span = info_span!("ingest_tracking", match_id = self.match_id.unwrap_or("-"));
        let _enter = span.enter();

        let prefix = read_prefix(&mut reader, self.probe_len)?;
        if is_lfs_pointer(&prefix) {
            warn!(probe_len = self.probe_len, "git-lfs pointer detected instead of tracking data");
            return Err(IngestError::CorruptedStream { probe_len: self.probe_len });
        }

        let mut stream = BufReader::new(Cursor::new(prefix).chain(reader));
        let mut outcome = IngestOutcome::default();
        let mut line = Vec::new();

        loop {
            line.clear();
            if stream.read_until(b'\n', &mut line)? == 0 {
                break;
            }
            outcome.stats.total_lines += 1;
            self.ingest_line(&line, &mut outcome);
        }

        info!(
            frames = outcome.frames.len(),
            lines = outcome.stats.total_lines,
            malformed = outcome.stats.malformed_lines,
            missing_player_data = outcome.stats.missing_player_data,
            duplicates = outcome.stats.duplicate_frames,
            "tracking ingested"
        );
        Ok(outcome)
    }

    /// Open and ingest a tracking file.
    pub fn ingest_path(&self, path: &Path) -> Result<IngestOutcome, IngestError> {
        let file = File::open(path)?;
        self.ingest(file)
    }

    /// Ingest, degrading every failure to an empty map.
    ///
    /// Batch callers use this so one bad match does not stop the run.
    pub fn ingest_or_empty<R: Read>(&self, reader: R) -> FrameMap {
        match self.ingest(reader) {
            Ok(outcome) => outcome.frames,
            Err(err) => {
                warn!(error = %err, "tracking ingestion failed, continuing without frames");
                FrameMap::new()
            }
        }
    }

    fn ingest_line(&self, raw: &[u8], outcome: &mut IngestOutcome) {
        let line = raw.trim_ascii();
        if line.is_empty() {
            outcome.stats.blank_lines += 1;
            return;
        }

        let record: FrameRecord = match serde_json::from_slice(line) {
            Ok(record) => record,
            Err(err) => {
                debug!(line = outcome.stats.total_lines, error = %err, "skipping malformed tracking line");
                outcome.stats.malformed_lines += 1;
                return;
            }
        };

        let Some(players) = record.player_data else {
            outcome.stats.missing_player_data += 1;
            return;
        };

        let samples = players
            .into_iter()
            .map(|p| self.to_sample(p, &mut outcome.stats))
            .collect();

        if outcome.frames.insert(record.frame, samples).is_some() {
            outcome.stats.duplicate_frames += 1;
        }
        outcome.stats.parsed_frames += 1;
    }

    fn to_sample(&self, player: TrackedPlayer, stats: &mut IngestStats) -> PlayerSample {
        let (x, y) = self.origin.to_corner(player.x, player.y);
        let mut team_id = player.team_id;
        if team_id == UNKNOWN_ID && player.player_id != UNKNOWN_ID {
            if let Some(team) = self.roster.and_then(|r| r.team_of(player.player_id)) {
                team_id = team;
                stats.backfilled_teams += 1;
            }
        }
        PlayerSample::new(player.player_id, team_id, x, y)
    }
}

fn read_prefix<R: Read>(reader: &mut R, len: usize) -> io::Result<Vec<u8>> {
    let mut prefix = Vec::new();
    reader.by_ref().take(len as u64).read_to_end(&mut prefix)?;
    Ok(prefix)
}

fn is_lfs_pointer(prefix: &[u8]) -> bool {
    prefix
        .windows(LFS_POINTER_SIGNATURE.len())
        .any(|window| window == LFS_POINTER_SIGNATURE)
}
