//! Tracking data model: player samples and the frame map.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Sentinel for "ball / unknown player" and "unaffiliated" team ids.
pub const UNKNOWN_ID: i64 = -1;

/// One player's position at one frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerSample {
    /// Player id (-1 = ball or unknown)
    pub player_id: i64,
    /// Team id (-1 = unaffiliated / ball)
    pub team_id: i64,
    /// Length axis in meters
    pub x: f64,
    /// Width axis in meters
    pub y: f64,
}

impl PlayerSample {
    pub fn new(player_id: i64, team_id: i64, x: f64, y: f64) -> Self {
        Self { player_id, team_id, x, y }
    }

    /// Both ids are real (not the ball, not unaffiliated).
    pub fn is_affiliated_player(&self) -> bool {
        self.player_id != UNKNOWN_ID && self.team_id != UNKNOWN_ID
    }

    pub fn position(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    /// Squared Euclidean distance to another position.
    pub fn distance_sq_to(&self, (x, y): (f64, f64)) -> f64 {
        let dx = self.x - x;
        let dy = self.y - y;
        dx * dx + dy * dy
    }
}

/// Frame number -> samples observed at that frame.
///
/// A missing key means the frame was never observed; a key with an empty
/// vector means the frame was observed with nobody tracked. Read-only once
/// ingestion has returned it.
#[derive(Debug, Clone, Default)]
pub struct FrameMap {
    frames: FxHashMap<u64, Vec<PlayerSample>>,
}

impl FrameMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a frame, replacing (and returning) any earlier samples for it.
    pub fn insert(&mut self, frame: u64, samples: Vec<PlayerSample>) -> Option<Vec<PlayerSample>> {
        self.frames.insert(frame, samples)
    }

    /// Samples for a frame if it was observed.
    pub fn get(&self, frame: u64) -> Option<&[PlayerSample]> {
        self.frames.get(&frame).map(Vec::as_slice)
    }

    /// Samples for a frame, empty when the frame was not observed.
    pub fn samples(&self, frame: u64) -> &[PlayerSample] {
        self.get(frame).unwrap_or(&[])
    }

    pub fn contains_frame(&self, frame: u64) -> bool {
        self.frames.contains_key(&frame)
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Observed frame numbers in ascending order.
    pub fn frame_numbers(&self) -> Vec<u64> {
        let mut numbers: Vec<u64> = self.frames.keys().copied().collect();
        numbers.sort_unstable();
        numbers
    }

    /// (first, last) observed frame numbers.
    pub fn frame_range(&self) -> Option<(u64, u64)> {
        let min = self.frames.keys().min()?;
        let max = self.frames.keys().max()?;
        Some((*min, *max))
    }
}

impl FromIterator<(u64, Vec<PlayerSample>)> for FrameMap {
    fn from_iter<I: IntoIterator<Item = (u64, Vec<PlayerSample>)>>(iter: I) -> Self {
        let mut map = FrameMap::new();
        for (frame, samples) in iter {
            map.insert(frame, samples);
        }
        map
    }
}
