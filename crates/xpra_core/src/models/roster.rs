//! Player role and team lookup built from match metadata.

use std::fmt;
use std::io::Read;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::RosterError;

/// Normalized playing role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PlayerRole {
    #[serde(rename = "GK")]
    Goalkeeper,
    Defender,
    Midfielder,
    Forward,
    Unknown,
}

impl PlayerRole {
    /// Normalize a free-text role name ("Left Center Back", "Striker", ...).
    ///
    /// Keywords are checked in order, so "Wing Back" is a defender and
    /// "Left Winger" a midfielder.
    pub fn from_role_name(name: &str) -> Self {
        if name.contains("Goalkeeper") {
            PlayerRole::Goalkeeper
        } else if name.contains("Back") || name.contains("Defender") {
            PlayerRole::Defender
        } else if name.contains("Midfield") || name.contains("Winger") {
            PlayerRole::Midfielder
        } else if name.contains("Forward") || name.contains("Striker") {
            PlayerRole::Forward
        } else {
            PlayerRole::Unknown
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PlayerRole::Goalkeeper => "GK",
            PlayerRole::Defender => "Defender",
            PlayerRole::Midfielder => "Midfielder",
            PlayerRole::Forward => "Forward",
            PlayerRole::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for PlayerRole {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.pad(self.label())
    }
}

/// Subset of the match metadata document needed for attribution.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MatchMetadata {
    #[serde(default)]
    pub players: Vec<MetadataPlayer>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MetadataPlayer {
    pub id: i64,
    #[serde(default)]
    pub team_id: Option<i64>,
    #[serde(default)]
    pub player_role: Option<MetadataRole>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MetadataRole {
    #[serde(default)]
    pub name: Option<String>,
}

/// player id -> team id and player id -> role.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    teams: FxHashMap<i64, i64>,
    roles: FxHashMap<i64, PlayerRole>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_metadata(metadata: &MatchMetadata) -> Self {
        let mut roster = Roster::new();
        for player in &metadata.players {
            let role = player
                .player_role
                .as_ref()
                .and_then(|r| r.name.as_deref())
                .map_or(PlayerRole::Unknown, PlayerRole::from_role_name);
            roster.roles.insert(player.id, role);
            if let Some(team_id) = player.team_id {
                roster.teams.insert(player.id, team_id);
            }
        }
        roster
    }

    /// Parse a match metadata JSON document.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, RosterError> {
        let metadata: MatchMetadata = serde_json::from_reader(reader)?;
        Ok(Self::from_metadata(&metadata))
    }

    pub fn insert(&mut self, player_id: i64, team_id: Option<i64>, role: PlayerRole) {
        self.roles.insert(player_id, role);
        if let Some(team_id) = team_id {
            self.teams.insert(player_id, team_id);
        }
    }

    pub fn team_of(&self, player_id: i64) -> Option<i64> {
        self.teams.get(&player_id).copied()
    }

    /// Role of a player; unknown players are [`PlayerRole::Unknown`].
    pub fn role_of(&self, player_id: i64) -> PlayerRole {
        self.roles.get(&player_id).copied().unwrap_or(PlayerRole::Unknown)
    }

    pub fn len(&self) -> usize {
        self.roles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }
}
