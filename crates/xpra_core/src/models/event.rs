//! Possession / run events supplied by the dynamic-events feed.
//!
//! Id columns in that feed are loosely typed: integers, integral floats
//! written by dataframe exports (`"12.0"`), numeric strings, blanks and
//! `NaN` all occur. They are normalised here so the aggregator only ever
//! sees `Option<i64>`.

use serde::de::{self, IgnoredAny};
use serde::{Deserialize, Deserializer, Serialize};

use super::tracking::UNKNOWN_ID;

/// One on-ball event bounded by a start and end frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PossessionEvent {
    #[serde(default)]
    pub event_id: Option<String>,
    #[serde(default)]
    pub event_type: Option<String>,
    #[serde(deserialize_with = "frame_number")]
    pub frame_start: u64,
    #[serde(deserialize_with = "frame_number")]
    pub frame_end: u64,
    /// Possessing team (None when the column could not be read)
    #[serde(default, deserialize_with = "loose_id")]
    pub team_id: Option<i64>,
    /// Ball carrier (None when absent or unparseable)
    #[serde(
        default,
        rename = "player_in_possession_id",
        deserialize_with = "loose_id"
    )]
    pub carrier_id: Option<i64>,
}

impl PossessionEvent {
    pub fn new(frame_start: u64, frame_end: u64, team_id: Option<i64>, carrier_id: Option<i64>) -> Self {
        Self {
            event_id: None,
            event_type: None,
            frame_start,
            frame_end,
            team_id,
            carrier_id,
        }
    }

    /// Carrier id, or None when absent or the -1 sentinel.
    pub fn resolved_carrier(&self) -> Option<i64> {
        self.carrier_id.filter(|&id| id != UNKNOWN_ID)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LooseId {
    Int(i64),
    Float(f64),
    Text(String),
    Other(IgnoredAny),
}

impl LooseId {
    fn into_id(self) -> Option<i64> {
        match self {
            LooseId::Int(v) => Some(v),
            LooseId::Float(v) => integral(v),
            LooseId::Text(s) => {
                let s = s.trim();
                s.parse::<i64>()
                    .ok()
                    .or_else(|| s.parse::<f64>().ok().and_then(integral))
            }
            LooseId::Other(_) => None,
        }
    }
}

fn integral(v: f64) -> Option<i64> {
    // i64::MAX as f64 rounds up, so the upper bound is exclusive
    if v.is_finite() && v.fract() == 0.0 && v >= i64::MIN as f64 && v < i64::MAX as f64 {
        Some(v as i64)
    } else {
        None
    }
}

fn loose_id<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<LooseId>::deserialize(deserializer)?.and_then(LooseId::into_id))
}

fn frame_number<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let id = loose_id(deserializer)?;
    match id {
        Some(v) if v >= 0 => Ok(v as u64),
        Some(v) => Err(de::Error::custom(format!("negative frame number {v}"))),
        None => Err(de::Error::custom("missing or non-numeric frame number")),
    }
}
