//! Pitch dimensions and coordinate convention
//!
//! Canonical coordinates (used by zone weight and pressure):
//! - X: 0 = own goal line, 105 = attacking goal line (LENGTH direction)
//! - Y: 0 = touchline, 68 = touchline (WIDTH direction)

use serde::{Deserialize, Serialize};

/// Pitch length in meters
pub const LENGTH_M: f64 = 105.0;

/// Pitch width in meters
pub const WIDTH_M: f64 = 68.0;

/// Where (0, 0) sits in a tracking feed.
///
/// Everything downstream of ingestion works in [`CoordinateOrigin::Corner`];
/// center-origin feeds are translated once while frames are ingested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoordinateOrigin {
    /// (0, 0) at the corner behind the own goal line
    #[default]
    Corner,
    /// (0, 0) at the center spot, x in [-52.5, 52.5], y in [-34, 34]
    Center,
}

impl CoordinateOrigin {
    /// Convert a feed position into canonical corner coordinates.
    pub fn to_corner(self, x: f64, y: f64) -> (f64, f64) {
        match self {
            CoordinateOrigin::Corner => (x, y),
            CoordinateOrigin::Center => (x + LENGTH_M / 2.0, y + WIDTH_M / 2.0),
        }
    }
}
