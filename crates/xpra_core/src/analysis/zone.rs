//! # Zone Weight
//!
//! Tactical value of a pitch location (canonical corner coordinates,
//! attacking towards x = 105).
//!
//! - Longitudinal thirds: x <= 35 -> 1.0, x <= 70 -> 1.5, beyond -> 3.0
//! - Central channel 24 <= y <= 44 (inclusive) multiplies by 1.2

use serde::Serialize;

/// End of the defensive third (inclusive)
pub const DEFENSIVE_THIRD_END_M: f64 = 35.0;
/// End of the middle third (inclusive)
pub const MIDDLE_THIRD_END_M: f64 = 70.0;

/// Central channel bounds (both inclusive)
pub const CENTRAL_CHANNEL_MIN_M: f64 = 24.0;
pub const CENTRAL_CHANNEL_MAX_M: f64 = 44.0;

pub const DEFENSIVE_THIRD_WEIGHT: f64 = 1.0;
pub const MIDDLE_THIRD_WEIGHT: f64 = 1.5;
pub const FINAL_THIRD_WEIGHT: f64 = 3.0;
pub const CENTRAL_CHANNEL_BONUS: f64 = 1.2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Third {
    Defensive,
    Middle,
    Final,
}

/// Band classification behind a zone weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct PitchZone {
    pub third: Third,
    pub central: bool,
}

impl PitchZone {
    /// Classify any position; out-of-pitch values fall into the nearest band.
    pub fn classify(x: f64, y: f64) -> Self {
        let third = if x > MIDDLE_THIRD_END_M {
            Third::Final
        } else if x > DEFENSIVE_THIRD_END_M {
            Third::Middle
        } else {
            Third::Defensive
        };
        let central = (CENTRAL_CHANNEL_MIN_M..=CENTRAL_CHANNEL_MAX_M).contains(&y);
        Self { third, central }
    }

    pub fn weight(self) -> f64 {
        let base = match self.third {
            Third::Defensive => DEFENSIVE_THIRD_WEIGHT,
            Third::Middle => MIDDLE_THIRD_WEIGHT,
            Third::Final => FINAL_THIRD_WEIGHT,
        };
        if self.central {
            base * CENTRAL_CHANNEL_BONUS
        } else {
            base
        }
    }
}

/// Zone weight at (x, y). Always one of {1.0, 1.2, 1.5, 1.8, 3.0, 3.6}.
pub fn zone_weight(x: f64, y: f64) -> f64 {
    PitchZone::classify(x, y).weight()
}
