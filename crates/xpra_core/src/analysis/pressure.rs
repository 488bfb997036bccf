//! # Gaussian Pressure
//!
//! Continuous proxy for defensive pressure on the ball carrier.
//!
//! ## Algorithm
//! 1. Carrier = first sample with the carrier's player id
//! 2. Opponents = samples of another team, excluding the ball and
//!    unaffiliated entries (either id equal to -1)
//! 3. pressure = sum over opponents of exp(-d^2 / (2 sigma^2))
//!
//! Each opponent contributes at most 1.0 (at distance 0); contributions are
//! negligible beyond ~3 sigma.

use crate::models::PlayerSample;

/// Default Gaussian kernel width: 3.0 m
pub const DEFAULT_SIGMA_M: f64 = 3.0;

/// First sample carrying `carrier_id`.
///
/// Duplicate ids within one frame resolve to the first occurrence.
pub fn find_carrier(samples: &[PlayerSample], carrier_id: i64) -> Option<&PlayerSample> {
    samples.iter().find(|s| s.player_id == carrier_id)
}

/// Samples that press a carrier of `possessing_team_id`.
pub fn opponents(
    samples: &[PlayerSample],
    possessing_team_id: i64,
) -> impl Iterator<Item = &PlayerSample> {
    samples
        .iter()
        .filter(move |s| s.is_affiliated_player() && s.team_id != possessing_team_id)
}

/// Unnormalized Gaussian influence of one opponent at squared distance `d_sq`.
pub fn gaussian_influence(d_sq: f64, sigma: f64) -> f64 {
    (-d_sq / (2.0 * sigma * sigma)).exp()
}

/// Pressure on `carrier_id` in one frame.
///
/// Returns 0.0 when the frame is empty, the carrier is not in it, or no
/// opponent qualifies.
pub fn gaussian_pressure(
    samples: &[PlayerSample],
    carrier_id: i64,
    possessing_team_id: i64,
    sigma: f64,
) -> f64 {
    let Some(carrier) = find_carrier(samples, carrier_id) else {
        return 0.0;
    };
    let carrier_pos = carrier.position();

    opponents(samples, possessing_team_id)
        .map(|opponent| gaussian_influence(opponent.distance_sq_to(carrier_pos), sigma))
        .sum()
}
