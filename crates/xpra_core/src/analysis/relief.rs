//! # Pressure Relief (xPRA)
//!
//! xPRA = (pressure at start frame - pressure at end frame)
//!        x zone weight at the carrier's start position
//!
//! Positive values mean the carrier escaped pressure. Malformed events never
//! fail: they evaluate to 0.0 (or a neutral 1.0 multiplier) so a batch of
//! events is never interrupted.

use serde::Serialize;

use super::pressure::{find_carrier, gaussian_pressure, DEFAULT_SIGMA_M};
use super::zone::PitchZone;
use crate::models::{FrameMap, PossessionEvent};

/// Neutral multiplier when the carrier is not tracked at the start frame.
pub const NEUTRAL_ZONE_MULTIPLIER: f64 = 1.0;

/// How an event was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ReliefStatus {
    /// Both pressures computed and the carrier was found at the start frame
    Computed,
    /// Pressures computed, but the carrier was not tracked at the start frame
    MissingCarrier,
    /// Carrier or team id absent / unparseable; nothing computed
    UnresolvableEvent,
}

/// Every intermediate value of one xPRA evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReliefBreakdown {
    pub pressure_start: f64,
    pub pressure_end: f64,
    pub raw_delta: f64,
    /// Carrier's zone at the start frame, when tracked
    pub start_zone: Option<PitchZone>,
    pub zone_multiplier: f64,
    pub xpra: f64,
    pub status: ReliefStatus,
}

impl ReliefBreakdown {
    fn unresolvable() -> Self {
        Self {
            pressure_start: 0.0,
            pressure_end: 0.0,
            raw_delta: 0.0,
            start_zone: None,
            zone_multiplier: NEUTRAL_ZONE_MULTIPLIER,
            xpra: 0.0,
            status: ReliefStatus::UnresolvableEvent,
        }
    }
}

/// Evaluate one event with a given kernel width.
pub fn evaluate_event(frames: &FrameMap, event: &PossessionEvent, sigma: f64) -> ReliefBreakdown {
    let (Some(carrier_id), Some(team_id)) = (event.resolved_carrier(), event.team_id) else {
        return ReliefBreakdown::unresolvable();
    };

    let start = frames.samples(event.frame_start);
    let end = frames.samples(event.frame_end);

    let pressure_start = gaussian_pressure(start, carrier_id, team_id, sigma);
    let pressure_end = gaussian_pressure(end, carrier_id, team_id, sigma);
    let raw_delta = pressure_start - pressure_end;

    let start_zone = find_carrier(start, carrier_id).map(|c| PitchZone::classify(c.x, c.y));
    let (zone_multiplier, status) = match start_zone {
        Some(zone) => (zone.weight(), ReliefStatus::Computed),
        None => (NEUTRAL_ZONE_MULTIPLIER, ReliefStatus::MissingCarrier),
    };

    ReliefBreakdown {
        pressure_start,
        pressure_end,
        raw_delta,
        start_zone,
        zone_multiplier,
        xpra: raw_delta * zone_multiplier,
        status,
    }
}

/// xPRA of one event with the default 3.0 m kernel.
pub fn pressure_relief(frames: &FrameMap, event: &PossessionEvent) -> f64 {
    evaluate_event(frames, event, DEFAULT_SIGMA_M).xpra
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::zone::Third;
    use crate::models::PlayerSample;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    /// Frame 10: carrier under full pressure; frame 20: carrier alone.
    fn relief_frames() -> FrameMap {
        [
            (
                10,
                vec![
                    PlayerSample::new(1, 1, 80.0, 34.0),
                    PlayerSample::new(2, 2, 80.0, 34.0),
                ],
            ),
            (
                20,
                vec![
                    PlayerSample::new(1, 1, 80.0, 34.0),
                    PlayerSample::new(-1, -1, 81.0, 34.0),
                ],
            ),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_relief_in_central_final_third() {
        let event = PossessionEvent::new(10, 20, Some(1), Some(1));
        let breakdown = evaluate_event(&relief_frames(), &event, DEFAULT_SIGMA_M);

        assert!(approx(breakdown.pressure_start, 1.0));
        assert!(approx(breakdown.pressure_end, 0.0));
        assert!(approx(breakdown.raw_delta, 1.0));
        assert_eq!(breakdown.start_zone, Some(PitchZone { third: Third::Final, central: true }));
        assert!(approx(breakdown.zone_multiplier, 3.6));
        assert!(approx(breakdown.xpra, 3.6));
        assert_eq!(breakdown.status, ReliefStatus::Computed);
        assert!(approx(pressure_relief(&relief_frames(), &event), 3.6));
    }

    #[test]
    fn test_pressure_increase_is_negative() {
        let event = PossessionEvent::new(20, 10, Some(1), Some(1));
        assert!(approx(pressure_relief(&relief_frames(), &event), -3.6));
    }

    #[test]
    fn test_missing_or_sentinel_carrier() {
        let frames = relief_frames();
        for carrier in [None, Some(-1)] {
            let event = PossessionEvent::new(10, 20, Some(1), carrier);
            let breakdown = evaluate_event(&frames, &event, DEFAULT_SIGMA_M);
            assert_eq!(breakdown.xpra, 0.0);
            assert_eq!(breakdown.status, ReliefStatus::UnresolvableEvent);
        }
    }

    #[test]
    fn test_missing_team_is_unresolvable() {
        let event = PossessionEvent::new(10, 20, None, Some(1));
        assert_eq!(pressure_relief(&relief_frames(), &event), 0.0);
    }

    #[test]
    fn test_absent_frames() {
        let event = PossessionEvent::new(100, 200, Some(1), Some(1));
        let breakdown = evaluate_event(&relief_frames(), &event, DEFAULT_SIGMA_M);
        assert_eq!(breakdown.xpra, 0.0);
        assert_eq!(breakdown.start_zone, None);
        assert_eq!(breakdown.zone_multiplier, NEUTRAL_ZONE_MULTIPLIER);
        assert_eq!(breakdown.status, ReliefStatus::MissingCarrier);
    }

    #[test]
    fn test_carrier_missing_at_start_uses_neutral_multiplier() {
        let frames: FrameMap = [
            (1, vec![PlayerSample::new(2, 2, 80.0, 34.0)]),
            (
                2,
                vec![
                    PlayerSample::new(1, 1, 80.0, 34.0),
                    PlayerSample::new(2, 2, 80.0, 34.0),
                ],
            ),
        ]
        .into_iter()
        .collect();
        let event = PossessionEvent::new(1, 2, Some(1), Some(1));
        let breakdown = evaluate_event(&frames, &event, DEFAULT_SIGMA_M);

        assert!(approx(breakdown.raw_delta, -1.0));
        assert_eq!(breakdown.zone_multiplier, 1.0);
        assert!(approx(breakdown.xpra, -1.0));
        assert_eq!(breakdown.status, ReliefStatus::MissingCarrier);
    }
}
