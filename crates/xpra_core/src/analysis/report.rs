//! # xPRA Report
//!
//! Evaluates every event of one match and attributes xPRA to carriers and
//! their roles.

use std::collections::BTreeMap;

use rayon::prelude::*;
use serde::Serialize;

use super::relief::{evaluate_event, ReliefBreakdown, ReliefStatus};
use crate::models::{FrameMap, PlayerRole, PossessionEvent, Roster};

/// Below this many events, evaluation stays on the calling thread.
pub const PARALLEL_THRESHOLD: usize = 256;

/// One evaluated event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventXpra {
    pub event_id: Option<String>,
    pub event_type: Option<String>,
    pub frame_start: u64,
    pub frame_end: u64,
    pub team_id: Option<i64>,
    pub carrier_id: Option<i64>,
    #[serde(flatten)]
    pub breakdown: ReliefBreakdown,
}

impl EventXpra {
    fn new(event: &PossessionEvent, breakdown: ReliefBreakdown) -> Self {
        Self {
            event_id: event.event_id.clone(),
            event_type: event.event_type.clone(),
            frame_start: event.frame_start,
            frame_end: event.frame_end,
            team_id: event.team_id,
            carrier_id: event.resolved_carrier(),
            breakdown,
        }
    }

    pub fn xpra(&self) -> f64 {
        self.breakdown.xpra
    }
}

/// Evaluate all events against one match's frames. Output order follows `events`.
///
/// The frame map is only read, so large batches are spread over the rayon pool.
pub fn evaluate_events(frames: &FrameMap, events: &[PossessionEvent], sigma: f64) -> Vec<EventXpra> {
    let evaluate = |event: &PossessionEvent| EventXpra::new(event, evaluate_event(frames, event, sigma));

    if events.len() > PARALLEL_THRESHOLD {
        events.par_iter().map(evaluate).collect()
    } else {
        events.iter().map(evaluate).collect()
    }
}

/// xPRA attributed to one carrier.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerXpra {
    pub player_id: i64,
    pub team_id: Option<i64>,
    pub role: PlayerRole,
    pub events: u32,
    pub total_xpra: f64,
    pub mean_xpra: f64,
    pub best_xpra: f64,
}

/// xPRA aggregated over a role.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoleXpra {
    pub role: PlayerRole,
    pub events: u32,
    pub total_xpra: f64,
    pub mean_xpra: f64,
}

/// Match-level summary.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct XpraReport {
    pub match_id: Option<String>,
    pub events_evaluated: usize,
    pub computed: usize,
    pub missing_carrier: usize,
    pub unresolvable: usize,
    pub total_xpra: f64,
    /// Mean over resolvable events (computed + missing carrier)
    pub mean_xpra: f64,
    /// Sorted by total xPRA, highest first
    pub players: Vec<PlayerXpra>,
    pub roles: Vec<RoleXpra>,
}

#[derive(Default)]
struct Accumulator {
    team_id: Option<i64>,
    events: u32,
    total: f64,
    best: f64,
}

impl Accumulator {
    fn add(&mut self, xpra: f64) {
        self.best = if self.events == 0 { xpra } else { self.best.max(xpra) };
        self.events += 1;
        self.total += xpra;
    }

    fn mean(&self) -> f64 {
        if self.events == 0 {
            0.0
        } else {
            self.total / f64::from(self.events)
        }
    }
}

impl XpraReport {
    pub fn build(match_id: Option<String>, evaluations: &[EventXpra], roster: Option<&Roster>) -> Self {
        let mut report = XpraReport {
            match_id,
            events_evaluated: evaluations.len(),
            ..Default::default()
        };

        let mut players: BTreeMap<i64, Accumulator> = BTreeMap::new();
        let mut roles: BTreeMap<PlayerRole, Accumulator> = BTreeMap::new();

        for evaluation in evaluations {
            match evaluation.breakdown.status {
                ReliefStatus::Computed => report.computed += 1,
                ReliefStatus::MissingCarrier => report.missing_carrier += 1,
                ReliefStatus::UnresolvableEvent => {
                    report.unresolvable += 1;
                    continue;
                }
            }

            let xpra = evaluation.xpra();
            report.total_xpra += xpra;

            let Some(carrier_id) = evaluation.carrier_id else {
                continue;
            };
            let role = roster.map_or(PlayerRole::Unknown, |r| r.role_of(carrier_id));

            let player = players.entry(carrier_id).or_default();
            player.team_id = roster
                .and_then(|r| r.team_of(carrier_id))
                .or(evaluation.team_id);
            player.add(xpra);

            roles.entry(role).or_default().add(xpra);
        }

        let resolved = report.computed + report.missing_carrier;
        if resolved > 0 {
            report.mean_xpra = report.total_xpra / resolved as f64;
        }

        report.players = players
            .into_iter()
            .map(|(player_id, acc)| PlayerXpra {
                player_id,
                team_id: acc.team_id,
                role: roster.map_or(PlayerRole::Unknown, |r| r.role_of(player_id)),
                events: acc.events,
                total_xpra: acc.total,
                mean_xpra: acc.mean(),
                best_xpra: acc.best,
            })
            .collect();
        report
            .players
            .sort_by(|a, b| b.total_xpra.total_cmp(&a.total_xpra).then(a.player_id.cmp(&b.player_id)));

        report.roles = roles
            .into_iter()
            .map(|(role, acc)| RoleXpra {
                role,
                events: acc.events,
                total_xpra: acc.total,
                mean_xpra: acc.mean(),
            })
            .collect();

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::pressure::DEFAULT_SIGMA_M;
    use crate::models::PlayerSample;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn frames() -> FrameMap {
        [
            (
                10,
                vec![
                    PlayerSample::new(1, 1, 80.0, 34.0),
                    PlayerSample::new(5, 1, 20.0, 10.0),
                    PlayerSample::new(2, 2, 80.0, 34.0),
                    PlayerSample::new(6, 2, 20.0, 10.0),
                ],
            ),
            (
                20,
                vec![
                    PlayerSample::new(1, 1, 80.0, 34.0),
                    PlayerSample::new(5, 1, 20.0, 10.0),
                ],
            ),
        ]
        .into_iter()
        .collect()
    }

    fn roster() -> Roster {
        let mut roster = Roster::new();
        roster.insert(1, Some(1), PlayerRole::Forward);
        roster.insert(5, Some(1), PlayerRole::Defender);
        roster
    }

    fn events() -> Vec<PossessionEvent> {
        vec![
            PossessionEvent::new(10, 20, Some(1), Some(1)), // 3.6
            PossessionEvent::new(10, 20, Some(1), Some(5)), // 1.0 x 1.0
            PossessionEvent::new(10, 20, Some(1), Some(1)), // 3.6
            PossessionEvent::new(10, 20, Some(1), None),
            PossessionEvent::new(30, 40, Some(1), Some(5)), // frames absent
        ]
    }

    #[test]
    fn test_evaluate_events_keeps_order() {
        let evaluations = evaluate_events(&frames(), &events(), DEFAULT_SIGMA_M);
        let values: Vec<f64> = evaluations.iter().map(EventXpra::xpra).collect();
        assert_eq!(values.len(), 5);
        assert!(approx(values[0], 3.6));
        assert!(approx(values[1], 1.0));
        assert!(approx(values[2], 3.6));
        assert_eq!(values[3], 0.0);
        assert_eq!(values[4], 0.0);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let many: Vec<PossessionEvent> = events().into_iter().cycle().take(PARALLEL_THRESHOLD * 3).collect();
        let parallel = evaluate_events(&frames(), &many, DEFAULT_SIGMA_M);
        let sequential: Vec<EventXpra> = many
            .iter()
            .map(|e| EventXpra::new(e, evaluate_event(&frames(), e, DEFAULT_SIGMA_M)))
            .collect();
        assert_eq!(parallel, sequential);
    }

    #[test]
    fn test_report_totals() {
        let evaluations = evaluate_events(&frames(), &events(), DEFAULT_SIGMA_M);
        let report = XpraReport::build(Some("1886347".to_string()), &evaluations, Some(&roster()));

        assert_eq!(report.events_evaluated, 5);
        assert_eq!(report.computed, 3);
        assert_eq!(report.missing_carrier, 1);
        assert_eq!(report.unresolvable, 1);
        assert!(approx(report.total_xpra, 8.2));
        assert!(approx(report.mean_xpra, 8.2 / 4.0));

        let top = &report.players[0];
        assert_eq!(top.player_id, 1);
        assert_eq!(top.role, PlayerRole::Forward);
        assert_eq!(top.events, 2);
        assert!(approx(top.total_xpra, 7.2));
        assert!(approx(top.best_xpra, 3.6));

        let defender = &report.players[1];
        assert_eq!(defender.player_id, 5);
        assert_eq!(defender.events, 2);
        assert!(approx(defender.mean_xpra, 0.5));

        let roles: Vec<PlayerRole> = report.roles.iter().map(|r| r.role).collect();
        assert_eq!(roles, vec![PlayerRole::Defender, PlayerRole::Forward]);
    }

    #[test]
    fn test_report_without_roster() {
        let evaluations = evaluate_events(&frames(), &events(), DEFAULT_SIGMA_M);
        let report = XpraReport::build(None, &evaluations, None);

        assert!(report.players.iter().all(|p| p.role == PlayerRole::Unknown));
        assert_eq!(report.players[0].team_id, Some(1));
        assert_eq!(report.roles.len(), 1);
    }

    #[test]
    fn test_empty_report() {
        let report = XpraReport::build(None, &[], None);
        assert_eq!(report.events_evaluated, 0);
        assert_eq!(report.mean_xpra, 0.0);
        assert!(report.players.is_empty());
    }
}
