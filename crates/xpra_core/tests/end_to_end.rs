//! Raw tracking bytes + event CSV + metadata -> xPRA.

use xpra_core::analysis::{evaluate_events, ReliefStatus, XpraReport, DEFAULT_SIGMA_M};
use xpra_core::ingest::{load_events, FrameIngestor};
use xpra_core::{pressure_relief, AnalysisConfig, CoordinateOrigin, IngestError, PlayerRole, Roster};

const TRACKING: &str = r#"{"frame": 10, "period": 1, "player_data": [{"player_id": 1, "team_id": 1, "x": 80.0, "y": 34.0}, {"player_id": 2, "team_id": 2, "x": 80.0, "y": 34.0}, {"player_id": -1, "team_id": -1, "x": 80.5, "y": 34.0}]}
{"frame": 15, "period": 1, "player_data": [{"player_id": 1, "team_id": 1, "x": 82.0, "y": 34
{"frame": 20, "period": 1, "player_data": [{"player_id": 1, "team_id": 1, "x": 80.0, "y": 34.0}, {"player_id": 3, "team_id": 1, "x": 81.0, "y": 34.0}]}
"#;

const EVENTS: &str = "\
event_id,event_type,frame_start,frame_end,team_id,player_in_possession_id
1_0,player_possession,10,20,1,1
1_1,player_possession,10,20,1,-1
1_2,player_possession,10,20,1,
1_3,player_possession,500,600,1,1
";

const METADATA: &str = r#"{"players": [
    {"id": 1, "team_id": 1, "player_role": {"name": "Center Forward"}},
    {"id": 2, "team_id": 2, "player_role": {"name": "Right Center Back"}},
    {"id": 3, "team_id": 1, "player_role": {"name": "Left Winger"}}
]}"#;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn relief_scenario_from_raw_streams() {
    let outcome = FrameIngestor::new().ingest(TRACKING.as_bytes()).expect("tracking is valid");
    assert_eq!(outcome.frames.frame_numbers(), vec![10, 20]);
    assert_eq!(outcome.stats.malformed_lines, 1);

    let load = load_events(EVENTS.as_bytes()).expect("events are readable");
    assert_eq!(load.events.len(), 4);

    let values: Vec<f64> = load.events.iter().map(|e| pressure_relief(&outcome.frames, e)).collect();
    assert!(approx(values[0], 3.6), "got {}", values[0]);
    assert_eq!(values[1], 0.0, "sentinel carrier");
    assert_eq!(values[2], 0.0, "absent carrier");
    assert_eq!(values[3], 0.0, "frames never observed");
}

#[test]
fn report_attributes_roles() {
    let roster = Roster::from_reader(METADATA.as_bytes()).expect("metadata is valid");
    let frames = FrameIngestor::new()
        .with_roster(&roster)
        .ingest_or_empty(TRACKING.as_bytes());
    let load = load_events(EVENTS.as_bytes()).expect("events are readable");

    let evaluations = evaluate_events(&frames, &load.events, DEFAULT_SIGMA_M);
    assert_eq!(evaluations[0].breakdown.status, ReliefStatus::Computed);
    assert_eq!(evaluations[3].breakdown.status, ReliefStatus::MissingCarrier);

    let report = XpraReport::build(Some("1886347".to_string()), &evaluations, Some(&roster));
    assert_eq!(report.unresolvable, 2);
    assert_eq!(report.players.len(), 1);
    assert_eq!(report.players[0].role, PlayerRole::Forward);
    assert!(approx(report.players[0].total_xpra, 3.6));

    let json = serde_json::to_value(&report).expect("report serializes");
    assert_eq!(json["players"][0]["role"], "Forward");
    assert_eq!(json["match_id"], "1886347");
}

#[test]
fn lfs_pointer_stream_yields_no_frames() {
    let stream = format!("version https://git-lfs.github.com/spec/v1\noid sha256:abc\nsize 42\n{TRACKING}");

    let err = FrameIngestor::new().ingest(stream.as_bytes()).expect_err("pointer must be rejected");
    assert!(matches!(err, IngestError::CorruptedStream { .. }));
    assert!(FrameIngestor::new().ingest_or_empty(stream.as_bytes()).is_empty());
}

#[test]
fn center_origin_config_feeds_consistent_coordinates() {
    let config = AnalysisConfig::from_yaml_str("match_id: \"2006229\"\ningest:\n  origin: center\n")
        .expect("config is valid");
    assert_eq!(config.ingest.origin, CoordinateOrigin::Center);

    // (27.5, 0.0) from the center spot is (80, 34) in corner coordinates
    let tracking = r#"{"frame": 1, "player_data": [{"player_id": 1, "team_id": 1, "x": 27.5, "y": 0.0}, {"player_id": 2, "team_id": 2, "x": 27.5, "y": 0.0}]}
{"frame": 2, "player_data": [{"player_id": 1, "team_id": 1, "x": 27.5, "y": 0.0}]}"#;
    let frames = FrameIngestor::from_config(&config).ingest_or_empty(tracking.as_bytes());

    let event = xpra_core::PossessionEvent::new(1, 2, Some(1), Some(1));
    assert!(approx(pressure_relief(&frames, &event), 3.6));
}
