//! # xPRA Core
//!
//! Pressure Relief Added (xPRA) engine for soccer player-tracking data.
//!
//! ## Modules
//!
//! - `models` - Player samples, frame map, possession events, roster
//! - `ingest` - Tracking JSONL and dynamic-event CSV loaders
//! - `analysis` - Zone weight, Gaussian pressure, relief aggregation, reports
//! - `config` - Analysis configuration (YAML)
//! - `error` - Typed errors for the fallible entry points
//!
//! ## Pipeline
//!
//! ```text
//! bytes -> FrameIngestor -> FrameMap -> (gaussian_pressure x zone_weight) -> pressure_relief
//! ```

pub mod analysis;
pub mod config;
pub mod error;
pub mod ingest;
pub mod models;

pub use analysis::{
    evaluate_event, evaluate_events, gaussian_pressure, pressure_relief, zone_weight,
    EventXpra, PitchZone, ReliefBreakdown, ReliefStatus, XpraReport, DEFAULT_SIGMA_M,
};
pub use config::{AnalysisConfig, IngestConfig, PressureConfig};
pub use error::{ConfigError, EventLoadError, IngestError, RosterError};
pub use ingest::{load_events, EventLoad, FrameIngestor, IngestOutcome, IngestStats};
pub use models::{
    CoordinateOrigin, FrameMap, PlayerRole, PlayerSample, PossessionEvent, Roster,
    UNKNOWN_ID,
};
