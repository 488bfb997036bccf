//! # Analysis Module
//!
//! - `zone` - Tactical zone weight of a pitch position
//! - `pressure` - Gaussian defensive pressure on the ball carrier
//! - `relief` - Per-event pressure relief (xPRA)
//! - `report` - Batch evaluation and per-player / per-role attribution

pub mod pressure;
pub mod relief;
pub mod report;
pub mod zone;

pub use pressure::{find_carrier, gaussian_influence, gaussian_pressure, opponents, DEFAULT_SIGMA_M};
pub use relief::{evaluate_event, pressure_relief, ReliefBreakdown, ReliefStatus, NEUTRAL_ZONE_MULTIPLIER};
pub use report::{evaluate_events, EventXpra, PlayerXpra, RoleXpra, XpraReport, PARALLEL_THRESHOLD};
pub use zone::{zone_weight, PitchZone, Third};
