//! # Models
//!
//! - `pitch` - Pitch dimensions and coordinate origin
//! - `tracking` - Player samples and the frame map
//! - `event` - Possession events from the dynamic-events feed
//! - `roster` - Player team/role lookup from match metadata

pub mod event;
pub mod pitch;
pub mod roster;
pub mod tracking;

pub use event::PossessionEvent;
pub use pitch::CoordinateOrigin;
pub use roster::{MatchMetadata, PlayerRole, Roster};
pub use tracking::{FrameMap, PlayerSample, UNKNOWN_ID};
