//! `replay-core` — foundational types for the fleet-replay engine.
//!
//! This crate is a dependency of every other `replay-*` crate.  It
//! intentionally has no `replay-*` dependencies and no required external
//! ones (only optional `serde`).
//!
//! # What lives here
//!
//! | Module       | Contents                                            |
//! |--------------|-----------------------------------------------------|
//! | [`ids`]      | `EntityId` — dense handle for batch entities        |
//! | [`point`]    | `Point`, Euclidean distance, linear interpolation   |
//! | [`time`]     | `SimTime`, `PlaybackClock`                          |
//! | [`status`]   | `EntityKind`, `PassengerStatus`, `VehicleStatus`    |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                   |
//! |---------|----------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.      |

pub mod ids;
pub mod point;
pub mod status;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use ids::EntityId;
pub use point::Point;
pub use status::{EntityKind, PassengerStatus, Status, VehicleStatus};
pub use time::{PlaybackClock, SimTime};
