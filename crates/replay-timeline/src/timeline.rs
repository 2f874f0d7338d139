//! One entity's immutable replay record.

use replay_core::{EntityId, EntityKind, SimTime, VehicleStatus};

use crate::event::TimedEvent;
use crate::path::Path;

/// Everything the engine needs to replay one entity.
///
/// A `Timeline` is created once per loaded run and never mutates; all
/// replay progress lives in the engine's per-entity cursor.  The whole
/// batch is discarded wholesale on reset or when a new run loads — there
/// is no partial teardown of a single entity.
#[derive(Clone, Debug)]
pub struct Timeline {
    /// Dense handle assigned by the store's interner.
    pub id: EntityId,

    /// Explicit kind tag, set at load time.  Never inferred from the
    /// external id string.
    pub kind: EntityKind,

    /// The geometry this entity moves along.
    pub path: Path,

    /// Constant traversal speed, in path-distance units per millisecond.
    pub speed: f64,

    /// When the entity comes into existence.
    pub create_time: SimTime,

    /// When the entity ceases to exist; `None` means unbounded.
    pub destroy_time: Option<SimTime>,

    /// The ordered event log, consumed strictly front to back.
    pub events: Vec<TimedEvent>,

    /// Pass-through status from the external scheduling context
    /// (IDLE / AT_TERMINAL / ROAMING).  Ignored for passengers.
    pub initial_vehicle_status: VehicleStatus,
}
