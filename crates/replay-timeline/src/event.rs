//! Timeline event variants.
//!
//! Events are a closed tagged enum: each variant carries only the fields
//! its semantics require, so replay dispatch is a single exhaustive match
//! instead of a string-keyed branch over a polymorphic payload.
//! Unrecognized wire kinds are preserved as [`Event::Unknown`] — the
//! advancer warns and skips them without halting the batch.

use replay_core::{EntityId, Point, SimTime};

// ── Event ────────────────────────────────────────────────────────────────────

/// One discrete step in an entity's replay log.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// The entity becomes visible.  `spawn` overrides `path[0]` for
    /// entities that do not start on their path.
    Appear { spawn: Option<Point> },

    /// Traverse the next `segments` path segments at the entity's speed.
    /// `segments` is always ≥ 1 after validation.
    Move { segments: u32 },

    /// Hold position for `duration_ms` of simulation time.
    Wait { duration_ms: u64 },

    /// Pick `peer` up (vehicle timeline) / be picked up by `peer`
    /// (passenger timeline).
    Load { peer: EntityId },

    /// Deliver `peer` / be delivered by `peer`.
    DropOff { peer: EntityId },

    /// Claim `peer` for a future pickup / be claimed by `peer`.
    Enqueue { peer: EntityId },

    /// Abandon the claim on `peer` / have the claim by `peer` abandoned.
    Reset { peer: EntityId },

    /// Terminal marker — the entity requests no further ticks.
    Finish,

    /// An event kind this engine does not understand, preserved verbatim
    /// from the wire so replay can warn-and-skip.
    Unknown { kind: Box<str> },
}

impl Event {
    /// The wire name of this event kind.
    pub fn kind_name(&self) -> &str {
        match self {
            Event::Appear { .. } => "APPEAR",
            Event::Move { .. } => "MOVE",
            Event::Wait { .. } => "WAIT",
            Event::Load { .. } => "LOAD",
            Event::DropOff { .. } => "DROP-OFF",
            Event::Enqueue { .. } => "ENQUEUE",
            Event::Reset { .. } => "RESET",
            Event::Finish => "FINISH",
            Event::Unknown { kind } => kind,
        }
    }

    /// The peer entity referenced by a LOAD-family payload, if any.
    pub fn peer(&self) -> Option<EntityId> {
        match self {
            Event::Load { peer }
            | Event::DropOff { peer }
            | Event::Enqueue { peer }
            | Event::Reset { peer } => Some(*peer),
            _ => None,
        }
    }
}

// ── TimedEvent ───────────────────────────────────────────────────────────────

/// An [`Event`] plus the logical instant the upstream simulator recorded it.
///
/// The marker is used for load-time validation and logging only; the
/// advancer is driven purely by tick progress, never by these markers.
#[derive(Clone, Debug, PartialEq)]
pub struct TimedEvent {
    /// When the upstream simulator emitted the event.
    pub at: SimTime,
    pub event: Event,
}

impl TimedEvent {
    #[inline]
    pub fn new(at: SimTime, event: Event) -> Self {
        Self { at, event }
    }
}
