//! The single notification channel and the sink trait that consumes it.
//!
//! Everything observable — applied events, derived status changes,
//! skipped unknown events, per-entity faults — flows through one
//! [`Notification`] stream, tagged by [`Severity`], so a single consumer
//! can both log activity and detect failures.  The engine itself performs
//! no logging, persistence, or rendering.

use replay_core::{EntityId, PassengerStatus, Point, SimTime, VehicleStatus};

// ── Severity ─────────────────────────────────────────────────────────────────

/// How a consumer should treat a notification.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        f.write_str(s)
    }
}

// ── Notification ─────────────────────────────────────────────────────────────

/// One observable replay occurrence.
#[derive(Clone, Debug, PartialEq)]
pub struct Notification {
    /// The entity the occurrence belongs to.
    pub entity: EntityId,
    /// Clock reading of the tick that produced it.
    pub at: SimTime,
    pub body: NoteBody,
}

impl Notification {
    #[inline]
    pub fn severity(&self) -> Severity {
        self.body.severity()
    }
}

/// What happened.
#[derive(Clone, Debug, PartialEq)]
pub enum NoteBody {
    /// The entity became visible at `location`.
    Appeared { location: Point },

    /// A LOAD event was applied; `peer` is the other party.
    Loaded { peer: EntityId },

    /// A DROP-OFF event was applied.
    DroppedOff { peer: EntityId },

    /// An ENQUEUE event was applied.
    Enqueued { peer: EntityId },

    /// A RESET event was applied — the claim on/by `peer` was abandoned.
    ClaimReset { peer: EntityId },

    /// The entity reached its FINISH marker; no further notifications
    /// will be produced for it.
    Finished,

    /// Derived passenger status change.
    PassengerChanged(PassengerStatus),

    /// Derived vehicle status change.
    VehicleChanged(VehicleStatus),

    /// An event of an unrecognized kind was skipped.
    SkippedUnknown { kind: Box<str> },

    /// The entity's advancement halted; the rest of the batch continues.
    Fault { detail: String },
}

impl NoteBody {
    pub fn severity(&self) -> Severity {
        match self {
            NoteBody::SkippedUnknown { .. } => Severity::Warning,
            NoteBody::Fault { .. } => Severity::Error,
            _ => Severity::Info,
        }
    }

    /// The peer referenced by a LOAD-family notification, if any.
    pub fn peer(&self) -> Option<EntityId> {
        match self {
            NoteBody::Loaded { peer }
            | NoteBody::DroppedOff { peer }
            | NoteBody::Enqueued { peer }
            | NoteBody::ClaimReset { peer } => Some(*peer),
            _ => None,
        }
    }

    /// Short wire-style name for logging backends.
    pub fn kind_name(&self) -> &'static str {
        match self {
            NoteBody::Appeared { .. } => "APPEAR",
            NoteBody::Loaded { .. } => "LOAD",
            NoteBody::DroppedOff { .. } => "DROP-OFF",
            NoteBody::Enqueued { .. } => "ENQUEUE",
            NoteBody::ClaimReset { .. } => "RESET",
            NoteBody::Finished => "FINISH",
            NoteBody::PassengerChanged(_) => "PASSENGER_STATUS",
            NoteBody::VehicleChanged(_) => "VEHICLE_STATUS",
            NoteBody::SkippedUnknown { .. } => "UNKNOWN_EVENT",
            NoteBody::Fault { .. } => "FAULT",
        }
    }
}

// ── ReplaySink ───────────────────────────────────────────────────────────────

/// Callbacks invoked by [`Replay`][crate::Replay] at key points in the
/// tick loop.
///
/// All methods have default no-op implementations so implementors only
/// need to override what they care about.  `on_notification` is invoked
/// synchronously, once per notification, in ascending entity order within
/// a tick.
pub trait ReplaySink {
    /// Called at the very start of each tick, before any cursor moves.
    fn on_tick_start(&mut self, _now: SimTime) {}

    /// Called once per notification produced this tick.
    fn on_notification(&mut self, _note: &Notification) {}

    /// Called at the end of each tick.  `live` is the number of entities
    /// that still want ticks.
    fn on_tick_end(&mut self, _now: SimTime, _live: usize) {}

    /// Called once when a driven run ends (all entities settled or the
    /// tick budget ran out).
    fn on_replay_end(&mut self, _final_time: SimTime) {}
}

/// A [`ReplaySink`] that does nothing.  Use when driving the clock
/// without observing the stream.
pub struct NoopSink;

impl ReplaySink for NoopSink {}
