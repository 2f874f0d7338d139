//! Per-entity mutable replay state.
//!
//! Loaded timelines are immutable; everything that moves during replay
//! lives here.  The engine keeps one `Cursor` per entity, indexed by
//! `EntityId`, dropped wholesale on a full batch reset — there is no
//! per-entity cancellation.

use replay_core::{EntityKind, Point, SimTime, Status};
use replay_timeline::{Event, Timeline};

// ── Phase ────────────────────────────────────────────────────────────────────

/// Where an entity is in its replay lifecycle.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Phase {
    /// Created in the future — waiting for the clock to reach creation time.
    Pending,
    /// Receiving ticks.
    Active,
    /// Reached FINISH; requests no further ticks.
    Finished,
    /// Halted by a per-entity fault; requests no further ticks.
    Failed,
}

// ── Cursor ───────────────────────────────────────────────────────────────────

/// The mutable progress markers for one entity.
///
/// The event cursor only ever moves forward; the sole way back is a full
/// batch reset, which rebuilds every cursor from its timeline.
#[derive(Clone, Debug)]
pub struct Cursor {
    /// Next event to resolve.
    pub event_idx: usize,

    /// Waypoint most recently reached.
    pub path_idx: usize,

    /// Segments left in the MOVE currently being traversed; 0 when no
    /// MOVE is armed.
    pub moves_left: u32,

    /// Remaining WAIT duration; `None` when no WAIT is armed.
    pub wait_left: Option<u64>,

    /// Clock reading at the last segment/event boundary.  MOVE progress
    /// and WAIT decrements measure elapsed time from here.
    pub boundary: SimTime,

    /// Projected position as of the last tick.
    pub position: Point,

    /// Projected status as of the last tick.
    pub status: Status,

    pub phase: Phase,
}

impl Cursor {
    /// The starting cursor for `timeline`.
    ///
    /// Position starts at the APPEAR spawn coordinate when the timeline
    /// opens with one, otherwise at the first waypoint; passengers start
    /// WAITING, vehicles at their pass-through scheduling status.
    pub fn new(timeline: &Timeline) -> Self {
        let position = match timeline.events.first().map(|t| &t.event) {
            Some(Event::Appear { spawn: Some(p) }) => *p,
            _ => timeline.path.start(),
        };
        let status = match timeline.kind {
            EntityKind::Passenger => Status::Passenger(Default::default()),
            EntityKind::Vehicle => Status::Vehicle(timeline.initial_vehicle_status),
        };
        Self {
            event_idx:  0,
            path_idx:   0,
            moves_left: 0,
            wait_left:  None,
            boundary:   timeline.create_time,
            position,
            status,
            phase:      Phase::Pending,
        }
    }

    /// `true` while the entity still wants ticks: pending activation, or
    /// active with events left to resolve.  An entity that drains its
    /// event list without a FINISH goes quiescent rather than finished.
    #[inline]
    pub fn is_live(&self, event_count: usize) -> bool {
        match self.phase {
            Phase::Pending => true,
            Phase::Active => self.event_idx < event_count,
            Phase::Finished | Phase::Failed => false,
        }
    }
}
