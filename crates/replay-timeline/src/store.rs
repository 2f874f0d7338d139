//! `TimelineStore` — the interned, validated batch of one simulation run.
//!
//! # Why an interner
//!
//! Run documents name entities with arbitrary strings and cross-reference
//! them from event payloads.  Resolving strings during replay would put a
//! hash lookup on the hot path of every LOAD/DROP-OFF; instead the builder
//! interns every name once, assigns dense [`EntityId`]s, and the rest of
//! the system indexes plain `Vec`s.
//!
//! # Validation
//!
//! `TimelineStoreBuilder::build` checks every structural invariant of
//! every timeline and rejects the whole batch on the first violation —
//! there is no partial load.  A store that exists is a store whose
//! timelines the advancer can trust (runtime bounds checks remain as a
//! per-entity fault path, not a batch concern).

use rustc_hash::FxHashMap;

use replay_core::{EntityId, EntityKind, PassengerStatus};

use crate::error::{TimelineError, TimelineResult};
use crate::event::Event;
use crate::timeline::Timeline;

// ── TimelineStoreBuilder ─────────────────────────────────────────────────────

/// Accumulates interned names and timelines, then validates into a store.
///
/// ```ignore
/// let mut b = TimelineStoreBuilder::new();
/// let trike = b.intern("trike_0");
/// let p1    = b.intern("p1");
/// b.insert(Timeline { id: trike, /* … */ });
/// b.insert(Timeline { id: p1,    /* … */ });
/// let store = b.build()?;
/// ```
#[derive(Default)]
pub struct TimelineStoreBuilder {
    names: Vec<Box<str>>,
    index: FxHashMap<Box<str>, EntityId>,
    drafts: Vec<Option<Timeline>>,
    duplicates: Vec<EntityId>,
}

impl TimelineStoreBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// The id for `name`, allocating a fresh one on first sight.
    pub fn intern(&mut self, name: &str) -> EntityId {
        if let Some(&id) = self.index.get(name) {
            return id;
        }
        let id = EntityId(self.names.len() as u32);
        self.names.push(name.into());
        self.index.insert(name.into(), id);
        self.drafts.push(None);
        id
    }

    /// Register `timeline` under its (already interned) id.
    ///
    /// Duplicate registration for the same id is a batch error, reported
    /// at [`build`][Self::build] time.
    pub fn insert(&mut self, timeline: Timeline) {
        let slot = timeline.id.index();
        debug_assert!(slot < self.drafts.len(), "insert before intern");
        if self.drafts[slot].is_some() {
            self.duplicates.push(timeline.id);
            return;
        }
        self.drafts[slot] = Some(timeline);
    }

    /// Validate every draft and assemble the read-only store.
    pub fn build(self) -> TimelineResult<TimelineStore> {
        let Self { names, index, drafts, duplicates } = self;

        if let Some(&dup) = duplicates.first() {
            return Err(TimelineError::malformed(
                &names[dup.index()],
                "defined more than once in the batch",
            ));
        }

        let mut timelines = Vec::with_capacity(drafts.len());
        for (slot, draft) in drafts.into_iter().enumerate() {
            let name = &names[slot];
            let timeline = draft.ok_or_else(|| {
                TimelineError::malformed(name, "referenced as a peer but has no timeline in the batch")
            })?;
            validate(name, &timeline, names.len())?;
            timelines.push(timeline);
        }

        Ok(TimelineStore { timelines, names, index })
    }
}

// ── TimelineStore ────────────────────────────────────────────────────────────

/// The validated, immutable batch for one run.
#[derive(Debug)]
pub struct TimelineStore {
    /// Indexed by `EntityId`.
    timelines: Vec<Timeline>,
    /// External name per id, same indexing.
    names: Vec<Box<str>>,
    index: FxHashMap<Box<str>, EntityId>,
}

impl TimelineStore {
    /// Number of entities in the batch.
    #[inline]
    pub fn len(&self) -> usize {
        self.timelines.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.timelines.is_empty()
    }

    /// The timeline for `id`, or `None` for an id outside this batch.
    #[inline]
    pub fn get(&self, id: EntityId) -> Option<&Timeline> {
        self.timelines.get(id.index())
    }

    /// The external name for `id`.
    ///
    /// # Panics
    /// Panics if `id` is not from this batch.
    #[inline]
    pub fn name(&self, id: EntityId) -> &str {
        &self.names[id.index()]
    }

    /// Resolve an external name back to its id.
    pub fn resolve(&self, name: &str) -> Option<EntityId> {
        self.index.get(name).copied()
    }

    /// All timelines in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = &Timeline> {
        self.timelines.iter()
    }

    /// The full timeline slice, indexed by `EntityId`.  The engine zips
    /// this with its cursor vector each tick.
    #[inline]
    pub fn timelines(&self) -> &[Timeline] {
        &self.timelines
    }

    /// All ids in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = EntityId> + '_ {
        (0..self.timelines.len() as u32).map(EntityId)
    }
}

// ── Validation ───────────────────────────────────────────────────────────────

/// Check every structural invariant for one timeline.  Called for each
/// entity at build time; the first `Err` aborts the whole batch.
fn validate(name: &str, tl: &Timeline, batch_len: usize) -> TimelineResult<()> {
    if tl.path.is_empty() {
        return Err(TimelineError::malformed(name, "path must contain at least one waypoint"));
    }
    if !(tl.speed.is_finite() && tl.speed > 0.0) {
        return Err(TimelineError::malformed(
            name,
            format!("speed must be finite and positive, got {}", tl.speed),
        ));
    }
    if let Some(destroy) = tl.destroy_time {
        if destroy < tl.create_time {
            return Err(TimelineError::malformed(
                name,
                format!("destruction time {destroy} precedes creation time {}", tl.create_time),
            ));
        }
    }

    let last_waypoint = tl.path.len() - 1;
    let mut path_idx = 0usize;
    let mut prev_marker = tl.create_time;
    let mut finished = false;
    let mut status = PassengerStatus::Waiting;

    for (n, timed) in tl.events.iter().enumerate() {
        if finished {
            return Err(TimelineError::malformed(
                name,
                format!("event #{n} ({}) follows FINISH", timed.event.kind_name()),
            ));
        }

        // Time markers: creation ≤ marker ≤ destruction, non-decreasing.
        if timed.at < tl.create_time {
            return Err(TimelineError::malformed(
                name,
                format!("event #{n} marker {} precedes creation time {}", timed.at, tl.create_time),
            ));
        }
        if let Some(destroy) = tl.destroy_time {
            if timed.at > destroy {
                return Err(TimelineError::malformed(
                    name,
                    format!("event #{n} marker {} exceeds destruction time {destroy}", timed.at),
                ));
            }
        }
        if timed.at < prev_marker {
            return Err(TimelineError::malformed(
                name,
                format!("event #{n} marker {} is out of order", timed.at),
            ));
        }
        prev_marker = timed.at;

        match &timed.event {
            Event::Move { segments } => {
                if *segments == 0 {
                    return Err(TimelineError::malformed(name, format!("event #{n}: MOVE of zero segments")));
                }
                path_idx += *segments as usize;
                if path_idx > last_waypoint {
                    return Err(TimelineError::malformed(
                        name,
                        format!(
                            "event #{n}: MOVE targets waypoint {path_idx} but the path ends at {last_waypoint}"
                        ),
                    ));
                }
            }
            Event::Finish => finished = true,
            ev @ (Event::Load { peer }
            | Event::DropOff { peer }
            | Event::Enqueue { peer }
            | Event::Reset { peer }) => {
                if peer.index() >= batch_len {
                    return Err(TimelineError::malformed(
                        name,
                        format!("event #{n}: {} payload references an unknown entity", ev.kind_name()),
                    ));
                }
                if tl.kind == EntityKind::Passenger {
                    status = check_passenger_step(name, n, status, ev)?;
                }
            }
            Event::Appear { .. } => {
                if tl.kind == EntityKind::Passenger {
                    status = check_passenger_step(name, n, status, &timed.event)?;
                }
            }
            Event::Wait { .. } | Event::Unknown { .. } => {}
        }
    }

    Ok(())
}

/// Dry-run one passenger event through the status chain, rejecting
/// transitions that leave the WAITING → ENQUEUED → ONBOARD → COMPLETED
/// order (forward jumps allowed; RESET returns ENQUEUED/ONBOARD to
/// WAITING; COMPLETED is absorbing).
fn check_passenger_step(
    name: &str,
    n: usize,
    current: PassengerStatus,
    event: &Event,
) -> TimelineResult<PassengerStatus> {
    let next = match event {
        Event::Appear { .. } => PassengerStatus::Waiting,
        Event::Enqueue { .. } => PassengerStatus::Enqueued,
        Event::Load { .. } => PassengerStatus::Onboard,
        Event::DropOff { .. } => PassengerStatus::Completed,
        Event::Reset { .. } => PassengerStatus::Waiting,
        _ => return Ok(current),
    };

    let reset_from_claim = matches!(event, Event::Reset { .. })
        && matches!(current, PassengerStatus::Enqueued | PassengerStatus::Onboard);
    let regression = next.rank() < current.rank() && !reset_from_claim;
    let leaves_completed = current == PassengerStatus::Completed && next != current;

    if regression || leaves_completed {
        return Err(TimelineError::malformed(
            name,
            format!(
                "event #{n}: {} is illegal for a {current} passenger",
                event.kind_name()
            ),
        ));
    }
    Ok(next)
}
