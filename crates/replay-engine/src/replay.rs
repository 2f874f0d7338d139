//! The `Replay` orchestrator and its tick loop.

use replay_core::{EntityId, EntityKind, PlaybackClock, Point, SimTime, Status};
use replay_timeline::{Event, TimelineStore};

use crate::advancer;
use crate::cursor::Cursor;
use crate::error::{ReplayError, ReplayResult};
use crate::notify::{NoteBody, Notification, ReplaySink};
use crate::project;
use crate::seeker;

/// Replays one loaded run: owns the store, the playback clock, and one
/// cursor per entity.
///
/// # Tick shape
///
/// 1. **Read** the clock once; the copied value feeds every resolver.
/// 2. **Advance** every cursor (Rayon fan-out with the `parallel`
///    feature — cursors are independent, the clock value is read-only).
/// 3. **Apply** (sequential, ascending `EntityId`): vehicle LOAD-family
///    notifications project onto the referenced passenger's status, each
///    resulting change emitted directly after its cause.
/// 4. **Deliver** the notification stream to the sink, advance the clock.
///
/// The only supported cancellation is [`reset`][Replay::reset]: all
/// cursors drop and the clock zeroes.  There is no per-entity cancel.
pub struct Replay {
    store: TimelineStore,
    clock: PlaybackClock,
    cursors: Vec<Cursor>,
}

impl Replay {
    /// Build a replay over `store` with the given tick duration.
    pub fn new(store: TimelineStore, tick_ms: u32) -> Self {
        let cursors = store.iter().map(Cursor::new).collect();
        Self { store, clock: PlaybackClock::new(tick_ms), cursors }
    }

    // ── Read-only accessors ───────────────────────────────────────────────

    #[inline]
    pub fn store(&self) -> &TimelineStore {
        &self.store
    }

    /// Current clock value (copy — the clock has a single writer).
    #[inline]
    pub fn clock(&self) -> PlaybackClock {
        self.clock
    }

    #[inline]
    pub fn now(&self) -> SimTime {
        self.clock.now()
    }

    /// Resolve an external entity name to its id.
    pub fn resolve(&self, name: &str) -> Option<EntityId> {
        self.store.resolve(name)
    }

    /// Projected position of `id` as of the last completed tick.
    pub fn position(&self, id: EntityId) -> Option<Point> {
        self.cursors.get(id.index()).map(|c| c.position)
    }

    /// Projected status of `id` as of the last completed tick.
    pub fn status(&self, id: EntityId) -> Option<Status> {
        self.cursors.get(id.index()).map(|c| c.status)
    }

    /// Stateless absolute-time position for `id` (see [`seeker::seek`]
    /// for the documented divergence from tick playback).
    pub fn seek(&self, id: EntityId, at: SimTime) -> ReplayResult<Point> {
        let timeline = self.store.get(id).ok_or(ReplayError::UnknownEntity(id))?;
        Ok(seeker::seek(timeline, at))
    }

    /// Number of entities that still want ticks.
    pub fn live_count(&self) -> usize {
        self.store
            .timelines()
            .iter()
            .zip(&self.cursors)
            .filter(|(tl, c)| c.is_live(tl.events.len()))
            .count()
    }

    /// `true` once every entity has settled (finished, failed, or
    /// quiescent with a drained event list).
    pub fn is_idle(&self) -> bool {
        self.live_count() == 0
    }

    // ── Tick loop ─────────────────────────────────────────────────────────

    /// Run one tick: advance every cursor at the current clock reading,
    /// apply cross-entity status effects, deliver notifications, advance
    /// the clock.  Returns the number of entities still live.
    pub fn advance_tick<S: ReplaySink>(&mut self, sink: &mut S) -> usize {
        let now = self.clock.now();
        sink.on_tick_start(now);

        let produced = self.advance_all(now);

        // Apply phase: sequential, ascending entity order (the produced
        // stream is already ordered by entity).  Each cross-entity status
        // change is delivered directly after the notification that
        // caused it.
        let mut delivered = Vec::with_capacity(produced.len());
        for notification in produced {
            let cross = self.apply_cross_entity(&notification);
            delivered.push(notification);
            delivered.extend(cross);
        }

        for notification in &delivered {
            sink.on_notification(notification);
        }

        let live = self.live_count();
        sink.on_tick_end(now, live);
        self.clock.advance();
        live
    }

    /// Drive ticks until every entity settles or `max_ticks` elapse.
    /// Returns the number of ticks run.
    pub fn run_until_idle<S: ReplaySink>(&mut self, sink: &mut S, max_ticks: u64) -> u64 {
        let mut ticks = 0;
        while ticks < max_ticks {
            let live = self.advance_tick(sink);
            ticks += 1;
            if live == 0 {
                break;
            }
        }
        sink.on_replay_end(self.clock.now());
        ticks
    }

    /// Full batch reset: every cursor rebuilt from its timeline, clock
    /// back to zero.  The loaded run itself is untouched.
    pub fn reset(&mut self) {
        self.cursors = self.store.iter().map(Cursor::new).collect();
        self.clock.reset();
    }

    // ── Internals ─────────────────────────────────────────────────────────

    /// Advance every cursor at `now`, returning notifications in
    /// ascending entity order.
    #[cfg(not(feature = "parallel"))]
    fn advance_all(&mut self, now: SimTime) -> Vec<Notification> {
        let mut out = Vec::new();
        for (timeline, cursor) in self.store.timelines().iter().zip(self.cursors.iter_mut()) {
            advancer::advance(timeline, cursor, now, &mut out);
        }
        out
    }

    /// Parallel fan-out: cursors advance independently on the thread
    /// pool, then per-entity buffers are flattened in id order so the
    /// delivered stream is identical to the sequential build.
    #[cfg(feature = "parallel")]
    fn advance_all(&mut self, now: SimTime) -> Vec<Notification> {
        use rayon::prelude::*;

        let timelines = self.store.timelines();
        let buffers: Vec<Vec<Notification>> = timelines
            .par_iter()
            .zip(self.cursors.par_iter_mut())
            .map(|(timeline, cursor)| {
                let mut local = Vec::new();
                advancer::advance(timeline, cursor, now, &mut local);
                local
            })
            .collect();

        buffers.into_iter().flatten().collect()
    }

    /// A vehicle's LOAD / DROP-OFF / ENQUEUE / RESET reaches the
    /// referenced passenger too: project the passenger's status and
    /// report the change, if any.
    fn apply_cross_entity(&mut self, notification: &Notification) -> Option<Notification> {
        let peer = notification.body.peer()?;
        if self.store.get(notification.entity)?.kind != EntityKind::Vehicle {
            return None;
        }
        let peer_timeline = self.store.get(peer)?;
        if peer_timeline.kind != EntityKind::Passenger {
            return None;
        }

        // Synthesize the event shape the projector dispatches on.
        let event = match notification.body {
            NoteBody::Loaded { .. } => Event::Load { peer: notification.entity },
            NoteBody::DroppedOff { .. } => Event::DropOff { peer: notification.entity },
            NoteBody::Enqueued { .. } => Event::Enqueue { peer: notification.entity },
            NoteBody::ClaimReset { .. } => Event::Reset { peer: notification.entity },
            _ => return None,
        };

        let cursor = &mut self.cursors[peer.index()];
        let next = project::project(cursor.status, &event);
        if next == cursor.status {
            return None;
        }
        cursor.status = next;

        let body = match next {
            Status::Passenger(s) => NoteBody::PassengerChanged(s),
            Status::Vehicle(s) => NoteBody::VehicleChanged(s),
        };
        Some(Notification { entity: peer, at: notification.at, body })
    }
}
