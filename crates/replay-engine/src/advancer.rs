//! The stepped resolver: advance one entity's cursor by one tick.
//!
//! # Event semantics per tick
//!
//! Instantaneous events (APPEAR, LOAD-family, expired WAIT, unknown
//! kinds) cascade within the tick; durative work (an in-progress MOVE, an
//! unexpired WAIT) consumes it.  The cascade is bounded by the number of
//! remaining events — every arm either returns or advances the event
//! cursor, so a tick always terminates.
//!
//! # MOVE interpolation
//!
//! `elapsed` is measured from the cursor's boundary time, so a segment's
//! clock starts when the segment does:
//!
//! ```text
//! progress = min(1, elapsed × speed / segment_length)
//! position = lerp(waypoint[i], waypoint[i+1], progress)
//! ```
//!
//! A segment completes at `progress ≥ 0.995`, not 1.0.  Upstream float
//! drift can leave progress a hair under 1.0 on the tick that should
//! finish a segment; a strict comparison stalls the entity there for a
//! full extra frame per segment.  The tolerance is part of the replay
//! contract — do not tighten it.

use replay_core::{EntityKind, SimTime, Status};
use replay_timeline::{Event, Timeline};

use crate::cursor::{Cursor, Phase};
use crate::error::ReplayError;
use crate::notify::{NoteBody, Notification};
use crate::project;

/// Segment-completion tolerance on interpolation progress.
pub const SEGMENT_DONE: f64 = 0.995;

/// Resolve one tick for one entity at clock reading `now`, appending any
/// produced notifications to `out`.
///
/// Idempotent for settled entities: finished and failed cursors return
/// immediately, as do entities created after `now`.
pub fn advance(timeline: &Timeline, cursor: &mut Cursor, now: SimTime, out: &mut Vec<Notification>) {
    match cursor.phase {
        Phase::Finished | Phase::Failed => return,
        Phase::Pending => {
            if now < timeline.create_time {
                return;
            }
            cursor.phase = Phase::Active;
            cursor.boundary = now;
        }
        Phase::Active => {}
    }

    loop {
        let Some(timed) = timeline.events.get(cursor.event_idx) else {
            // Event list drained without FINISH: quiescent, not finished.
            return;
        };

        match &timed.event {
            // ── APPEAR: place the entity, cursor advances unconditionally ──
            Event::Appear { spawn } => {
                cursor.position = spawn.unwrap_or(timeline.path.start());
                if timeline.kind == EntityKind::Passenger {
                    apply_own_status(timeline, cursor, &timed.event, now, out);
                }
                out.push(note(timeline, now, NoteBody::Appeared { location: cursor.position }));
                cursor.event_idx += 1;
                cursor.boundary = now;
            }

            // ── MOVE: at most one segment step per tick ────────────────────
            Event::Move { segments } => {
                if cursor.moves_left == 0 {
                    cursor.moves_left = *segments;
                    cursor.boundary = now;
                }

                let here = timeline.path.point(cursor.path_idx);
                let next = timeline.path.point(cursor.path_idx + 1);
                let (Some(from), Some(to)) = (here, next) else {
                    let missing = if here.is_none() { cursor.path_idx } else { cursor.path_idx + 1 };
                    fail(timeline, cursor, now, missing, out);
                    return;
                };

                let segment_length = from.distance(to);
                let elapsed = now.since(cursor.boundary) as f64;
                let progress = if segment_length <= f64::EPSILON {
                    1.0
                } else {
                    (elapsed * timeline.speed / segment_length).min(1.0)
                };
                cursor.position = from.lerp(to, progress);

                if progress >= SEGMENT_DONE {
                    cursor.boundary = now;
                    cursor.path_idx += 1;
                    cursor.moves_left -= 1;
                    if cursor.moves_left == 0 {
                        cursor.event_idx += 1;
                    }
                }
                return;
            }

            // ── WAIT: hold position; an expired wait never blocks ──────────
            Event::Wait { duration_ms } => {
                let remaining = match cursor.wait_left {
                    None => {
                        cursor.boundary = now;
                        *duration_ms
                    }
                    Some(r) => r,
                };
                let remaining = remaining.saturating_sub(now.since(cursor.boundary));
                cursor.boundary = now;
                if remaining > 0 {
                    cursor.wait_left = Some(remaining);
                    return;
                }
                cursor.wait_left = None;
                cursor.event_idx += 1;
            }

            // ── LOAD / DROP-OFF / ENQUEUE / RESET: instantaneous ──────────
            ev @ (Event::Load { peer }
            | Event::DropOff { peer }
            | Event::Enqueue { peer }
            | Event::Reset { peer }) => {
                let Some(here) = timeline.path.point(cursor.path_idx) else {
                    fail(timeline, cursor, now, cursor.path_idx, out);
                    return;
                };
                cursor.position = here;

                let body = match ev {
                    Event::Load { .. } => NoteBody::Loaded { peer: *peer },
                    Event::DropOff { .. } => NoteBody::DroppedOff { peer: *peer },
                    Event::Enqueue { .. } => NoteBody::Enqueued { peer: *peer },
                    _ => NoteBody::ClaimReset { peer: *peer },
                };
                out.push(note(timeline, now, body));

                apply_own_status(timeline, cursor, ev, now, out);
                cursor.event_idx += 1;
                cursor.boundary = now;
            }

            // ── FINISH: terminal ──────────────────────────────────────────
            Event::Finish => {
                cursor.phase = Phase::Finished;
                cursor.event_idx += 1;
                out.push(note(timeline, now, NoteBody::Finished));
                return;
            }

            // ── Unknown kind: warn and skip ───────────────────────────────
            Event::Unknown { kind } => {
                out.push(note(timeline, now, NoteBody::SkippedUnknown { kind: kind.clone() }));
                cursor.event_idx += 1;
            }
        }
    }
}

// ── Helpers ──────────────────────────────────────────────────────────────────

fn note(timeline: &Timeline, now: SimTime, body: NoteBody) -> Notification {
    Notification { entity: timeline.id, at: now, body }
}

/// Run the projector against the entity's own status, emitting a status
/// notification when the value changes.
fn apply_own_status(
    timeline: &Timeline,
    cursor: &mut Cursor,
    event: &Event,
    now: SimTime,
    out: &mut Vec<Notification>,
) {
    let next = project::project(cursor.status, event);
    if next == cursor.status {
        return;
    }
    cursor.status = next;
    let body = match next {
        Status::Passenger(s) => NoteBody::PassengerChanged(s),
        Status::Vehicle(s) => NoteBody::VehicleChanged(s),
    };
    out.push(note(timeline, now, body));
}

/// Per-entity fatal: halt this cursor, tell the stream, leave the rest of
/// the batch alone.
fn fail(
    timeline: &Timeline,
    cursor: &mut Cursor,
    now: SimTime,
    index: usize,
    out: &mut Vec<Notification>,
) {
    cursor.phase = Phase::Failed;
    let detail = ReplayError::PathIndexOutOfRange {
        entity: timeline.id,
        index,
        len: timeline.path.len(),
    }
    .to_string();
    out.push(note(timeline, now, NoteBody::Fault { detail }));
}
