//! JSON run loader.
//!
//! # Run document
//!
//! One document per simulation run, produced by the external data-serving
//! collaborator:
//!
//! ```json
//! {
//!   "entities": [
//!     {
//!       "id": "trike_0",
//!       "kind": "vehicle",
//!       "path": [[0.0, 0.0], [3.0, 4.0]],
//!       "createTime": 0,
//!       "deathTime": -1,
//!       "speed": 0.005,
//!       "isRoaming": true,
//!       "events": [
//!         { "type": "APPEAR", "time": 0, "location": [0.0, 0.0] },
//!         { "type": "MOVE",   "data": 1, "time": 0 },
//!         { "type": "LOAD",   "data": "passenger_2", "time": 5000 },
//!         { "type": "FINISH", "time": 9000 }
//!       ]
//!     }
//!   ]
//! }
//! ```
//!
//! **`data`** field, by event `type`:
//!
//! | Type                                | Payload                         |
//! |-------------------------------------|---------------------------------|
//! | `MOVE`                              | segment count (positive int)    |
//! | `WAIT`                              | duration in milliseconds        |
//! | `LOAD` / `DROP-OFF` / `ENQUEUE` / `RESET` | peer entity id (string)   |
//! | `APPEAR` / `FINISH`                 | none (`location` spawns APPEAR) |
//! | anything else                       | preserved as `Event::Unknown`   |
//!
//! `deathTime < 0` means unbounded.  `initialStatus` (IDLE / AT_TERMINAL /
//! ROAMING) is the scheduling context's pass-through value; when absent,
//! `isRoaming: true` maps to ROAMING and everything else to IDLE.
//!
//! The terminal overlay is a separate JSON array loaded best-effort by
//! [`terminals_from_reader`]; its absence never affects replay.

use std::io::Read;

use serde::Deserialize;
use serde_json::Value;

use replay_core::{EntityKind, Point, SimTime, VehicleStatus};

use crate::error::{TimelineError, TimelineResult};
use crate::event::{Event, TimedEvent};
use crate::path::Path;
use crate::store::{TimelineStore, TimelineStoreBuilder};
use crate::terminal::Terminal;
use crate::timeline::Timeline;

// ── Wire records ─────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct RunRecord {
    entities: Vec<EntityRecord>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct EntityRecord {
    id:             String,
    kind:           EntityKind,
    path:           Vec<[f64; 2]>,
    create_time:    u64,
    #[serde(default = "unbounded")]
    death_time:     i64,
    speed:          f64,
    #[serde(default)]
    initial_status: Option<String>,
    #[serde(default)]
    is_roaming:     bool,
    events:         Vec<EventRecord>,
}

#[derive(Deserialize)]
struct EventRecord {
    #[serde(rename = "type")]
    kind:     String,
    #[serde(default)]
    data:     Option<Value>,
    time:     u64,
    #[serde(default)]
    location: Option<[f64; 2]>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TerminalRecord {
    id:                   String,
    location:             [f64; 2],
    #[serde(default)]
    remaining_passengers: u32,
    #[serde(default)]
    remaining_vehicles:   u32,
}

fn unbounded() -> i64 {
    -1
}

// ── Public API ───────────────────────────────────────────────────────────────

/// Load and validate a run batch from any `Read` source.
///
/// All entity ids are interned up front so event payloads may reference
/// entities defined later in the document.  Any structural violation
/// rejects the entire batch.
pub fn run_from_reader<R: Read>(reader: R) -> TimelineResult<TimelineStore> {
    let record: RunRecord =
        serde_json::from_reader(reader).map_err(|e| TimelineError::Parse(e.to_string()))?;

    let mut builder = TimelineStoreBuilder::new();
    for entity in &record.entities {
        builder.intern(&entity.id);
    }
    for entity in record.entities {
        let timeline = build_timeline(&mut builder, entity)?;
        builder.insert(timeline);
    }
    builder.build()
}

/// Like [`run_from_reader`] for an in-memory document.  Useful for tests
/// and embedded demo runs.
pub fn run_from_str(json: &str) -> TimelineResult<TimelineStore> {
    run_from_reader(json.as_bytes())
}

/// Load the terminal overlay from any `Read` source.
///
/// The overlay is informational; callers are expected to treat a failure
/// here as "no overlay" rather than a replay error.
pub fn terminals_from_reader<R: Read>(reader: R) -> TimelineResult<Vec<Terminal>> {
    let records: Vec<TerminalRecord> =
        serde_json::from_reader(reader).map_err(|e| TimelineError::Parse(e.to_string()))?;

    Ok(records
        .into_iter()
        .map(|r| Terminal {
            id: r.id.into(),
            location: Point::from(r.location),
            remaining_passengers: r.remaining_passengers,
            remaining_vehicles: r.remaining_vehicles,
        })
        .collect())
}

/// Like [`terminals_from_reader`] for an in-memory document.
pub fn terminals_from_str(json: &str) -> TimelineResult<Vec<Terminal>> {
    terminals_from_reader(json.as_bytes())
}

// ── Record → Timeline ────────────────────────────────────────────────────────

fn build_timeline(
    builder: &mut TimelineStoreBuilder,
    record: EntityRecord,
) -> TimelineResult<Timeline> {
    let id = builder.intern(&record.id);

    let initial_vehicle_status = parse_initial_status(&record)?;
    let events = record
        .events
        .iter()
        .enumerate()
        .map(|(n, ev)| parse_event(builder, &record.id, n, ev))
        .collect::<TimelineResult<Vec<TimedEvent>>>()?;

    Ok(Timeline {
        id,
        kind: record.kind,
        path: Path::new(record.path.into_iter().map(Point::from).collect()),
        speed: record.speed,
        create_time: SimTime(record.create_time),
        destroy_time: (record.death_time >= 0).then(|| SimTime(record.death_time as u64)),
        events,
        initial_vehicle_status,
    })
}

fn parse_event(
    builder: &mut TimelineStoreBuilder,
    entity: &str,
    n: usize,
    record: &EventRecord,
) -> TimelineResult<TimedEvent> {
    let event = match record.kind.as_str() {
        "APPEAR" => Event::Appear { spawn: record.location.map(Point::from) },
        "MOVE" => Event::Move { segments: int_payload(entity, n, "MOVE", record)? },
        "WAIT" => Event::Wait { duration_ms: int_payload(entity, n, "WAIT", record)? as u64 },
        "LOAD" => Event::Load { peer: peer_payload(builder, entity, n, "LOAD", record)? },
        "DROP-OFF" => Event::DropOff { peer: peer_payload(builder, entity, n, "DROP-OFF", record)? },
        "ENQUEUE" => Event::Enqueue { peer: peer_payload(builder, entity, n, "ENQUEUE", record)? },
        "RESET" => Event::Reset { peer: peer_payload(builder, entity, n, "RESET", record)? },
        "FINISH" => Event::Finish,
        other => Event::Unknown { kind: other.into() },
    };
    Ok(TimedEvent::new(SimTime(record.time), event))
}

/// Numeric `data` payload (MOVE segment count, WAIT duration).
fn int_payload(entity: &str, n: usize, kind: &str, record: &EventRecord) -> TimelineResult<u32> {
    record
        .data
        .as_ref()
        .and_then(Value::as_u64)
        .and_then(|v| u32::try_from(v).ok())
        .ok_or_else(|| {
            TimelineError::malformed(
                entity,
                format!("event #{n}: {kind} requires a non-negative integer payload"),
            )
        })
}

/// Peer-id `data` payload (LOAD / DROP-OFF / ENQUEUE / RESET).
fn peer_payload(
    builder: &mut TimelineStoreBuilder,
    entity: &str,
    n: usize,
    kind: &str,
    record: &EventRecord,
) -> TimelineResult<replay_core::EntityId> {
    let name = record.data.as_ref().and_then(Value::as_str).ok_or_else(|| {
        TimelineError::malformed(entity, format!("event #{n}: {kind} requires an entity-id payload"))
    })?;
    Ok(builder.intern(name))
}

fn parse_initial_status(record: &EntityRecord) -> TimelineResult<VehicleStatus> {
    match record.initial_status.as_deref() {
        None => Ok(if record.is_roaming { VehicleStatus::Roaming } else { VehicleStatus::Idle }),
        Some("IDLE") => Ok(VehicleStatus::Idle),
        Some("AT_TERMINAL") => Ok(VehicleStatus::AtTerminal),
        Some("ROAMING") => Ok(VehicleStatus::Roaming),
        Some(other) => Err(TimelineError::malformed(
            &record.id,
            format!("initialStatus {other:?}: expected IDLE, AT_TERMINAL, or ROAMING"),
        )),
    }
}
