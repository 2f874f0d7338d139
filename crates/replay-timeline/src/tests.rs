//! Unit tests for replay-timeline.

use replay_core::{EntityKind, Point, SimTime, VehicleStatus};

use crate::error::TimelineError;
use crate::event::{Event, TimedEvent};
use crate::loader::{run_from_str, terminals_from_str};
use crate::path::Path;
use crate::store::TimelineStoreBuilder;
use crate::timeline::Timeline;

// ── Helpers ──────────────────────────────────────────────────────────────────

fn pts(raw: &[[f64; 2]]) -> Vec<Point> {
    raw.iter().map(|&p| Point::from(p)).collect()
}

/// A bare valid timeline over `path`, speed 1.0, created at t=0.
fn bare_timeline(id: replay_core::EntityId, kind: EntityKind, path: &[[f64; 2]]) -> Timeline {
    Timeline {
        id,
        kind,
        path: Path::new(pts(path)),
        speed: 1.0,
        create_time: SimTime::ZERO,
        destroy_time: None,
        events: vec![],
        initial_vehicle_status: VehicleStatus::Idle,
    }
}

fn assert_malformed(result: Result<crate::TimelineStore, TimelineError>, needle: &str) {
    match result {
        Err(TimelineError::Malformed { detail, .. }) => {
            assert!(detail.contains(needle), "detail {detail:?} missing {needle:?}");
        }
        Err(other) => panic!("expected Malformed, got {other}"),
        Ok(_) => panic!("expected Malformed, got a store"),
    }
}

// ── Path geometry ────────────────────────────────────────────────────────────

#[cfg(test)]
mod path {
    use super::*;

    #[test]
    fn segment_and_total_length() {
        let p = Path::new(pts(&[[0.0, 0.0], [3.0, 4.0], [3.0, 10.0]]));
        assert_eq!(p.segment_count(), 2);
        assert!((p.segment_length(0).unwrap() - 5.0).abs() < 1e-12);
        assert!((p.segment_length(1).unwrap() - 6.0).abs() < 1e-12);
        assert!(p.segment_length(2).is_none());
        assert!((p.total_length() - 11.0).abs() < 1e-12);
    }

    #[test]
    fn single_point_path_has_no_segments() {
        let p = Path::new(pts(&[[1.0, 1.0]]));
        assert_eq!(p.segment_count(), 0);
        assert_eq!(p.total_length(), 0.0);
        assert_eq!(p.start(), p.end());
    }
}

// ── Store building & validation ──────────────────────────────────────────────

#[cfg(test)]
mod store {
    use super::*;

    #[test]
    fn builder_interns_names_once() {
        let mut b = TimelineStoreBuilder::new();
        let a = b.intern("trike_0");
        let a2 = b.intern("trike_0");
        let c = b.intern("passenger_0");
        assert_eq!(a, a2);
        assert_ne!(a, c);
    }

    #[test]
    fn build_rejects_empty_path() {
        let mut b = TimelineStoreBuilder::new();
        let id = b.intern("v");
        b.insert(bare_timeline(id, EntityKind::Vehicle, &[]));
        assert_malformed(b.build(), "at least one waypoint");
    }

    #[test]
    fn build_rejects_non_positive_speed() {
        let mut b = TimelineStoreBuilder::new();
        let id = b.intern("v");
        let mut tl = bare_timeline(id, EntityKind::Vehicle, &[[0.0, 0.0]]);
        tl.speed = 0.0;
        b.insert(tl);
        assert_malformed(b.build(), "speed");
    }

    #[test]
    fn build_rejects_move_past_end_of_path() {
        let mut b = TimelineStoreBuilder::new();
        let id = b.intern("v");
        let mut tl = bare_timeline(id, EntityKind::Vehicle, &[[0.0, 0.0], [1.0, 0.0]]);
        tl.events = vec![
            TimedEvent::new(SimTime::ZERO, Event::Appear { spawn: None }),
            TimedEvent::new(SimTime::ZERO, Event::Move { segments: 2 }),
        ];
        b.insert(tl);
        assert_malformed(b.build(), "path ends at 1");
    }

    #[test]
    fn build_rejects_zero_segment_move() {
        let mut b = TimelineStoreBuilder::new();
        let id = b.intern("v");
        let mut tl = bare_timeline(id, EntityKind::Vehicle, &[[0.0, 0.0], [1.0, 0.0]]);
        tl.events = vec![TimedEvent::new(SimTime::ZERO, Event::Move { segments: 0 })];
        b.insert(tl);
        assert_malformed(b.build(), "zero segments");
    }

    #[test]
    fn build_rejects_events_after_finish() {
        let mut b = TimelineStoreBuilder::new();
        let id = b.intern("v");
        let mut tl = bare_timeline(id, EntityKind::Vehicle, &[[0.0, 0.0]]);
        tl.events = vec![
            TimedEvent::new(SimTime::ZERO, Event::Finish),
            TimedEvent::new(SimTime::ZERO, Event::Wait { duration_ms: 1 }),
        ];
        b.insert(tl);
        assert_malformed(b.build(), "follows FINISH");
    }

    #[test]
    fn build_rejects_marker_before_creation() {
        let mut b = TimelineStoreBuilder::new();
        let id = b.intern("v");
        let mut tl = bare_timeline(id, EntityKind::Vehicle, &[[0.0, 0.0]]);
        tl.create_time = SimTime(5_000);
        tl.events = vec![TimedEvent::new(SimTime(4_000), Event::Appear { spawn: None })];
        b.insert(tl);
        assert_malformed(b.build(), "precedes creation");
    }

    #[test]
    fn build_rejects_marker_past_destruction() {
        let mut b = TimelineStoreBuilder::new();
        let id = b.intern("v");
        let mut tl = bare_timeline(id, EntityKind::Vehicle, &[[0.0, 0.0]]);
        tl.destroy_time = Some(SimTime(1_000));
        tl.events = vec![TimedEvent::new(SimTime(2_000), Event::Finish)];
        b.insert(tl);
        assert_malformed(b.build(), "exceeds destruction");
    }

    #[test]
    fn build_rejects_out_of_order_markers() {
        let mut b = TimelineStoreBuilder::new();
        let id = b.intern("v");
        let mut tl = bare_timeline(id, EntityKind::Vehicle, &[[0.0, 0.0]]);
        tl.events = vec![
            TimedEvent::new(SimTime(2_000), Event::Appear { spawn: None }),
            TimedEvent::new(SimTime(1_000), Event::Finish),
        ];
        b.insert(tl);
        assert_malformed(b.build(), "out of order");
    }

    #[test]
    fn build_rejects_peer_without_timeline() {
        let mut b = TimelineStoreBuilder::new();
        let v = b.intern("v");
        let ghost = b.intern("ghost");
        let mut tl = bare_timeline(v, EntityKind::Vehicle, &[[0.0, 0.0]]);
        tl.events = vec![TimedEvent::new(SimTime::ZERO, Event::Load { peer: ghost })];
        b.insert(tl);
        assert_malformed(b.build(), "no timeline");
    }

    #[test]
    fn build_rejects_duplicate_definition() {
        let mut b = TimelineStoreBuilder::new();
        let id = b.intern("v");
        b.insert(bare_timeline(id, EntityKind::Vehicle, &[[0.0, 0.0]]));
        b.insert(bare_timeline(id, EntityKind::Vehicle, &[[0.0, 0.0]]));
        assert_malformed(b.build(), "more than once");
    }

    #[test]
    fn build_rejects_passenger_regression() {
        let mut b = TimelineStoreBuilder::new();
        let p = b.intern("p");
        let v = b.intern("v");
        b.insert(bare_timeline(v, EntityKind::Vehicle, &[[0.0, 0.0]]));
        // DROP-OFF then LOAD: backward from COMPLETED.
        let mut tl = bare_timeline(p, EntityKind::Passenger, &[[0.0, 0.0]]);
        tl.events = vec![
            TimedEvent::new(SimTime::ZERO, Event::Appear { spawn: None }),
            TimedEvent::new(SimTime::ZERO, Event::DropOff { peer: v }),
            TimedEvent::new(SimTime::ZERO, Event::Load { peer: v }),
        ];
        b.insert(tl);
        assert_malformed(b.build(), "illegal for a COMPLETED passenger");
    }

    #[test]
    fn reset_from_enqueued_is_legal() {
        let mut b = TimelineStoreBuilder::new();
        let p = b.intern("p");
        let v = b.intern("v");
        b.insert(bare_timeline(v, EntityKind::Vehicle, &[[0.0, 0.0]]));
        let mut tl = bare_timeline(p, EntityKind::Passenger, &[[0.0, 0.0]]);
        tl.events = vec![
            TimedEvent::new(SimTime::ZERO, Event::Appear { spawn: None }),
            TimedEvent::new(SimTime(1), Event::Enqueue { peer: v }),
            TimedEvent::new(SimTime(2), Event::Reset { peer: v }),
            TimedEvent::new(SimTime(3), Event::Enqueue { peer: v }),
        ];
        b.insert(tl);
        assert!(b.build().is_ok());
    }

    #[test]
    fn lookups_after_build() {
        let mut b = TimelineStoreBuilder::new();
        let v = b.intern("trike_0");
        let p = b.intern("passenger_0");
        b.insert(bare_timeline(v, EntityKind::Vehicle, &[[0.0, 0.0]]));
        b.insert(bare_timeline(p, EntityKind::Passenger, &[[1.0, 1.0]]));
        let store = b.build().unwrap();

        assert_eq!(store.len(), 2);
        assert_eq!(store.resolve("trike_0"), Some(v));
        assert_eq!(store.name(p), "passenger_0");
        assert_eq!(store.get(v).unwrap().kind, EntityKind::Vehicle);
        assert!(store.get(replay_core::EntityId(99)).is_none());
        assert_eq!(store.ids().count(), 2);
    }
}

// ── JSON loader ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod loader {
    use super::*;

    const SMALL_RUN: &str = r#"{
        "entities": [
            {
                "id": "trike_0",
                "kind": "vehicle",
                "path": [[0.0, 0.0], [3.0, 4.0], [6.0, 4.0]],
                "createTime": 0,
                "deathTime": -1,
                "speed": 0.005,
                "isRoaming": true,
                "events": [
                    { "type": "APPEAR", "time": 0, "location": [0.0, 0.0] },
                    { "type": "MOVE", "data": 2, "time": 0 },
                    { "type": "LOAD", "data": "passenger_0", "time": 2000 },
                    { "type": "FINISH", "time": 3000 }
                ]
            },
            {
                "id": "passenger_0",
                "kind": "passenger",
                "path": [[6.0, 4.0]],
                "createTime": 0,
                "speed": 0.001,
                "events": [
                    { "type": "APPEAR", "time": 0 },
                    { "type": "ENQUEUE", "data": "trike_0", "time": 1000 }
                ]
            }
        ]
    }"#;

    #[test]
    fn loads_a_two_entity_run() {
        let store = run_from_str(SMALL_RUN).unwrap();
        assert_eq!(store.len(), 2);

        let trike = store.get(store.resolve("trike_0").unwrap()).unwrap();
        assert_eq!(trike.kind, EntityKind::Vehicle);
        assert_eq!(trike.initial_vehicle_status, VehicleStatus::Roaming);
        assert_eq!(trike.destroy_time, None);
        assert_eq!(trike.events.len(), 4);
        assert!(matches!(trike.events[1].event, Event::Move { segments: 2 }));

        let p = store.get(store.resolve("passenger_0").unwrap()).unwrap();
        assert_eq!(p.kind, EntityKind::Passenger);
        // Peer payload resolved through the shared interner.
        assert_eq!(p.events[1].event.peer(), store.resolve("trike_0"));
    }

    #[test]
    fn unknown_event_kind_is_preserved_not_rejected() {
        let store = run_from_str(
            r#"{ "entities": [ {
                "id": "v", "kind": "vehicle", "path": [[0.0, 0.0]],
                "createTime": 0, "speed": 1.0,
                "events": [ { "type": "TELEPORT", "time": 0 } ]
            } ] }"#,
        )
        .unwrap();
        let tl = store.get(store.resolve("v").unwrap()).unwrap();
        assert!(matches!(&tl.events[0].event, Event::Unknown { kind } if &**kind == "TELEPORT"));
    }

    #[test]
    fn missing_move_payload_is_malformed() {
        let result = run_from_str(
            r#"{ "entities": [ {
                "id": "v", "kind": "vehicle", "path": [[0.0, 0.0], [1.0, 0.0]],
                "createTime": 0, "speed": 1.0,
                "events": [ { "type": "MOVE", "time": 0 } ]
            } ] }"#,
        );
        assert_malformed(result, "MOVE requires");
    }

    #[test]
    fn missing_load_payload_is_malformed() {
        let result = run_from_str(
            r#"{ "entities": [ {
                "id": "v", "kind": "vehicle", "path": [[0.0, 0.0]],
                "createTime": 0, "speed": 1.0,
                "events": [ { "type": "LOAD", "time": 0 } ]
            } ] }"#,
        );
        assert_malformed(result, "LOAD requires");
    }

    #[test]
    fn bad_initial_status_is_malformed() {
        let result = run_from_str(
            r#"{ "entities": [ {
                "id": "v", "kind": "vehicle", "path": [[0.0, 0.0]],
                "createTime": 0, "speed": 1.0, "initialStatus": "SIDEWAYS",
                "events": []
            } ] }"#,
        );
        assert_malformed(result, "SIDEWAYS");
    }

    #[test]
    fn syntactically_broken_document_is_parse_error() {
        match run_from_str("{ not json") {
            Err(TimelineError::Parse(_)) => {}
            other => panic!("expected Parse error, got {other:?}"),
        }
    }

    #[test]
    fn explicit_death_time_is_bounded() {
        let store = run_from_str(
            r#"{ "entities": [ {
                "id": "v", "kind": "vehicle", "path": [[0.0, 0.0]],
                "createTime": 100, "deathTime": 5000, "speed": 1.0,
                "events": [ { "type": "APPEAR", "time": 100 } ]
            } ] }"#,
        )
        .unwrap();
        let tl = store.get(store.resolve("v").unwrap()).unwrap();
        assert_eq!(tl.destroy_time, Some(SimTime(5_000)));
        assert_eq!(tl.create_time, SimTime(100));
    }
}

// ── Terminal overlay ─────────────────────────────────────────────────────────

#[cfg(test)]
mod terminals {
    use super::*;

    #[test]
    fn loads_overlay_with_defaulted_counts() {
        let terminals = terminals_from_str(
            r#"[
                { "id": "term_0", "location": [1.0, 2.0], "remainingPassengers": 4, "remainingVehicles": 2 },
                { "id": "term_1", "location": [5.0, 5.0] }
            ]"#,
        )
        .unwrap();
        assert_eq!(terminals.len(), 2);
        assert_eq!(terminals[0].remaining_passengers, 4);
        assert_eq!(terminals[1].remaining_passengers, 0);
        assert_eq!(terminals[1].location, Point::new(5.0, 5.0));
    }

    #[test]
    fn broken_overlay_is_an_error_the_caller_can_ignore() {
        assert!(terminals_from_str("oops").is_err());
    }
}
