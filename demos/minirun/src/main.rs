//! minirun — smallest end-to-end demo for the fleet-replay engine.
//!
//! Replays an embedded two-vehicle, two-passenger run: one vehicle picks
//! a passenger up and delivers them, the other carries an unrecognized
//! event kind to show warn-and-skip fault tolerance.  Notifications are
//! echoed to the console and logged to CSV under `output/minirun/`.

use std::path::Path;

use anyhow::Result;

use replay_core::{EntityId, SimTime};
use replay_engine::{Notification, Replay, ReplaySink};
use replay_output::{CsvLogWriter, LogSink, LogWriter};
use replay_timeline::{run_from_str, terminals_from_str};

// ── Constants ─────────────────────────────────────────────────────────────────

const TICK_MS: u32 = 100;
const MAX_TICKS: u64 = 10_000;

// ── Embedded run ──────────────────────────────────────────────────────────────

// trike_0 drives a 5-point route: claim p_0 on the way, load at the 3rd
// waypoint, deliver at the 5th.  trike_1 roams a straight line with a
// "TELEPORT" event no engine version understands.
const RUN_JSON: &str = r#"{
    "entities": [
        {
            "id": "trike_0",
            "kind": "vehicle",
            "path": [[0.0, 0.0], [40.0, 0.0], [80.0, 0.0], [80.0, 30.0], [40.0, 30.0]],
            "createTime": 0,
            "deathTime": -1,
            "speed": 0.02,
            "events": [
                { "type": "APPEAR",   "time": 0,    "location": [0.0, 0.0] },
                { "type": "ENQUEUE",  "data": "p_0", "time": 0 },
                { "type": "MOVE",     "data": 2,    "time": 0 },
                { "type": "LOAD",     "data": "p_0", "time": 4000 },
                { "type": "WAIT",     "data": 100,  "time": 4000 },
                { "type": "MOVE",     "data": 2,    "time": 4100 },
                { "type": "DROP-OFF", "data": "p_0", "time": 7600 },
                { "type": "FINISH",   "time": 7600 }
            ]
        },
        {
            "id": "trike_1",
            "kind": "vehicle",
            "path": [[10.0, 50.0], [50.0, 50.0], [90.0, 50.0]],
            "createTime": 0,
            "speed": 0.02,
            "isRoaming": true,
            "events": [
                { "type": "APPEAR",   "time": 0 },
                { "type": "MOVE",     "data": 1, "time": 0 },
                { "type": "TELEPORT", "time": 2000 },
                { "type": "MOVE",     "data": 1, "time": 2000 },
                { "type": "FINISH",   "time": 4000 }
            ]
        },
        {
            "id": "p_0",
            "kind": "passenger",
            "path": [[80.0, 0.0], [40.0, 30.0]],
            "createTime": 0,
            "speed": 0.001,
            "events": [
                { "type": "APPEAR",  "time": 0 },
                { "type": "ENQUEUE", "data": "trike_0", "time": 0 }
            ]
        },
        {
            "id": "p_1",
            "kind": "passenger",
            "path": [[40.0, 30.0]],
            "createTime": 1500,
            "speed": 0.001,
            "events": [
                { "type": "APPEAR", "time": 1500 }
            ]
        }
    ]
}"#;

const TERMINALS_JSON: &str = r#"[
    { "id": "terminal_A", "location": [0.0, 0.0], "remainingPassengers": 2, "remainingVehicles": 1 }
]"#;

// ── Console echo around the CSV sink ─────────────────────────────────────────

struct ConsoleSink<W: LogWriter> {
    inner: LogSink<W>,
    names: Vec<String>,
    lines: usize,
}

impl<W: LogWriter> ConsoleSink<W> {
    fn new(inner: LogSink<W>, names: Vec<String>) -> Self {
        Self { inner, names, lines: 0 }
    }

    fn name(&self, id: EntityId) -> &str {
        self.names.get(id.index()).map_or("?", |n| n)
    }
}

impl<W: LogWriter> ReplaySink for ConsoleSink<W> {
    fn on_tick_start(&mut self, now: SimTime) {
        self.inner.on_tick_start(now);
    }

    fn on_notification(&mut self, note: &Notification) {
        self.lines += 1;
        let peer = note
            .body
            .peer()
            .map(|p| format!(" {}", self.name(p)))
            .unwrap_or_default();
        println!(
            "[{:>7}] {:<10} {:<8} {:<16}{}",
            note.at.to_string(),
            self.name(note.entity),
            note.severity().to_string(),
            note.body.kind_name(),
            peer,
        );
        self.inner.on_notification(note);
    }

    fn on_tick_end(&mut self, now: SimTime, live: usize) {
        self.inner.on_tick_end(now, live);
    }

    fn on_replay_end(&mut self, final_time: SimTime) {
        self.inner.on_replay_end(final_time);
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    println!("=== minirun — fleet-replay demo ===");
    println!();

    // 1. Load and validate the run batch.
    let store = run_from_str(RUN_JSON)?;
    println!("Loaded {} entities", store.len());

    // 2. Terminal overlay: informational only, absence is fine.
    match terminals_from_str(TERMINALS_JSON) {
        Ok(terminals) => {
            for t in &terminals {
                println!(
                    "Terminal {} at {} ({} passengers, {} vehicles remaining)",
                    t.id, t.location, t.remaining_passengers, t.remaining_vehicles
                );
            }
        }
        Err(e) => println!("No terminal overlay ({e})"),
    }
    println!();

    // 3. Set up the replay and the CSV log sink.
    let mut replay = Replay::new(store, TICK_MS);
    std::fs::create_dir_all("output/minirun")?;
    let writer = CsvLogWriter::new(Path::new("output/minirun"))?;
    let log = LogSink::new(writer, replay.store());
    let names: Vec<String> = replay
        .store()
        .ids()
        .map(|id| replay.store().name(id).to_owned())
        .collect();
    let mut sink = ConsoleSink::new(log, names);

    // 4. Run to completion.
    let ticks = replay.run_until_idle(&mut sink, MAX_TICKS);
    if let Some(e) = sink.inner.take_error() {
        eprintln!("output error: {e}");
    }
    println!();
    println!(
        "Replay complete: {ticks} ticks, {} notifications, clock at {}",
        sink.lines,
        replay.now()
    );
    println!();

    // 5. Final entity table.
    println!("{:<10} {:<10} {:<12} {}", "Entity", "Kind", "Status", "Position");
    println!("{}", "-".repeat(52));
    for id in replay.store().ids().collect::<Vec<_>>() {
        let timeline = replay.store().get(id);
        let kind = timeline.map_or("?".to_owned(), |t| t.kind.to_string());
        let status = replay.status(id).map_or("?".to_owned(), |s| s.to_string());
        let position = replay.position(id).map_or("?".to_owned(), |p| p.to_string());
        println!("{:<10} {:<10} {:<12} {}", replay.store().name(id), kind, status, position);
    }
    println!();

    // 6. Arbitrary-time seeking, independent of the tick cursor above.
    if let Some(trike) = replay.resolve("trike_0") {
        for ms in [1_000, 3_000, 6_000] {
            let p = replay.seek(trike, SimTime(ms))?;
            println!("seek(trike_0, {ms} ms) = {p}");
        }
    }

    println!();
    println!("Event log written to output/minirun/event_log.csv");
    Ok(())
}
