//! `replay-output` — notification log writers for the fleet-replay engine.
//!
//! The engine itself performs no logging; it exposes one synchronous
//! notification stream.  This crate is the logging collaborator on the
//! other end of that stream: [`LogSink`] implements
//! `replay_engine::ReplaySink` and forwards every notification and tick
//! summary to a pluggable [`LogWriter`] backend.
//!
//! | Feature  | Backend | Files created                            |
//! |----------|---------|------------------------------------------|
//! | *(none)* | CSV     | `event_log.csv`, `tick_summaries.csv`    |
//! | `sqlite` | SQLite  | `replay.db`                              |
//!
//! # Usage
//!
//! ```rust,ignore
//! use replay_output::{CsvLogWriter, LogSink};
//!
//! let writer = CsvLogWriter::new(Path::new("./output"))?;
//! let mut sink = LogSink::new(writer, replay.store());
//! replay.run_until_idle(&mut sink, 10_000);
//! sink.take_error().map(|e| eprintln!("output error: {e}"));
//! ```

pub mod csv;
pub mod error;
pub mod row;
pub mod sink;
pub mod writer;

#[cfg(feature = "sqlite")]
pub mod sqlite;


pub use csv::CsvLogWriter;
pub use error::{OutputError, OutputResult};
pub use row::{EventLogRow, TickSummaryRow};
pub use sink::LogSink;
pub use writer::LogWriter;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteLogWriter;
