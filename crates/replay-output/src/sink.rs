//! `LogSink<W>` — bridges `ReplaySink` to a `LogWriter`.

use replay_core::{EntityId, SimTime};
use replay_engine::{NoteBody, Notification, ReplaySink};
use replay_timeline::TimelineStore;

use crate::row::{EventLogRow, TickSummaryRow};
use crate::writer::LogWriter;
use crate::OutputError;

/// A [`ReplaySink`] that writes every notification and tick summary to
/// any [`LogWriter`] backend (CSV, SQLite).
///
/// Errors from the writer are stored internally because `ReplaySink`
/// methods have no return value.  After the run, check for errors with
/// [`take_error`][Self::take_error].
pub struct LogSink<W: LogWriter> {
    writer:     W,
    /// Entity names snapshot, indexed by `EntityId` — rows carry external
    /// names, not dense handles.
    names:      Vec<Box<str>>,
    tick:       u64,
    tick_notes: u64,
    last_error: Option<OutputError>,
}

impl<W: LogWriter> LogSink<W> {
    /// Create a sink backed by `writer`, snapshotting entity names from
    /// `store`.
    pub fn new(writer: W, store: &TimelineStore) -> Self {
        let names = store.ids().map(|id| store.name(id).into()).collect();
        Self {
            writer,
            names,
            tick:       0,
            tick_notes: 0,
            last_error: None,
        }
    }

    /// Take the stored write error (if any) after the run.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the run).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn name(&self, id: EntityId) -> &str {
        self.names.get(id.index()).map_or("?", |n| n)
    }

    fn store_err(&mut self, result: crate::OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }

    fn event_row(&self, note: &Notification) -> EventLogRow {
        let detail = match &note.body {
            NoteBody::Appeared { location } => location.to_string(),
            NoteBody::PassengerChanged(s) => s.to_string(),
            NoteBody::VehicleChanged(s) => s.to_string(),
            NoteBody::SkippedUnknown { kind } => kind.to_string(),
            NoteBody::Fault { detail } => detail.clone(),
            _ => String::new(),
        };
        EventLogRow {
            time_ms: note.at.0,
            entity: self.name(note.entity).to_owned(),
            severity: note.severity().to_string(),
            kind: note.body.kind_name().to_owned(),
            peer: note.body.peer().map(|p| self.name(p).to_owned()).unwrap_or_default(),
            detail,
        }
    }
}

impl<W: LogWriter> ReplaySink for LogSink<W> {
    fn on_tick_start(&mut self, _now: SimTime) {
        self.tick_notes = 0;
    }

    fn on_notification(&mut self, note: &Notification) {
        self.tick_notes += 1;
        let row = self.event_row(note);
        let result = self.writer.write_event(&row);
        self.store_err(result);
    }

    fn on_tick_end(&mut self, now: SimTime, live: usize) {
        let row = TickSummaryRow {
            tick:          self.tick,
            time_ms:       now.0,
            notifications: self.tick_notes,
            live_entities: live as u64,
        };
        let result = self.writer.write_tick_summary(&row);
        self.store_err(result);
        self.tick += 1;
    }

    fn on_replay_end(&mut self, _final_time: SimTime) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
