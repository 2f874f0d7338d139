//! CSV log backend.
//!
//! Creates two files in the configured output directory:
//! - `event_log.csv`
//! - `tick_summaries.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::LogWriter;
use crate::{EventLogRow, OutputResult, TickSummaryRow};

/// Writes the replay log to two CSV files.
pub struct CsvLogWriter {
    events:    Writer<File>,
    summaries: Writer<File>,
    finished:  bool,
}

impl CsvLogWriter {
    /// Open (or create) the two CSV files in `dir` and write header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut events = Writer::from_path(dir.join("event_log.csv"))?;
        events.write_record(["time_ms", "entity", "severity", "kind", "peer", "detail"])?;

        let mut summaries = Writer::from_path(dir.join("tick_summaries.csv"))?;
        summaries.write_record(["tick", "time_ms", "notifications", "live_entities"])?;

        Ok(Self {
            events,
            summaries,
            finished: false,
        })
    }
}

impl LogWriter for CsvLogWriter {
    fn write_event(&mut self, row: &EventLogRow) -> OutputResult<()> {
        self.events.write_record(&[
            row.time_ms.to_string(),
            row.entity.clone(),
            row.severity.clone(),
            row.kind.clone(),
            row.peer.clone(),
            row.detail.clone(),
        ])?;
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.tick.to_string(),
            row.time_ms.to_string(),
            row.notifications.to_string(),
            row.live_entities.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.events.flush()?;
        self.summaries.flush()?;
        Ok(())
    }
}
