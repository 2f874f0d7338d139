//! The `LogWriter` trait implemented by all backend writers.

use crate::{EventLogRow, OutputResult, TickSummaryRow};

/// Trait implemented by the CSV and SQLite writers.
///
/// All methods are infallible from the sink's perspective — errors are
/// stored internally and retrieved with [`LogSink::take_error`][crate::LogSink::take_error].
pub trait LogWriter {
    /// Write one notification row.
    fn write_event(&mut self, row: &EventLogRow) -> OutputResult<()>;

    /// Write one tick summary row.
    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()>;

    /// Flush and close all underlying handles.
    ///
    /// Idempotent — safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
