//! The `OutputWriter` trait implemented by all backend writers.

use crate::{EventCountRow, OutputResult, TraceRow, YearSummaryRow};

/// Trait implemented by the CSV and SQLite writers.
///
/// Errors surface to [`SimOutputObserver`](crate::SimOutputObserver), which
/// stores the first one for [`take_error`](crate::SimOutputObserver::take_error).
pub trait OutputWriter {
    fn write_year_summary(&mut self, row: &YearSummaryRow) -> OutputResult<()>;

    fn write_event_counts(&mut self, rows: &[EventCountRow]) -> OutputResult<()>;

    fn write_trace(&mut self, rows: &[TraceRow]) -> OutputResult<()>;

    /// Flush and close all underlying handles.  Idempotent.
    fn finish(&mut self) -> OutputResult<()>;
}
