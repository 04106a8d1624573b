//! CSV output backend.
//!
//! Creates three files in the output directory:
//! - `year_summaries.csv`
//! - `event_counts.csv`
//! - `trace.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::error::ensure_open;
use crate::writer::OutputWriter;
use crate::{EventCountRow, OutputResult, TraceRow, YearSummaryRow};

pub const YEAR_SUMMARY_HEADER: [&str; 9] = [
    "year",
    "persons",
    "households",
    "dwellings",
    "vacant_dwellings",
    "vacancy_rate",
    "jobs",
    "vacant_jobs",
    "average_price",
];
pub const EVENT_COUNT_HEADER: [&str; 4] = ["year", "kind", "category", "count"];
pub const TRACE_HEADER: [&str; 4] = ["year", "subject_kind", "subject_id", "message"];

pub struct CsvWriter {
    summaries: Writer<File>,
    counts:    Writer<File>,
    trace:     Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Create the three files in `dir` (which must exist) and write headers.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut summaries = Writer::from_path(dir.join("year_summaries.csv"))?;
        summaries.write_record(YEAR_SUMMARY_HEADER)?;

        let mut counts = Writer::from_path(dir.join("event_counts.csv"))?;
        counts.write_record(EVENT_COUNT_HEADER)?;

        let mut trace = Writer::from_path(dir.join("trace.csv"))?;
        trace.write_record(TRACE_HEADER)?;

        Ok(Self { summaries, counts, trace, finished: false })
    }
}

impl OutputWriter for CsvWriter {
    fn write_year_summary(&mut self, row: &YearSummaryRow) -> OutputResult<()> {
        ensure_open(self.finished, "year_summaries", row.year)?;
        self.summaries.write_record(&[
            row.year.to_string(),
            row.persons.to_string(),
            row.households.to_string(),
            row.dwellings.to_string(),
            row.vacant_dwellings.to_string(),
            format!("{:.4}", row.vacancy_rate),
            row.jobs.to_string(),
            row.vacant_jobs.to_string(),
            format!("{:.2}", row.average_price),
        ])?;
        Ok(())
    }

    fn write_event_counts(&mut self, rows: &[EventCountRow]) -> OutputResult<()> {
        if let Some(first) = rows.first() {
            ensure_open(self.finished, "event_counts", first.year)?;
        }
        for row in rows {
            self.counts.write_record(&[
                row.year.to_string(),
                row.kind.as_str().to_string(),
                row.category.to_string(),
                row.count.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_trace(&mut self, rows: &[TraceRow]) -> OutputResult<()> {
        if let Some(first) = rows.first() {
            ensure_open(self.finished, "trace", first.year)?;
        }
        for row in rows {
            self.trace.write_record(&[
                row.year.to_string(),
                row.subject_kind.to_string(),
                row.subject_id.to_string(),
                row.message.clone(),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.summaries.flush()?;
        self.counts.flush()?;
        self.trace.flush()?;
        Ok(())
    }
}
