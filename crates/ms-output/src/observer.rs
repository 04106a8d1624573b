//! `SimOutputObserver<W>` — bridges `SimObserver` to an `OutputWriter`.

use ms_core::Year;
use ms_model::{Counts, SimulationState, TraceLine};
use ms_realestate::MarketStats;
use ms_sim::SimObserver;

use crate::row::{CountKind, EventCountRow, TraceRow, YearSummaryRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes year summaries (at snapshot years), event
/// counts and trace lines (every year) to any [`OutputWriter`].
///
/// `SimObserver` methods cannot fail, so the first write error is stored.
/// After `sim.run()` returns, check it with [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:     W,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, last_error: None }
    }

    /// Take the stored write error, if any.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

/// Totals of `state` for `year`.
pub fn year_summary(year: Year, state: &SimulationState) -> YearSummaryRow {
    let registry = &state.registry;
    let stats = MarketStats::collect(registry, &state.geography);
    let dwellings = stats.total_units();
    let vacant = stats.total_vacant();
    let price_sum: f64 = registry.dwellings().map(|d| d.price).sum();
    YearSummaryRow {
        year:             year.0,
        persons:          registry.person_count() as u64,
        households:       registry.household_count() as u64,
        dwellings:        dwellings as u64,
        vacant_dwellings: vacant as u64,
        vacancy_rate:     if dwellings == 0 { 0.0 } else { vacant as f64 / dwellings as f64 },
        jobs:             registry.job_count() as u64,
        vacant_jobs:      registry.vacant_jobs().len() as u64,
        average_price:    if dwellings == 0 { 0.0 } else { price_sum / dwellings as f64 },
    }
}

/// One row per event kind and per unmet-demand category, zeros included.
pub fn count_rows(year: Year, counts: &Counts) -> Vec<EventCountRow> {
    let events = counts
        .events()
        .map(|(kind, count)| EventCountRow { year: year.0, kind: CountKind::Event, category: kind.as_str(), count });
    let unmet = counts.unmet_demand().map(|(category, count)| EventCountRow {
        year: year.0,
        kind: CountKind::Unmet,
        category: category.as_str(),
        count,
    });
    events.chain(unmet).collect()
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_year_end(&mut self, year: Year, counts: &Counts, trace: &[TraceLine]) {
        let result = self.writer.write_event_counts(&count_rows(year, counts));
        self.store_err(result);

        if !trace.is_empty() {
            let rows: Vec<TraceRow> = trace
                .iter()
                .map(|line| TraceRow {
                    year:         line.year.0,
                    subject_kind: line.subject.kind_str(),
                    subject_id:   line.subject.raw(),
                    message:      line.message.clone(),
                })
                .collect();
            let result = self.writer.write_trace(&rows);
            self.store_err(result);
        }
    }

    fn on_snapshot(&mut self, year: Year, state: &SimulationState) {
        let result = self.writer.write_year_summary(&year_summary(year, state));
        self.store_err(result);
    }

    fn on_sim_end(&mut self, _final_year: Year, _totals: &Counts) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
