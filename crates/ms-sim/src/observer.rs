//! Observer trait for progress reporting and data collection.

use ms_core::Year;
use ms_model::{Counts, SimulationState, TraceLine};

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at year boundaries.
///
/// All methods have default no-op implementations.
///
/// # Example
///
/// ```rust,ignore
/// struct Births(u64);
///
/// impl SimObserver for Births {
///     fn on_year_end(&mut self, _year: Year, counts: &Counts, _trace: &[TraceLine]) {
///         self.0 += counts.event(EventKind::Birth);
///     }
/// }
/// ```
pub trait SimObserver {
    /// Before any model runs for `year`.
    fn on_year_start(&mut self, _year: Year) {}

    /// After the last model of `year`.  `counts` covers this year only;
    /// `trace` holds the lines about tracked entities recorded this year.
    fn on_year_end(&mut self, _year: Year, _counts: &Counts, _trace: &[TraceLine]) {}

    /// Every `output_interval_years`, after `on_year_end`, with read-only
    /// access to the whole population and stock.
    fn on_snapshot(&mut self, _year: Year, _state: &SimulationState) {}

    /// Once after the final year.  `totals` covers the whole run.
    fn on_sim_end(&mut self, _final_year: Year, _totals: &Counts) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
