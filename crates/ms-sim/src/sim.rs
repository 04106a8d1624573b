//! The `Sim` struct and its yearly loop.

use log::{debug, info};

use ms_core::{SimClock, SimConfig, SimRng, Year};
use ms_model::{Counts, RelocationSearch, SimulationState, YearlyModel};

use crate::{SimObserver, SimResult};

/// The simulation runner.
///
/// Each year:
///
/// 1. **Prepare**: every model's `prepare` (construction plans its units).
/// 2. **Run**: every model's `run` in pipeline order, the demographic models
///    first, then construction realization, demolition, renovation and
///    pricing.
/// 3. **Check**: in debug builds, `Registry::check_invariants`.
/// 4. **Report**: the year's counters and trace lines go to the observer.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim {
    pub config: SimConfig,
    pub clock:  SimClock,
    /// Population, stock, gate, counters and trace.
    pub state:  SimulationState,
    pub(crate) rng:    SimRng,
    pub(crate) models: Vec<Box<dyn YearlyModel>>,
    pub(crate) search: Box<dyn RelocationSearch>,
}

impl Sim {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run from the current year up to (excluding) `config.end_year`.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        while self.clock.current_year < self.config.end_year {
            self.run_year(observer)?;
        }
        info!("run finished at {}\n{}", self.clock.current_year, self.state.counters);
        observer.on_sim_end(self.clock.current_year, self.state.counters.total());
        Ok(())
    }

    /// Run exactly `n` years from the current one (ignores `end_year`).
    pub fn run_years<O: SimObserver>(&mut self, n: u32, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            self.run_year(observer)?;
        }
        Ok(())
    }

    /// Simulate the current year without an observer and return its counts.
    pub fn step_year(&mut self) -> SimResult<Counts> {
        let counts = self.process_year(self.clock.current_year)?;
        self.state.trace.drain();
        self.clock.advance();
        Ok(counts)
    }

    pub fn model_names(&self) -> Vec<&'static str> {
        self.models.iter().map(|m| m.name()).collect()
    }

    // ── Core year processing ──────────────────────────────────────────────

    fn run_year<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        let year = self.clock.current_year;
        observer.on_year_start(year);
        let counts = self.process_year(year)?;
        let trace = self.state.trace.drain();
        observer.on_year_end(year, &counts, &trace);

        let interval = self.config.output_interval_years;
        if interval > 0 && self.clock.elapsed_years().is_multiple_of(interval) {
            observer.on_snapshot(year, &self.state);
        }
        self.clock.advance();
        Ok(())
    }

    fn process_year(&mut self, year: Year) -> SimResult<Counts> {
        self.state.begin_year(year);
        let registry = &self.state.registry;
        info!(
            "year {year} start: {} persons, {} households, {} dwellings ({} vacant), {} jobs ({} vacant)",
            registry.person_count(),
            registry.household_count(),
            registry.dwelling_count(),
            registry.vacant_dwellings().len(),
            registry.job_count(),
            registry.vacant_jobs().len()
        );

        for model in &mut self.models {
            model.prepare(&mut self.state, &mut self.rng)?;
        }
        for model in &mut self.models {
            debug!("year {year}: running {}", model.name());
            model.run(&mut self.state, &mut self.rng, self.search.as_mut())?;
        }

        #[cfg(debug_assertions)]
        self.state.registry.check_invariants()?;

        let counts = self.state.counters.take_year();
        let events: u64 = counts.events().map(|(_, n)| n).sum();
        let unmet: u64 = counts.unmet_demand().map(|(_, n)| n).sum();
        info!(
            "year {year} end: {events} events, {unmet} unmet demand; {} persons in {} households",
            self.state.registry.person_count(),
            self.state.registry.household_count()
        );
        Ok(counts)
    }
}
