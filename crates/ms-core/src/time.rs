//! Simulation time model.
//!
//! The simulation advances in whole calendar years.  `Year` is the canonical
//! time unit; `SimClock` tracks the current year and how many years one step
//! represents (the aging period).

use std::fmt;

use serde::{Deserialize, Serialize};

// ── Year ──────────────────────────────────────────────────────────────────────

/// A calendar year.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Year(pub i32);

impl Year {
    /// The year `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u32) -> Year {
        Year(self.0 + n as i32)
    }

    /// Whole years from `earlier` to `self` (zero if `earlier` is later).
    #[inline]
    pub fn since(self, earlier: Year) -> u32 {
        (self.0 - earlier.0).max(0) as u32
    }
}

impl std::ops::Add<u32> for Year {
    type Output = Year;
    #[inline]
    fn add(self, rhs: u32) -> Year {
        self.offset(rhs)
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Current simulated year plus the step length.
#[derive(Clone, Debug)]
pub struct SimClock {
    pub start_year:   Year,
    pub current_year: Year,
    /// Years added per step.  The Birthday model ages persons by this much.
    pub period_years: u32,
}

impl SimClock {
    pub fn new(start_year: Year, period_years: u32) -> Self {
        Self {
            start_year,
            current_year: start_year,
            period_years,
        }
    }

    /// Advance the clock by one step.  A zero-length period still advances
    /// the calendar by one year so the run terminates.
    #[inline]
    pub fn advance(&mut self) {
        self.current_year = self.current_year + self.period_years.max(1);
    }

    /// Simulated years elapsed since the start.
    #[inline]
    pub fn elapsed_years(&self) -> u32 {
        self.current_year.since(self.start_year)
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "year {} (+{} since {})", self.current_year, self.elapsed_years(), self.start_year)
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Run-level configuration, the `sim` section of the scenario file.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimConfig {
    /// First simulated year (the base year of the synthetic population).
    pub start_year: Year,

    /// The run stops before simulating this year.
    pub end_year: Year,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    /// Years per simulation step; persons age by this amount.
    pub period_years: u32,

    /// Emit a year summary every N years.  1 = every year.
    pub output_interval_years: u32,

    /// Person ids whose events are written to the trace log.
    pub trace_persons: Vec<u32>,

    /// Household ids whose events are written to the trace log.
    pub trace_households: Vec<u32>,

    /// Dwelling ids whose events are written to the trace log.
    pub trace_dwellings: Vec<u32>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            start_year:            Year(2020),
            end_year:              Year(2030),
            seed:                  42,
            period_years:          1,
            output_interval_years: 1,
            trace_persons:         Vec::new(),
            trace_households:      Vec::new(),
            trace_dwellings:       Vec::new(),
        }
    }
}

impl SimConfig {
    /// Number of steps between `start_year` and `end_year`.
    pub fn total_years(&self) -> u32 {
        self.end_year.since(self.start_year)
    }

    /// Construct a `SimClock` pre-configured for this run.
    pub fn make_clock(&self) -> SimClock {
        SimClock::new(self.start_year, self.period_years)
    }
}
