//! `SimulationState` — everything a yearly model reads or mutates.

use ms_core::{DwellingType, HouseholdId, MsResult, Year};
use ms_registry::{Geography, Registry};

use crate::{Event, EventCounters, EventGate, TraceLog, TraceSubject, UnmetDemand};

/// Aggregates one model publishes for models that run later (next year).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MarketSignals {
    average_price: [Option<f64>; DwellingType::COUNT],
}

impl MarketSignals {
    /// Average price per type as of the last pricing pass.
    #[inline]
    pub fn average_price(&self, kind: DwellingType) -> Option<f64> {
        self.average_price[kind.index()]
    }

    pub fn set_average_price(&mut self, kind: DwellingType, price: Option<f64>) {
        self.average_price[kind.index()] = price;
    }
}

pub struct SimulationState {
    pub year:         Year,
    pub period_years: u32,
    pub registry:     Registry,
    pub geography:    Geography,
    pub gate:         EventGate,
    pub counters:     EventCounters,
    pub trace:        TraceLog,
    pub signals:      MarketSignals,
}

impl SimulationState {
    pub fn new(registry: Registry, geography: Geography, gate: EventGate, year: Year) -> Self {
        let mut state = Self {
            year,
            period_years: 1,
            registry,
            geography,
            gate,
            counters: EventCounters::new(),
            trace: TraceLog::default(),
            signals: MarketSignals::default(),
        };
        state.gate.begin_year(year);
        state
    }

    pub fn with_trace(mut self, trace: TraceLog) -> Self {
        self.trace = trace;
        self
    }

    pub fn with_period(mut self, period_years: u32) -> Self {
        self.period_years = period_years;
        self
    }

    /// Start `year`: clear the gate ledger.
    pub fn begin_year(&mut self, year: Year) {
        self.year = year;
        self.gate.begin_year(year);
    }

    #[inline]
    pub fn is_eligible(&self, event: Event) -> bool {
        self.gate.is_eligible(&self.registry, event)
    }

    /// Book an executed event: gate ledger, counters and trace.
    pub fn commit(&mut self, event: Event, describe: impl FnOnce() -> String) {
        self.gate.record(event);
        self.counters.count_event(event.kind());
        let subject = match event {
            Event::Demolition(d) | Event::Renovation(d) | Event::Pricing(d) => TraceSubject::Dwelling(d),
            Event::Birth(p)
            | Event::Death(p)
            | Event::Birthday(p)
            | Event::Marriage(p)
            | Event::Divorce(p)
            | Event::LeaveParentalHousehold(p)
            | Event::FindJob(p)
            | Event::QuitJob(p) => TraceSubject::Person(p),
        };
        self.trace.record(self.year, subject, describe);
    }

    pub fn count_unmet(&mut self, category: UnmetDemand) {
        self.counters.count_unmet(category);
    }

    pub fn trace(&mut self, subject: TraceSubject, describe: impl FnOnce() -> String) {
        self.trace.record(self.year, subject, describe);
    }

    /// Tidy a household after a member left: an empty household is
    /// dissolved (vacating its dwelling), and a household of children only
    /// gets its oldest child promoted to head.
    pub fn settle_household(&mut self, household: HouseholdId) -> MsResult<()> {
        if self.registry.household(household).is_none() {
            return Ok(());
        }
        if self.registry.household_size(household) == 0 {
            self.registry.remove_household(household)?;
            self.trace(TraceSubject::Household(household), || "dissolved".into());
        } else if let Some(head) = self.registry.promote_oldest_child(household) {
            self.trace(TraceSubject::Household(household), || format!("{head} promoted to head"));
        }
        Ok(())
    }
}
