//! Trace hook for tracked entities.
//!
//! A debugging aid: when an event touches a tracked person, household or
//! dwelling, a human-readable line is kept here (for output writers) and
//! emitted at `trace!` level.

use rustc_hash::FxHashSet;

use ms_core::{DwellingId, EntityId, HouseholdId, PersonId, Year};

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum TraceSubject {
    Person(PersonId),
    Household(HouseholdId),
    Dwelling(DwellingId),
}

impl TraceSubject {
    pub fn kind_str(self) -> &'static str {
        match self {
            TraceSubject::Person(_)    => "person",
            TraceSubject::Household(_) => "household",
            TraceSubject::Dwelling(_)  => "dwelling",
        }
    }

    pub fn raw(self) -> u32 {
        match self {
            TraceSubject::Person(p)    => p.raw(),
            TraceSubject::Household(h) => h.raw(),
            TraceSubject::Dwelling(d)  => d.raw(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TraceLine {
    pub year:    Year,
    pub subject: TraceSubject,
    pub message: String,
}

#[derive(Default)]
pub struct TraceLog {
    persons:    FxHashSet<PersonId>,
    households: FxHashSet<HouseholdId>,
    dwellings:  FxHashSet<DwellingId>,
    lines:      Vec<TraceLine>,
}

impl TraceLog {
    pub fn new(persons: &[u32], households: &[u32], dwellings: &[u32]) -> Self {
        Self {
            persons:    persons.iter().map(|&r| PersonId::from_raw(r)).collect(),
            households: households.iter().map(|&r| HouseholdId::from_raw(r)).collect(),
            dwellings:  dwellings.iter().map(|&r| DwellingId::from_raw(r)).collect(),
            lines:      Vec::new(),
        }
    }

    pub fn is_tracked(&self, subject: TraceSubject) -> bool {
        match subject {
            TraceSubject::Person(p)    => self.persons.contains(&p),
            TraceSubject::Household(h) => self.households.contains(&h),
            TraceSubject::Dwelling(d)  => self.dwellings.contains(&d),
        }
    }

    /// `true` when nothing is tracked, so callers can skip building messages.
    pub fn is_idle(&self) -> bool {
        self.persons.is_empty() && self.households.is_empty() && self.dwellings.is_empty()
    }

    /// Append a line if `subject` is tracked.  `message` is only evaluated
    /// for tracked subjects.
    pub fn record(&mut self, year: Year, subject: TraceSubject, message: impl FnOnce() -> String) {
        if !self.is_tracked(subject) {
            return;
        }
        let message = message();
        log::trace!("{year} {} {}: {message}", subject.kind_str(), subject.raw());
        self.lines.push(TraceLine { year, subject, message });
    }

    pub fn lines(&self) -> &[TraceLine] {
        &self.lines
    }

    /// Hand all buffered lines to the caller.
    pub fn drain(&mut self) -> Vec<TraceLine> {
        std::mem::take(&mut self.lines)
    }
}
