//! The Event Rule Gate.
//!
//! `EventGate::is_eligible` is a pure predicate over the current registry
//! plus the events already executed this year.  Models call it immediately
//! before every mutation, after any draws; a `false` means "skip silently".
//! It is the only guard against acting on an entity that an earlier model
//! removed or changed in the same year.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use ms_core::{Gender, Occupation, Role, Year};
use ms_registry::Registry;

use crate::{Event, EventKind, ModelError, ModelResult};

/// Age limits for event preconditions.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GateRules {
    pub min_marriage_age:      u32,
    pub min_fertile_age:       u32,
    pub max_fertile_age:       u32,
    pub min_leave_parents_age: u32,
    pub min_working_age:       u32,
    pub max_working_age:       u32,
}

impl Default for GateRules {
    fn default() -> Self {
        Self {
            min_marriage_age:      18,
            min_fertile_age:       15,
            max_fertile_age:       49,
            min_leave_parents_age: 16,
            min_working_age:       16,
            max_working_age:       74,
        }
    }
}

impl GateRules {
    pub fn validate(&self) -> ModelResult<()> {
        if self.min_fertile_age > self.max_fertile_age {
            return Err(ModelError::Config(format!(
                "fertile ages {}..={} are reversed",
                self.min_fertile_age, self.max_fertile_age
            )));
        }
        if self.min_working_age > self.max_working_age {
            return Err(ModelError::Config(format!(
                "working ages {}..={} are reversed",
                self.min_working_age, self.max_working_age
            )));
        }
        Ok(())
    }
}

pub struct EventGate {
    rules:  GateRules,
    year:   Year,
    ledger: FxHashSet<(EventKind, u32)>,
}

impl EventGate {
    pub fn new(rules: GateRules) -> Self {
        Self { rules, year: Year(0), ledger: FxHashSet::default() }
    }

    #[inline]
    pub fn rules(&self) -> &GateRules {
        &self.rules
    }

    #[inline]
    pub fn year(&self) -> Year {
        self.year
    }

    /// Forget last year's events.
    pub fn begin_year(&mut self, year: Year) {
        self.year = year;
        self.ledger.clear();
    }

    /// Note that `event` executed.
    pub fn record(&mut self, event: Event) {
        self.ledger.insert((event.kind(), event.subject()));
    }

    pub fn has_happened(&self, kind: EventKind, subject: u32) -> bool {
        self.ledger.contains(&(kind, subject))
    }

    /// Can `event` execute against the registry as it is now?
    pub fn is_eligible(&self, registry: &Registry, event: Event) -> bool {
        let subject = event.subject();
        if event.conflicts().iter().any(|&k| self.has_happened(k, subject)) {
            return false;
        }
        let r = &self.rules;

        match event {
            Event::Birth(p) => registry.person(p).is_some_and(|m| {
                m.gender == Gender::Female
                    && (r.min_fertile_age..=r.max_fertile_age).contains(&m.age)
                    && m.household().is_some()
            }),
            Event::Death(p) | Event::Birthday(p) => registry.person(p).is_some(),
            Event::Marriage(p) => registry.person(p).is_some_and(|x| {
                x.role != Role::Married && x.age >= r.min_marriage_age && x.household().is_some()
            }),
            Event::Divorce(p) => registry
                .person(p)
                .is_some_and(|x| x.role == Role::Married && registry.spouse_of(p).is_some()),
            Event::LeaveParentalHousehold(p) => registry.person(p).is_some_and(|x| {
                x.role == Role::Child
                    && x.age >= r.min_leave_parents_age
                    && x.household().is_some_and(|h| registry.household_size(h) > 1)
            }),
            Event::FindJob(p) => registry.person(p).is_some_and(|x| {
                x.occupation == Occupation::Unemployed
                    && x.job().is_none()
                    && (r.min_working_age..=r.max_working_age).contains(&x.age)
            }),
            Event::QuitJob(p) => registry
                .person(p)
                .is_some_and(|x| x.occupation == Occupation::Employed && x.job().is_some()),
            Event::Demolition(d) => registry.dwelling(d).is_some_and(|x| x.year_built < self.year),
            Event::Renovation(d) => registry.dwelling(d).is_some(),
            Event::Pricing(d) => registry.dwelling(d).is_some_and(|x| !x.is_restricted()),
        }
    }
}
