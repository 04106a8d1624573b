//! Event and unmet-demand counters.
//!
//! Every executed transition bumps its [`EventKind`]; every failed search
//! bumps an [`UnmetDemand`] category.  Counts accumulate per year (drained by
//! [`EventCounters::take_year`] for output) and over the whole run (shown by
//! the `Display` run summary).

use std::fmt;

use crate::EventKind;

/// Why demand for a dwelling, a job or land went unmet.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub enum UnmetDemand {
    MissingJob,
    LackOfDwellingDivorce,
    LackOfDwellingLeaveParents,
    /// A married couple too large to merge found no dwelling and left.
    LackOfDwellingMarriageOutmigration,
    /// The household of a demolished dwelling found no dwelling and left.
    LackOfDwellingForcedOutmigration,
    EmptyMarriageMarket,
    ConstructionNoLand,
}

impl UnmetDemand {
    pub const ALL: [UnmetDemand; 7] = [
        UnmetDemand::MissingJob,
        UnmetDemand::LackOfDwellingDivorce,
        UnmetDemand::LackOfDwellingLeaveParents,
        UnmetDemand::LackOfDwellingMarriageOutmigration,
        UnmetDemand::LackOfDwellingForcedOutmigration,
        UnmetDemand::EmptyMarriageMarket,
        UnmetDemand::ConstructionNoLand,
    ];

    pub const COUNT: usize = Self::ALL.len();

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            UnmetDemand::MissingJob                         => "missing_job",
            UnmetDemand::LackOfDwellingDivorce              => "lack_of_dwelling_divorce",
            UnmetDemand::LackOfDwellingLeaveParents         => "lack_of_dwelling_leave_parents",
            UnmetDemand::LackOfDwellingMarriageOutmigration => "lack_of_dwelling_marriage_outmigration",
            UnmetDemand::LackOfDwellingForcedOutmigration   => "lack_of_dwelling_forced_outmigration",
            UnmetDemand::EmptyMarriageMarket                => "empty_marriage_market",
            UnmetDemand::ConstructionNoLand                 => "construction_no_land",
        }
    }
}

impl fmt::Display for UnmetDemand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Counts ────────────────────────────────────────────────────────────────────

/// One set of event and unmet-demand tallies.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Counts {
    events: [u64; EventKind::COUNT],
    unmet:  [u64; UnmetDemand::COUNT],
}

impl Counts {
    #[inline]
    pub fn event(&self, kind: EventKind) -> u64 {
        self.events[kind.index()]
    }

    #[inline]
    pub fn unmet(&self, category: UnmetDemand) -> u64 {
        self.unmet[category.index()]
    }

    /// `(kind, count)` in [`EventKind::ALL`] order.
    pub fn events(&self) -> impl Iterator<Item = (EventKind, u64)> + '_ {
        EventKind::ALL.iter().map(|&k| (k, self.events[k.index()]))
    }

    /// `(category, count)` in [`UnmetDemand::ALL`] order.
    pub fn unmet_demand(&self) -> impl Iterator<Item = (UnmetDemand, u64)> + '_ {
        UnmetDemand::ALL.iter().map(|&u| (u, self.unmet[u.index()]))
    }
}

// ── EventCounters ─────────────────────────────────────────────────────────────

#[derive(Clone, Debug, Default)]
pub struct EventCounters {
    year:  Counts,
    total: Counts,
}

impl EventCounters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count_event(&mut self, kind: EventKind) {
        self.count_events(kind, 1);
    }

    pub fn count_events(&mut self, kind: EventKind, n: u64) {
        self.year.events[kind.index()] += n;
        self.total.events[kind.index()] += n;
    }

    pub fn count_unmet(&mut self, category: UnmetDemand) {
        self.year.unmet[category.index()] += 1;
        self.total.unmet[category.index()] += 1;
    }

    /// Counts since the last [`take_year`](Self::take_year).
    #[inline]
    pub fn year(&self) -> &Counts {
        &self.year
    }

    /// Counts over the whole run.
    #[inline]
    pub fn total(&self) -> &Counts {
        &self.total
    }

    /// Return this year's counts and start a fresh year.
    pub fn take_year(&mut self) -> Counts {
        std::mem::take(&mut self.year)
    }
}

/// Run summary: one line per event type and per unmet-demand category.
impl fmt::Display for EventCounters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "events:")?;
        for (kind, n) in self.total.events() {
            writeln!(f, "  {:<40} {n:>10}", kind.as_str())?;
        }
        writeln!(f, "unmet demand:")?;
        for (category, n) in self.total.unmet_demand() {
            writeln!(f, "  {:<40} {n:>10}", category.as_str())?;
        }
        Ok(())
    }
}
