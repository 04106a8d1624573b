//! Plain data row types written by output backends.

/// Population and stock totals at the end of one year.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YearSummaryRow {
    pub year:             i32,
    pub persons:          u64,
    pub households:       u64,
    pub dwellings:        u64,
    pub vacant_dwellings: u64,
    /// `vacant_dwellings / dwellings`; `0.0` without dwellings.
    pub vacancy_rate:     f64,
    pub jobs:             u64,
    pub vacant_jobs:      u64,
    /// Mean monthly price over all dwellings; `0.0` without dwellings.
    pub average_price:    f64,
}

/// Whether an [`EventCountRow`] counts executed events or unmet demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountKind {
    Event,
    Unmet,
}

impl CountKind {
    pub fn as_str(self) -> &'static str {
        match self {
            CountKind::Event => "event",
            CountKind::Unmet => "unmet",
        }
    }
}

/// One counter for one year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventCountRow {
    pub year:     i32,
    pub kind:     CountKind,
    pub category: &'static str,
    pub count:    u64,
}

/// One trace-hook line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceRow {
    pub year:         i32,
    /// `person`, `household` or `dwelling`.
    pub subject_kind: &'static str,
    pub subject_id:   u32,
    pub message:      String,
}
