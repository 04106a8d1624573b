//! Core error type.
//!
//! `MsError` covers the registry-consistency and configuration failures that
//! must halt a run.  Unmet demand (no vacant dwelling, no job) is never an
//! error; models count it and carry on.

use thiserror::Error;

use crate::{DwellingId, HouseholdId, JobId, PersonId, ZoneId};

#[derive(Debug, Error)]
pub enum MsError {
    #[error("{0} not found")]
    PersonNotFound(PersonId),

    #[error("{0} not found")]
    HouseholdNotFound(HouseholdId),

    #[error("{0} not found")]
    DwellingNotFound(DwellingId),

    #[error("{0} not found")]
    JobNotFound(JobId),

    #[error("{0} not found")]
    ZoneNotFound(ZoneId),

    #[error("duplicate id: {0}")]
    DuplicateId(String),

    /// The shared registry would be (or already is) corrupt.
    #[error("registry inconsistency: {0}")]
    Inconsistent(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for the core and registry crates.
pub type MsResult<T> = Result<T, MsError>;
