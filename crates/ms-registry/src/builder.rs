//! Validated construction of the base-year registry.
//!
//! # Usage
//!
//! ```rust,ignore
//! let registry = RegistryBuilder::new(RegistryConfig::default())
//!     .dwelling(DwellingRecord { id: DwellingId(0), spec })
//!     .household(HouseholdRecord { id: HouseholdId(0), dwelling: Some(DwellingId(0)), autos: 1 })
//!     .person(PersonRecord { id: PersonId(0), household: HouseholdId(0), job: None, spec: adult })
//!     .build(&geography)?;
//! ```
//!
//! Records arrive from external readers with explicit ids.  `build` links
//! them in dependency order (dwellings and jobs, then households, then
//! persons) and rejects anything that would leave the registry inconsistent;
//! a dangling reference here is fatal because every model trusts the links.

use ms_core::{DwellingId, HouseholdId, JobId, MsError, MsResult, Occupation, PersonId, ZoneId};

use crate::{DwellingSpec, Geography, PersonSpec, Registry, RegistryConfig};

#[derive(Clone, Debug)]
pub struct DwellingRecord {
    pub id:   DwellingId,
    pub spec: DwellingSpec,
}

#[derive(Clone, Debug)]
pub struct HouseholdRecord {
    pub id:       HouseholdId,
    pub dwelling: Option<DwellingId>,
    pub autos:    u8,
}

#[derive(Clone, Debug)]
pub struct PersonRecord {
    pub id:        PersonId,
    pub household: HouseholdId,
    pub job:       Option<JobId>,
    pub spec:      PersonSpec,
}

#[derive(Clone, Debug)]
pub struct JobRecord {
    pub id:       JobId,
    pub zone:     ZoneId,
    pub job_type: String,
}

/// Fluent builder for a base-year [`Registry`].
pub struct RegistryBuilder {
    config:     RegistryConfig,
    dwellings:  Vec<DwellingRecord>,
    households: Vec<HouseholdRecord>,
    persons:    Vec<PersonRecord>,
    jobs:       Vec<JobRecord>,
}

impl RegistryBuilder {
    pub fn new(config: RegistryConfig) -> Self {
        Self {
            config,
            dwellings:  Vec::new(),
            households: Vec::new(),
            persons:    Vec::new(),
            jobs:       Vec::new(),
        }
    }

    pub fn dwelling(mut self, record: DwellingRecord) -> Self {
        self.dwellings.push(record);
        self
    }

    pub fn household(mut self, record: HouseholdRecord) -> Self {
        self.households.push(record);
        self
    }

    pub fn person(mut self, record: PersonRecord) -> Self {
        self.persons.push(record);
        self
    }

    pub fn job(mut self, record: JobRecord) -> Self {
        self.jobs.push(record);
        self
    }

    /// Bulk variants for loaders that already hold record vectors.
    pub fn dwellings(mut self, records: impl IntoIterator<Item = DwellingRecord>) -> Self {
        self.dwellings.extend(records);
        self
    }

    pub fn households(mut self, records: impl IntoIterator<Item = HouseholdRecord>) -> Self {
        self.households.extend(records);
        self
    }

    pub fn persons(mut self, records: impl IntoIterator<Item = PersonRecord>) -> Self {
        self.persons.extend(records);
        self
    }

    pub fn jobs(mut self, records: impl IntoIterator<Item = JobRecord>) -> Self {
        self.jobs.extend(records);
        self
    }

    /// Link all records and verify the result.
    pub fn build(self, geography: &Geography) -> MsResult<Registry> {
        let mut registry = Registry::new(&self.config);

        // ── Dwellings and jobs: leaves of the link graph ──────────────────
        for rec in self.dwellings {
            if !geography.contains(rec.spec.zone) {
                return Err(MsError::Inconsistent(format!(
                    "{} lies in unknown {}",
                    rec.id, rec.spec.zone
                )));
            }
            registry.insert_dwelling(rec.id, rec.spec)?;
        }
        for rec in self.jobs {
            if !geography.contains(rec.zone) {
                return Err(MsError::Inconsistent(format!("{} lies in unknown {}", rec.id, rec.zone)));
            }
            registry.insert_job(rec.id, rec.zone, rec.job_type)?;
        }

        // ── Households, moved into their dwellings ────────────────────────
        for rec in &self.households {
            registry.insert_household(rec.id, rec.autos)?;
            if let Some(d) = rec.dwelling {
                if registry.dwelling(d).is_none() {
                    return Err(MsError::Inconsistent(format!(
                        "{} references non-existent {d}",
                        rec.id
                    )));
                }
                registry.move_household(rec.id, d)?;
            }
        }

        // ── Persons, attached to households and jobs ──────────────────────
        for rec in self.persons {
            if registry.household(rec.household).is_none() {
                return Err(MsError::Inconsistent(format!(
                    "{} references non-existent {}",
                    rec.id, rec.household
                )));
            }
            if rec.job.is_some() && rec.spec.occupation != Occupation::Employed {
                return Err(MsError::Inconsistent(format!(
                    "{} holds a job but is not employed",
                    rec.id
                )));
            }
            registry.insert_person(rec.id, rec.spec)?;
            registry.add_person_to_household(rec.id, rec.household)?;
            if let Some(job) = rec.job {
                if registry.job(job).is_none() {
                    return Err(MsError::Inconsistent(format!("{} references non-existent {job}", rec.id)));
                }
                registry.assign_job(rec.id, job)?;
            }
        }

        if let Some(empty) = registry.households().find(|hh| hh.size() == 0) {
            return Err(MsError::Inconsistent(format!("{} has no members", empty.id)));
        }

        registry.check_invariants()?;
        Ok(registry)
    }
}
