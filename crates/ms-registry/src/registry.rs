//! `Registry` — the shared store every model reads and mutates.
//!
//! All link mutations go through methods here so both directions of each
//! link and the vacancy indices change together:
//!
//! - `dwelling.resident == None` ⇔ the dwelling is in `vacant_dwellings`
//! - `job.worker == None` ⇔ the job is in `vacant_jobs`
//! - `household.persons` ⇔ `person.household`
//!
//! A violated precondition (occupying an occupied dwelling, removing a
//! non-empty household, dangling ids) is a data inconsistency and surfaces as
//! `MsError`, never as a silent fix-up.

use serde::{Deserialize, Serialize};

use ms_core::{
    DwellingId, HouseholdId, JobId, MsError, MsResult, Occupation, PersonId, Race, Role, ZoneId,
};

use crate::entity::{Dwelling, DwellingSpec, Household, Job, Person, PersonSpec};
use crate::{Arena, IdPolicy, VacancyIndex};

// ── RegistryConfig ────────────────────────────────────────────────────────────

/// The `registry` section of the scenario file.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RegistryConfig {
    pub person_ids:    IdPolicy,
    pub household_ids: IdPolicy,
    pub dwelling_ids:  IdPolicy,
    pub job_ids:       IdPolicy,
    /// Highest dwelling quality level `Q`; levels run `1..=Q`.
    pub max_quality:   u8,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            person_ids:    IdPolicy::Monotonic,
            household_ids: IdPolicy::Monotonic,
            dwelling_ids:  IdPolicy::Recycle,
            job_ids:       IdPolicy::Monotonic,
            max_quality:   4,
        }
    }
}

// ── Registry ──────────────────────────────────────────────────────────────────

pub struct Registry {
    max_quality:      u8,
    persons:          Arena<PersonId, Person>,
    households:       Arena<HouseholdId, Household>,
    dwellings:        Arena<DwellingId, Dwelling>,
    jobs:             Arena<JobId, Job>,
    vacant_dwellings: VacancyIndex<DwellingId>,
    vacant_jobs:      VacancyIndex<JobId>,
}

impl Registry {
    pub fn new(config: &RegistryConfig) -> Self {
        Self {
            max_quality:      config.max_quality,
            persons:          Arena::new(config.person_ids),
            households:       Arena::new(config.household_ids),
            dwellings:        Arena::new(config.dwelling_ids),
            jobs:             Arena::new(config.job_ids),
            vacant_dwellings: VacancyIndex::new(),
            vacant_jobs:      VacancyIndex::new(),
        }
    }

    #[inline]
    pub fn max_quality(&self) -> u8 {
        self.max_quality
    }

    // ── Lookup ────────────────────────────────────────────────────────────

    #[inline]
    pub fn person(&self, id: PersonId) -> Option<&Person> {
        self.persons.get(id)
    }

    #[inline]
    pub fn person_mut(&mut self, id: PersonId) -> Option<&mut Person> {
        self.persons.get_mut(id)
    }

    pub fn get_person(&self, id: PersonId) -> MsResult<&Person> {
        self.persons.get(id).ok_or(MsError::PersonNotFound(id))
    }

    pub fn get_person_mut(&mut self, id: PersonId) -> MsResult<&mut Person> {
        self.persons.get_mut(id).ok_or(MsError::PersonNotFound(id))
    }

    #[inline]
    pub fn household(&self, id: HouseholdId) -> Option<&Household> {
        self.households.get(id)
    }

    #[inline]
    pub fn household_mut(&mut self, id: HouseholdId) -> Option<&mut Household> {
        self.households.get_mut(id)
    }

    pub fn get_household(&self, id: HouseholdId) -> MsResult<&Household> {
        self.households.get(id).ok_or(MsError::HouseholdNotFound(id))
    }

    #[inline]
    pub fn dwelling(&self, id: DwellingId) -> Option<&Dwelling> {
        self.dwellings.get(id)
    }

    #[inline]
    pub fn dwelling_mut(&mut self, id: DwellingId) -> Option<&mut Dwelling> {
        self.dwellings.get_mut(id)
    }

    pub fn get_dwelling(&self, id: DwellingId) -> MsResult<&Dwelling> {
        self.dwellings.get(id).ok_or(MsError::DwellingNotFound(id))
    }

    #[inline]
    pub fn job(&self, id: JobId) -> Option<&Job> {
        self.jobs.get(id)
    }

    pub fn get_job(&self, id: JobId) -> MsResult<&Job> {
        self.jobs.get(id).ok_or(MsError::JobNotFound(id))
    }

    pub fn persons(&self) -> impl Iterator<Item = &Person> + '_ {
        self.persons.values()
    }

    pub fn households(&self) -> impl Iterator<Item = &Household> + '_ {
        self.households.values()
    }

    pub fn dwellings(&self) -> impl Iterator<Item = &Dwelling> + '_ {
        self.dwellings.values()
    }

    pub fn jobs(&self) -> impl Iterator<Item = &Job> + '_ {
        self.jobs.values()
    }

    pub fn person_ids(&self) -> Vec<PersonId> {
        self.persons.ids()
    }

    pub fn household_ids(&self) -> Vec<HouseholdId> {
        self.households.ids()
    }

    pub fn dwelling_ids(&self) -> Vec<DwellingId> {
        self.dwellings.ids()
    }

    pub fn job_ids(&self) -> Vec<JobId> {
        self.jobs.ids()
    }

    pub fn person_count(&self) -> usize {
        self.persons.len()
    }

    pub fn household_count(&self) -> usize {
        self.households.len()
    }

    pub fn dwelling_count(&self) -> usize {
        self.dwellings.len()
    }

    pub fn job_count(&self) -> usize {
        self.jobs.len()
    }

    // ── Vacancy ───────────────────────────────────────────────────────────

    #[inline]
    pub fn vacant_dwellings(&self) -> &VacancyIndex<DwellingId> {
        &self.vacant_dwellings
    }

    #[inline]
    pub fn vacant_jobs(&self) -> &VacancyIndex<JobId> {
        &self.vacant_jobs
    }

    // ── Creation ──────────────────────────────────────────────────────────

    /// Create an unattached person.
    pub fn create_person(&mut self, spec: PersonSpec) -> PersonId {
        self.persons.insert_with(|id| Person::from_spec(id, spec))
    }

    /// Create an empty, unhoused household.
    pub fn create_household(&mut self, autos: u8) -> HouseholdId {
        self.households.insert_with(|id| Household::new(id, autos))
    }

    /// Create a vacant dwelling and list it in the vacancy index.
    pub fn create_dwelling(&mut self, spec: DwellingSpec) -> MsResult<DwellingId> {
        self.check_dwelling_spec(&spec)?;
        let zone = spec.zone;
        let id = self.dwellings.insert_with(|id| Dwelling::from_spec(id, spec));
        self.vacant_dwellings.insert(zone, id);
        Ok(id)
    }

    /// Create a vacant job and list it in the vacancy index.
    pub fn create_job(&mut self, zone: ZoneId, job_type: impl Into<String>) -> JobId {
        let job_type = job_type.into();
        let id = self.jobs.insert_with(|id| Job { id, zone, job_type, worker: None });
        self.vacant_jobs.insert(zone, id);
        id
    }

    pub(crate) fn insert_person(&mut self, id: PersonId, spec: PersonSpec) -> MsResult<()> {
        self.persons.insert_at(id, Person::from_spec(id, spec))
    }

    pub(crate) fn insert_household(&mut self, id: HouseholdId, autos: u8) -> MsResult<()> {
        self.households.insert_at(id, Household::new(id, autos))
    }

    pub(crate) fn insert_dwelling(&mut self, id: DwellingId, spec: DwellingSpec) -> MsResult<()> {
        self.check_dwelling_spec(&spec)?;
        let zone = spec.zone;
        self.dwellings.insert_at(id, Dwelling::from_spec(id, spec))?;
        self.vacant_dwellings.insert(zone, id);
        Ok(())
    }

    pub(crate) fn insert_job(&mut self, id: JobId, zone: ZoneId, job_type: String) -> MsResult<()> {
        self.jobs.insert_at(id, Job { id, zone, job_type, worker: None })?;
        self.vacant_jobs.insert(zone, id);
        Ok(())
    }

    fn check_dwelling_spec(&self, spec: &DwellingSpec) -> MsResult<()> {
        if spec.quality < 1 || spec.quality > self.max_quality {
            return Err(MsError::Inconsistent(format!(
                "dwelling quality {} outside [1, {}]",
                spec.quality, self.max_quality
            )));
        }
        if !(spec.price >= 0.0) {
            return Err(MsError::Inconsistent(format!("dwelling price {} is negative", spec.price)));
        }
        Ok(())
    }

    // ── Household membership ──────────────────────────────────────────────

    /// Put `person` into `household`, leaving any previous household.
    ///
    /// The previous household is kept even if it becomes empty; callers
    /// decide whether to dissolve it.
    pub fn add_person_to_household(&mut self, person: PersonId, household: HouseholdId) -> MsResult<()> {
        if !self.households.contains(household) {
            return Err(MsError::HouseholdNotFound(household));
        }
        let current = self.get_person(person)?.household;
        if current == Some(household) {
            return Ok(());
        }
        if current.is_some() {
            self.detach_person(person)?;
        }
        self.get_person_mut(person)?.household = Some(household);
        if let Some(hh) = self.households.get_mut(household) {
            hh.persons.push(person);
        }
        Ok(())
    }

    /// Take `person` out of their household.  Returns the household left.
    pub fn detach_person(&mut self, person: PersonId) -> MsResult<Option<HouseholdId>> {
        let p = self.get_person_mut(person)?;
        let Some(hh_id) = p.household.take() else {
            return Ok(None);
        };
        let hh = self
            .households
            .get_mut(hh_id)
            .ok_or_else(|| MsError::Inconsistent(format!("{person} refers to missing {hh_id}")))?;
        let before = hh.persons.len();
        hh.persons.retain(|&m| m != person);
        if hh.persons.len() == before {
            return Err(MsError::Inconsistent(format!("{hh_id} did not list member {person}")));
        }
        Ok(Some(hh_id))
    }

    // ── Dwelling occupancy ────────────────────────────────────────────────

    /// Move `household` into the vacant dwelling `new`, vacating (and
    /// re-listing) its previous dwelling.  Returns the previous dwelling.
    pub fn move_household(&mut self, household: HouseholdId, new: DwellingId) -> MsResult<Option<DwellingId>> {
        if !self.households.contains(household) {
            return Err(MsError::HouseholdNotFound(household));
        }
        let target = self.dwellings.get(new).ok_or(MsError::DwellingNotFound(new))?;
        if let Some(occupant) = target.resident {
            return Err(MsError::Inconsistent(format!(
                "{household} cannot move into {new}: occupied by {occupant}"
            )));
        }
        let new_zone = target.zone;

        let old = self.vacate_household_dwelling(household)?;

        if let Some(d) = self.dwellings.get_mut(new) {
            d.resident = Some(household);
        }
        self.vacant_dwellings.remove(new_zone, new);
        if let Some(hh) = self.households.get_mut(household) {
            hh.dwelling = Some(new);
        }
        Ok(old)
    }

    /// Vacate the household's dwelling (if any) and list it as vacant.
    pub fn vacate_household_dwelling(&mut self, household: HouseholdId) -> MsResult<Option<DwellingId>> {
        let hh = self
            .households
            .get_mut(household)
            .ok_or(MsError::HouseholdNotFound(household))?;
        let Some(old) = hh.dwelling.take() else {
            return Ok(None);
        };
        let d = self
            .dwellings
            .get_mut(old)
            .ok_or_else(|| MsError::Inconsistent(format!("{household} occupies missing {old}")))?;
        if d.resident != Some(household) {
            return Err(MsError::Inconsistent(format!("{old} does not list {household} as resident")));
        }
        d.resident = None;
        let zone = d.zone;
        self.vacant_dwellings.insert(zone, old);
        Ok(Some(old))
    }

    // ── Jobs ──────────────────────────────────────────────────────────────

    /// Link `person` and the vacant `job` in both directions.
    pub fn assign_job(&mut self, person: PersonId, job: JobId) -> MsResult<()> {
        if let Some(held) = self.get_person(person)?.job {
            return Err(MsError::Inconsistent(format!("{person} already holds {held}")));
        }
        let j = self.jobs.get_mut(job).ok_or(MsError::JobNotFound(job))?;
        if let Some(worker) = j.worker {
            return Err(MsError::Inconsistent(format!("{job} is already held by {worker}")));
        }
        j.worker = Some(person);
        let zone = j.zone;
        self.vacant_jobs.remove(zone, job);
        self.get_person_mut(person)?.job = Some(job);
        Ok(())
    }

    /// Unlink `person` from their job (if any) and list the job as vacant.
    /// Occupation and income are left to the caller.
    pub fn vacate_job(&mut self, person: PersonId) -> MsResult<Option<JobId>> {
        let Some(job) = self.get_person_mut(person)?.job.take() else {
            return Ok(None);
        };
        let j = self
            .jobs
            .get_mut(job)
            .ok_or_else(|| MsError::Inconsistent(format!("{person} holds missing {job}")))?;
        j.worker = None;
        let zone = j.zone;
        self.vacant_jobs.insert(zone, job);
        Ok(Some(job))
    }

    // ── Removal ───────────────────────────────────────────────────────────

    /// Destroy a person: vacate their job and leave their household.  An
    /// emptied household is not removed here.
    pub fn remove_person(&mut self, person: PersonId) -> MsResult<Person> {
        self.vacate_job(person)?;
        self.detach_person(person)?;
        self.persons.remove(person).ok_or(MsError::PersonNotFound(person))
    }

    /// Destroy an empty household, vacating its dwelling.
    pub fn remove_household(&mut self, household: HouseholdId) -> MsResult<Household> {
        let hh = self.get_household(household)?;
        if !hh.persons.is_empty() {
            return Err(MsError::Inconsistent(format!(
                "{household} still has {} members",
                hh.persons.len()
            )));
        }
        self.vacate_household_dwelling(household)?;
        self.households.remove(household).ok_or(MsError::HouseholdNotFound(household))
    }

    /// Remove a household and all its members from the region.  Returns the
    /// number of persons removed.
    pub fn outmigrate_household(&mut self, household: HouseholdId) -> MsResult<usize> {
        let members = self.get_household(household)?.persons.clone();
        for &person in &members {
            self.remove_person(person)?;
        }
        self.remove_household(household)?;
        Ok(members.len())
    }

    /// Destroy a vacant dwelling and unlist it.
    pub fn remove_dwelling(&mut self, dwelling: DwellingId) -> MsResult<Dwelling> {
        let d = self.get_dwelling(dwelling)?;
        if let Some(resident) = d.resident {
            return Err(MsError::Inconsistent(format!(
                "{dwelling} cannot be removed while {resident} lives there"
            )));
        }
        let zone = d.zone;
        self.vacant_dwellings.remove(zone, dwelling);
        self.dwellings.remove(dwelling).ok_or(MsError::DwellingNotFound(dwelling))
    }

    /// Destroy a job.  Its worker, if any, becomes unemployed.
    pub fn remove_job(&mut self, job: JobId) -> MsResult<Job> {
        let j = self.get_job(job)?;
        let zone = j.zone;
        if let Some(worker) = j.worker {
            self.vacate_job(worker)?;
            let p = self.get_person_mut(worker)?;
            p.occupation = Occupation::Unemployed;
            p.income = 0.0;
        }
        self.vacant_jobs.remove(zone, job);
        self.jobs.remove(job).ok_or(MsError::JobNotFound(job))
    }

    // ── Derived household attributes ──────────────────────────────────────

    pub fn household_size(&self, household: HouseholdId) -> usize {
        self.households.get(household).map_or(0, Household::size)
    }

    /// Majority race of the members; ties go to the race listed first in
    /// [`Race::ALL`].  `None` for an empty or unknown household.
    pub fn household_race(&self, household: HouseholdId) -> Option<Race> {
        let hh = self.households.get(household)?;
        let mut counts = [0usize; Race::ALL.len()];
        for p in hh.persons.iter().filter_map(|&id| self.persons.get(id)) {
            counts[p.race.index()] += 1;
        }
        let (best, &n) = counts
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.cmp(b.1).then(b.0.cmp(&a.0)))?;
        (n > 0).then_some(Race::ALL[best])
    }

    /// Sum of member incomes.
    pub fn household_income(&self, household: HouseholdId) -> f64 {
        self.households.get(household).map_or(0.0, |hh| {
            hh.persons.iter().filter_map(|&id| self.persons.get(id)).map(|p| p.income).sum()
        })
    }

    /// Most likely spouse of a married person: another married member of the
    /// same household, preferring the opposite gender, then the smallest age
    /// difference, then the lowest id.
    pub fn spouse_of(&self, person: PersonId) -> Option<PersonId> {
        let p = self.persons.get(person)?;
        if p.role != Role::Married {
            return None;
        }
        let hh = self.households.get(p.household?)?;
        hh.persons
            .iter()
            .filter(|&&m| m != person)
            .filter_map(|&m| self.persons.get(m))
            .filter(|m| m.role == Role::Married)
            .min_by_key(|m| (m.gender == p.gender, m.age.abs_diff(p.age), m.id))
            .map(|m| m.id)
    }

    /// `true` if the household is non-empty and every member has CHILD role.
    pub fn has_only_children(&self, household: HouseholdId) -> bool {
        self.households.get(household).is_some_and(|hh| {
            !hh.persons.is_empty()
                && hh
                    .persons
                    .iter()
                    .filter_map(|&id| self.persons.get(id))
                    .all(|p| p.role == Role::Child)
        })
    }

    /// If only children remain, make the oldest (lowest id on ties) the
    /// SINGLE head.  Returns the promoted person.
    pub fn promote_oldest_child(&mut self, household: HouseholdId) -> Option<PersonId> {
        if !self.has_only_children(household) {
            return None;
        }
        let hh = self.households.get(household)?;
        let oldest = hh
            .persons
            .iter()
            .filter_map(|&id| self.persons.get(id))
            .max_by(|a, b| a.age.cmp(&b.age).then(b.id.cmp(&a.id)))
            .map(|p| p.id)?;
        if let Some(p) = self.persons.get_mut(oldest) {
            p.role = Role::Single;
        }
        Some(oldest)
    }

    // ── Invariants ────────────────────────────────────────────────────────

    /// Verify every cross-reference and vacancy listing.
    pub fn check_invariants(&self) -> MsResult<()> {
        let broken = |msg: String| Err(MsError::Inconsistent(msg));

        for hh in self.households.values() {
            for &pid in &hh.persons {
                match self.persons.get(pid) {
                    Some(p) if p.household == Some(hh.id) => {}
                    _ => return broken(format!("{} lists {pid} which does not point back", hh.id)),
                }
            }
            if let Some(d) = hh.dwelling {
                match self.dwellings.get(d) {
                    Some(dw) if dw.resident == Some(hh.id) => {}
                    _ => return broken(format!("{} occupies {d} which does not point back", hh.id)),
                }
            }
        }

        for p in self.persons.values() {
            if let Some(h) = p.household {
                let listed = self.households.get(h).is_some_and(|hh| hh.persons.contains(&p.id));
                if !listed {
                    return broken(format!("{} points to {h} which does not list it", p.id));
                }
            }
            if let Some(j) = p.job {
                if self.jobs.get(j).and_then(|job| job.worker) != Some(p.id) {
                    return broken(format!("{} holds {j} which does not point back", p.id));
                }
            }
        }

        for d in self.dwellings.values() {
            let listed = self.vacant_dwellings.contains(d.zone, d.id);
            match d.resident {
                None if !listed => return broken(format!("vacant {} missing from vacancy index", d.id)),
                Some(h) if listed => return broken(format!("{} occupied by {h} but listed vacant", d.id)),
                Some(h) => {
                    if self.households.get(h).and_then(|hh| hh.dwelling) != Some(d.id) {
                        return broken(format!("{} lists resident {h} which lives elsewhere", d.id));
                    }
                }
                None => {}
            }
            if d.quality < 1 || d.quality > self.max_quality {
                return broken(format!("{} has quality {}", d.id, d.quality));
            }
            if !(d.price >= 0.0) {
                return broken(format!("{} has price {}", d.id, d.price));
            }
        }
        if self.vacant_dwellings.len() != self.dwellings.values().filter(|d| d.is_vacant()).count() {
            return broken("vacancy index lists dwellings that do not exist".into());
        }

        for j in self.jobs.values() {
            let listed = self.vacant_jobs.contains(j.zone, j.id);
            match j.worker {
                None if !listed => return broken(format!("vacant {} missing from vacancy index", j.id)),
                Some(w) if listed => return broken(format!("{} held by {w} but listed vacant", j.id)),
                Some(w) => {
                    if self.persons.get(w).and_then(|p| p.job) != Some(j.id) {
                        return broken(format!("{} lists worker {w} who works elsewhere", j.id));
                    }
                }
                None => {}
            }
        }
        if self.vacant_jobs.len() != self.jobs.values().filter(|j| j.is_vacant()).count() {
            return broken("vacancy index lists jobs that do not exist".into());
        }

        Ok(())
    }
}
