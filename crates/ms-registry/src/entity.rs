//! Entity records.
//!
//! Link fields are `pub(crate)` and read through accessors; use the
//! [`Registry`](crate::Registry) methods to change them.

use ms_core::{
    DwellingId, DwellingType, Gender, HouseholdId, JobId, Occupation, PersonId, Race, Role, Year,
    ZoneId,
};

use crate::Coord;

// ── Person ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Person {
    pub id:             PersonId,
    pub age:            u32,
    pub gender:         Gender,
    pub race:           Race,
    pub role:           Role,
    pub occupation:     Occupation,
    /// Annual income.
    pub income:         f64,
    pub driver_license: bool,
    pub(crate) household: Option<HouseholdId>,
    pub(crate) job:       Option<JobId>,
}

impl Person {
    #[inline]
    pub fn household(&self) -> Option<HouseholdId> {
        self.household
    }

    #[inline]
    pub fn job(&self) -> Option<JobId> {
        self.job
    }

    pub(crate) fn from_spec(id: PersonId, spec: PersonSpec) -> Self {
        Self {
            id,
            age:            spec.age,
            gender:         spec.gender,
            race:           spec.race,
            role:           spec.role,
            occupation:     spec.occupation,
            income:         spec.income,
            driver_license: spec.driver_license,
            household:      None,
            job:            None,
        }
    }
}

/// Attributes of a person about to be created.
#[derive(Clone, Debug, PartialEq)]
pub struct PersonSpec {
    pub age:            u32,
    pub gender:         Gender,
    pub race:           Race,
    pub role:           Role,
    pub occupation:     Occupation,
    pub income:         f64,
    pub driver_license: bool,
}

impl PersonSpec {
    /// A newborn: age 0, CHILD role, no income.
    pub fn newborn(gender: Gender, race: Race) -> Self {
        Self {
            age: 0,
            gender,
            race,
            role:           Role::Child,
            occupation:     Occupation::None,
            income:         0.0,
            driver_license: false,
        }
    }
}

// ── Household ─────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Household {
    pub id:    HouseholdId,
    pub autos: u8,
    pub(crate) dwelling: Option<DwellingId>,
    pub(crate) persons:  Vec<PersonId>,
}

impl Household {
    pub(crate) fn new(id: HouseholdId, autos: u8) -> Self {
        Self { id, autos, dwelling: None, persons: Vec::new() }
    }

    /// The occupied dwelling; `None` while unhoused.
    #[inline]
    pub fn dwelling(&self) -> Option<DwellingId> {
        self.dwelling
    }

    /// Members in the order they joined.
    #[inline]
    pub fn persons(&self) -> &[PersonId] {
        &self.persons
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.persons.len()
    }
}

// ── Dwelling ──────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Dwelling {
    pub id:          DwellingId,
    pub zone:        ZoneId,
    pub coord:       Option<Coord>,
    pub kind:        DwellingType,
    pub bedrooms:    u8,
    /// Condition level in `[1, max_quality]`.
    pub quality:     u8,
    /// Monthly price (rent or imputed rent).
    pub price:       f64,
    /// Share of the price set by legal restriction; `0.0` = unrestricted.
    pub restriction: f64,
    pub year_built:  Year,
    pub(crate) resident: Option<HouseholdId>,
}

impl Dwelling {
    #[inline]
    pub fn resident(&self) -> Option<HouseholdId> {
        self.resident
    }

    #[inline]
    pub fn is_vacant(&self) -> bool {
        self.resident.is_none()
    }

    #[inline]
    pub fn is_restricted(&self) -> bool {
        self.restriction > 0.0
    }

    pub(crate) fn from_spec(id: DwellingId, spec: DwellingSpec) -> Self {
        Self {
            id,
            zone:        spec.zone,
            coord:       spec.coord,
            kind:        spec.kind,
            bedrooms:    spec.bedrooms,
            quality:     spec.quality,
            price:       spec.price,
            restriction: spec.restriction,
            year_built:  spec.year_built,
            resident:    None,
        }
    }
}

/// Attributes of a dwelling about to be created.
#[derive(Clone, Debug, PartialEq)]
pub struct DwellingSpec {
    pub zone:        ZoneId,
    pub coord:       Option<Coord>,
    pub kind:        DwellingType,
    pub bedrooms:    u8,
    pub quality:     u8,
    pub price:       f64,
    pub restriction: f64,
    pub year_built:  Year,
}

// ── Job ───────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Job {
    pub id:       JobId,
    pub zone:     ZoneId,
    /// Free-form sector tag (e.g. "retail", "office").
    pub job_type: String,
    pub(crate) worker: Option<PersonId>,
}

impl Job {
    #[inline]
    pub fn worker(&self) -> Option<PersonId> {
        self.worker
    }

    #[inline]
    pub fn is_vacant(&self) -> bool {
        self.worker.is_none()
    }
}
