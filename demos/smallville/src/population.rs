//! Synthetic base year for the demo region.
//!
//! Two regions of four zones each on a 3 km grid.  The eastern region is the
//! urban core: better accessibility, denser housing, less vacant land.

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use ms_core::{
    DwellingId, DwellingType, Gender, HouseholdId, JobId, MsResult, Occupation, PersonId, Race,
    RegionId, Role, Year, ZoneId,
};
use ms_registry::{
    Coord, DwellingRecord, DwellingSpec, Geography, HouseholdRecord, JobRecord, PersonRecord,
    PersonSpec, Registry, RegistryBuilder, RegistryConfig, Zone,
};

const ZONES:          u32 = 8;
const GRID_METERS:    f64 = 3_000.0;
/// Dwellings built per 100 households, so the region starts near 8 % vacancy.
const STOCK_PER_100:  u32 = 108;
const JOBS_PER_ADULT: f64 = 0.55;

const JOB_TYPES: [&str; 4] = ["retail", "office", "industry", "services"];

pub fn geography() -> MsResult<Geography> {
    let zones = (1..=ZONES)
        .map(|id| {
            let urban = id > ZONES / 2;
            Zone {
                id:                ZoneId(id),
                region:            RegionId(if urban { 2 } else { 1 }),
                centroid:          Coord::new(((id - 1) % 4) as f64 * GRID_METERS, ((id - 1) / 4) as f64 * GRID_METERS),
                accessibility:     if urban { 1.5 } else { 0.8 },
                developable_acres: if urban { 15.0 } else { 60.0 },
            }
        })
        .collect();
    Geography::new(zones)
}

/// Housing mix by region: the urban core leans multi-family.
fn dwelling_type<R: Rng>(urban: bool, rng: &mut R) -> DwellingType {
    let roll: f64 = rng.r#gen();
    match (urban, roll) {
        (false, r) if r < 0.60 => DwellingType::SingleFamilyDetached,
        (false, r) if r < 0.75 => DwellingType::SingleFamilyAttached,
        (false, r) if r < 0.90 => DwellingType::MultiFamilySmall,
        (false, _) => DwellingType::MobileHome,
        (true, r) if r < 0.20 => DwellingType::SingleFamilyDetached,
        (true, r) if r < 0.35 => DwellingType::SingleFamilyAttached,
        (true, r) if r < 0.65 => DwellingType::MultiFamilySmall,
        (true, _) => DwellingType::MultiFamilyLarge,
    }
}

fn base_rent(kind: DwellingType) -> f64 {
    match kind {
        DwellingType::SingleFamilyDetached => 1_400.0,
        DwellingType::SingleFamilyAttached => 1_150.0,
        DwellingType::MultiFamilySmall     => 950.0,
        DwellingType::MultiFamilyLarge     => 850.0,
        DwellingType::MobileHome           => 600.0,
    }
}

fn race<R: Rng>(rng: &mut R) -> Race {
    let roll: f64 = rng.r#gen();
    match roll {
        r if r < 0.62 => Race::White,
        r if r < 0.82 => Race::Black,
        r if r < 0.94 => Race::Hispanic,
        _ => Race::Other,
    }
}

fn adult<R: Rng>(age: u32, gender: Gender, race: Race, role: Role, rng: &mut R) -> PersonSpec {
    PersonSpec {
        age,
        gender,
        race,
        role,
        occupation:     Occupation::Unemployed,
        income:         0.0,
        driver_license: rng.gen_bool(0.85),
    }
}

/// Build `households` households in a stock of slightly more dwellings, with
/// roughly half the adults employed.  Fully determined by `seed`.
pub fn build(households: u32, seed: u64, max_quality: u8, geography: &Geography) -> MsResult<Registry> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let stock = (households * STOCK_PER_100).div_ceil(100);

    let dwellings: Vec<DwellingRecord> = (0..stock)
        .map(|i| {
            let zone = ZoneId(rng.gen_range(1..=ZONES));
            let urban = zone.0 > ZONES / 2;
            let kind = dwelling_type(urban, &mut rng);
            let bedrooms = match kind {
                DwellingType::SingleFamilyDetached => rng.gen_range(2..=5),
                DwellingType::MultiFamilyLarge => rng.gen_range(0..=2),
                _ => rng.gen_range(1..=3),
            };
            let quality = rng.gen_range(1..=max_quality.max(1));
            let price = base_rent(kind) * (0.8 + 0.1 * quality as f64) * if urban { 1.15 } else { 1.0 };
            DwellingRecord {
                id:   DwellingId(i),
                spec: DwellingSpec {
                    zone,
                    coord: None,
                    kind,
                    bedrooms,
                    quality,
                    price: price.round(),
                    // Every twentieth unit is income-restricted.
                    restriction: if i % 20 == 0 { 0.6 } else { 0.0 },
                    year_built: Year(rng.gen_range(1950..2020)),
                },
            }
        })
        .collect();

    let mut homes: Vec<DwellingId> = dwellings.iter().map(|d| d.id).collect();
    homes.shuffle(&mut rng);

    let mut household_records = Vec::with_capacity(households as usize);
    let mut persons: Vec<PersonRecord> = Vec::new();
    let mut next_person = 0u32;
    let mut push = |persons: &mut Vec<PersonRecord>, household: HouseholdId, spec: PersonSpec| {
        persons.push(PersonRecord { id: PersonId(next_person), household, job: None, spec });
        next_person += 1;
    };

    for (i, &home) in homes.iter().take(households as usize).enumerate() {
        let hh = HouseholdId(i as u32);
        household_records.push(HouseholdRecord { id: hh, dwelling: Some(home), autos: rng.gen_range(0..=2) });

        let race = race(&mut rng);
        let head_age: u32 = rng.gen_range(20..80);
        if rng.gen_bool(0.55) {
            let wife_age = head_age.saturating_sub(rng.gen_range(0..5)).max(18);
            push(&mut persons, hh, adult(head_age, Gender::Male, race, Role::Married, &mut rng));
            push(&mut persons, hh, adult(wife_age, Gender::Female, race, Role::Married, &mut rng));
            if head_age < 55 {
                for _ in 0..rng.gen_range(0..=3) {
                    let age = rng.gen_range(0..(head_age - 18).min(22));
                    let gender = if rng.gen_bool(0.5) { Gender::Male } else { Gender::Female };
                    let occupation = if age >= 5 { Occupation::Student } else { Occupation::None };
                    let child = PersonSpec { occupation, driver_license: false, ..adult(age, gender, race, Role::Child, &mut rng) };
                    push(&mut persons, hh, child);
                }
            }
        } else {
            let gender = if rng.gen_bool(0.5) { Gender::Male } else { Gender::Female };
            push(&mut persons, hh, adult(head_age, gender, race, Role::Single, &mut rng));
        }
    }

    // Employ about half the working-age adults, one job each.
    let adults = persons.iter().filter(|p| (18..65).contains(&p.spec.age)).count();
    let job_count = (adults as f64 * JOBS_PER_ADULT).round() as u32;
    let jobs: Vec<JobRecord> = (0..job_count)
        .map(|j| JobRecord {
            id:       JobId(j),
            zone:     ZoneId(rng.gen_range(1..=ZONES)),
            job_type: JOB_TYPES[j as usize % JOB_TYPES.len()].to_owned(),
        })
        .collect();
    let mut open = jobs.iter().map(|j| j.id);
    for person in persons.iter_mut().filter(|p| (18..65).contains(&p.spec.age) && p.spec.role != Role::Child) {
        if !rng.gen_bool(0.9) {
            continue;
        }
        let Some(job) = open.next() else { break };
        person.job = Some(job);
        person.spec.occupation = Occupation::Employed;
        person.spec.income = (25_000.0 + rng.gen_range(0.0..60_000.0_f64)).round();
    }

    RegistryBuilder::new(RegistryConfig { max_quality, ..RegistryConfig::default() })
        .dwellings(dwellings)
        .households(household_records)
        .persons(persons)
        .jobs(jobs)
        .build(geography)
}
