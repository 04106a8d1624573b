//! Unit tests for ms-registry.

use ms_core::{DwellingId, DwellingType, Gender, Occupation, Race, RegionId, Role, Year, ZoneId};

use crate::{Coord, DwellingSpec, Geography, PersonSpec, Registry, RegistryConfig, Zone};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn zone(id: u32, region: u16, x: f64) -> Zone {
    Zone {
        id:                ZoneId(id),
        region:            RegionId(region),
        centroid:          Coord::new(x, 0.0),
        accessibility:     1.0,
        developable_acres: 10.0,
    }
}

fn dwelling_spec(zone: u32) -> DwellingSpec {
    DwellingSpec {
        zone:        ZoneId(zone),
        coord:       None,
        kind:        DwellingType::SingleFamilyDetached,
        bedrooms:    3,
        quality:     2,
        price:       900.0,
        restriction: 0.0,
        year_built:  Year(1990),
    }
}

fn adult(age: u32, gender: Gender) -> PersonSpec {
    PersonSpec {
        age,
        gender,
        race:           Race::White,
        role:           Role::Single,
        occupation:     Occupation::Unemployed,
        income:         20_000.0,
        driver_license: true,
    }
}

fn registry() -> Registry {
    Registry::new(&RegistryConfig::default())
}

#[cfg(test)]
mod arena_tests {
    use ms_core::PersonId;

    use crate::{Arena, IdPolicy};

    #[test]
    fn monotonic_never_reuses() {
        let mut a: Arena<PersonId, u8> = Arena::new(IdPolicy::Monotonic);
        let p0 = a.insert_with(|_| 0);
        let _p1 = a.insert_with(|_| 1);
        a.remove(p0);
        assert_eq!(a.insert_with(|_| 2), PersonId(2));
        assert_eq!(a.len(), 2);
    }

    #[test]
    fn recycle_reuses_lowest_freed() {
        let mut a: Arena<PersonId, u8> = Arena::new(IdPolicy::Recycle);
        for i in 0..4 {
            a.insert_with(|_| i);
        }
        a.remove(PersonId(2));
        a.remove(PersonId(1));
        assert_eq!(a.insert_with(|_| 9), PersonId(1));
        assert_eq!(a.insert_with(|_| 9), PersonId(2));
        assert_eq!(a.insert_with(|_| 9), PersonId(4));
    }

    #[test]
    fn insert_at_rejects_duplicates_and_fills_holes() {
        let mut a: Arena<PersonId, u8> = Arena::new(IdPolicy::Recycle);
        a.insert_at(PersonId(3), 7).unwrap();
        assert!(a.insert_at(PersonId(3), 8).is_err());
        // Holes 0..3 left by the explicit insert are handed out first.
        assert_eq!(a.insert_with(|_| 1), PersonId(0));
        assert_eq!(a.ids(), vec![PersonId(0), PersonId(3)]);
    }
}

#[cfg(test)]
mod occupancy_tests {
    use super::*;

    #[test]
    fn new_dwelling_is_vacant_and_listed() {
        let mut r = registry();
        let d = r.create_dwelling(dwelling_spec(1)).unwrap();
        assert!(r.dwelling(d).unwrap().is_vacant());
        assert!(r.vacant_dwellings().contains(ZoneId(1), d));
        r.check_invariants().unwrap();
    }

    #[test]
    fn move_household_updates_both_dwellings_and_index() {
        let mut r = registry();
        let d0 = r.create_dwelling(dwelling_spec(1)).unwrap();
        let d1 = r.create_dwelling(dwelling_spec(2)).unwrap();
        let hh = r.create_household(1);
        let p = r.create_person(adult(40, Gender::Male));
        r.add_person_to_household(p, hh).unwrap();

        assert_eq!(r.move_household(hh, d0).unwrap(), None);
        assert_eq!(r.move_household(hh, d1).unwrap(), Some(d0));

        assert!(r.dwelling(d0).unwrap().is_vacant());
        assert_eq!(r.dwelling(d1).unwrap().resident(), Some(hh));
        assert!(r.vacant_dwellings().contains(ZoneId(1), d0));
        assert!(!r.vacant_dwellings().contains(ZoneId(2), d1));
        r.check_invariants().unwrap();
    }

    #[test]
    fn two_households_cannot_share_a_dwelling() {
        let mut r = registry();
        let d = r.create_dwelling(dwelling_spec(1)).unwrap();
        let a = r.create_household(0);
        let b = r.create_household(0);
        r.move_household(a, d).unwrap();
        assert!(r.move_household(b, d).is_err());
    }

    #[test]
    fn occupied_dwelling_cannot_be_removed() {
        let mut r = registry();
        let d = r.create_dwelling(dwelling_spec(1)).unwrap();
        let hh = r.create_household(0);
        r.move_household(hh, d).unwrap();
        assert!(r.remove_dwelling(d).is_err());
        r.vacate_household_dwelling(hh).unwrap();
        r.remove_dwelling(d).unwrap();
        assert!(r.vacant_dwellings().is_empty());
    }

    #[test]
    fn invalid_quality_rejected() {
        let mut r = registry();
        let mut spec = dwelling_spec(1);
        spec.quality = 9;
        assert!(r.create_dwelling(spec).is_err());
    }
}

#[cfg(test)]
mod membership_tests {
    use super::*;

    #[test]
    fn size_tracks_members() {
        let mut r = registry();
        let hh = r.create_household(0);
        let a = r.create_person(adult(30, Gender::Male));
        let b = r.create_person(adult(28, Gender::Female));
        r.add_person_to_household(a, hh).unwrap();
        r.add_person_to_household(b, hh).unwrap();
        assert_eq!(r.household_size(hh), 2);

        r.remove_person(a).unwrap();
        assert_eq!(r.household_size(hh), 1);
        assert_eq!(r.person(b).unwrap().household(), Some(hh));
        r.check_invariants().unwrap();
    }

    #[test]
    fn switching_households_leaves_the_old_one() {
        let mut r = registry();
        let h0 = r.create_household(0);
        let h1 = r.create_household(0);
        let p = r.create_person(adult(30, Gender::Male));
        r.add_person_to_household(p, h0).unwrap();
        r.add_person_to_household(p, h1).unwrap();
        assert_eq!(r.household_size(h0), 0);
        assert_eq!(r.household(h1).unwrap().persons(), &[p]);
    }

    #[test]
    fn non_empty_household_cannot_be_removed() {
        let mut r = registry();
        let hh = r.create_household(0);
        let p = r.create_person(adult(30, Gender::Male));
        r.add_person_to_household(p, hh).unwrap();
        assert!(r.remove_household(hh).is_err());
    }

    #[test]
    fn outmigration_removes_members_and_frees_dwelling_and_jobs() {
        let mut r = registry();
        let d = r.create_dwelling(dwelling_spec(1)).unwrap();
        let job = r.create_job(ZoneId(1), "retail");
        let hh = r.create_household(1);
        let a = r.create_person(adult(30, Gender::Male));
        let b = r.create_person(adult(29, Gender::Female));
        r.add_person_to_household(a, hh).unwrap();
        r.add_person_to_household(b, hh).unwrap();
        r.move_household(hh, d).unwrap();
        r.assign_job(a, job).unwrap();

        assert_eq!(r.outmigrate_household(hh).unwrap(), 2);
        assert_eq!(r.person_count(), 0);
        assert_eq!(r.household_count(), 0);
        assert!(r.dwelling(d).unwrap().is_vacant());
        assert!(r.job(job).unwrap().is_vacant());
        r.check_invariants().unwrap();
    }

    #[test]
    fn household_race_is_majority() {
        let mut r = registry();
        let hh = r.create_household(0);
        for race in [Race::Black, Race::Black, Race::White] {
            let p = r.create_person(PersonSpec { race, ..adult(30, Gender::Male) });
            r.add_person_to_household(p, hh).unwrap();
        }
        assert_eq!(r.household_race(hh), Some(Race::Black));
    }

    #[test]
    fn spouse_prefers_opposite_gender_and_closest_age() {
        let mut r = registry();
        let hh = r.create_household(0);
        let husband = r.create_person(PersonSpec { role: Role::Married, ..adult(50, Gender::Male) });
        let wife = r.create_person(PersonSpec { role: Role::Married, ..adult(48, Gender::Female) });
        let other = r.create_person(PersonSpec { role: Role::Married, ..adult(25, Gender::Female) });
        for p in [husband, wife, other] {
            r.add_person_to_household(p, hh).unwrap();
        }
        assert_eq!(r.spouse_of(husband), Some(wife));
    }

    #[test]
    fn oldest_child_promoted_when_only_children_remain() {
        let mut r = registry();
        let hh = r.create_household(0);
        let young = r.create_person(PersonSpec { role: Role::Child, ..adult(10, Gender::Male) });
        let old = r.create_person(PersonSpec { role: Role::Child, ..adult(16, Gender::Female) });
        r.add_person_to_household(young, hh).unwrap();
        r.add_person_to_household(old, hh).unwrap();
        assert_eq!(r.promote_oldest_child(hh), Some(old));
        assert_eq!(r.person(old).unwrap().role, Role::Single);
        assert_eq!(r.promote_oldest_child(hh), None);
    }
}

#[cfg(test)]
mod job_tests {
    use super::*;

    #[test]
    fn assign_and_vacate_round_trip_keeps_index() {
        let mut r = registry();
        let job = r.create_job(ZoneId(3), "office");
        let p = r.create_person(adult(35, Gender::Female));
        r.assign_job(p, job).unwrap();
        assert!(r.vacant_jobs().is_empty());
        assert_eq!(r.job(job).unwrap().worker(), Some(p));

        assert_eq!(r.vacate_job(p).unwrap(), Some(job));
        assert!(r.vacant_jobs().contains(ZoneId(3), job));
        r.check_invariants().unwrap();
    }

    #[test]
    fn held_job_cannot_be_assigned_twice() {
        let mut r = registry();
        let job = r.create_job(ZoneId(3), "office");
        let a = r.create_person(adult(35, Gender::Female));
        let b = r.create_person(adult(36, Gender::Male));
        r.assign_job(a, job).unwrap();
        assert!(r.assign_job(b, job).is_err());
    }

    #[test]
    fn removing_a_job_unemploys_its_worker() {
        let mut r = registry();
        let job = r.create_job(ZoneId(3), "office");
        let p = r.create_person(PersonSpec { occupation: Occupation::Employed, ..adult(35, Gender::Female) });
        r.assign_job(p, job).unwrap();
        r.remove_job(job).unwrap();
        let person = r.person(p).unwrap();
        assert_eq!(person.job(), None);
        assert_eq!(person.occupation, Occupation::Unemployed);
    }
}

#[cfg(test)]
mod geography_tests {
    use super::*;

    #[test]
    fn regions_sorted_and_deduplicated() {
        let geo = Geography::new(vec![zone(1, 2, 0.0), zone(2, 1, 1.0), zone(3, 2, 2.0)]).unwrap();
        assert_eq!(geo.regions(), &[RegionId(1), RegionId(2)]);
        assert_eq!(geo.zones_in_region(RegionId(2)).count(), 2);
        assert_eq!(geo.region_of(ZoneId(2)), Some(RegionId(1)));
    }

    #[test]
    fn duplicate_zone_rejected() {
        assert!(Geography::new(vec![zone(1, 1, 0.0), zone(1, 1, 5.0)]).is_err());
    }

    #[test]
    fn nearest_zone_where_walks_outward() {
        let geo = Geography::new(vec![
            zone(1, 1, 0.0),
            zone(2, 1, 1_000.0),
            zone(3, 1, 5_000.0),
        ])
        .unwrap();
        assert_eq!(geo.nearest_zone_where(ZoneId(1), |_| true), Some(ZoneId(1)));
        assert_eq!(geo.nearest_zone_where(ZoneId(1), |z| z != ZoneId(1)), Some(ZoneId(2)));
        assert_eq!(geo.nearest_zone_where(ZoneId(3), |z| z == ZoneId(1)), Some(ZoneId(1)));
        assert_eq!(geo.nearest_zone_where(ZoneId(99), |z| z.0 > 1), Some(ZoneId(2)));
    }
}

#[cfg(test)]
mod builder_tests {
    use ms_core::{HouseholdId, JobId, PersonId};

    use super::*;
    use crate::{DwellingRecord, HouseholdRecord, JobRecord, PersonRecord, RegistryBuilder};

    fn geo() -> Geography {
        Geography::new(vec![zone(1, 1, 0.0)]).unwrap()
    }

    fn base() -> RegistryBuilder {
        RegistryBuilder::new(RegistryConfig::default())
            .dwelling(DwellingRecord { id: DwellingId(5), spec: dwelling_spec(1) })
            .job(JobRecord { id: JobId(0), zone: ZoneId(1), job_type: "retail".into() })
            .household(HouseholdRecord { id: HouseholdId(0), dwelling: Some(DwellingId(5)), autos: 1 })
    }

    #[test]
    fn links_a_consistent_population() {
        let registry = base()
            .person(PersonRecord {
                id:        PersonId(0),
                household: HouseholdId(0),
                job:       Some(JobId(0)),
                spec:      PersonSpec { occupation: Occupation::Employed, ..adult(40, Gender::Male) },
            })
            .build(&geo())
            .unwrap();
        assert_eq!(registry.household_size(HouseholdId(0)), 1);
        assert_eq!(registry.dwelling(DwellingId(5)).unwrap().resident(), Some(HouseholdId(0)));
        assert!(registry.vacant_jobs().is_empty());
    }

    #[test]
    fn person_with_missing_household_is_fatal() {
        let result = base()
            .person(PersonRecord {
                id:        PersonId(0),
                household: HouseholdId(0),
                job:       None,
                spec:      adult(40, Gender::Male),
            })
            .person(PersonRecord {
                id:        PersonId(1),
                household: HouseholdId(42),
                job:       None,
                spec:      adult(40, Gender::Male),
            })
            .build(&geo());
        assert!(matches!(result, Err(ms_core::MsError::Inconsistent(_))));
    }

    #[test]
    fn two_households_in_one_dwelling_is_fatal() {
        let result = base()
            .household(HouseholdRecord { id: HouseholdId(1), dwelling: Some(DwellingId(5)), autos: 0 })
            .build(&geo());
        assert!(result.is_err());
    }

    #[test]
    fn dwelling_in_unknown_zone_is_fatal() {
        let mut spec = dwelling_spec(1);
        spec.zone = ZoneId(77);
        let result = RegistryBuilder::new(RegistryConfig::default())
            .dwelling(DwellingRecord { id: DwellingId(0), spec })
            .build(&geo());
        assert!(result.is_err());
    }

    #[test]
    fn empty_household_is_fatal() {
        assert!(base().build(&geo()).is_err());
    }
}
