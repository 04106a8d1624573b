//! Unit tests for ms-model.

use ms_core::{
    DwellingType, Gender, Occupation, PersonId, Race, RegionId, Role, SimRng, Year, ZoneId,
};
use ms_registry::{Coord, DwellingSpec, Geography, PersonSpec, Registry, RegistryConfig, Zone};

use crate::{Event, EventGate, GateRules, SimulationState};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn geography() -> Geography {
    Geography::new(vec![Zone {
        id:                ZoneId(1),
        region:            RegionId(1),
        centroid:          Coord::new(0.0, 0.0),
        accessibility:     1.0,
        developable_acres: 5.0,
    }])
    .unwrap()
}

fn spec(age: u32, gender: Gender, role: Role) -> PersonSpec {
    PersonSpec {
        age,
        gender,
        race:           Race::White,
        role,
        occupation:     Occupation::Unemployed,
        income:         30_000.0,
        driver_license: true,
    }
}

fn dwelling(price: f64, bedrooms: u8, year_built: i32) -> DwellingSpec {
    DwellingSpec {
        zone: ZoneId(1),
        coord: None,
        kind: DwellingType::MultiFamilySmall,
        bedrooms,
        quality: 2,
        price,
        restriction: 0.0,
        year_built: Year(year_built),
    }
}

/// One household holding the given persons.
fn household_of(registry: &mut Registry, specs: Vec<PersonSpec>) -> Vec<PersonId> {
    let hh = registry.create_household(0);
    specs
        .into_iter()
        .map(|s| {
            let p = registry.create_person(s);
            registry.add_person_to_household(p, hh).unwrap();
            p
        })
        .collect()
}

fn state(registry: Registry) -> SimulationState {
    SimulationState::new(registry, geography(), EventGate::new(GateRules::default()), Year(2020))
}

#[cfg(test)]
mod gate_tests {
    use super::*;

    #[test]
    fn seventeen_year_old_cannot_marry() {
        let mut r = Registry::new(&RegistryConfig::default());
        let ids = household_of(&mut r, vec![spec(17, Gender::Male, Role::Single)]);
        let gate = EventGate::new(GateRules::default());
        assert!(!gate.is_eligible(&r, Event::Marriage(ids[0])));
    }

    #[test]
    fn removed_person_is_ineligible_for_everything() {
        let mut r = Registry::new(&RegistryConfig::default());
        let ids = household_of(&mut r, vec![spec(30, Gender::Female, Role::Single)]);
        r.remove_person(ids[0]).unwrap();
        let gate = EventGate::new(GateRules::default());
        assert!(!gate.is_eligible(&r, Event::Death(ids[0])));
        assert!(!gate.is_eligible(&r, Event::Birthday(ids[0])));
        assert!(!gate.is_eligible(&r, Event::Birth(ids[0])));
    }

    #[test]
    fn divorce_blocks_marriage_in_the_same_year() {
        let mut r = Registry::new(&RegistryConfig::default());
        let ids = household_of(&mut r, vec![spec(30, Gender::Female, Role::Single)]);
        let mut gate = EventGate::new(GateRules::default());
        gate.begin_year(Year(2020));
        assert!(gate.is_eligible(&r, Event::Marriage(ids[0])));
        gate.record(Event::Divorce(ids[0]));
        assert!(!gate.is_eligible(&r, Event::Marriage(ids[0])));

        gate.begin_year(Year(2021));
        assert!(gate.is_eligible(&r, Event::Marriage(ids[0])));
    }

    #[test]
    fn divorce_requires_a_spouse() {
        let mut r = Registry::new(&RegistryConfig::default());
        let lone = household_of(&mut r, vec![spec(40, Gender::Male, Role::Married)]);
        let couple = household_of(
            &mut r,
            vec![spec(40, Gender::Male, Role::Married), spec(39, Gender::Female, Role::Married)],
        );
        let gate = EventGate::new(GateRules::default());
        assert!(!gate.is_eligible(&r, Event::Divorce(lone[0])));
        assert!(gate.is_eligible(&r, Event::Divorce(couple[0])));
    }

    #[test]
    fn birth_requires_fertile_female() {
        let mut r = Registry::new(&RegistryConfig::default());
        let ids = household_of(
            &mut r,
            vec![
                spec(30, Gender::Female, Role::Married),
                spec(30, Gender::Male, Role::Married),
                spec(55, Gender::Female, Role::Single),
            ],
        );
        let gate = EventGate::new(GateRules::default());
        assert!(gate.is_eligible(&r, Event::Birth(ids[0])));
        assert!(!gate.is_eligible(&r, Event::Birth(ids[1])));
        assert!(!gate.is_eligible(&r, Event::Birth(ids[2])));
    }

    #[test]
    fn leaving_home_needs_someone_to_leave() {
        let mut r = Registry::new(&RegistryConfig::default());
        let alone = household_of(&mut r, vec![spec(20, Gender::Male, Role::Child)]);
        let family = household_of(
            &mut r,
            vec![spec(50, Gender::Female, Role::Single), spec(20, Gender::Male, Role::Child)],
        );
        let gate = EventGate::new(GateRules::default());
        assert!(!gate.is_eligible(&r, Event::LeaveParentalHousehold(alone[0])));
        assert!(gate.is_eligible(&r, Event::LeaveParentalHousehold(family[1])));
    }

    #[test]
    fn new_dwelling_is_not_demolished_in_its_first_year() {
        let mut r = Registry::new(&RegistryConfig::default());
        let old = r.create_dwelling(dwelling(800.0, 2, 1990)).unwrap();
        let new = r.create_dwelling(dwelling(800.0, 2, 2020)).unwrap();
        let mut gate = EventGate::new(GateRules::default());
        gate.begin_year(Year(2020));
        assert!(gate.is_eligible(&r, Event::Demolition(old)));
        assert!(!gate.is_eligible(&r, Event::Demolition(new)));
    }

    #[test]
    fn restricted_dwelling_is_not_repriced() {
        let mut r = Registry::new(&RegistryConfig::default());
        let mut s = dwelling(800.0, 2, 1990);
        s.restriction = 0.6;
        let d = r.create_dwelling(s).unwrap();
        let gate = EventGate::new(GateRules::default());
        assert!(!gate.is_eligible(&r, Event::Pricing(d)));
    }

    #[test]
    fn reversed_ages_rejected() {
        let rules = GateRules { min_fertile_age: 50, max_fertile_age: 20, ..GateRules::default() };
        assert!(rules.validate().is_err());
    }
}

#[cfg(test)]
mod counter_tests {
    use crate::{EventCounters, EventKind, UnmetDemand};

    #[test]
    fn take_year_resets_year_but_keeps_total() {
        let mut c = EventCounters::new();
        c.count_event(EventKind::Birth);
        c.count_event(EventKind::Birth);
        c.count_unmet(UnmetDemand::MissingJob);

        let year = c.take_year();
        assert_eq!(year.event(EventKind::Birth), 2);
        assert_eq!(year.unmet(UnmetDemand::MissingJob), 1);
        assert_eq!(c.year().event(EventKind::Birth), 0);
        assert_eq!(c.total().event(EventKind::Birth), 2);
    }

    #[test]
    fn summary_lists_every_category() {
        let mut c = EventCounters::new();
        c.count_unmet(UnmetDemand::LackOfDwellingDivorce);
        let text = c.to_string();
        for kind in EventKind::ALL {
            assert!(text.contains(kind.as_str()));
        }
        for category in UnmetDemand::ALL {
            assert!(text.contains(category.as_str()));
        }
    }
}

#[cfg(test)]
mod state_tests {
    use ms_core::HouseholdId;

    use super::*;
    use crate::{EventKind, TraceLog, TraceSubject};

    #[test]
    fn commit_books_gate_counter_and_trace() {
        let mut r = Registry::new(&RegistryConfig::default());
        let ids = household_of(&mut r, vec![spec(30, Gender::Female, Role::Single)]);
        let mut s = state(r).with_trace(TraceLog::new(&[ids[0].0], &[], &[]));

        s.commit(Event::Birthday(ids[0]), || "turned 31".into());

        assert!(!s.is_eligible(Event::Birthday(ids[0])));
        assert_eq!(s.counters.year().event(EventKind::Birthday), 1);
        assert_eq!(s.trace.lines().len(), 1);
        assert_eq!(s.trace.lines()[0].subject, TraceSubject::Person(ids[0]));
    }

    #[test]
    fn untracked_subjects_leave_no_lines() {
        let mut r = Registry::new(&RegistryConfig::default());
        let ids = household_of(&mut r, vec![spec(30, Gender::Female, Role::Single)]);
        let mut s = state(r);
        s.commit(Event::Death(ids[0]), || unreachable!("message built for untracked subject"));
        assert!(s.trace.lines().is_empty());
    }

    #[test]
    fn settle_dissolves_empty_household_and_vacates_dwelling() {
        let mut r = Registry::new(&RegistryConfig::default());
        let d = r.create_dwelling(dwelling(900.0, 2, 1990)).unwrap();
        let ids = household_of(&mut r, vec![spec(80, Gender::Male, Role::Single)]);
        let hh = HouseholdId(0);
        r.move_household(hh, d).unwrap();
        r.remove_person(ids[0]).unwrap();

        let mut s = state(r);
        s.settle_household(hh).unwrap();
        assert!(s.registry.household(hh).is_none());
        assert!(s.registry.dwelling(d).unwrap().is_vacant());
        s.registry.check_invariants().unwrap();
    }

    #[test]
    fn settle_promotes_orphan() {
        let mut r = Registry::new(&RegistryConfig::default());
        let ids = household_of(
            &mut r,
            vec![spec(70, Gender::Female, Role::Single), spec(15, Gender::Male, Role::Child)],
        );
        r.remove_person(ids[0]).unwrap();
        let mut s = state(r);
        s.settle_household(HouseholdId(0)).unwrap();
        assert_eq!(s.registry.person(ids[1]).unwrap().role, Role::Single);
    }
}

#[cfg(test)]
mod relocation_tests {
    use super::*;
    use crate::{AffordabilitySearch, RelocationSearch};

    #[test]
    fn nothing_vacant_means_none() {
        let mut r = Registry::new(&RegistryConfig::default());
        let ids = household_of(&mut r, vec![spec(30, Gender::Female, Role::Single)]);
        let mut search = AffordabilitySearch::default();
        let mut rng = SimRng::new(1);
        assert_eq!(search.search_for_new_dwelling(&r, &ids, &mut rng), None);
    }

    #[test]
    fn prefers_affordable_then_cheapest() {
        let mut r = Registry::new(&RegistryConfig::default());
        let ids = household_of(&mut r, vec![spec(30, Gender::Female, Role::Single)]);
        // Budget: 30 000 × 0.35 / 12 = 875 per month.
        let _pricey = r.create_dwelling(dwelling(2_000.0, 3, 1990)).unwrap();
        let fits = r.create_dwelling(dwelling(850.0, 1, 1990)).unwrap();
        let _dearer_fit = r.create_dwelling(dwelling(870.0, 2, 1990)).unwrap();

        let mut search = AffordabilitySearch::default();
        let mut rng = SimRng::new(1);
        assert_eq!(search.search_for_new_dwelling(&r, &ids, &mut rng), Some(fits));
    }

    #[test]
    fn unaffordable_vacancy_is_still_offered() {
        let mut r = Registry::new(&RegistryConfig::default());
        let ids = household_of(&mut r, vec![spec(30, Gender::Female, Role::Single)]);
        let only = r.create_dwelling(dwelling(5_000.0, 1, 1990)).unwrap();
        let mut search = AffordabilitySearch::default();
        let mut rng = SimRng::new(3);
        assert_eq!(search.search_for_new_dwelling(&r, &ids, &mut rng), Some(only));
    }

    #[test]
    fn default_move_updates_registry() {
        let mut r = Registry::new(&RegistryConfig::default());
        household_of(&mut r, vec![spec(30, Gender::Female, Role::Single)]);
        let d = r.create_dwelling(dwelling(700.0, 1, 1990)).unwrap();
        let mut search = AffordabilitySearch::default();
        search.move_household(&mut r, ms_core::HouseholdId(0), None, d).unwrap();
        assert!(!r.dwelling(d).unwrap().is_vacant());
        assert!(r.vacant_dwellings().is_empty());
    }
}

#[cfg(test)]
mod draw_tests {
    use ms_core::StreamKey;

    use super::*;
    use crate::draw_phase;

    #[test]
    fn outcomes_do_not_depend_on_subject_order() {
        let key = StreamKey::new(9, Year(2025), 4);
        let forward: Vec<PersonId> = (0..50).map(PersonId).collect();
        let mut backward = forward.clone();
        backward.reverse();

        let draw = |_: PersonId, rng: &mut ms_core::AgentRng| rng.gen_bool(0.5).then_some(());
        let a: Vec<PersonId> = draw_phase(&forward, key, draw).into_iter().map(|(p, _)| p).collect();
        let mut b: Vec<PersonId> = draw_phase(&backward, key, draw).into_iter().map(|(p, _)| p).collect();
        b.sort();
        assert_eq!(a, b);
        assert!(!a.is_empty() && a.len() < 50);
    }

    #[test]
    fn certain_draws_keep_every_subject_in_order() {
        let key = StreamKey::new(1, Year(2020), 1);
        let ids: Vec<PersonId> = vec![PersonId(5), PersonId(2), PersonId(9)];
        let out = draw_phase(&ids, key, |p, _| Some(p.0));
        assert_eq!(out, vec![(PersonId(5), 5), (PersonId(2), 2), (PersonId(9), 9)]);
    }
}
