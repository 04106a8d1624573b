//! Unit tests for ms-demography.

use ms_core::{
    DwellingId, DwellingType, Gender, HouseholdId, Occupation, PersonId, Race, RegionId, Role, SimRng,
    Year, ZoneId,
};
use ms_model::{
    AffordabilitySearch, EventGate, EventKind, GateRules, SimulationState, UnmetDemand, YearlyModel,
};
use ms_registry::{Coord, DwellingSpec, Geography, PersonSpec, Registry, RegistryConfig, Zone};

use crate::{ProbabilityTable, UtilitySpec};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn geography() -> Geography {
    let zone = |id: u32, x: f64| Zone {
        id:                ZoneId(id),
        region:            RegionId(1),
        centroid:          Coord::new(x, 0.0),
        accessibility:     1.0,
        developable_acres: 10.0,
    };
    Geography::new(vec![zone(1, 0.0), zone(2, 2_000.0), zone(3, 9_000.0)]).unwrap()
}

fn person(age: u32, gender: Gender, role: Role) -> PersonSpec {
    PersonSpec {
        age,
        gender,
        race:           Race::White,
        role,
        occupation:     Occupation::Unemployed,
        income:         40_000.0,
        driver_license: true,
    }
}

fn dwelling_in(zone: u32) -> DwellingSpec {
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

/// A household of `members`, housed in a new dwelling in `zone`.
fn housed(registry: &mut Registry, zone: u32, members: Vec<PersonSpec>) -> (HouseholdId, Vec<PersonId>) {
    let d = registry.create_dwelling(dwelling_in(zone)).unwrap();
    let hh = registry.create_household(1);
    registry.move_household(hh, d).unwrap();
    let ids = members
        .into_iter()
        .map(|s| {
            let p = registry.create_person(s);
            registry.add_person_to_household(p, hh).unwrap();
            p
        })
        .collect();
    (hh, ids)
}

fn state_of(registry: Registry) -> SimulationState {
    SimulationState::new(registry, geography(), EventGate::new(GateRules::default()), Year(2020))
}

fn run(model: &mut dyn YearlyModel, state: &mut SimulationState) {
    let mut rng = SimRng::new(7);
    let mut search = AffordabilitySearch::default();
    model.run(state, &mut rng, &mut search).unwrap();
    state.registry.check_invariants().unwrap();
}

// ── Agent types ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod agent_type_tests {
    use super::*;
    use crate::{AGE_BANDS, AgentType, GenderTable};

    #[test]
    fn bands_cap_at_hundred_plus() {
        assert_eq!(AgentType::of(4, Gender::Male).band, 0);
        assert_eq!(AgentType::of(5, Gender::Male).band, 1);
        assert_eq!(AgentType::of(104, Gender::Female).band as usize, AGE_BANDS - 1);
        assert_eq!(AgentType::all().count(), AgentType::COUNT);
    }

    #[test]
    fn logit_increases_with_age_coefficient() {
        let spec = UtilitySpec::Logit { intercept: -5.0, age: 0.05, age_squared: 0.0, female: 0.0 };
        let table = ProbabilityTable::from_spec("test", &spec).unwrap();
        assert!(table.get(80, Gender::Male) > table.get(20, Gender::Male));
        assert_eq!(table.get(20, Gender::Male), table.get(20, Gender::Female));
    }

    #[test]
    fn short_table_rejected() {
        let spec = UtilitySpec::Table(GenderTable { male: vec![0.1; 3], female: vec![0.1; AGE_BANDS] });
        assert!(ProbabilityTable::from_spec("test", &spec).is_err());
    }

    #[test]
    fn out_of_range_probability_rejected() {
        assert!(ProbabilityTable::from_spec("test", &UtilitySpec::Constant { probability: 1.5 }).is_err());
    }

    #[test]
    fn spec_parses_from_json() {
        let spec: UtilitySpec = serde_json::from_str(r#"{"kind": "logit", "intercept": -2.0}"#).unwrap();
        assert_eq!(spec, UtilitySpec::Logit { intercept: -2.0, age: 0.0, age_squared: 0.0, female: 0.0 });
        let spec: UtilitySpec = serde_json::from_str(r#"{"kind": "constant", "probability": 0.25}"#).unwrap();
        assert_eq!(spec, UtilitySpec::Constant { probability: 0.25 });
    }
}

// ── Config ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod config_tests {
    use crate::DemographyConfig;

    #[test]
    fn defaults_validate() {
        DemographyConfig::default().validate().unwrap();
    }

    #[test]
    fn partial_json_keeps_other_defaults() {
        let cfg: DemographyConfig =
            serde_json::from_str(r#"{"marriage": {"market_share": 0.2}}"#).unwrap();
        assert_eq!(cfg.marriage.market_share, 0.2);
        assert_eq!(cfg.birth, DemographyConfig::default().birth);
    }

    #[test]
    fn unknown_field_rejected() {
        assert!(serde_json::from_str::<DemographyConfig>(r#"{"marriage": {"bogus": 1}}"#).is_err());
    }

    #[test]
    fn bad_share_rejected() {
        let mut cfg = DemographyConfig::default();
        cfg.marriage.inter_racial_share = 2.0;
        assert!(cfg.validate().is_err());
    }
}

// ── Aging ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod aging_tests {
    use super::*;
    use crate::AgingModel;

    #[test]
    fn zero_period_leaves_ages_unchanged() {
        let mut r = Registry::new(&RegistryConfig::default());
        let (_, ids) = housed(&mut r, 1, vec![person(33, Gender::Male, Role::Single)]);
        let mut s = state_of(r).with_period(0);
        run(&mut AgingModel, &mut s);
        assert_eq!(s.registry.person(ids[0]).unwrap().age, 33);
    }

    #[test]
    fn ages_by_period() {
        let mut r = Registry::new(&RegistryConfig::default());
        let (_, ids) = housed(&mut r, 1, vec![person(33, Gender::Male, Role::Single)]);
        let mut s = state_of(r).with_period(5);
        run(&mut AgingModel, &mut s);
        assert_eq!(s.registry.person(ids[0]).unwrap().age, 38);
        assert_eq!(s.counters.year().event(EventKind::Birthday), 1);
    }
}

// ── Death and birth ───────────────────────────────────────────────────────────

#[cfg(test)]
mod death_tests {
    use super::*;
    use crate::DeathModel;

    #[test]
    fn widow_becomes_single() {
        let mut r = Registry::new(&RegistryConfig::default());
        let (hh, ids) = housed(
            &mut r,
            1,
            vec![person(80, Gender::Male, Role::Married), person(78, Gender::Female, Role::Married)],
        );
        let mut s = state_of(r);
        // Only men die.
        let spec = UtilitySpec::Table(crate::GenderTable {
            male:   vec![1.0; crate::AGE_BANDS],
            female: vec![0.0; crate::AGE_BANDS],
        });
        let mut model = DeathModel::from_table(ProbabilityTable::from_spec("death", &spec).unwrap());
        run(&mut model, &mut s);

        assert!(s.registry.person(ids[0]).is_none());
        assert_eq!(s.registry.person(ids[1]).unwrap().role, Role::Single);
        assert_eq!(s.registry.household_size(hh), 1);
    }

    #[test]
    fn last_death_dissolves_household_and_frees_dwelling_and_job() {
        let mut r = Registry::new(&RegistryConfig::default());
        let job = r.create_job(ZoneId(1), "retail");
        let (hh, ids) = housed(&mut r, 1, vec![person(90, Gender::Female, Role::Single)]);
        r.assign_job(ids[0], job).unwrap();
        let dwelling = r.household(hh).unwrap().dwelling().unwrap();

        let mut s = state_of(r);
        run(&mut DeathModel::from_table(ProbabilityTable::constant(1.0)), &mut s);

        assert!(s.registry.household(hh).is_none());
        assert!(s.registry.dwelling(dwelling).unwrap().is_vacant());
        assert!(s.registry.job(job).unwrap().is_vacant());
        assert_eq!(s.counters.year().event(EventKind::Death), 1);
    }

    #[test]
    fn orphan_promoted_to_head() {
        let mut r = Registry::new(&RegistryConfig::default());
        let (_, ids) = housed(
            &mut r,
            1,
            vec![
                person(60, Gender::Male, Role::Single),
                person(12, Gender::Female, Role::Child),
                person(9, Gender::Male, Role::Child),
            ],
        );
        let mut s = state_of(r);
        let spec = UtilitySpec::Logit { intercept: -200.0, age: 4.0, age_squared: 0.0, female: 0.0 };
        // p ≈ 1 at 60, ≈ 0 for children.
        run(&mut DeathModel::from_table(ProbabilityTable::from_spec("d", &spec).unwrap()), &mut s);
        assert!(s.registry.person(ids[0]).is_none());
        assert_eq!(s.registry.person(ids[1]).unwrap().role, Role::Single);
        assert_eq!(s.registry.person(ids[2]).unwrap().role, Role::Child);
    }
}

#[cfg(test)]
mod birth_tests {
    use super::*;
    use crate::{BirthConfig, BirthModel};

    #[test]
    fn newborn_joins_mothers_household() {
        let mut r = Registry::new(&RegistryConfig::default());
        let (hh, _) = housed(
            &mut r,
            1,
            vec![
                PersonSpec { race: Race::Hispanic, ..person(29, Gender::Female, Role::Married) },
                PersonSpec { race: Race::Hispanic, ..person(31, Gender::Male, Role::Married) },
            ],
        );
        let mut s = state_of(r);
        let config = BirthConfig {
            probability:      UtilitySpec::Constant { probability: 1.0 },
            married_scaler:   1.0,
            single_scaler:    1.0,
            probability_girl: 0.5,
        };
        run(&mut BirthModel::new(&config).unwrap(), &mut s);

        assert_eq!(s.registry.household_size(hh), 3);
        let baby = s.registry.persons().find(|p| p.age == 0).unwrap();
        assert_eq!(baby.role, Role::Child);
        assert_eq!(baby.race, Race::Hispanic);
        assert_eq!(baby.household(), Some(hh));
        assert_eq!(s.counters.year().event(EventKind::Birth), 1);
    }
}

// ── Marriage ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod marriage_tests {
    use super::*;
    use crate::{MarriageConfig, MarriageModel};

    fn eager() -> MarriageModel {
        let config = MarriageConfig {
            market_share:       1.0,
            inter_racial_share: 0.0,
            race_preference:    1e12,
            ..MarriageConfig::default()
        };
        MarriageModel::from_table(ProbabilityTable::constant(1.0), config)
    }

    /// Everyone enters the market; age gaps above six years weigh nothing.
    fn narrow() -> MarriageModel {
        let config = MarriageConfig {
            market_share:       1.0,
            inter_racial_share: 0.0,
            max_age_difference: 6,
            ..MarriageConfig::default()
        };
        MarriageModel::from_table(ProbabilityTable::constant(1.0), config)
    }

    fn set_bedrooms(r: &mut Registry, hh: HouseholdId, bedrooms: u8) {
        let d = r.household(hh).unwrap().dwelling().unwrap();
        r.dwelling_mut(d).unwrap().bedrooms = bedrooms;
    }

    #[test]
    fn seventeen_year_old_never_marries() {
        let mut r = Registry::new(&RegistryConfig::default());
        let (_, teen) = housed(&mut r, 1, vec![person(17, Gender::Male, Role::Single)]);
        let (_, adult) = housed(&mut r, 2, vec![person(18, Gender::Female, Role::Single)]);
        let mut s = state_of(r);
        run(&mut eager(), &mut s);

        assert_eq!(s.registry.person(teen[0]).unwrap().role, Role::Single);
        assert_eq!(s.registry.person(adult[0]).unwrap().role, Role::Single);
        assert_eq!(s.counters.year().event(EventKind::Marriage), 0);
    }

    #[test]
    fn zero_inter_racial_share_pairs_within_race() {
        let mut r = Registry::new(&RegistryConfig::default());
        let (_, man) = housed(&mut r, 1, vec![person(30, Gender::Male, Role::Single)]);
        let (_, black) = housed(
            &mut r,
            2,
            vec![PersonSpec { race: Race::Black, ..person(32, Gender::Female, Role::Single) }],
        );
        let (_, white) = housed(&mut r, 3, vec![person(32, Gender::Female, Role::Single)]);
        let mut s = state_of(r);
        run(&mut eager(), &mut s);

        let husband = s.registry.person(man[0]).unwrap();
        let wife = s.registry.person(white[0]).unwrap();
        assert_eq!(husband.role, Role::Married);
        assert_eq!(wife.role, Role::Married);
        assert_eq!(husband.household(), wife.household());
        assert_eq!(s.registry.person(black[0]).unwrap().role, Role::Single);
        assert_eq!(s.counters.year().event(EventKind::Marriage), 1);
    }

    #[test]
    fn inter_racial_draw_without_other_races_still_marries() {
        let mut r = Registry::new(&RegistryConfig::default());
        let (_, man) = housed(&mut r, 1, vec![person(30, Gender::Male, Role::Single)]);
        let (_, woman) = housed(&mut r, 2, vec![person(32, Gender::Female, Role::Single)]);
        let mut s = state_of(r);
        let config = MarriageConfig { market_share: 1.0, inter_racial_share: 1.0, ..MarriageConfig::default() };
        run(&mut MarriageModel::from_table(ProbabilityTable::constant(1.0), config), &mut s);

        let husband = s.registry.person(man[0]).unwrap();
        let wife = s.registry.person(woman[0]).unwrap();
        assert_eq!(husband.role, Role::Married);
        assert_eq!(wife.role, Role::Married);
        assert_eq!(husband.household(), wife.household());
        assert_eq!(s.counters.year().event(EventKind::Marriage), 1);
    }

    #[test]
    fn race_preference_below_one_rejected() {
        let config = crate::DemographyConfig {
            marriage: MarriageConfig { race_preference: 0.5, ..MarriageConfig::default() },
            ..crate::DemographyConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn couple_moves_into_the_smaller_household() {
        let mut r = Registry::new(&RegistryConfig::default());
        // The larger household gets the lower id so the id tie-break would favour it.
        let (larger, family) = housed(
            &mut r,
            1,
            vec![person(32, Gender::Female, Role::Single), person(55, Gender::Female, Role::Single)],
        );
        let (smaller, _) = housed(&mut r, 2, vec![person(30, Gender::Male, Role::Single)]);
        let mut s = state_of(r);
        run(&mut narrow(), &mut s);

        assert_eq!(s.registry.person(family[0]).unwrap().household(), Some(smaller));
        assert_eq!(s.registry.household_size(smaller), 2);
        assert_eq!(s.registry.household_size(larger), 1);
    }

    #[test]
    fn equal_sizes_prefer_more_bedrooms() {
        let mut r = Registry::new(&RegistryConfig::default());
        let (cramped, man) = housed(&mut r, 1, vec![person(30, Gender::Male, Role::Single)]);
        let (roomy, _) = housed(&mut r, 2, vec![person(32, Gender::Female, Role::Single)]);
        set_bedrooms(&mut r, cramped, 2);
        set_bedrooms(&mut r, roomy, 4);
        let mut s = state_of(r);
        run(&mut eager(), &mut s);

        assert_eq!(s.registry.person(man[0]).unwrap().household(), Some(roomy));
        assert_eq!(s.registry.household_size(roomy), 2);
        assert!(s.registry.household(cramped).is_none());
    }

    #[test]
    fn children_left_behind_follow_their_parent() {
        let mut r = Registry::new(&RegistryConfig::default());
        let (family_home, family) = housed(
            &mut r,
            1,
            vec![
                person(35, Gender::Female, Role::Single),
                person(8, Gender::Male, Role::Child),
                person(5, Gender::Female, Role::Child),
            ],
        );
        let (own, _) = housed(&mut r, 2, vec![person(37, Gender::Male, Role::Single)]);
        let mut s = state_of(r);
        run(&mut eager(), &mut s);

        assert_eq!(s.registry.person(family[0]).unwrap().household(), Some(own));
        assert_eq!(s.registry.person(family[1]).unwrap().household(), Some(own));
        assert_eq!(s.registry.person(family[2]).unwrap().household(), Some(own));
        assert_eq!(s.registry.household_size(own), 4);
        assert!(s.registry.household(family_home).is_none());
    }

    #[test]
    fn empty_market_is_counted_not_fatal() {
        let mut r = Registry::new(&RegistryConfig::default());
        housed(&mut r, 1, vec![person(30, Gender::Female, Role::Single)]);
        housed(&mut r, 2, vec![person(31, Gender::Female, Role::Single)]);
        let mut s = state_of(r);
        run(&mut eager(), &mut s);
        assert_eq!(s.counters.year().unmet(UnmetDemand::EmptyMarriageMarket), 1);
        assert_eq!(s.counters.year().event(EventKind::Marriage), 0);
    }

    #[test]
    fn child_partner_moves_and_parental_home_keeps_parent() {
        let mut r = Registry::new(&RegistryConfig::default());
        let (own, man) = housed(&mut r, 1, vec![person(28, Gender::Male, Role::Single)]);
        let (parents, family) = housed(
            &mut r,
            2,
            vec![person(55, Gender::Female, Role::Single), person(26, Gender::Female, Role::Child)],
        );
        let mut s = state_of(r);
        // Keep the mother out of the market.
        let mut model = MarriageModel::from_table(
            ProbabilityTable::constant(1.0),
            MarriageConfig { market_share: 1.0, inter_racial_share: 0.0, max_age_difference: 6, ..MarriageConfig::default() },
        );
        run(&mut model, &mut s);

        assert_eq!(s.registry.person(family[1]).unwrap().household(), Some(own));
        assert_eq!(s.registry.household_size(own), 2);
        assert_eq!(s.registry.household_size(parents), 1);
        assert_eq!(s.registry.person(man[0]).unwrap().role, Role::Married);
    }

    #[test]
    fn oversized_merge_without_vacancy_outmigrates_the_couple() {
        let mut r = Registry::new(&RegistryConfig::default());
        let (_, big) = housed(
            &mut r,
            1,
            vec![
                person(40, Gender::Male, Role::Single),
                person(10, Gender::Female, Role::Child),
                person(8, Gender::Male, Role::Child),
            ],
        );
        let (_, other) = housed(
            &mut r,
            2,
            vec![
                person(39, Gender::Female, Role::Single),
                person(12, Gender::Male, Role::Child),
                person(6, Gender::Female, Role::Child),
            ],
        );
        let mut s = state_of(r);
        let config = MarriageConfig {
            market_share:       1.0,
            inter_racial_share: 0.0,
            max_household_size: 3,
            ..MarriageConfig::default()
        };
        // Children are too young for the market; only the two adults enter.
        run(&mut MarriageModel::from_table(ProbabilityTable::constant(1.0), config), &mut s);

        assert!(s.registry.person(big[0]).is_none());
        assert!(s.registry.person(other[0]).is_none());
        assert_eq!(s.counters.year().unmet(UnmetDemand::LackOfDwellingMarriageOutmigration), 1);
        // Each left-behind sibling group has a new head.
        assert_eq!(s.registry.person(big[1]).unwrap().role, Role::Single);
        assert_eq!(s.registry.person(other[1]).unwrap().role, Role::Single);
    }
}

// ── Divorce and leaving home ──────────────────────────────────────────────────

#[cfg(test)]
mod divorce_tests {
    use super::*;
    use crate::DivorceModel;

    fn couple(r: &mut Registry) -> (HouseholdId, Vec<PersonId>) {
        housed(
            r,
            1,
            vec![person(45, Gender::Male, Role::Married), person(44, Gender::Female, Role::Married)],
        )
    }

    #[test]
    fn no_vacancy_aborts_without_changes() {
        let mut r = Registry::new(&RegistryConfig::default());
        let (hh, ids) = couple(&mut r);
        let mut s = state_of(r);
        run(&mut DivorceModel::from_table(ProbabilityTable::constant(1.0)), &mut s);

        assert_eq!(s.registry.household_size(hh), 2);
        for p in ids {
            assert_eq!(s.registry.person(p).unwrap().role, Role::Married);
        }
        assert_eq!(s.counters.year().unmet(UnmetDemand::LackOfDwellingDivorce), 1);
        assert_eq!(s.counters.year().event(EventKind::Divorce), 0);
    }

    #[test]
    fn with_vacancy_initiator_moves_out() {
        let mut r = Registry::new(&RegistryConfig::default());
        let (hh, ids) = couple(&mut r);
        let spare: DwellingId = r.create_dwelling(dwelling_in(2)).unwrap();
        let mut s = state_of(r);
        run(&mut DivorceModel::from_table(ProbabilityTable::constant(1.0)), &mut s);

        assert_eq!(s.registry.household_size(hh), 1);
        for &p in &ids {
            assert_eq!(s.registry.person(p).unwrap().role, Role::Single);
        }
        assert!(!s.registry.dwelling(spare).unwrap().is_vacant());
        assert_eq!(s.counters.year().event(EventKind::Divorce), 1);
    }
}

#[cfg(test)]
mod leave_parents_tests {
    use super::*;
    use crate::LeaveParentsModel;

    #[test]
    fn no_vacancy_counts_and_stays() {
        let mut r = Registry::new(&RegistryConfig::default());
        let (hh, ids) = housed(
            &mut r,
            1,
            vec![person(50, Gender::Female, Role::Single), person(22, Gender::Male, Role::Child)],
        );
        let mut s = state_of(r);
        run(&mut LeaveParentsModel::from_table(ProbabilityTable::constant(1.0)), &mut s);
        assert_eq!(s.registry.person(ids[1]).unwrap().household(), Some(hh));
        assert_eq!(s.counters.year().unmet(UnmetDemand::LackOfDwellingLeaveParents), 1);
    }

    #[test]
    fn leaver_gets_own_household() {
        let mut r = Registry::new(&RegistryConfig::default());
        let (hh, ids) = housed(
            &mut r,
            1,
            vec![person(50, Gender::Female, Role::Single), person(22, Gender::Male, Role::Child)],
        );
        r.create_dwelling(dwelling_in(3)).unwrap();
        let mut s = state_of(r);
        run(&mut LeaveParentsModel::from_table(ProbabilityTable::constant(1.0)), &mut s);

        let leaver = s.registry.person(ids[1]).unwrap();
        assert_eq!(leaver.role, Role::Single);
        assert_ne!(leaver.household(), Some(hh));
        assert_eq!(s.registry.household_size(hh), 1);
        assert!(s.registry.vacant_dwellings().is_empty());
    }
}

// ── Employment ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod employment_tests {
    use super::*;
    use crate::{EmploymentModel, IncomeConfig, IncomeDistribution};

    fn model(find: f64, quit: f64) -> EmploymentModel {
        EmploymentModel::with_tables(
            ProbabilityTable::constant(find),
            ProbabilityTable::constant(quit),
            IncomeDistribution::new(&IncomeConfig::default()).unwrap(),
        )
    }

    #[test]
    fn seeker_takes_job_nearest_home() {
        let mut r = Registry::new(&RegistryConfig::default());
        let far = r.create_job(ZoneId(3), "office");
        let near = r.create_job(ZoneId(2), "office");
        let (_, ids) = housed(&mut r, 1, vec![person(35, Gender::Female, Role::Single)]);
        let mut s = state_of(r);
        run(&mut model(1.0, 0.0), &mut s);

        let p = s.registry.person(ids[0]).unwrap();
        assert_eq!(p.job(), Some(near));
        assert_eq!(p.occupation, Occupation::Employed);
        assert!(p.income > 0.0);
        assert!(s.registry.job(far).unwrap().is_vacant());
    }

    #[test]
    fn no_vacant_job_counts_missing_job() {
        let mut r = Registry::new(&RegistryConfig::default());
        housed(&mut r, 1, vec![person(35, Gender::Female, Role::Single)]);
        let mut s = state_of(r);
        run(&mut model(1.0, 0.0), &mut s);
        assert_eq!(s.counters.year().unmet(UnmetDemand::MissingJob), 1);
    }

    #[test]
    fn quitter_is_unemployed_and_job_vacant() {
        let mut r = Registry::new(&RegistryConfig::default());
        let job = r.create_job(ZoneId(1), "retail");
        let (_, ids) = housed(
            &mut r,
            1,
            vec![PersonSpec { occupation: Occupation::Employed, ..person(35, Gender::Male, Role::Single) }],
        );
        r.assign_job(ids[0], job).unwrap();
        let mut s = state_of(r);
        // A quitter cannot find a job in the same year, even at p = 1.
        run(&mut model(1.0, 1.0), &mut s);

        let p = s.registry.person(ids[0]).unwrap();
        assert_eq!(p.occupation, Occupation::Unemployed);
        assert_eq!(p.income, 0.0);
        assert!(s.registry.job(job).unwrap().is_vacant());
    }
}
