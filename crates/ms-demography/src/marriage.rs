//! Marriage.
//!
//! # Phase A: the market
//!
//! Each eligible single enters this year's market with probability
//! `market_share` (times `single_household_bias` for persons living alone)
//! and, once in, proposes with the type probability.  Market members are
//! bucketed by `(gender, age)`.  Proposers are visited in ascending id; each
//! draws a race outcome (same race unless an `inter_racial_share` draw says
//! otherwise), then an age bucket of the opposite gender weighted by a
//! Gaussian over the signed age difference times the candidate weight of
//! that bucket, then a partner within the bucket by candidate weight.
//! Candidates live in another household; one matching the race outcome
//! weighs `race_preference`, any other weighs 1.
//!
//! A proposer facing an empty opposite-gender pool ends the market for the
//! year (soft skip, counted as `EmptyMarriageMarket`).
//!
//! # Phase B: households
//!
//! The couple joins the household of the non-child partner; if both or
//! neither are children, the smaller household, then the one with more
//! bedrooms, then the lower id.  If the merged household would exceed
//! `max_household_size`, the couple instead forms a new household and
//! searches for a dwelling, out-migrating on failure.  Children left alone
//! in the mover's household follow into the destination.

use std::cmp::Reverse;
use std::collections::BTreeMap;

use log::{debug, warn};
use rand::distributions::{Distribution, WeightedIndex};

use ms_core::{Gender, HouseholdId, PersonId, Role, SimRng};
use ms_model::{
    Event, EventKind, ModelResult, RelocationSearch, SimulationState, UnmetDemand, YearlyModel,
    draw_phase,
};
use ms_registry::Registry;

use crate::{MarriageConfig, ProbabilityTable};

// ── Market ────────────────────────────────────────────────────────────────────

/// Unmatched market members by `(gender, age)`, ascending id within a bucket.
#[derive(Default)]
struct Market {
    pools: BTreeMap<(Gender, u32), Vec<PersonId>>,
}

impl Market {
    fn insert(&mut self, gender: Gender, age: u32, person: PersonId) {
        self.pools.entry((gender, age)).or_default().push(person);
    }

    fn remove(&mut self, gender: Gender, age: u32, person: PersonId) -> bool {
        let Some(pool) = self.pools.get_mut(&(gender, age)) else {
            return false;
        };
        let Some(pos) = pool.iter().position(|&p| p == person) else {
            return false;
        };
        pool.remove(pos);
        if pool.is_empty() {
            self.pools.remove(&(gender, age));
        }
        true
    }

    fn has_gender(&self, gender: Gender) -> bool {
        self.pools.keys().any(|&(g, _)| g == gender)
    }

    fn buckets(&self, gender: Gender) -> impl Iterator<Item = (u32, &[PersonId])> + '_ {
        self.pools
            .range((gender, 0)..=(gender, u32::MAX))
            .map(|(&(_, age), pool)| (age, pool.as_slice()))
    }
}

// ── MarriageModel ─────────────────────────────────────────────────────────────

pub struct MarriageModel {
    probability: ProbabilityTable,
    config:      MarriageConfig,
}

impl MarriageModel {
    pub fn new(config: &MarriageConfig) -> ModelResult<Self> {
        Ok(Self {
            probability: ProbabilityTable::from_spec("marriage.probability", &config.probability)?,
            config:      config.clone(),
        })
    }

    pub fn from_table(probability: ProbabilityTable, config: MarriageConfig) -> Self {
        Self { probability, config }
    }

    /// Gaussian weight of a (husband age − wife age) difference.
    fn age_weight(&self, husband: u32, wife: u32) -> f64 {
        let dev = husband as f64 - wife as f64 - self.config.mean_age_difference;
        if dev.abs() > self.config.max_age_difference as f64 {
            return 0.0;
        }
        let sd = self.config.age_difference_sd;
        (-(dev * dev) / (2.0 * sd * sd)).exp()
    }

    /// Phase A.  Returns the couples and whether the market ran dry.
    fn match_couples(
        &self,
        registry:  &Registry,
        market:    &mut Market,
        proposers: &[PersonId],
        rng:       &mut SimRng,
    ) -> (Vec<(PersonId, PersonId)>, bool) {
        let mut couples = Vec::new();

        for &proposer in proposers {
            let Some(p) = registry.person(proposer) else { continue };
            // Already taken as someone else's partner.
            if !market.remove(p.gender, p.age, proposer) {
                continue;
            }
            let wanted = p.gender.opposite();
            if !market.has_gender(wanted) {
                return (couples, true);
            }

            let same_race = !rng.gen_bool(self.config.inter_racial_share);
            let preference = self.config.race_preference;
            // Candidates from other households, weighted toward the drawn
            // race outcome.
            let candidate_weight = |c: PersonId| {
                let c = registry.person(c)?;
                if c.household() == p.household() {
                    return None;
                }
                Some(if (c.race == p.race) == same_race { preference } else { 1.0 })
            };

            let buckets: Vec<(u32, Vec<(PersonId, f64)>)> = market
                .buckets(wanted)
                .map(|(age, pool)| {
                    let pool = pool.iter().filter_map(|&c| Some((c, candidate_weight(c)?))).collect();
                    (age, pool)
                })
                .collect();
            let weights: Vec<f64> = buckets
                .iter()
                .map(|(age, pool)| {
                    let w = match p.gender {
                        Gender::Male => self.age_weight(p.age, *age),
                        Gender::Female => self.age_weight(*age, p.age),
                    };
                    w * pool.iter().map(|&(_, cw)| cw).sum::<f64>()
                })
                .collect();
            // All-zero weights: nobody suitable, the proposer stays single.
            let Ok(index) = WeightedIndex::new(&weights) else { continue };
            let (age, pool) = &buckets[index.sample(rng.inner())];
            let Ok(within) = WeightedIndex::new(pool.iter().map(|&(_, cw)| cw)) else { continue };
            let partner = pool[within.sample(rng.inner())].0;

            market.remove(wanted, *age, partner);
            couples.push((proposer, partner));
        }
        (couples, false)
    }

    fn bedrooms(registry: &Registry, household: HouseholdId) -> u8 {
        registry
            .household(household)
            .and_then(|hh| hh.dwelling())
            .and_then(|d| registry.dwelling(d))
            .map_or(0, |d| d.bedrooms)
    }

    /// Phase B for one couple.  Returns `false` if the gate rejected it.
    fn marry(
        &self,
        state:  &mut SimulationState,
        rng:    &mut SimRng,
        search: &mut dyn RelocationSearch,
        a:      PersonId,
        b:      PersonId,
    ) -> ModelResult<bool> {
        if !state.is_eligible(Event::Marriage(a)) || !state.is_eligible(Event::Marriage(b)) {
            return Ok(false);
        }
        let registry = &state.registry;
        let (pa, pb) = (registry.get_person(a)?, registry.get_person(b)?);
        let (Some(hh_a), Some(hh_b)) = (pa.household(), pb.household()) else {
            return Ok(false);
        };
        if hh_a == hh_b {
            return Ok(false);
        }

        let dest_is_a = match (pa.role == Role::Child, pb.role == Role::Child) {
            (false, true) => true,
            (true, false) => false,
            _ => {
                let key = |h| (registry.household_size(h), Reverse(Self::bedrooms(registry, h)), h);
                key(hh_a) <= key(hh_b)
            }
        };
        let (dest, mover, source) = if dest_is_a { (hh_a, b, hh_b) } else { (hh_b, a, hh_a) };

        let residue: Vec<PersonId> = registry
            .get_household(source)?
            .persons()
            .iter()
            .copied()
            .filter(|&m| m != mover)
            .collect();
        let fold = !residue.is_empty()
            && residue.iter().all(|&m| registry.person(m).is_some_and(|x| x.role == Role::Child));
        let merged_size = registry.household_size(dest) + 1 + if fold { residue.len() } else { 0 };

        state.registry.get_person_mut(a)?.role = Role::Married;
        state.registry.get_person_mut(b)?.role = Role::Married;

        if merged_size > self.config.max_household_size {
            let household = state.registry.create_household(0);
            state.registry.add_person_to_household(a, household)?;
            state.registry.add_person_to_household(b, household)?;
            match search.search_for_new_dwelling(&state.registry, &[a, b], rng) {
                Some(dwelling) => search.move_household(&mut state.registry, household, None, dwelling)?,
                None => {
                    state.registry.outmigrate_household(household)?;
                    state.count_unmet(UnmetDemand::LackOfDwellingMarriageOutmigration);
                }
            }
            state.settle_household(hh_a)?;
            state.settle_household(hh_b)?;
        } else {
            state.registry.add_person_to_household(mover, dest)?;
            if fold {
                for child in residue {
                    state.registry.add_person_to_household(child, dest)?;
                }
            }
            state.settle_household(source)?;
        }

        state.gate.record(Event::Marriage(b));
        state.commit(Event::Marriage(a), || format!("married {b}"));
        Ok(true)
    }
}

impl YearlyModel for MarriageModel {
    fn name(&self) -> &'static str {
        "marriage"
    }

    fn run(
        &mut self,
        state:  &mut SimulationState,
        rng:    &mut SimRng,
        search: &mut dyn RelocationSearch,
    ) -> ModelResult<()> {
        let subjects = state.registry.person_ids();
        let key = rng.stream_key(state.year, EventKind::Marriage.stream());
        let (registry, gate, table, cfg) = (&state.registry, &state.gate, &self.probability, &self.config);
        let members = draw_phase(&subjects, key, |p, r| {
            if !gate.is_eligible(registry, Event::Marriage(p)) {
                return None;
            }
            let person = registry.person(p)?;
            let alone = person.household().is_some_and(|h| registry.household_size(h) == 1);
            let share = cfg.market_share * if alone { cfg.single_household_bias } else { 1.0 };
            if !r.gen_bool(share) {
                return None;
            }
            Some(r.gen_bool(table.get(person.age, person.gender)))
        });

        let mut market = Market::default();
        let mut proposers = Vec::new();
        for &(p, proposes) in &members {
            if let Some(person) = state.registry.person(p) {
                market.insert(person.gender, person.age, p);
                if proposes {
                    proposers.push(p);
                }
            }
        }

        let (couples, ran_dry) = self.match_couples(&state.registry, &mut market, &proposers, rng);
        if ran_dry {
            warn!(
                "marriage market in {} ran out of partners ({} members, {} couples formed)",
                state.year,
                members.len(),
                couples.len()
            );
            state.count_unmet(UnmetDemand::EmptyMarriageMarket);
        }

        let mut married = 0usize;
        for (a, b) in couples {
            if self.marry(state, rng, search, a, b)? {
                married += 1;
            }
        }
        debug!("marriage: {married} couples married out of {} proposers", proposers.len());
        Ok(())
    }
}
