//! Divorce.
//!
//! Transactional: the initiating partner's dwelling search runs first, and
//! nothing changes (roles included) unless it succeeds.

use std::collections::BTreeSet;

use log::debug;

use ms_core::{Role, SimRng};
use ms_model::{
    Event, EventKind, ModelResult, RelocationSearch, SimulationState, UnmetDemand, YearlyModel,
    draw_phase,
};

use crate::{DivorceConfig, ProbabilityTable};

pub struct DivorceModel {
    probability: ProbabilityTable,
}

impl DivorceModel {
    pub fn new(config: &DivorceConfig) -> ModelResult<Self> {
        Ok(Self { probability: ProbabilityTable::from_spec("divorce.probability", &config.probability)? })
    }

    pub fn from_table(probability: ProbabilityTable) -> Self {
        Self { probability }
    }
}

impl YearlyModel for DivorceModel {
    fn name(&self) -> &'static str {
        "divorce"
    }

    fn run(
        &mut self,
        state:  &mut SimulationState,
        rng:    &mut SimRng,
        search: &mut dyn RelocationSearch,
    ) -> ModelResult<()> {
        let subjects = state.registry.person_ids();
        let key = rng.stream_key(state.year, EventKind::Divorce.stream());
        let (registry, gate, table) = (&state.registry, &state.gate, &self.probability);
        let initiators = draw_phase(&subjects, key, |p, r| {
            if !gate.is_eligible(registry, Event::Divorce(p)) {
                return None;
            }
            let person = registry.person(p)?;
            r.gen_bool(table.get(person.age, person.gender)).then_some(())
        });

        let mut divorced = 0usize;
        // Persons whose couple already failed to find a dwelling this year.
        let mut stuck = BTreeSet::new();
        for (person, ()) in initiators {
            if stuck.contains(&person) {
                continue;
            }
            // The partner may have initiated first; the gate then fails here.
            if !state.is_eligible(Event::Divorce(person)) {
                continue;
            }
            let Some(spouse) = state.registry.spouse_of(person) else { continue };
            let Some(dwelling) = search.search_for_new_dwelling(&state.registry, &[person], rng) else {
                state.count_unmet(UnmetDemand::LackOfDwellingDivorce);
                stuck.insert(spouse);
                continue;
            };

            let old = state.registry.get_person(person)?.household();
            state.registry.get_person_mut(person)?.role = Role::Single;
            state.registry.get_person_mut(spouse)?.role = Role::Single;
            let household = state.registry.create_household(0);
            state.registry.add_person_to_household(person, household)?;
            search.move_household(&mut state.registry, household, None, dwelling)?;
            if let Some(old) = old {
                state.settle_household(old)?;
            }

            state.gate.record(Event::Divorce(spouse));
            state.commit(Event::Divorce(person), || format!("divorced {spouse}, moved to {dwelling}"));
            divorced += 1;
        }
        debug!("divorce: {divorced} couples divorced");
        Ok(())
    }
}
