//! Leaving the parental household.

use log::debug;

use ms_core::{Role, SimRng};
use ms_model::{
    Event, EventKind, ModelResult, RelocationSearch, SimulationState, UnmetDemand, YearlyModel,
    draw_phase,
};

use crate::{LeaveParentsConfig, ProbabilityTable};

pub struct LeaveParentsModel {
    probability: ProbabilityTable,
}

impl LeaveParentsModel {
    pub fn new(config: &LeaveParentsConfig) -> ModelResult<Self> {
        Ok(Self {
            probability: ProbabilityTable::from_spec("leave_parents.probability", &config.probability)?,
        })
    }

    pub fn from_table(probability: ProbabilityTable) -> Self {
        Self { probability }
    }
}

impl YearlyModel for LeaveParentsModel {
    fn name(&self) -> &'static str {
        "leave_parents"
    }

    fn run(
        &mut self,
        state:  &mut SimulationState,
        rng:    &mut SimRng,
        search: &mut dyn RelocationSearch,
    ) -> ModelResult<()> {
        let subjects = state.registry.person_ids();
        let key = rng.stream_key(state.year, EventKind::LeaveParentalHousehold.stream());
        let (registry, gate, table) = (&state.registry, &state.gate, &self.probability);
        let leavers = draw_phase(&subjects, key, |p, r| {
            if !gate.is_eligible(registry, Event::LeaveParentalHousehold(p)) {
                return None;
            }
            let person = registry.person(p)?;
            r.gen_bool(table.get(person.age, person.gender)).then_some(())
        });

        let mut left = 0usize;
        for (person, ()) in leavers {
            if !state.is_eligible(Event::LeaveParentalHousehold(person)) {
                continue;
            }
            let Some(dwelling) = search.search_for_new_dwelling(&state.registry, &[person], rng) else {
                state.count_unmet(UnmetDemand::LackOfDwellingLeaveParents);
                continue;
            };

            let parents = state.registry.get_person(person)?.household();
            let household = state.registry.create_household(0);
            state.registry.add_person_to_household(person, household)?;
            state.registry.get_person_mut(person)?.role = Role::Single;
            search.move_household(&mut state.registry, household, None, dwelling)?;
            if let Some(parents) = parents {
                state.settle_household(parents)?;
            }
            state.commit(Event::LeaveParentalHousehold(person), || {
                format!("left {parents:?} for {household} in {dwelling}")
            });
            left += 1;
        }
        debug!("leave_parents: {left} persons left home");
        Ok(())
    }
}
