//! Death.

use log::debug;

use ms_core::{Role, SimRng};
use ms_model::{
    Event, EventKind, ModelResult, RelocationSearch, SimulationState, YearlyModel, draw_phase,
};

use crate::{DeathConfig, ProbabilityTable};

pub struct DeathModel {
    probability: ProbabilityTable,
}

impl DeathModel {
    pub fn new(config: &DeathConfig) -> ModelResult<Self> {
        Ok(Self { probability: ProbabilityTable::from_spec("death.probability", &config.probability)? })
    }

    pub fn from_table(probability: ProbabilityTable) -> Self {
        Self { probability }
    }
}

impl YearlyModel for DeathModel {
    fn name(&self) -> &'static str {
        "death"
    }

    fn run(
        &mut self,
        state:   &mut SimulationState,
        rng:     &mut SimRng,
        _search: &mut dyn RelocationSearch,
    ) -> ModelResult<()> {
        let subjects = state.registry.person_ids();
        let key = rng.stream_key(state.year, EventKind::Death.stream());
        let table = &self.probability;
        let registry = &state.registry;
        let deaths = draw_phase(&subjects, key, |p, r| {
            let person = registry.person(p)?;
            r.gen_bool(table.get(person.age, person.gender)).then_some(())
        });

        let mut died = 0usize;
        for (person, ()) in deaths {
            if !state.is_eligible(Event::Death(person)) {
                continue;
            }
            let spouse = state.registry.spouse_of(person);
            let household = state.registry.get_person(person)?.household();
            let removed = state.registry.remove_person(person)?;
            if let Some(s) = spouse {
                state.registry.get_person_mut(s)?.role = Role::Single;
            }
            if let Some(hh) = household {
                state.settle_household(hh)?;
            }
            let age = removed.age;
            state.commit(Event::Death(person), || format!("died aged {age}"));
            died += 1;
        }
        debug!("death: {died} persons died");
        Ok(())
    }
}
