//! Birth.

use log::debug;

use ms_core::{Gender, Role, SimRng};
use ms_model::{
    Event, EventKind, ModelResult, RelocationSearch, SimulationState, YearlyModel, check_non_negative,
    check_probability, draw_phase,
};
use ms_registry::PersonSpec;

use crate::{BirthConfig, ProbabilityTable};

pub struct BirthModel {
    probability:      ProbabilityTable,
    married_scaler:   f64,
    single_scaler:    f64,
    probability_girl: f64,
}

impl BirthModel {
    pub fn new(config: &BirthConfig) -> ModelResult<Self> {
        check_non_negative("birth.married_scaler", config.married_scaler)?;
        check_non_negative("birth.single_scaler", config.single_scaler)?;
        check_probability("birth.probability_girl", config.probability_girl)?;
        Ok(Self {
            probability:      ProbabilityTable::from_spec("birth.probability", &config.probability)?,
            married_scaler:   config.married_scaler,
            single_scaler:    config.single_scaler,
            probability_girl: config.probability_girl,
        })
    }
}

impl YearlyModel for BirthModel {
    fn name(&self) -> &'static str {
        "birth"
    }

    fn run(
        &mut self,
        state:   &mut SimulationState,
        rng:     &mut SimRng,
        _search: &mut dyn RelocationSearch,
    ) -> ModelResult<()> {
        let subjects = state.registry.person_ids();
        let key = rng.stream_key(state.year, EventKind::Birth.stream());
        let (registry, gate) = (&state.registry, &state.gate);
        let births = draw_phase(&subjects, key, |mother, r| {
            if !gate.is_eligible(registry, Event::Birth(mother)) {
                return None;
            }
            let m = registry.person(mother)?;
            let scaler = if m.role == Role::Married { self.married_scaler } else { self.single_scaler };
            let p = self.probability.get(m.age, m.gender) * scaler;
            if !r.gen_bool(p) {
                return None;
            }
            Some(if r.gen_bool(self.probability_girl) { Gender::Female } else { Gender::Male })
        });

        let mut born = 0usize;
        for (mother, gender) in births {
            if !state.is_eligible(Event::Birth(mother)) {
                continue;
            }
            let m = state.registry.get_person(mother)?;
            let (mother_race, household) = (m.race, m.household());
            let Some(household) = household else { continue };
            let race = state.registry.household_race(household).unwrap_or(mother_race);

            let child = state.registry.create_person(PersonSpec::newborn(gender, race));
            state.registry.add_person_to_household(child, household)?;
            state.commit(Event::Birth(mother), || format!("gave birth to {child}"));
            born += 1;
        }
        debug!("birth: {born} children born");
        Ok(())
    }
}
