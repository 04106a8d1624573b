//! Birthday: deterministic aging.

use log::debug;

use ms_core::SimRng;
use ms_model::{Event, ModelResult, RelocationSearch, SimulationState, YearlyModel};

/// Adds the simulation period to every person's age.  With a period of zero
/// ages are left unchanged.
#[derive(Default)]
pub struct AgingModel;

impl YearlyModel for AgingModel {
    fn name(&self) -> &'static str {
        "aging"
    }

    fn run(
        &mut self,
        state:   &mut SimulationState,
        _rng:    &mut SimRng,
        _search: &mut dyn RelocationSearch,
    ) -> ModelResult<()> {
        let period = state.period_years;
        let mut aged = 0usize;
        for person in state.registry.person_ids() {
            if !state.is_eligible(Event::Birthday(person)) {
                continue;
            }
            let p = state.registry.get_person_mut(person)?;
            p.age += period;
            let age = p.age;
            state.commit(Event::Birthday(person), || format!("turned {age}"));
            aged += 1;
        }
        debug!("aging: {aged} persons aged by {period}");
        Ok(())
    }
}
