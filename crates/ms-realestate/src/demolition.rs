//! Demolition.  An occupied dwelling's household searches for a new home
//! first; without one it leaves the region.

use log::debug;

use ms_core::SimRng;
use ms_model::{
    Event, EventKind, ModelResult, RelocationSearch, SimulationState, UnmetDemand, YearlyModel, draw_phase,
};

use crate::DemolitionConfig;

pub struct DemolitionModel {
    /// `[quality - 1][vacant as usize]`.
    probability: Vec<[f64; 2]>,
}

impl DemolitionModel {
    pub fn new(config: &DemolitionConfig) -> Self {
        Self { probability: config.probability.clone() }
    }

    fn probability(&self, quality: u8, vacant: bool) -> f64 {
        self.probability
            .get((quality as usize).saturating_sub(1))
            .map_or(0.0, |row| row[usize::from(vacant)])
    }
}

impl YearlyModel for DemolitionModel {
    fn name(&self) -> &'static str {
        "demolition"
    }

    fn run(
        &mut self,
        state:  &mut SimulationState,
        rng:    &mut SimRng,
        search: &mut dyn RelocationSearch,
    ) -> ModelResult<()> {
        let subjects = state.registry.dwelling_ids();
        let key = rng.stream_key(state.year, EventKind::Demolition.stream());
        let registry = &state.registry;
        let drawn = draw_phase(&subjects, key, |d, r| {
            let dw = registry.dwelling(d)?;
            r.gen_bool(self.probability(dw.quality, dw.is_vacant())).then_some(())
        });

        let mut displaced = 0usize;
        for (dwelling, ()) in drawn {
            if !state.is_eligible(Event::Demolition(dwelling)) {
                continue;
            }
            if let Some(household) = state.registry.get_dwelling(dwelling)?.resident() {
                let members = state.registry.get_household(household)?.persons().to_vec();
                match search.search_for_new_dwelling(&state.registry, &members, rng) {
                    Some(new) => search.move_household(&mut state.registry, household, Some(dwelling), new)?,
                    None => {
                        state.registry.outmigrate_household(household)?;
                        state.count_unmet(UnmetDemand::LackOfDwellingForcedOutmigration);
                    }
                }
                displaced += 1;
            }
            state.registry.remove_dwelling(dwelling)?;
            state.commit(Event::Demolition(dwelling), || "demolished".into());
        }
        debug!("demolition: {displaced} households displaced");
        Ok(())
    }
}
