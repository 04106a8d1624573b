//! The `YearlyModel` trait and the keyed draw phase.

use ms_core::{AgentRng, EntityId, SimRng, StreamKey};

use crate::{ModelResult, RelocationSearch, SimulationState};

/// One yearly transition model.
///
/// Each simulated year the driver calls [`prepare`](Self::prepare) on every
/// model, then [`run`](Self::run) on each in pipeline order.  Models hold
/// only their calibrated parameters and any plan carried between the two
/// calls; all population state lives in [`SimulationState`].
///
/// # Example
///
/// ```rust,ignore
/// struct Aging;
///
/// impl YearlyModel for Aging {
///     fn name(&self) -> &'static str { "aging" }
///
///     fn run(&mut self, state: &mut SimulationState, _rng: &mut SimRng,
///            _search: &mut dyn RelocationSearch) -> ModelResult<()> {
///         for p in state.registry.person_ids() { /* ... */ }
///         Ok(())
///     }
/// }
/// ```
pub trait YearlyModel {
    fn name(&self) -> &'static str;

    /// Once per year, before any model runs.  Default: nothing.
    fn prepare(&mut self, _state: &mut SimulationState, _rng: &mut SimRng) -> ModelResult<()> {
        Ok(())
    }

    fn run(
        &mut self,
        state:  &mut SimulationState,
        rng:    &mut SimRng,
        search: &mut dyn RelocationSearch,
    ) -> ModelResult<()>;
}

/// Evaluate `draw` for every subject with its own keyed [`AgentRng`] and keep
/// the `Some` outcomes, in subject order.
///
/// `draw` must only read shared state.  Because each subject's stream is
/// derived from `(key, id)`, the result does not depend on evaluation order;
/// with the `parallel` feature the draws run on Rayon's thread pool.
pub fn draw_phase<I, T, F>(subjects: &[I], key: StreamKey, draw: F) -> Vec<(I, T)>
where
    I: EntityId,
    T: Send,
    F: Fn(I, &mut AgentRng) -> Option<T> + Sync,
{
    #[cfg(not(feature = "parallel"))]
    {
        subjects
            .iter()
            .filter_map(|&id| draw(id, &mut key.agent(id)).map(|t| (id, t)))
            .collect()
    }

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;

        subjects
            .par_iter()
            .filter_map(|&id| draw(id, &mut key.agent(id)).map(|t| (id, t)))
            .collect()
    }
}
