//! Fluent builder for constructing a [`Sim`].

use log::info;

use ms_core::{MsError, SimRng};
use ms_demography::{
    AgingModel, BirthModel, DeathModel, DivorceModel, EmploymentModel, LeaveParentsModel, MarriageModel,
};
use ms_model::{
    AffordabilitySearch, EventGate, RelocationSearch, SimulationState, TraceLog, YearlyModel,
};
use ms_realestate::{ConstructionModel, DemolitionModel, LandLedger, PricingModel, RenovationModel};
use ms_registry::{Geography, Registry};

use crate::{ScenarioConfig, Sim, SimError, SimResult};

/// Fluent builder for [`Sim`].
///
/// # Required inputs
///
/// - [`ScenarioConfig`] — run settings and every calibrated parameter
/// - [`Registry`] — the base-year population and stock, usually from
///   [`ms_registry::RegistryBuilder`]
/// - [`Geography`] — zones and regions
///
/// # Optional inputs
///
/// | Method          | Default                                        |
/// |-----------------|------------------------------------------------|
/// | `.search(s)`    | [`AffordabilitySearch`] from `config.relocation` |
/// | `.models(v)`    | The standard pipeline, see [`standard_pipeline`] |
pub struct SimBuilder {
    config:    ScenarioConfig,
    registry:  Registry,
    geography: Geography,
    search:    Option<Box<dyn RelocationSearch>>,
    models:    Option<Vec<Box<dyn YearlyModel>>>,
}

impl SimBuilder {
    pub fn new(config: ScenarioConfig, registry: Registry, geography: Geography) -> Self {
        Self { config, registry, geography, search: None, models: None }
    }

    /// Replace the default relocation collaborator.
    pub fn search(mut self, search: impl RelocationSearch + 'static) -> Self {
        self.search = Some(Box::new(search));
        self
    }

    /// Replace the model pipeline.  Models run in the order given.
    pub fn models(mut self, models: Vec<Box<dyn YearlyModel>>) -> Self {
        self.models = Some(models);
        self
    }

    /// Validate the configuration and the base-year registry, build the
    /// models and return a ready-to-run [`Sim`].
    pub fn build(self) -> SimResult<Sim> {
        self.config.validate()?;

        let registry = self.registry;
        if registry.max_quality() != self.config.registry.max_quality {
            return Err(SimError::Config(format!(
                "registry was built with max_quality {} but the scenario says {}",
                registry.max_quality(),
                self.config.registry.max_quality
            )));
        }
        registry.check_invariants()?;
        let zones = registry.dwellings().map(|d| d.zone).chain(registry.jobs().map(|j| j.zone));
        for zone in zones {
            if !self.geography.contains(zone) {
                return Err(MsError::ZoneNotFound(zone).into());
            }
        }

        let models = match self.models {
            Some(m) => m,
            None => standard_pipeline(&self.config, &self.geography)?,
        };
        let search = self
            .search
            .unwrap_or_else(|| Box::new(AffordabilitySearch::new(self.config.relocation.clone())));

        let sim_cfg = self.config.sim;
        let trace = TraceLog::new(&sim_cfg.trace_persons, &sim_cfg.trace_households, &sim_cfg.trace_dwellings);
        let state = SimulationState::new(
            registry,
            self.geography,
            EventGate::new(self.config.gate),
            sim_cfg.start_year,
        )
        .with_trace(trace)
        .with_period(sim_cfg.period_years);

        info!(
            "simulation built: {} persons, {} households, {} dwellings, {} jobs; years {}..{}",
            state.registry.person_count(),
            state.registry.household_count(),
            state.registry.dwelling_count(),
            state.registry.job_count(),
            sim_cfg.start_year,
            sim_cfg.end_year
        );

        Ok(Sim {
            clock: sim_cfg.make_clock(),
            rng: SimRng::new(sim_cfg.seed),
            config: sim_cfg,
            state,
            models,
            search,
        })
    }
}

/// The yearly pipeline: demographic models, then the market models.
///
/// Construction plans in its `prepare` step, before any demographic event,
/// and realizes the plan in its `run` step after them.
pub fn standard_pipeline(config: &ScenarioConfig, geography: &Geography) -> SimResult<Vec<Box<dyn YearlyModel>>> {
    let demo = &config.demography;
    let market = &config.real_estate;
    Ok(vec![
        Box::new(DeathModel::new(&demo.death)?),
        Box::new(AgingModel),
        Box::new(BirthModel::new(&demo.birth)?),
        Box::new(LeaveParentsModel::new(&demo.leave_parents)?),
        Box::new(MarriageModel::new(&demo.marriage)?),
        Box::new(DivorceModel::new(&demo.divorce)?),
        Box::new(EmploymentModel::new(&demo.employment, &demo.income)?),
        Box::new(ConstructionModel::new(&market.construction, LandLedger::new(&market.land, geography))),
        Box::new(DemolitionModel::new(&market.demolition)),
        Box::new(RenovationModel::new(&market.renovation)),
        Box::new(PricingModel::new(&market.pricing)),
    ])
}
