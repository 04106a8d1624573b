//! Price updates from vacancy.
//!
//! Every unrestricted dwelling's price moves by
//! [`PricingConfig::change_rate`] of its `(type, region)` vacancy rate.
//! The pass is deterministic.  Afterwards the average price per type is
//! published to [`MarketSignals`](ms_model::MarketSignals) for next year's
//! construction plan.

use log::debug;

use ms_core::{DwellingType, SimRng};
use ms_model::{Event, ModelResult, RelocationSearch, SimulationState, YearlyModel};

use crate::{MarketStats, PricingConfig};

pub struct PricingModel {
    config: PricingConfig,
}

impl PricingModel {
    pub fn new(config: &PricingConfig) -> Self {
        Self { config: config.clone() }
    }
}

impl YearlyModel for PricingModel {
    fn name(&self) -> &'static str {
        "pricing"
    }

    fn run(
        &mut self,
        state:   &mut SimulationState,
        _rng:    &mut SimRng,
        _search: &mut dyn RelocationSearch,
    ) -> ModelResult<()> {
        let stats = MarketStats::collect(&state.registry, &state.geography);

        let mut updated = 0usize;
        for dwelling in state.registry.dwelling_ids() {
            if !state.is_eligible(Event::Pricing(dwelling)) {
                continue;
            }
            let dw = state.registry.get_dwelling(dwelling)?;
            // The dwelling's own segment; type-wide only for an unmapped zone.
            let vacancy = match state.geography.region_of(dw.zone) {
                Some(region) => stats.type_region(dw.kind, region).vacancy_rate(),
                None => stats.by_type(dw.kind).vacancy_rate(),
            };
            let rate = self.config.change_rate(vacancy);
            let old = dw.price;
            let new = old * (1.0 + rate);
            if let Some(dw) = state.registry.dwelling_mut(dwelling) {
                dw.price = new;
            }
            updated += 1;
            state.commit(Event::Pricing(dwelling), || format!("price {old:.0} -> {new:.0}"));
        }

        let after = MarketStats::collect(&state.registry, &state.geography);
        for kind in DwellingType::ALL {
            state.signals.set_average_price(kind, after.by_type(kind).average_price());
        }
        debug!("pricing: {updated} prices updated");
        Ok(())
    }
}
