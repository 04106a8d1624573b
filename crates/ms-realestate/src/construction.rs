//! New construction.
//!
//! [`prepare`](YearlyModel::prepare) plans the year's units; the plan is a
//! queue that [`run`](YearlyModel::run) realizes after the demographic
//! events, so households formed this year compete for last year's stock.
//!
//! Planning visits dwelling types by descending average price.  Per
//! `(type, region)` the target is `stock × exp(-shape × vacancy) ×
//! size_adjustment`, rounded stochastically.  Each unit then picks a zone in
//! the region with weight `available acres × exp(β_price × relative price +
//! β_access × accessibility)`; a zone without room or zoned against the type
//! gets zero weight.  When no zone has room the remaining units of that
//! segment become `ConstructionNoLand` unmet demand.

use std::collections::VecDeque;

use log::{debug, info, warn};
use rand::distributions::{Distribution, WeightedIndex};

use ms_core::{DwellingType, RegionId, SimRng, ZoneId};
use ms_model::{EventKind, ModelResult, RelocationSearch, SimulationState, TraceSubject, UnmetDemand, YearlyModel};
use ms_registry::DwellingSpec;

use crate::{ConstructionConfig, LandLedger, MarketStats, median_household_income};

/// One unit waiting to be built.
#[derive(Clone, Debug, PartialEq)]
pub struct PlannedUnit {
    pub zone:        ZoneId,
    pub kind:        DwellingType,
    pub bedrooms:    u8,
    pub price:       f64,
    pub restriction: f64,
}

pub struct ConstructionModel {
    config:  ConstructionConfig,
    land:    LandLedger,
    planned: VecDeque<PlannedUnit>,
}

impl ConstructionModel {
    pub fn new(config: &ConstructionConfig, land: LandLedger) -> Self {
        Self { config: config.clone(), land, planned: VecDeque::new() }
    }

    pub fn land(&self) -> &LandLedger {
        &self.land
    }

    pub fn planned(&self) -> impl Iterator<Item = &PlannedUnit> + '_ {
        self.planned.iter()
    }

    /// Queue one unit directly, bypassing the demand plan.
    pub fn enqueue(&mut self, unit: PlannedUnit) {
        self.planned.push_back(unit);
    }

    /// Dwelling types by descending average price; unpriced types last.
    fn type_order(state: &SimulationState, stats: &MarketStats) -> Vec<DwellingType> {
        let mut kinds: Vec<(DwellingType, f64)> = DwellingType::ALL
            .into_iter()
            .map(|k| {
                let price = state
                    .signals
                    .average_price(k)
                    .or_else(|| stats.by_type(k).average_price())
                    .unwrap_or(f64::NEG_INFINITY);
                (k, price)
            })
            .collect();
        kinds.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
        kinds.into_iter().map(|(k, _)| k).collect()
    }

    fn target_units(&self, stock: usize, vacancy: f64, rng: &mut SimRng) -> usize {
        let expected = stock as f64 * (-self.config.demand_shape * vacancy).exp() * self.config.size_adjustment;
        let whole = expected.floor();
        whole as usize + usize::from(rng.gen_bool(expected - whole))
    }

    /// Plan the units of one `(type, region)` segment.  Returns the number of
    /// units that found no land.
    fn plan_segment(
        &mut self,
        state:         &SimulationState,
        stats:         &MarketStats,
        kind:          DwellingType,
        region:        RegionId,
        median_income: f64,
        rng:           &mut SimRng,
    ) -> usize {
        let segment = stats.type_region(kind, region);
        if segment.units == 0 {
            return 0;
        }
        let target = self.target_units(segment.units, segment.vacancy_rate(), rng);
        if target == 0 {
            return 0;
        }

        let type_price = stats.by_type(kind).average_price().unwrap_or(0.0);
        let region_price = segment.average_price().unwrap_or(type_price);
        let zones: Vec<ZoneId> = state.geography.zones_in_region(region).map(|z| z.id).collect();
        let utility: Vec<f64> = zones
            .iter()
            .map(|&z| {
                let relative = match stats.type_zone(kind, z).average_price() {
                    Some(p) if type_price > 0.0 => p / type_price,
                    _ => 1.0,
                };
                (self.config.price_coefficient * relative
                    + self.config.access_coefficient * state.geography.accessibility(z))
                .exp()
            })
            .collect();

        for built in 0..target {
            let weights: Vec<f64> = zones
                .iter()
                .zip(&utility)
                .map(|(&z, &u)| if self.land.can_build(z, kind) { self.land.available(z) * u } else { 0.0 })
                .collect();
            let Ok(index) = WeightedIndex::new(&weights) else {
                warn!("no developable land for {kind} in {region}: {} of {target} units unbuilt", target - built);
                return target - built;
            };
            let zone = zones[index.sample(rng.inner())];
            self.land.consume(zone, kind);

            let (price, restriction) = if rng.gen_bool(self.config.affordable_share) {
                let r = self.config.affordable_restriction;
                (r * median_income * self.config.rent_share / 12.0, r)
            } else {
                let market = stats.type_zone(kind, zone).average_price().unwrap_or(region_price);
                (market, 0.0)
            };
            self.planned.push_back(PlannedUnit {
                zone,
                kind,
                bedrooms: self.config.bedrooms_for(kind),
                price,
                restriction,
            });
        }
        0
    }
}

impl YearlyModel for ConstructionModel {
    fn name(&self) -> &'static str {
        "construction"
    }

    fn prepare(&mut self, state: &mut SimulationState, rng: &mut SimRng) -> ModelResult<()> {
        let stats = MarketStats::collect(&state.registry, &state.geography);
        let median_income = median_household_income(&state.registry);
        let regions = state.geography.regions().to_vec();
        let before = self.planned.len();

        let mut no_land = 0;
        for kind in Self::type_order(state, &stats) {
            for &region in &regions {
                no_land += self.plan_segment(state, &stats, kind, region, median_income, rng);
            }
        }
        for _ in 0..no_land {
            state.count_unmet(UnmetDemand::ConstructionNoLand);
        }
        info!(
            "construction plan for {}: {} units, {no_land} without land",
            state.year,
            self.planned.len() - before
        );
        Ok(())
    }

    fn run(
        &mut self,
        state:   &mut SimulationState,
        _rng:    &mut SimRng,
        _search: &mut dyn RelocationSearch,
    ) -> ModelResult<()> {
        let quality = state.registry.max_quality();
        let mut built = 0usize;
        while let Some(unit) = self.planned.pop_front() {
            let kind = unit.kind;
            let id = state.registry.create_dwelling(DwellingSpec {
                zone: unit.zone,
                coord: None,
                kind,
                bedrooms: unit.bedrooms,
                quality,
                price: unit.price,
                restriction: unit.restriction,
                year_built: state.year,
            })?;
            state.counters.count_event(EventKind::Construction);
            state.trace(TraceSubject::Dwelling(id), || format!("built {kind} in {}", unit.zone));
            built += 1;
        }
        debug!("construction: {built} units completed");
        Ok(())
    }
}
