//! Renovation and deterioration.
//!
//! Each dwelling draws a quality change of −2..=+2.  Changes are weighted
//! by the base probabilities times `initial share / current share` of the
//! target level, which pulls the quality distribution back toward the
//! base year.  The initial shares are taken in the first
//! [`prepare`](YearlyModel::prepare), before construction or demolition act.
//! A level empty both then and now is neutral.  Targets outside
//! `[1, max_quality]` get zero weight.
//!
//! The pass is sequential in ascending dwelling id: the level counts are
//! updated after every change, so later dwellings see the adjusted ratio.

use log::debug;
use rand::distributions::{Distribution, WeightedIndex};

use ms_core::SimRng;
use ms_model::{Event, EventKind, ModelResult, RelocationSearch, SimulationState, YearlyModel};

use crate::{MarketStats, RenovationConfig};

pub struct RenovationModel {
    config:         RenovationConfig,
    /// Quality shares before the first year's events.
    initial_shares: Option<Vec<f64>>,
}

impl RenovationModel {
    pub fn new(config: &RenovationConfig) -> Self {
        Self { config: config.clone(), initial_shares: None }
    }

    /// Fix the reference distribution instead of taking the first year's.
    pub fn with_initial_shares(mut self, shares: Vec<f64>) -> Self {
        self.initial_shares = Some(shares);
        self
    }

    pub fn initial_shares(&self) -> Option<&[f64]> {
        self.initial_shares.as_deref()
    }

    fn weights(&self, quality: u8, counts: &[usize], initial: &[f64]) -> [f64; 5] {
        let total: usize = counts.iter().sum();
        let max_quality = counts.len() as i32;
        let mut w = [0.0; 5];
        for (slot, delta) in (-2i32..=2).enumerate() {
            let target = quality as i32 + delta;
            if target < 1 || target > max_quality {
                continue;
            }
            let base = self.config.probability[slot];
            w[slot] = if delta == 0 {
                base
            } else {
                let level = (target - 1) as usize;
                let current = if total == 0 { 0.0 } else { counts[level] as f64 / total as f64 };
                let reference = initial.get(level).copied().unwrap_or(0.0);
                let ratio = match (current > 0.0, reference > 0.0) {
                    (true, _) => reference / current,
                    (false, true) => self.config.max_ratio,
                    // Empty then and now.
                    (false, false) => 1.0,
                };
                base * ratio.clamp(self.config.min_ratio, self.config.max_ratio)
            };
        }
        w
    }
}

impl YearlyModel for RenovationModel {
    fn name(&self) -> &'static str {
        "renovation"
    }

    fn prepare(&mut self, state: &mut SimulationState, _rng: &mut SimRng) -> ModelResult<()> {
        if self.initial_shares.is_none() {
            let stats = MarketStats::collect(&state.registry, &state.geography);
            self.initial_shares = Some(stats.quality_shares());
        }
        Ok(())
    }

    fn run(
        &mut self,
        state:   &mut SimulationState,
        rng:     &mut SimRng,
        _search: &mut dyn RelocationSearch,
    ) -> ModelResult<()> {
        let stats = MarketStats::collect(&state.registry, &state.geography);
        let mut counts = stats.quality_counts().to_vec();
        let initial = self.initial_shares.get_or_insert_with(|| stats.quality_shares()).clone();
        let key = rng.stream_key(state.year, EventKind::Renovation.stream());

        let mut changed = 0usize;
        for dwelling in state.registry.dwelling_ids() {
            if !state.is_eligible(Event::Renovation(dwelling)) {
                continue;
            }
            let old = state.registry.get_dwelling(dwelling)?.quality;
            let weights = self.weights(old, &counts, &initial);
            // Every target weighted zero leaves the dwelling as it is.
            let Ok(dist) = WeightedIndex::new(weights) else { continue };
            let new = (old as i32 + dist.sample(key.agent(dwelling).inner()) as i32 - 2) as u8;
            if new == old {
                continue;
            }

            if let Some(dw) = state.registry.dwelling_mut(dwelling) {
                dw.quality = new;
            }
            counts[old as usize - 1] -= 1;
            counts[new as usize - 1] += 1;
            changed += 1;
            state.commit(Event::Renovation(dwelling), || format!("quality {old} -> {new}"));
        }
        debug!("renovation: {changed} dwellings changed quality");
        Ok(())
    }
}
