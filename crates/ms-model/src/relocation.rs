//! The relocation/search collaborator.
//!
//! Models never pick dwellings themselves.  They ask a [`RelocationSearch`]
//! for a vacant dwelling for a group of persons and treat `None` as a
//! definitive failure for that event; nothing retries within the year.

use rand::seq::IteratorRandom;
use serde::{Deserialize, Serialize};

use ms_core::{DwellingId, HouseholdId, MsResult, PersonId, SimRng};
use ms_registry::{Dwelling, Registry};

use crate::{ModelResult, check_non_negative};

pub trait RelocationSearch {
    /// A vacant dwelling for `persons`, or `None` if there is none to offer.
    fn search_for_new_dwelling(
        &mut self,
        registry: &Registry,
        persons:  &[PersonId],
        rng:      &mut SimRng,
    ) -> Option<DwellingId>;

    /// Move `household` from `old` into the vacant `new`.
    ///
    /// The default delegates to [`Registry::move_household`], which vacates
    /// `old` and updates the vacancy index.
    fn move_household(
        &mut self,
        registry:  &mut Registry,
        household: HouseholdId,
        _old:      Option<DwellingId>,
        new:       DwellingId,
    ) -> MsResult<()> {
        registry.move_household(household, new)?;
        Ok(())
    }
}

// ── AffordabilitySearch ───────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RelocationConfig {
    /// Vacant dwellings sampled per search.
    pub max_candidates: usize,
    /// Share of annual income a household will spend on monthly rent × 12.
    pub rent_share:     f64,
}

impl Default for RelocationConfig {
    fn default() -> Self {
        Self { max_candidates: 30, rent_share: 0.35 }
    }
}

impl RelocationConfig {
    pub fn validate(&self) -> ModelResult<()> {
        check_non_negative("relocation.rent_share", self.rent_share)
    }
}

/// Sample-and-rank search.
///
/// Samples up to `max_candidates` vacant dwellings and ranks them: enough
/// bedrooms and within budget first, then within budget, then cheapest.  It
/// returns `None` only when no dwelling is vacant.
pub struct AffordabilitySearch {
    config: RelocationConfig,
}

impl AffordabilitySearch {
    pub fn new(config: RelocationConfig) -> Self {
        Self { config }
    }

    /// Bedrooms wanted by a group of `n` persons.
    fn bedrooms_needed(n: usize) -> u8 {
        n.div_ceil(2).clamp(1, u8::MAX as usize) as u8
    }
}

impl Default for AffordabilitySearch {
    fn default() -> Self {
        Self::new(RelocationConfig::default())
    }
}

impl RelocationSearch for AffordabilitySearch {
    fn search_for_new_dwelling(
        &mut self,
        registry: &Registry,
        persons:  &[PersonId],
        rng:      &mut SimRng,
    ) -> Option<DwellingId> {
        let vacant = registry.vacant_dwellings();
        if vacant.is_empty() {
            return None;
        }

        let income: f64 = persons.iter().filter_map(|&p| registry.person(p)).map(|p| p.income).sum();
        let budget = income * self.config.rent_share / 12.0;
        let bedrooms = Self::bedrooms_needed(persons.len());

        let sample = vacant.iter().choose_multiple(rng.inner(), self.config.max_candidates.max(1));
        sample
            .into_iter()
            .filter_map(|d| registry.dwelling(d))
            .min_by(|a, b| {
                let rank = |d: &Dwelling| {
                    let affordable = d.price <= budget;
                    match (affordable, d.bedrooms >= bedrooms) {
                        (true, true) => 0u8,
                        (true, false) => 1,
                        _ => 2,
                    }
                };
                rank(a).cmp(&rank(b)).then(a.price.total_cmp(&b.price)).then(a.id.cmp(&b.id))
            })
            .map(|d| d.id)
    }
}
