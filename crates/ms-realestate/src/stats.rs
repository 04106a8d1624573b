//! Market statistics over the dwelling stock.
//!
//! A [`MarketStats`] is a snapshot: collect it, read it, throw it away.
//! Models that mutate the stock recollect rather than patch.

use std::collections::BTreeMap;

use ms_core::{DwellingType, RegionId, ZoneId};
use ms_registry::{Geography, Registry};

/// Units, vacancies and price total of one market segment.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Segment {
    pub units:     usize,
    pub vacant:    usize,
    pub price_sum: f64,
}

impl Segment {
    fn add(&mut self, vacant: bool, price: f64) {
        self.units += 1;
        self.vacant += usize::from(vacant);
        self.price_sum += price;
    }

    /// Vacant share; `0.0` for an empty segment.
    pub fn vacancy_rate(&self) -> f64 {
        if self.units == 0 { 0.0 } else { self.vacant as f64 / self.units as f64 }
    }

    pub fn average_price(&self) -> Option<f64> {
        (self.units > 0).then(|| self.price_sum / self.units as f64)
    }
}

#[derive(Clone, Debug, Default)]
pub struct MarketStats {
    by_type_region: BTreeMap<(DwellingType, RegionId), Segment>,
    by_type_zone:   BTreeMap<(DwellingType, ZoneId), Segment>,
    by_type:        [Segment; DwellingType::COUNT],
    /// Units per quality level; index 0 is quality 1.
    quality_counts: Vec<usize>,
}

impl MarketStats {
    pub fn collect(registry: &Registry, geography: &Geography) -> Self {
        let mut stats = Self {
            quality_counts: vec![0; registry.max_quality() as usize],
            ..Self::default()
        };
        for d in registry.dwellings() {
            let vacant = d.is_vacant();
            stats.by_type[d.kind.index()].add(vacant, d.price);
            stats.by_type_zone.entry((d.kind, d.zone)).or_default().add(vacant, d.price);
            if let Some(region) = geography.region_of(d.zone) {
                stats.by_type_region.entry((d.kind, region)).or_default().add(vacant, d.price);
            }
            if let Some(n) = stats.quality_counts.get_mut(d.quality as usize - 1) {
                *n += 1;
            }
        }
        stats
    }

    pub fn type_region(&self, kind: DwellingType, region: RegionId) -> Segment {
        self.by_type_region.get(&(kind, region)).copied().unwrap_or_default()
    }

    pub fn type_zone(&self, kind: DwellingType, zone: ZoneId) -> Segment {
        self.by_type_zone.get(&(kind, zone)).copied().unwrap_or_default()
    }

    #[inline]
    pub fn by_type(&self, kind: DwellingType) -> Segment {
        self.by_type[kind.index()]
    }

    pub fn total_units(&self) -> usize {
        self.by_type.iter().map(|s| s.units).sum()
    }

    pub fn total_vacant(&self) -> usize {
        self.by_type.iter().map(|s| s.vacant).sum()
    }

    pub fn quality_counts(&self) -> &[usize] {
        &self.quality_counts
    }

    /// Share of the stock at each quality level.
    pub fn quality_shares(&self) -> Vec<f64> {
        let total: usize = self.quality_counts.iter().sum();
        self.quality_counts
            .iter()
            .map(|&n| if total == 0 { 0.0 } else { n as f64 / total as f64 })
            .collect()
    }
}

/// Median of household incomes; `0.0` with no households.
pub fn median_household_income(registry: &Registry) -> f64 {
    let mut incomes: Vec<f64> = registry.households().map(|hh| registry.household_income(hh.id)).collect();
    if incomes.is_empty() {
        return 0.0;
    }
    incomes.sort_by(f64::total_cmp);
    let mid = incomes.len() / 2;
    if incomes.len() % 2 == 0 { (incomes[mid - 1] + incomes[mid]) / 2.0 } else { incomes[mid] }
}
