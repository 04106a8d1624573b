//! Developable land per zone.

use std::collections::{BTreeMap, BTreeSet};

use ms_core::{DwellingType, ZoneId};
use ms_registry::Geography;

use crate::LandConfig;

/// Remaining developable acres per zone, consumed by construction.
#[derive(Clone, Debug, Default)]
pub struct LandLedger {
    available:      BTreeMap<ZoneId, f64>,
    acres_per_unit: [f64; DwellingType::COUNT],
    prohibited:     BTreeSet<(ZoneId, DwellingType)>,
}

impl LandLedger {
    /// Start from each zone's base-year developable acres.
    pub fn new(config: &LandConfig, geography: &Geography) -> Self {
        let mut acres_per_unit = [0.0; DwellingType::COUNT];
        for kind in DwellingType::ALL {
            acres_per_unit[kind.index()] = config.acres_per_unit.get(&kind).copied().unwrap_or(0.0);
        }
        let prohibited = config
            .prohibited
            .iter()
            .flat_map(|(&zone, kinds)| kinds.iter().map(move |&k| (zone, k)))
            .collect();
        Self {
            available: geography.zones().map(|z| (z.id, z.developable_acres.max(0.0))).collect(),
            acres_per_unit,
            prohibited,
        }
    }

    pub fn available(&self, zone: ZoneId) -> f64 {
        self.available.get(&zone).copied().unwrap_or(0.0)
    }

    #[inline]
    pub fn acres_per_unit(&self, kind: DwellingType) -> f64 {
        self.acres_per_unit[kind.index()]
    }

    pub fn is_prohibited(&self, zone: ZoneId, kind: DwellingType) -> bool {
        self.prohibited.contains(&(zone, kind))
    }

    /// Zoning allows `kind` in `zone` and one more unit fits.
    pub fn can_build(&self, zone: ZoneId, kind: DwellingType) -> bool {
        !self.is_prohibited(zone, kind) && self.available(zone) >= self.acres_per_unit(kind)
    }

    /// Take the land for one unit.  Returns `false` (and takes nothing) if it
    /// does not fit.
    pub fn consume(&mut self, zone: ZoneId, kind: DwellingType) -> bool {
        if !self.can_build(zone, kind) {
            return false;
        }
        let need = self.acres_per_unit(kind);
        if let Some(acres) = self.available.get_mut(&zone) {
            *acres -= need;
        }
        true
    }

    pub fn total_available(&self) -> f64 {
        self.available.values().sum()
    }
}
