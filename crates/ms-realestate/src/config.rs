//! Calibrated parameters of the real-estate models.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use ms_core::{DwellingType, ZoneId};
use ms_model::{ModelError, ModelResult, check_non_negative, check_probability};

/// The `real_estate` section of the scenario file.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RealEstateConfig {
    pub construction: ConstructionConfig,
    pub demolition:   DemolitionConfig,
    pub renovation:   RenovationConfig,
    pub pricing:      PricingConfig,
    pub land:         LandConfig,
}

impl RealEstateConfig {
    /// `max_quality` is the registry's quality ceiling; the demolition table
    /// must have one row per level.
    pub fn validate(&self, max_quality: u8) -> ModelResult<()> {
        self.construction.validate()?;
        self.demolition.validate(max_quality)?;
        self.renovation.validate()?;
        self.pricing.validate()?;
        self.land.validate()
    }
}

// ── Construction ──────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConstructionConfig {
    /// Steepness of the vacancy response: `exp(-shape × vacancy)`.
    pub demand_shape:           f64,
    /// New units per existing unit at zero vacancy.
    pub size_adjustment:        f64,
    /// Site-utility weight of the zone price relative to the type average.
    pub price_coefficient:      f64,
    pub access_coefficient:     f64,
    /// Share of new units built as price-restricted.
    pub affordable_share:       f64,
    /// Restriction level of an affordable unit, as a share of median income.
    pub affordable_restriction: f64,
    /// Share of monthly income spent on rent when pricing affordable units.
    pub rent_share:             f64,
    /// Bedrooms of a new unit, per dwelling type.
    pub bedrooms:               BTreeMap<DwellingType, u8>,
}

impl Default for ConstructionConfig {
    fn default() -> Self {
        use DwellingType::*;
        Self {
            demand_shape:           20.0,
            size_adjustment:        0.02,
            price_coefficient:      1.0,
            access_coefficient:     0.5,
            affordable_share:       0.1,
            affordable_restriction: 0.6,
            rent_share:             0.3,
            bedrooms:               BTreeMap::from([
                (SingleFamilyDetached, 3),
                (SingleFamilyAttached, 3),
                (MultiFamilySmall, 2),
                (MultiFamilyLarge, 2),
                (MobileHome, 2),
            ]),
        }
    }
}

impl ConstructionConfig {
    fn validate(&self) -> ModelResult<()> {
        check_non_negative("construction.demand_shape", self.demand_shape)?;
        check_non_negative("construction.size_adjustment", self.size_adjustment)?;
        if !self.price_coefficient.is_finite() || !self.access_coefficient.is_finite() {
            return Err(ModelError::Config("construction site coefficients must be finite".into()));
        }
        check_probability("construction.affordable_share", self.affordable_share)?;
        check_probability("construction.affordable_restriction", self.affordable_restriction)?;
        check_non_negative("construction.rent_share", self.rent_share)
    }

    /// Bedrooms of a new unit of `kind`; two when not listed.
    pub fn bedrooms_for(&self, kind: DwellingType) -> u8 {
        self.bedrooms.get(&kind).copied().unwrap_or(2)
    }
}

// ── Demolition ────────────────────────────────────────────────────────────────

/// Yearly demolition probability by quality and occupancy.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DemolitionConfig {
    /// `probability[q - 1] = [occupied, vacant]`.
    pub probability: Vec<[f64; 2]>,
}

impl Default for DemolitionConfig {
    fn default() -> Self {
        Self { probability: vec![[0.02, 0.08], [0.005, 0.02], [0.002, 0.005], [0.001, 0.002]] }
    }
}

impl DemolitionConfig {
    fn validate(&self, max_quality: u8) -> ModelResult<()> {
        if self.probability.len() != max_quality as usize {
            return Err(ModelError::Config(format!(
                "demolition.probability has {} rows, expected one per quality level ({max_quality})",
                self.probability.len()
            )));
        }
        for &[occupied, vacant] in &self.probability {
            check_probability("demolition.probability", occupied)?;
            check_probability("demolition.probability", vacant)?;
        }
        Ok(())
    }
}

// ── Renovation ────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenovationConfig {
    /// Base probabilities of a quality change of −2, −1, 0, +1, +2.
    pub probability:   [f64; 5],
    /// Bounds on the `initial share / current share` mean-reversion ratio.
    pub min_ratio:     f64,
    pub max_ratio:     f64,
}

impl Default for RenovationConfig {
    fn default() -> Self {
        Self { probability: [0.01, 0.05, 0.88, 0.05, 0.01], min_ratio: 0.1, max_ratio: 10.0 }
    }
}

impl RenovationConfig {
    fn validate(&self) -> ModelResult<()> {
        for p in self.probability {
            check_probability("renovation.probability", p)?;
        }
        if self.probability.iter().sum::<f64>() <= 0.0 {
            return Err(ModelError::Config("renovation.probability must not be all zero".into()));
        }
        if !(self.min_ratio > 0.0 && self.min_ratio <= self.max_ratio && self.max_ratio.is_finite()) {
            return Err(ModelError::Config(format!(
                "renovation ratio bounds [{}, {}] must satisfy 0 < min <= max",
                self.min_ratio, self.max_ratio
            )));
        }
        Ok(())
    }
}

// ── Pricing ───────────────────────────────────────────────────────────────────

/// Piecewise-linear price response to the vacancy rate.
///
/// Below `low_inflection` the rate follows `slope_low`, above
/// `high_inflection` it follows `slope_high`, and in between `slope_main`
/// around `structural_vacancy`.  The segments join continuously.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PricingConfig {
    pub structural_vacancy: f64,
    pub low_inflection:     f64,
    pub high_inflection:    f64,
    pub slope_low:          f64,
    pub slope_main:         f64,
    pub slope_high:         f64,
    /// Largest yearly relative change either way.
    pub max_delta:          f64,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            structural_vacancy: 0.05,
            low_inflection:     0.01,
            high_inflection:    0.10,
            slope_low:          -3.0,
            slope_main:         -1.0,
            slope_high:         -0.5,
            max_delta:          0.05,
        }
    }
}

impl PricingConfig {
    fn validate(&self) -> ModelResult<()> {
        let ordered = self.low_inflection <= self.structural_vacancy
            && self.structural_vacancy <= self.high_inflection;
        if !ordered {
            return Err(ModelError::Config(format!(
                "pricing inflections must satisfy low <= structural <= high, got {} / {} / {}",
                self.low_inflection, self.structural_vacancy, self.high_inflection
            )));
        }
        if ![self.slope_low, self.slope_main, self.slope_high].iter().all(|s| s.is_finite()) {
            return Err(ModelError::Config("pricing slopes must be finite".into()));
        }
        if !(0.0..1.0).contains(&self.max_delta) {
            return Err(ModelError::Config(format!(
                "pricing.max_delta = {} must lie in [0, 1)",
                self.max_delta
            )));
        }
        Ok(())
    }

    /// Relative price change at vacancy rate `v`, clamped to `±max_delta`.
    pub fn change_rate(&self, v: f64) -> f64 {
        let at = |x: f64| self.slope_main * (x - self.structural_vacancy);
        let rate = if v < self.low_inflection {
            self.slope_low * (v - self.low_inflection) + at(self.low_inflection)
        } else if v > self.high_inflection {
            self.slope_high * (v - self.high_inflection) + at(self.high_inflection)
        } else {
            at(v)
        };
        rate.clamp(-self.max_delta, self.max_delta)
    }
}

// ── Land ──────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LandConfig {
    pub acres_per_unit: BTreeMap<DwellingType, f64>,
    /// Dwelling types zoning forbids, per zone.
    pub prohibited:     BTreeMap<ZoneId, Vec<DwellingType>>,
}

impl Default for LandConfig {
    fn default() -> Self {
        use DwellingType::*;
        Self {
            acres_per_unit: BTreeMap::from([
                (SingleFamilyDetached, 0.25),
                (SingleFamilyAttached, 0.12),
                (MultiFamilySmall, 0.06),
                (MultiFamilyLarge, 0.02),
                (MobileHome, 0.15),
            ]),
            prohibited:     BTreeMap::new(),
        }
    }
}

impl LandConfig {
    fn validate(&self) -> ModelResult<()> {
        for kind in DwellingType::ALL {
            match self.acres_per_unit.get(&kind) {
                Some(&acres) => check_non_negative("land.acres_per_unit", acres)?,
                None => {
                    return Err(ModelError::Config(format!("land.acres_per_unit is missing {kind}")));
                }
            }
        }
        Ok(())
    }
}
