//! `ScenarioConfig` — every calibrated parameter of one run.

use std::path::Path;

use serde::{Deserialize, Serialize};

use ms_core::SimConfig;
use ms_demography::DemographyConfig;
use ms_model::{GateRules, RelocationConfig};
use ms_realestate::RealEstateConfig;
use ms_registry::RegistryConfig;

use crate::{SimError, SimResult};

/// The scenario file.  Every section is optional and falls back to its
/// default calibration; unknown keys are rejected.
///
/// ```json
/// {
///   "sim":        { "start_year": 2020, "end_year": 2030, "seed": 7 },
///   "demography": { "divorce": { "probability": { "kind": "constant", "probability": 0.03 } } },
///   "real_estate": { "pricing": { "max_delta": 0.04 } }
/// }
/// ```
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScenarioConfig {
    pub sim:         SimConfig,
    pub gate:        GateRules,
    pub registry:    RegistryConfig,
    pub demography:  DemographyConfig,
    pub real_estate: RealEstateConfig,
    pub relocation:  RelocationConfig,
}

impl ScenarioConfig {
    pub fn from_json_str(json: &str) -> SimResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_path(path: impl AsRef<Path>) -> SimResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|source| SimError::Read { path: path.to_path_buf(), source })?;
        Self::from_json_str(&text)
    }

    /// Check every section.  Model constructors repeat the table checks they
    /// depend on, so a config that passes here always builds.
    pub fn validate(&self) -> SimResult<()> {
        let sim = &self.sim;
        if sim.end_year < sim.start_year {
            return Err(SimError::Config(format!(
                "end_year {} is before start_year {}",
                sim.end_year, sim.start_year
            )));
        }
        if sim.period_years == 0 {
            return Err(SimError::Config("period_years must be at least 1".into()));
        }
        if self.registry.max_quality == 0 {
            return Err(SimError::Config("registry.max_quality must be at least 1".into()));
        }
        self.gate.validate()?;
        self.demography.validate()?;
        self.real_estate.validate(self.registry.max_quality)?;
        self.relocation.validate()?;
        Ok(())
    }
}
