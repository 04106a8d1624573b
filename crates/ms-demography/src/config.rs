//! Calibrated parameters of the demographic models.
//!
//! Defaults carry a plausible calibration so a scenario file only needs to
//! override what it actually calibrates.

use serde::{Deserialize, Serialize};

use ms_core::Gender;
use ms_model::{ModelError, ModelResult, check_non_negative, check_probability};

use crate::{GenderTable, UtilitySpec};

/// The `demography` section of the scenario file.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DemographyConfig {
    pub birth:         BirthConfig,
    pub death:         DeathConfig,
    pub marriage:      MarriageConfig,
    pub divorce:       DivorceConfig,
    pub leave_parents: LeaveParentsConfig,
    pub employment:    EmploymentConfig,
    pub income:        IncomeConfig,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BirthConfig {
    pub probability:      UtilitySpec,
    /// Multiplier on the type probability for married women.
    pub married_scaler:   f64,
    /// Multiplier on the type probability for unmarried women.
    pub single_scaler:    f64,
    pub probability_girl: f64,
}

impl Default for BirthConfig {
    fn default() -> Self {
        // Age-specific fertility, 15–19 through 45–49.
        let fertility = |age: f64, g: Gender| {
            if g == Gender::Male {
                return 0.0;
            }
            match age as u32 {
                15..=19 => 0.02,
                20..=24 => 0.08,
                25..=29 => 0.11,
                30..=34 => 0.10,
                35..=39 => 0.05,
                40..=44 => 0.01,
                45..=49 => 0.002,
                _ => 0.0,
            }
        };
        Self {
            probability:      UtilitySpec::Table(GenderTable::from_fn(fertility)),
            married_scaler:   1.4,
            single_scaler:    0.4,
            probability_girl: 0.488,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DeathConfig {
    pub probability: UtilitySpec,
}

impl Default for DeathConfig {
    fn default() -> Self {
        Self {
            probability: UtilitySpec::Logit { intercept: -9.5, age: 0.085, age_squared: 0.0, female: -0.3 },
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MarriageConfig {
    /// Yearly probability that a market member proposes.
    pub probability:           UtilitySpec,
    /// Share of eligible singles sampled into the market each year.
    pub market_share:          f64,
    /// Sampling multiplier for persons living alone.
    pub single_household_bias: f64,
    pub inter_racial_share:    f64,
    /// Weight of a candidate matching the drawn race outcome, relative to
    /// one who does not.
    pub race_preference:       f64,
    /// Mean of (husband age − wife age).
    pub mean_age_difference:   f64,
    /// Spread of the Gaussian age-difference weight.
    pub age_difference_sd:     f64,
    /// Partners further than this from the mean difference get zero weight.
    pub max_age_difference:    u32,
    /// A merged household larger than this spawns a new household instead.
    pub max_household_size:    usize,
}

impl Default for MarriageConfig {
    fn default() -> Self {
        Self {
            probability:           UtilitySpec::Logit {
                intercept:   -1.0,
                age:         -0.05,
                age_squared: 0.0,
                female:      0.0,
            },
            market_share:          0.1,
            single_household_bias: 1.5,
            inter_racial_share:    0.1,
            race_preference:       1_000.0,
            mean_age_difference:   2.0,
            age_difference_sd:     3.0,
            max_age_difference:    10,
            max_household_size:    6,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DivorceConfig {
    pub probability: UtilitySpec,
}

impl Default for DivorceConfig {
    fn default() -> Self {
        Self { probability: UtilitySpec::Constant { probability: 0.02 } }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LeaveParentsConfig {
    pub probability: UtilitySpec,
}

impl Default for LeaveParentsConfig {
    fn default() -> Self {
        Self {
            probability: UtilitySpec::Logit { intercept: -6.0, age: 0.22, age_squared: 0.0, female: 0.1 },
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EmploymentConfig {
    pub find_job: UtilitySpec,
    pub quit_job: UtilitySpec,
}

impl Default for EmploymentConfig {
    fn default() -> Self {
        Self {
            find_job: UtilitySpec::Constant { probability: 0.35 },
            quit_job: UtilitySpec::Constant { probability: 0.05 },
        }
    }
}

/// Log-normal annual income of a newly employed person.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IncomeConfig {
    /// Median income per age band and gender.
    pub median: GenderTable,
    /// Standard deviation of log income.
    pub sigma:  f64,
}

impl Default for IncomeConfig {
    fn default() -> Self {
        let median = |age: f64, g: Gender| {
            let peak = 15_000.0 + 35_000.0 * (-((age - 48.0) / 18.0).powi(2)).exp();
            if g == Gender::Female { peak * 0.82 } else { peak }
        };
        Self { median: GenderTable::from_fn(median), sigma: 0.6 }
    }
}

impl DemographyConfig {
    /// Check the scalar parameters.  Probability tables are checked when the
    /// models are built from them.
    pub fn validate(&self) -> ModelResult<()> {
        check_non_negative("birth.married_scaler", self.birth.married_scaler)?;
        check_non_negative("birth.single_scaler", self.birth.single_scaler)?;
        check_probability("birth.probability_girl", self.birth.probability_girl)?;

        let m = &self.marriage;
        check_probability("marriage.market_share", m.market_share)?;
        check_non_negative("marriage.single_household_bias", m.single_household_bias)?;
        check_probability("marriage.inter_racial_share", m.inter_racial_share)?;
        if !m.race_preference.is_finite() || m.race_preference < 1.0 {
            return Err(ModelError::Config("marriage.race_preference must be finite and at least 1".into()));
        }
        if !m.mean_age_difference.is_finite() || !(m.age_difference_sd > 0.0) {
            return Err(ModelError::Config(
                "marriage age-difference mean must be finite and its spread positive".into(),
            ));
        }
        if m.max_household_size < 2 {
            return Err(ModelError::Config("marriage.max_household_size must be at least 2".into()));
        }

        self.income.median.validate("income.median")?;
        check_non_negative("income.sigma", self.income.sigma)?;
        Ok(())
    }
}
