//! Agent types and per-type probability tables.
//!
//! An agent type is a five-year age band crossed with gender.  Every
//! demographic model turns its calibrated [`UtilitySpec`] into a
//! [`ProbabilityTable`] once at setup; per-agent draws then index the table.

use serde::{Deserialize, Serialize};

use ms_core::Gender;
use ms_model::{ModelError, ModelResult, check_probability};

/// Width of one age band in years.
pub const AGE_BAND_YEARS: u32 = 5;

/// `0–4, 5–9, …, 95–99, 100+`.
pub const AGE_BANDS: usize = 21;

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct AgentType {
    pub band:   u8,
    pub gender: Gender,
}

impl AgentType {
    pub const COUNT: usize = AGE_BANDS * 2;

    #[inline]
    pub fn of(age: u32, gender: Gender) -> Self {
        let band = (age / AGE_BAND_YEARS).min(AGE_BANDS as u32 - 1) as u8;
        Self { band, gender }
    }

    #[inline]
    pub fn index(self) -> usize {
        self.gender.index() * AGE_BANDS + self.band as usize
    }

    /// Representative age of the band, used to evaluate logit specs.
    #[inline]
    pub fn mid_age(self) -> f64 {
        (self.band as u32 * AGE_BAND_YEARS) as f64 + AGE_BAND_YEARS as f64 / 2.0
    }

    pub fn all() -> impl Iterator<Item = AgentType> {
        [Gender::Male, Gender::Female]
            .into_iter()
            .flat_map(|gender| (0..AGE_BANDS as u8).map(move |band| AgentType { band, gender }))
    }
}

// ── GenderTable ───────────────────────────────────────────────────────────────

/// One value per age band for each gender.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GenderTable {
    pub male:   Vec<f64>,
    pub female: Vec<f64>,
}

impl GenderTable {
    /// Build by evaluating `f(mid_age, gender)` for every band.
    pub fn from_fn(f: impl Fn(f64, Gender) -> f64) -> Self {
        let column = |g| {
            (0..AGE_BANDS as u8).map(|band| f(AgentType { band, gender: g }.mid_age(), g)).collect()
        };
        Self { male: column(Gender::Male), female: column(Gender::Female) }
    }

    pub fn validate(&self, what: &str) -> ModelResult<()> {
        for (name, column) in [("male", &self.male), ("female", &self.female)] {
            if column.len() != AGE_BANDS {
                return Err(ModelError::Config(format!(
                    "{what}.{name} has {} entries, expected {AGE_BANDS}",
                    column.len()
                )));
            }
        }
        Ok(())
    }

    /// Value for `t`.  Call [`validate`](Self::validate) first.
    pub fn get(&self, t: AgentType) -> f64 {
        let column = match t.gender {
            Gender::Male => &self.male,
            Gender::Female => &self.female,
        };
        column.get(t.band as usize).copied().unwrap_or(0.0)
    }
}

// ── UtilitySpec ───────────────────────────────────────────────────────────────

/// Calibrated specification of a per-type yearly probability.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum UtilitySpec {
    /// The same probability for every type.
    Constant { probability: f64 },
    /// Probabilities listed per age band and gender.
    Table(GenderTable),
    /// `p = 1 / (1 + exp(-u))` with
    /// `u = intercept + age·a + age_squared·a² + female·[gender is female]`.
    Logit {
        intercept:   f64,
        #[serde(default)]
        age:         f64,
        #[serde(default)]
        age_squared: f64,
        #[serde(default)]
        female:      f64,
    },
}

// ── ProbabilityTable ──────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct ProbabilityTable {
    values: [f64; AgentType::COUNT],
}

impl ProbabilityTable {
    pub fn constant(p: f64) -> Self {
        Self { values: [p.clamp(0.0, 1.0); AgentType::COUNT] }
    }

    /// Evaluate `spec` for every agent type.  Fails on a malformed table or
    /// on any value outside `[0, 1]`.
    pub fn from_spec(what: &str, spec: &UtilitySpec) -> ModelResult<Self> {
        let mut values = [0.0; AgentType::COUNT];
        match spec {
            UtilitySpec::Constant { probability } => {
                check_probability(what, *probability)?;
                values.fill(*probability);
            }
            UtilitySpec::Table(table) => {
                table.validate(what)?;
                for t in AgentType::all() {
                    let p = table.get(t);
                    check_probability(what, p)?;
                    values[t.index()] = p;
                }
            }
            UtilitySpec::Logit { intercept, age, age_squared, female } => {
                for t in AgentType::all() {
                    let a = t.mid_age();
                    let is_female = if t.gender == Gender::Female { 1.0 } else { 0.0 };
                    let u = intercept + age * a + age_squared * a * a + female * is_female;
                    let p = 1.0 / (1.0 + (-u).exp());
                    if !p.is_finite() {
                        return Err(ModelError::Config(format!("{what}: logit is not finite")));
                    }
                    values[t.index()] = p;
                }
            }
        }
        Ok(Self { values })
    }

    #[inline]
    pub fn get(&self, age: u32, gender: Gender) -> f64 {
        self.values[AgentType::of(age, gender).index()]
    }
}
