//! Income draws for newly employed persons.

use rand::Rng;
use rand_distr::{Distribution, LogNormal};

use ms_core::Gender;
use ms_model::{ModelError, ModelResult};

use crate::{AgentType, IncomeConfig};

/// One log-normal distribution per agent type.
pub struct IncomeDistribution {
    by_type: Vec<LogNormal<f64>>,
}

impl IncomeDistribution {
    pub fn new(config: &IncomeConfig) -> ModelResult<Self> {
        config.median.validate("income.median")?;
        let mut by_type = Vec::with_capacity(AgentType::COUNT);
        for t in AgentType::all() {
            let median = config.median.get(t);
            if !(median > 0.0) {
                return Err(ModelError::Config(format!("income median {median} must be positive")));
            }
            let dist = LogNormal::new(median.ln(), config.sigma)
                .map_err(|e| ModelError::Config(format!("income distribution: {e}")))?;
            by_type.push(dist);
        }
        // `AgentType::all` yields males first, matching `AgentType::index`.
        Ok(Self { by_type })
    }

    pub fn sample<R: Rng + ?Sized>(&self, age: u32, gender: Gender, rng: &mut R) -> f64 {
        self.by_type[AgentType::of(age, gender).index()].sample(rng)
    }
}
