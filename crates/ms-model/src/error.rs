use ms_core::MsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    /// A registry link was broken; the run cannot continue.
    #[error(transparent)]
    Registry(#[from] MsError),

    #[error("model configuration error: {0}")]
    Config(String),
}

pub type ModelResult<T> = Result<T, ModelError>;

/// Reject a probability outside `[0, 1]` (or NaN).
pub fn check_probability(what: &str, p: f64) -> ModelResult<()> {
    if (0.0..=1.0).contains(&p) {
        Ok(())
    } else {
        Err(ModelError::Config(format!("{what} = {p} is not a probability")))
    }
}

/// Reject a negative or non-finite parameter.
pub fn check_non_negative(what: &str, v: f64) -> ModelResult<()> {
    if v.is_finite() && v >= 0.0 {
        Ok(())
    } else {
        Err(ModelError::Config(format!("{what} = {v} must be finite and non-negative")))
    }
}
