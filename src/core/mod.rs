//! Core traits, common value types, and library-wide error structures.

pub mod types;

pub use types::{Accumulator, Estimate, OptionType};

use crate::math::RngStream;

/// A randomized experiment: one generator plus one reducer.
///
/// The engine draws `n` outcomes through [`Experiment::generate`], maps each
/// through [`Experiment::reduce`], and multiplies the mean by
/// [`Experiment::scale`].
pub trait Experiment: Send + Sync {
    /// Raw value produced by one trial.
    type Outcome;

    /// Short identifier used in logs and reports.
    fn name(&self) -> &str;

    /// Checks parameters before any trial is drawn.
    fn validate(&self) -> Result<(), SimulationError> {
        Ok(())
    }

    /// Draws one independent outcome from `rng`.
    fn generate(&self, rng: &mut RngStream) -> Result<Self::Outcome, SimulationError>;

    /// Maps an outcome to its contribution to the estimator.
    fn reduce(&self, outcome: &Self::Outcome) -> f64;

    /// Factor applied to the sample mean (4 for pi, `b - a` for integrals,
    /// the discount factor for option payoffs).
    fn scale(&self) -> f64 {
        1.0
    }

    /// Closed-form value of the estimated quantity, when one is known.
    fn reference(&self) -> Option<f64> {
        None
    }
}

/// Errors surfaced by experiments and the engine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SimulationError {
    /// Trial counts or model parameters outside their valid domain.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// Undefined arithmetic (zero reference, non-finite values).
    #[error("numerical error: {0}")]
    NumericalError(String),
    /// A rejection or stopping loop exceeded its iteration cap.
    #[error("{what} did not terminate after {attempts} attempts")]
    Stalled { what: &'static str, attempts: usize },
}

impl SimulationError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}

/// Rejects zero trial counts.
pub(crate) fn ensure_trials(n_trials: usize) -> Result<(), SimulationError> {
    if n_trials == 0 {
        return Err(SimulationError::invalid("n_trials must be > 0"));
    }
    Ok(())
}

/// Rejects non-finite or non-positive parameters.
pub(crate) fn ensure_positive(name: &str, value: f64) -> Result<(), SimulationError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(SimulationError::invalid(format!(
            "{name} must be finite and > 0, got {value}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stalled_error_message_names_the_loop() {
        let err = SimulationError::Stalled {
            what: "monty hall host reveal",
            attempts: 10,
        };
        assert_eq!(
            err.to_string(),
            "monty hall host reveal did not terminate after 10 attempts"
        );
    }

    #[test]
    fn parameter_guards() {
        assert!(ensure_trials(0).is_err());
        assert!(ensure_trials(1).is_ok());
        assert!(ensure_positive("sigma", 0.0).is_err());
        assert!(ensure_positive("sigma", f64::NAN).is_err());
        assert!(ensure_positive("sigma", 0.2).is_ok());
    }
}
