//! Monte Carlo integration of a Gaussian kernel over a finite interval.
use serde::{Deserialize, Serialize};

use crate::core::{Experiment, SimulationError};
use crate::math::{RngStream, gaussian, gaussian_integral, normal_pdf, normal_probability};
use crate::mc::simulation::ensure_bounds;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Integrand {
    /// `exp(−x²)`.
    #[default]
    Gaussian,
    /// Standard normal density `exp(−x²/2)/√(2π)`.
    NormalDensity,
}

impl Integrand {
    #[inline]
    pub fn eval(self, x: f64) -> f64 {
        match self {
            Self::Gaussian => gaussian(x),
            Self::NormalDensity => normal_pdf(x),
        }
    }

    /// Exact integral over `[a, b]`.
    pub fn integral(self, a: f64, b: f64) -> f64 {
        match self {
            Self::Gaussian => gaussian_integral(a, b),
            Self::NormalDensity => normal_probability(a, b),
        }
    }
}

impl std::str::FromStr for Integrand {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "gaussian" => Ok(Self::Gaussian),
            "normal" | "normal_density" => Ok(Self::NormalDensity),
            other => Err(format!("unknown integrand `{other}`")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntegrationConfig {
    pub trials: usize,
    pub lower: f64,
    pub upper: f64,
    pub integrand: Integrand,
}

impl Default for IntegrationConfig {
    fn default() -> Self {
        Self {
            trials: 1_000_000,
            lower: -20.0,
            upper: 20.0,
            integrand: Integrand::Gaussian,
        }
    }
}

impl IntegrationConfig {
    pub fn experiment(&self) -> GaussianIntegral {
        GaussianIntegral {
            lower: self.lower,
            upper: self.upper,
            integrand: self.integrand,
        }
    }
}

/// Samples `x ~ U[lower, upper)`, reduces to `f(x)`, scales the mean by `upper − lower`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaussianIntegral {
    pub lower: f64,
    pub upper: f64,
    pub integrand: Integrand,
}

impl Experiment for GaussianIntegral {
    type Outcome = f64;

    fn name(&self) -> &str {
        "integration"
    }

    fn validate(&self) -> Result<(), SimulationError> {
        ensure_bounds(self.lower, self.upper)
    }

    fn generate(&self, rng: &mut RngStream) -> Result<f64, SimulationError> {
        Ok(rng.uniform(self.lower, self.upper))
    }

    fn reduce(&self, x: &f64) -> f64 {
        self.integrand.eval(*x)
    }

    fn scale(&self) -> f64 {
        self.upper - self.lower
    }

    fn reference(&self) -> Option<f64> {
        Some(self.integrand.integral(self.lower, self.upper))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mc::MonteCarloEngine;
    use approx::assert_relative_eq;

    #[test]
    fn normal_density_over_wide_interval_is_one() {
        let experiment = GaussianIntegral {
            lower: -20.0,
            upper: 20.0,
            integrand: Integrand::NormalDensity,
        };
        let est = MonteCarloEngine::new(11).run(&experiment, 1_000_000).unwrap();
        assert_relative_eq!(est.value, 1.0, epsilon = 0.02);
        assert_relative_eq!(experiment.reference().unwrap(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn gaussian_matches_sqrt_pi() {
        let est = MonteCarloEngine::new(12)
            .run(&IntegrationConfig::default().experiment(), 1_000_000)
            .unwrap();
        assert_relative_eq!(est.value, std::f64::consts::PI.sqrt(), epsilon = 0.035);
    }

    #[test]
    fn reversed_bounds_are_rejected() {
        let experiment = GaussianIntegral {
            lower: 1.0,
            upper: -1.0,
            integrand: Integrand::Gaussian,
        };
        let err = MonteCarloEngine::new(1).run(&experiment, 10).unwrap_err();
        assert!(matches!(err, SimulationError::InvalidInput(_)));
    }
}
