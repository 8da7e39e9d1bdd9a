//! Euler's number as the expected count of uniform draws whose running sum exceeds 1.
use std::f64::consts::E;

use serde::{Deserialize, Serialize};

use crate::core::{Experiment, SimulationError};
use crate::math::RngStream;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EulerConfig {
    pub trials: usize,
    pub max_draws: usize,
}

impl Default for EulerConfig {
    fn default() -> Self {
        Self {
            trials: 1_000_000,
            max_draws: UniformSumStopping::DEFAULT_MAX_DRAWS,
        }
    }
}

impl EulerConfig {
    pub fn experiment(&self) -> UniformSumStopping {
        UniformSumStopping {
            max_draws: self.max_draws,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UniformSumStopping {
    /// P(count > n) = 1/n!, so this cap is never reached by a sound generator.
    pub max_draws: usize,
}

impl Default for UniformSumStopping {
    fn default() -> Self {
        Self {
            max_draws: Self::DEFAULT_MAX_DRAWS,
        }
    }
}

impl UniformSumStopping {
    pub const DEFAULT_MAX_DRAWS: usize = 1_000;
}

impl Experiment for UniformSumStopping {
    type Outcome = usize;

    fn name(&self) -> &str {
        "euler"
    }

    fn validate(&self) -> Result<(), SimulationError> {
        if self.max_draws < 2 {
            return Err(SimulationError::invalid("max_draws must be >= 2"));
        }
        Ok(())
    }

    fn generate(&self, rng: &mut RngStream) -> Result<usize, SimulationError> {
        let mut sum = 0.0_f64;
        for draws in 1..=self.max_draws {
            sum += rng.random_f64();
            if sum > 1.0 {
                return Ok(draws);
            }
        }
        Err(SimulationError::Stalled {
            what: "uniform-sum stopping count",
            attempts: self.max_draws,
        })
    }

    fn reduce(&self, draws: &usize) -> f64 {
        *draws as f64
    }

    fn reference(&self) -> Option<f64> {
        Some(E)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mc::MonteCarloEngine;

    #[test]
    fn stopping_count_is_at_least_two() {
        let experiment = UniformSumStopping::default();
        let mut rng = MonteCarloEngine::new(5).stream(0);
        for _ in 0..10_000 {
            assert!(experiment.generate(&mut rng).unwrap() >= 2);
        }
    }

    #[test]
    fn estimate_converges_to_e() {
        let est = MonteCarloEngine::new(2024)
            .run(&UniformSumStopping::default(), 400_000)
            .unwrap();
        assert!((est.value - E).abs() < 0.01, "e estimate {}", est.value);
    }

    #[test]
    fn tiny_cap_stalls() {
        // Two draws exceed 1 only half the time.
        let experiment = UniformSumStopping { max_draws: 2 };
        let err = MonteCarloEngine::new(5).run(&experiment, 1_000).unwrap_err();
        assert!(matches!(err, SimulationError::Stalled { attempts: 2, .. }));
    }
}
