//! European option priced by simulating GBM paths under the risk-neutral drift.
//!
//! Each trial is one full path `S_0..S_M`; the reducer takes the undiscounted
//! payoff at `S_M` and the discount factor is applied once to the mean.
use serde::{Deserialize, Serialize};

use crate::core::{Experiment, OptionType, SimulationError};
use crate::math::RngStream;
use crate::models::{Gbm, GbmPathGenerator};
use crate::pricing::european::{BlackScholesParams, DEFAULT_LOWER_BOUND, closed_form_price};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptionConfig {
    /// Simulated paths for the path estimator.
    pub trials: usize,
    /// Points per integral for the integrated estimator.
    pub integration_points: usize,
    pub lower_bound: f64,
    pub option_type: OptionType,
    pub spot: f64,
    pub strike: f64,
    pub maturity: f64,
    pub rate: f64,
    pub sigma: f64,
    pub steps: usize,
}

impl Default for OptionConfig {
    fn default() -> Self {
        let params = BlackScholesParams::default();
        Self {
            trials: 250_000,
            integration_points: 250_000,
            lower_bound: DEFAULT_LOWER_BOUND,
            option_type: OptionType::Call,
            spot: params.spot,
            strike: params.strike,
            maturity: params.maturity,
            rate: params.rate,
            sigma: params.sigma,
            steps: 50,
        }
    }
}

impl OptionConfig {
    pub fn params(&self) -> BlackScholesParams {
        BlackScholesParams {
            spot: self.spot,
            strike: self.strike,
            maturity: self.maturity,
            rate: self.rate,
            sigma: self.sigma,
        }
    }

    pub fn experiment(&self) -> EuropeanOptionMc {
        EuropeanOptionMc::new(&self.params(), self.steps, self.option_type)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EuropeanOptionMc {
    pub params: BlackScholesParams,
    pub option_type: OptionType,
    pub generator: GbmPathGenerator,
}

impl EuropeanOptionMc {
    pub fn new(params: &BlackScholesParams, steps: usize, option_type: OptionType) -> Self {
        Self {
            params: *params,
            option_type,
            generator: GbmPathGenerator {
                model: Gbm {
                    mu: params.rate,
                    sigma: params.sigma,
                },
                s0: params.spot,
                maturity: params.maturity,
                steps,
            },
        }
    }

    /// Undiscounted payoff at the end of the path.
    #[inline]
    pub fn inner_value(&self, path: &[f64]) -> f64 {
        self.option_type.payoff(path[path.len() - 1], self.params.strike)
    }
}

impl Experiment for EuropeanOptionMc {
    type Outcome = Vec<f64>;

    fn name(&self) -> &str {
        "option"
    }

    fn validate(&self) -> Result<(), SimulationError> {
        self.params.validate()?;
        self.generator.validate()
    }

    fn generate(&self, rng: &mut RngStream) -> Result<Vec<f64>, SimulationError> {
        Ok(self.generator.simulate(rng))
    }

    fn reduce(&self, path: &Vec<f64>) -> f64 {
        self.inner_value(path)
    }

    fn scale(&self) -> f64 {
        self.params.discount_factor()
    }

    fn reference(&self) -> Option<f64> {
        Some(closed_form_price(&self.params, self.option_type))
    }
}

/// Last value of every path.
pub fn terminal_values(paths: &[Vec<f64>]) -> Vec<f64> {
    paths
        .iter()
        .filter_map(|path| path.last().copied())
        .collect()
}

/// Undiscounted payoff of every path.
pub fn inner_values(paths: &[Vec<f64>], strike: f64, option_type: OptionType) -> Vec<f64> {
    terminal_values(paths)
        .into_iter()
        .map(|s| option_type.payoff(s, strike))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mc::MonteCarloEngine;
    use approx::assert_relative_eq;

    #[test]
    fn path_estimate_converges_to_closed_form() {
        let experiment = OptionConfig::default().experiment();
        let est = MonteCarloEngine::new(20_000).run(&experiment, 100_000).unwrap();
        let reference = experiment.reference().unwrap();
        assert!(
            (est.value - reference).abs() < 4.0 * est.std_error,
            "est={} ref={reference} se={}",
            est.value,
            est.std_error
        );
    }

    #[test]
    fn zero_volatility_price_is_exact() {
        let config = OptionConfig {
            sigma: 0.0,
            strike: 95.0,
            ..OptionConfig::default()
        };
        let experiment = config.experiment();
        let est = MonteCarloEngine::new(3).run(&experiment, 100).unwrap();
        let expected = 100.0 - 95.0 * (-0.05_f64).exp();
        assert_relative_eq!(est.value, expected, max_relative = 1e-10);
        assert!(est.std_error < 1e-6);
    }

    #[test]
    fn put_estimate_is_close_to_closed_form() {
        let config = OptionConfig {
            option_type: OptionType::Put,
            ..OptionConfig::default()
        };
        let experiment = config.experiment();
        let est = MonteCarloEngine::new(4).run(&experiment, 100_000).unwrap();
        let reference = experiment.reference().unwrap();
        assert!((est.value - reference).abs() < 4.0 * est.std_error);
    }

    #[test]
    fn sampled_paths_feed_histogram_arrays() {
        let config = OptionConfig::default();
        let experiment = config.experiment();
        let paths = MonteCarloEngine::new(5).sample(&experiment, 200).unwrap();
        assert_eq!(paths.len(), 200);
        assert!(paths.iter().all(|p| p.len() == config.steps + 1 && p[0] == config.spot));

        let terminal = terminal_values(&paths);
        let inner = inner_values(&paths, config.strike, config.option_type);
        assert_eq!(terminal.len(), 200);
        for (s, v) in terminal.iter().zip(&inner) {
            assert_eq!(*v, (s - config.strike).max(0.0));
        }
    }

    #[test]
    fn invalid_market_inputs_are_rejected() {
        let engine = MonteCarloEngine::new(1);
        for config in [
            OptionConfig { sigma: -0.2, ..OptionConfig::default() },
            OptionConfig { maturity: 0.0, ..OptionConfig::default() },
            OptionConfig { steps: 0, ..OptionConfig::default() },
            OptionConfig { strike: 0.0, ..OptionConfig::default() },
        ] {
            let err = engine.run(&config.experiment(), 10).unwrap_err();
            assert!(matches!(err, SimulationError::InvalidInput(_)), "{config:?}");
        }
    }
}
