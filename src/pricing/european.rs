//! Module `pricing::european`.
//!
//! European option values under Black-Scholes dynamics, three ways: the closed
//! form (reference only), path simulation (see `experiments::option`), and Monte
//! Carlo integration of the normal density up to d1/d2.
//!
//! Numerical considerations: the integrated form truncates the density at a
//! finite lower bound (default −20) and estimates both integrals on one shared
//! stream; its error is pure sampling noise on top of a negligible truncation.
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{Estimate, OptionType, SimulationError, ensure_positive, ensure_trials};
use crate::experiments::integration::{GaussianIntegral, Integrand};
use crate::math::normal_cdf;
use crate::mc::MonteCarloEngine;

pub const DEFAULT_LOWER_BOUND: f64 = -20.0;

/// Market and contract inputs shared by every European pricer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlackScholesParams {
    pub spot: f64,
    pub strike: f64,
    pub maturity: f64,
    pub rate: f64,
    pub sigma: f64,
}

impl Default for BlackScholesParams {
    fn default() -> Self {
        Self {
            spot: 100.0,
            strike: 105.0,
            maturity: 1.0,
            rate: 0.05,
            sigma: 0.2,
        }
    }
}

impl BlackScholesParams {
    /// Accepts `sigma == 0`; the integrated pricer additionally requires `sigma > 0`.
    pub fn validate(&self) -> Result<(), SimulationError> {
        ensure_positive("spot", self.spot)?;
        ensure_positive("strike", self.strike)?;
        ensure_positive("maturity", self.maturity)?;
        if !self.rate.is_finite() {
            return Err(SimulationError::invalid("rate must be finite"));
        }
        if !self.sigma.is_finite() || self.sigma < 0.0 {
            return Err(SimulationError::invalid(format!(
                "sigma must be finite and >= 0, got {}",
                self.sigma
            )));
        }
        Ok(())
    }

    #[inline]
    pub fn discount_factor(&self) -> f64 {
        (-self.rate * self.maturity).exp()
    }

    /// `(d1, d2)`; requires `sigma > 0`.
    pub fn d1_d2(&self) -> (f64, f64) {
        let vol_sqrt_t = self.sigma * self.maturity.sqrt();
        let d1 = ((self.spot / self.strike).ln()
            + (self.rate + 0.5 * self.sigma * self.sigma) * self.maturity)
            / vol_sqrt_t;
        (d1, d1 - vol_sqrt_t)
    }
}

/// Closed-form Black-Scholes price with zero dividend yield.
///
/// Edge cases:
/// - `t <= 0` returns intrinsic value.
/// - `sigma <= 0` returns the discounted-forward intrinsic value.
pub fn black_scholes_price(
    option_type: OptionType,
    s: f64,
    k: f64,
    r: f64,
    sigma: f64,
    t: f64,
) -> f64 {
    if t <= 0.0 {
        return option_type.payoff(s, k);
    }
    let df = (-r * t).exp();
    if sigma <= 0.0 {
        return option_type.payoff(s, k * df);
    }

    let params = BlackScholesParams {
        spot: s,
        strike: k,
        maturity: t,
        rate: r,
        sigma,
    };
    let (d1, d2) = params.d1_d2();
    match option_type {
        OptionType::Call => s * normal_cdf(d1) - k * df * normal_cdf(d2),
        OptionType::Put => k * df * normal_cdf(-d2) - s * normal_cdf(-d1),
    }
}

/// Black-Scholes price with both normal CDFs replaced by Monte Carlo integrals
/// of the standard normal density over `[lower_bound, d]`.
///
/// Call: `S·∫φ(..d1) − K·e^{−rT}·∫φ(..d2)`.
/// Put: `K·e^{−rT}·∫φ(..−d2) − S·∫φ(..−d1)`.
///
/// # Errors
/// [`SimulationError::InvalidInput`] for zero `points`, non-finite
/// `lower_bound`, `sigma <= 0`, or any invalid market input.
pub fn black_scholes_mc_integrated(
    params: &BlackScholesParams,
    option_type: OptionType,
    points: usize,
    lower_bound: f64,
    engine: &MonteCarloEngine,
) -> Result<Estimate, SimulationError> {
    params.validate()?;
    ensure_positive("sigma", params.sigma)?;
    ensure_trials(points)?;
    if !lower_bound.is_finite() {
        return Err(SimulationError::invalid("lower_bound must be finite"));
    }

    let (d1, d2) = params.d1_d2();
    let df = params.discount_factor();
    let (spot_leg, strike_leg) = match option_type {
        OptionType::Call => ((d1, params.spot), (d2, -params.strike * df)),
        OptionType::Put => ((-d1, -params.spot), (-d2, params.strike * df)),
    };
    debug!(d1, d2, points, lower_bound, "integrating normal density for black-scholes");

    let mut rng = engine.stream(0);
    let mut integrate_to = |upper: f64| -> Result<Estimate, SimulationError> {
        if upper <= lower_bound {
            return Ok(Estimate {
                value: 0.0,
                std_error: 0.0,
                trials: points,
            });
        }
        let experiment = GaussianIntegral {
            lower: lower_bound,
            upper,
            integrand: Integrand::NormalDensity,
        };
        engine.run_on(&experiment, points, &mut rng)
    };

    let first = integrate_to(spot_leg.0)?;
    let second = integrate_to(strike_leg.0)?;

    Ok(Estimate {
        value: spot_leg.1 * first.value + strike_leg.1 * second.value,
        std_error: (spot_leg.1 * first.std_error).hypot(strike_leg.1 * second.std_error),
        trials: points,
    })
}

/// Closed-form value of the contract described by `params`.
pub fn closed_form_price(params: &BlackScholesParams, option_type: OptionType) -> f64 {
    black_scholes_price(
        option_type,
        params.spot,
        params.strike,
        params.rate,
        params.sigma,
        params.maturity,
    )
}
