//! mcsim is a small Monte Carlo library: a seeded estimation engine plus a
//! family of classic experiments, each compared with its closed-form value.
//!
//! Experiments: birthday-paradox collision probability, European options under
//! Black-Scholes (GBM path simulation and Monte Carlo integration of the normal
//! density up to d1/d2), Euler's number from uniform-sum stopping counts, pi
//! from points in the unit square, the Monty Hall game, and Monte Carlo
//! integration of a Gaussian kernel.
//!
//! References used across modules include:
//! - Hull, *Options, Futures, and Other Derivatives* (11th ed.), Ch. 15 and 21.
//! - Glasserman (2004) for Monte Carlo estimators.
//!
//! Numerical considerations:
//! - Every run consumes an explicit, seeded stream; identical seed and generator
//!   kind reproduce bit-identical estimates.
//! - Rejection and stopping loops are capped and fail with
//!   [`core::SimulationError::Stalled`] instead of spinning.
//!
//! # Feature Flags
//! - `parallel`: enables the Rayon-powered chunked driver
//!   (`MonteCarloEngine::run_parallel`).
//!
//! # Quick Start
//! Estimate pi:
//! ```rust
//! use mcsim::experiments::CircleInSquare;
//! use mcsim::mc::MonteCarloEngine;
//!
//! let est = MonteCarloEngine::new(20_000).run(&CircleInSquare, 100_000).unwrap();
//! assert!((est.value - std::f64::consts::PI).abs() < 0.05);
//! ```
//!
//! Price a Black-Scholes call both ways:
//! ```rust
//! use mcsim::core::OptionType;
//! use mcsim::mc::MonteCarloEngine;
//! use mcsim::pricing::european::{
//!     BlackScholesParams, DEFAULT_LOWER_BOUND, black_scholes_mc_integrated, closed_form_price,
//! };
//!
//! let params = BlackScholesParams::default();
//! let engine = MonteCarloEngine::new(20_000);
//! let mc = black_scholes_mc_integrated(
//!     &params,
//!     OptionType::Call,
//!     200_000,
//!     DEFAULT_LOWER_BOUND,
//!     &engine,
//! )
//! .unwrap();
//! let exact = closed_form_price(&params, OptionType::Call);
//! assert!((mc.value - exact).abs() < 5.0 * mc.std_error);
//! ```

pub mod config;
pub mod core;
pub mod experiments;
pub mod math;
pub mod mc;
pub mod models;
pub mod pricing;
pub mod report;

/// Common imports for ergonomic usage.
pub mod prelude {
    pub use crate::config::{ConfigError, RunSettings, SimulationConfig};
    pub use crate::core::{Accumulator, Estimate, Experiment, OptionType, SimulationError};
    pub use crate::experiments::*;
    pub use crate::math::{RngKind, RngStream, relative_error_pct};
    pub use crate::mc::MonteCarloEngine;
    pub use crate::pricing::*;
    pub use crate::report::{Report, SampleData, SampleSet};
}
