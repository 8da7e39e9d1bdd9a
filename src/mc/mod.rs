//! Monte Carlo drivers and sampling helpers.

#[cfg(feature = "parallel")]
mod parallel;
pub mod rejection;
pub mod simulation;

pub use rejection::{DEFAULT_MAX_ATTEMPTS, draw_until};
pub use simulation::{MonteCarloEngine, estimate_on, split_trials};
