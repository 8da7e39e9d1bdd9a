//! Stochastic process models used by the experiment generators.

pub mod gbm;

pub use gbm::{Gbm, GbmPathGenerator};
