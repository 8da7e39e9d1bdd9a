//! Option pricing helpers.

pub mod european;

pub use european::{
    BlackScholesParams, DEFAULT_LOWER_BOUND, black_scholes_mc_integrated, black_scholes_price,
    closed_form_price,
};
