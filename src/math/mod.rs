pub mod fast_rng;
pub mod normal;

pub use fast_rng::{RngKind, RngStream};
pub use normal::{gaussian, gaussian_integral, normal_cdf, normal_pdf, normal_probability};

use crate::core::SimulationError;

/// Percentage error `100·|estimate − reference| / |reference|`.
///
/// # Errors
/// Returns [`SimulationError::NumericalError`] when the reference is zero or
/// either value is not finite.
pub fn relative_error_pct(estimate: f64, reference: f64) -> Result<f64, SimulationError> {
    if !estimate.is_finite() || !reference.is_finite() {
        return Err(SimulationError::NumericalError(format!(
            "non-finite comparison: estimate={estimate}, reference={reference}"
        )));
    }
    if reference == 0.0 {
        return Err(SimulationError::NumericalError(
            "reference value is zero; relative error is undefined".to_string(),
        ));
    }
    Ok(100.0 * (estimate - reference).abs() / reference.abs())
}
