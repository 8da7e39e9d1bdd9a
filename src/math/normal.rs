//! Gaussian kernels: density, CDF and closed-form integrals.
use std::f64::consts::{PI, SQRT_2};

use statrs::function::erf::{erf, erfc};

/// Unnormalized Gaussian `exp(-x²)`.
#[inline]
pub fn gaussian(x: f64) -> f64 {
    (-x * x).exp()
}

#[inline]
pub fn normal_pdf(x: f64) -> f64 {
    const INV_SQRT_2PI: f64 = 0.398_942_280_401_432_7;
    INV_SQRT_2PI * (-0.5 * x * x).exp()
}

#[inline]
pub fn normal_cdf(x: f64) -> f64 {
    0.5 * erfc(-x / SQRT_2)
}

/// Exact `∫_a^b exp(-x²) dx`.
pub fn gaussian_integral(a: f64, b: f64) -> f64 {
    0.5 * PI.sqrt() * (erf(b) - erf(a))
}

/// Exact `∫_a^b φ(x) dx`.
pub fn normal_probability(a: f64, b: f64) -> f64 {
    normal_cdf(b) - normal_cdf(a)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn normal_cdf_quantiles() {
        assert_relative_eq!(normal_cdf(0.0), 0.5, epsilon = 1e-10);
        assert_relative_eq!(normal_cdf(1.959_963_984_540_054), 0.975, epsilon = 1e-10);
        assert_relative_eq!(normal_cdf(-1.644_853_626_951_472), 0.05, epsilon = 1e-10);
        for x in [0.3, 1.0, 2.5, 4.0] {
            assert_relative_eq!(normal_cdf(x) + normal_cdf(-x), 1.0, epsilon = 1e-10);
        }
    }

    #[test]
    fn normal_pdf_peak() {
        assert_relative_eq!(normal_pdf(0.0), 0.398_942_280_401_432_7, epsilon = 1e-15);
        assert_relative_eq!(normal_pdf(1.5), normal_pdf(-1.5), epsilon = 1e-15);
    }

    #[test]
    fn closed_form_integrals() {
        assert_relative_eq!(gaussian_integral(-20.0, 20.0), PI.sqrt(), epsilon = 1e-10);
        assert_relative_eq!(normal_probability(-20.0, 20.0), 1.0, epsilon = 1e-10);
        // one-sigma mass
        assert_relative_eq!(normal_probability(-1.0, 1.0), 0.682_689_492_137_086, epsilon = 1e-10);
        assert_relative_eq!(gaussian_integral(0.0, 1.0), 0.746_824_132_812_427, epsilon = 1e-10);
    }
}
