//! Geometric Brownian motion under the risk-neutral drift.
//!
//! dS = μ S dt + σ S dW, discretized exactly in log space:
//! `S_t = S_{t−1} · exp((μ − σ²/2)·dt + σ·√dt·Z_t)`.
use crate::core::{SimulationError, ensure_positive};
use crate::math::RngStream;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gbm {
    pub mu: f64,
    pub sigma: f64,
}

impl Gbm {
    pub fn step_exact(&self, s: f64, dt: f64, z: f64) -> f64 {
        s * ((self.mu - 0.5 * self.sigma * self.sigma) * dt + self.sigma * dt.sqrt() * z).exp()
    }
}

/// Fixed-grid path generator producing `steps + 1` values `S_0..S_M`.
#[derive(Debug, Clone, PartialEq)]
pub struct GbmPathGenerator {
    pub model: Gbm,
    pub s0: f64,
    pub maturity: f64,
    pub steps: usize,
}

impl GbmPathGenerator {
    /// `sigma == 0` is accepted: it yields the deterministic path `S0·exp(μ·t·dt)`.
    pub fn validate(&self) -> Result<(), SimulationError> {
        ensure_positive("s0", self.s0)?;
        ensure_positive("maturity", self.maturity)?;
        if !self.model.sigma.is_finite() || self.model.sigma < 0.0 {
            return Err(SimulationError::invalid(format!(
                "sigma must be finite and >= 0, got {}",
                self.model.sigma
            )));
        }
        if !self.model.mu.is_finite() {
            return Err(SimulationError::invalid("drift must be finite"));
        }
        if self.steps == 0 {
            return Err(SimulationError::invalid("steps must be > 0"));
        }
        Ok(())
    }

    #[inline]
    pub fn dt(&self) -> f64 {
        self.maturity / self.steps as f64
    }

    pub fn generate_from_normals(&self, normals: &[f64]) -> Vec<f64> {
        let mut path = vec![0.0_f64; self.steps + 1];
        self.generate_into(normals, &mut path);
        path
    }

    /// Writes the path into `out` (length `steps + 1`) from `steps` normals.
    ///
    /// The log increment is accumulated and exponentiated once per step, so
    /// rounding does not compound multiplicatively along the path.
    pub fn generate_into(&self, normals: &[f64], out: &mut [f64]) {
        let dt = self.dt();
        let drift = (self.model.mu - 0.5 * self.model.sigma * self.model.sigma) * dt;
        let diffusion = self.model.sigma * dt.sqrt();

        out[0] = self.s0;
        let mut log_return = 0.0_f64;
        for (j, &z) in normals.iter().enumerate().take(self.steps) {
            log_return += diffusion.mul_add(z, drift);
            out[j + 1] = self.s0 * log_return.exp();
        }
    }

    /// Draws `steps` normals from `rng` and builds one path.
    pub fn simulate(&self, rng: &mut RngStream) -> Vec<f64> {
        let mut normals = vec![0.0_f64; self.steps];
        rng.fill_standard_normal(&mut normals);
        self.generate_from_normals(&normals)
    }
}
