//! Birthday paradox: probability that at least two of `n` people share a birthday.
//!
//! Birthdays are zero-based days drawn uniformly from `[0, days)`.
use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::core::{Experiment, SimulationError};
use crate::math::RngStream;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BirthdayConfig {
    pub trials: usize,
    pub people: usize,
    pub days: u32,
}

impl Default for BirthdayConfig {
    fn default() -> Self {
        Self {
            trials: 1_000_000,
            people: 23,
            days: 365,
        }
    }
}

impl BirthdayConfig {
    pub fn experiment(&self) -> BirthdayParadox {
        BirthdayParadox {
            people: self.people,
            days: self.days,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BirthdayParadox {
    pub people: usize,
    pub days: u32,
}

impl BirthdayParadox {
    /// `1 − Π_{i<n} (d − i)/d`.
    pub fn exact_probability(&self) -> f64 {
        if self.people > self.days as usize {
            return 1.0;
        }
        let d = f64::from(self.days);
        let no_shared = (0..self.people)
            .map(|i| (d - i as f64) / d)
            .product::<f64>();
        1.0 - no_shared
    }
}

/// True when any day occurs twice.
pub fn has_collision(birthdays: &[u32]) -> bool {
    let mut seen = HashSet::with_capacity(birthdays.len());
    !birthdays.iter().all(|&day| seen.insert(day))
}

impl Experiment for BirthdayParadox {
    type Outcome = Vec<u32>;

    fn name(&self) -> &str {
        "birthday"
    }

    fn validate(&self) -> Result<(), SimulationError> {
        if self.people == 0 {
            return Err(SimulationError::invalid("people must be > 0"));
        }
        if self.days == 0 {
            return Err(SimulationError::invalid("days must be > 0"));
        }
        Ok(())
    }

    fn generate(&self, rng: &mut RngStream) -> Result<Vec<u32>, SimulationError> {
        Ok((0..self.people).map(|_| rng.random_range(0..self.days)).collect())
    }

    fn reduce(&self, birthdays: &Vec<u32>) -> f64 {
        if has_collision(birthdays) { 1.0 } else { 0.0 }
    }

    fn reference(&self) -> Option<f64> {
        Some(self.exact_probability())
    }
}
