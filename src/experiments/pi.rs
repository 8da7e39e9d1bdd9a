//! Pi from the fraction of uniform points in `[−1, 1)²` that land inside the unit circle.
use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::core::{Experiment, SimulationError};
use crate::math::RngStream;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PiConfig {
    pub trials: usize,
}

impl Default for PiConfig {
    fn default() -> Self {
        Self { trials: 1_000_000 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[inline]
    pub fn inside_unit_circle(&self) -> bool {
        self.x * self.x + self.y * self.y < 1.0
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CircleInSquare;

impl Experiment for CircleInSquare {
    type Outcome = Point;

    fn name(&self) -> &str {
        "pi"
    }

    fn generate(&self, rng: &mut RngStream) -> Result<Point, SimulationError> {
        let x = 2.0 * rng.random_f64() - 1.0;
        let y = 2.0 * rng.random_f64() - 1.0;
        Ok(Point { x, y })
    }

    fn reduce(&self, point: &Point) -> f64 {
        if point.inside_unit_circle() { 1.0 } else { 0.0 }
    }

    fn scale(&self) -> f64 {
        4.0
    }

    fn reference(&self) -> Option<f64> {
        Some(PI)
    }
}
