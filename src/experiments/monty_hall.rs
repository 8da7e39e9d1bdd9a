//! Monty Hall game set up by rejection sampling over doors `{0, 1, 2}`.
//!
//! The prize and both goats are redrawn until pairwise distinct, the host
//! reveal until it avoids the prize and the guest, and the switch target until
//! it avoids the guest and the reveal.
use serde::{Deserialize, Serialize};

use crate::core::{Experiment, SimulationError};
use crate::math::RngStream;
use crate::mc::{DEFAULT_MAX_ATTEMPTS, draw_until};

const DOORS: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    #[default]
    Switch,
    Stay,
}

impl std::str::FromStr for Strategy {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "switch" => Ok(Self::Switch),
            "stay" => Ok(Self::Stay),
            other => Err(format!("unknown strategy `{other}`")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MontyHallConfig {
    pub trials: usize,
    pub strategy: Strategy,
    pub max_attempts: usize,
}

impl Default for MontyHallConfig {
    fn default() -> Self {
        Self {
            trials: 10_000_000,
            strategy: Strategy::Switch,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl MontyHallConfig {
    pub fn experiment(&self) -> MontyHall {
        MontyHall {
            strategy: self.strategy,
            max_attempts: self.max_attempts,
        }
    }
}

/// One fully set-up game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MontyHallGame {
    pub guest: u32,
    pub prize: u32,
    pub goats: [u32; 2],
    pub host_reveal: u32,
    pub switch_target: u32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MontyHall {
    pub strategy: Strategy,
    pub max_attempts: usize,
}

impl Default for MontyHall {
    fn default() -> Self {
        Self {
            strategy: Strategy::Switch,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl Experiment for MontyHall {
    type Outcome = MontyHallGame;

    fn name(&self) -> &str {
        match self.strategy {
            Strategy::Switch => "monty-hall",
            Strategy::Stay => "monty-hall-stay",
        }
    }

    fn validate(&self) -> Result<(), SimulationError> {
        if self.max_attempts == 0 {
            return Err(SimulationError::invalid("max_attempts must be > 0"));
        }
        Ok(())
    }

    fn generate(&self, rng: &mut RngStream) -> Result<MontyHallGame, SimulationError> {
        let limit = self.max_attempts;
        let guest = rng.random_range(0..DOORS);

        let (prize, goat_1, goat_2) = draw_until(
            rng,
            "monty hall door assignment",
            limit,
            |rng| {
                (
                    rng.random_range(0..DOORS),
                    rng.random_range(0..DOORS),
                    rng.random_range(0..DOORS),
                )
            },
            |&(p, g1, g2)| p != g1 && p != g2 && g1 != g2,
        )?;

        let host_reveal = draw_until(
            rng,
            "monty hall host reveal",
            limit,
            |rng| rng.random_range(0..DOORS),
            |&door| door != prize && door != guest,
        )?;

        let switch_target = draw_until(
            rng,
            "monty hall switch",
            limit,
            |rng| rng.random_range(0..DOORS),
            |&door| door != guest && door != host_reveal,
        )?;

        Ok(MontyHallGame {
            guest,
            prize,
            goats: [goat_1, goat_2],
            host_reveal,
            switch_target,
        })
    }

    fn reduce(&self, game: &MontyHallGame) -> f64 {
        let chosen = match self.strategy {
            Strategy::Switch => game.switch_target,
            Strategy::Stay => game.guest,
        };
        if chosen == game.prize { 1.0 } else { 0.0 }
    }

    fn reference(&self) -> Option<f64> {
        Some(match self.strategy {
            Strategy::Switch => 2.0 / 3.0,
            Strategy::Stay => 1.0 / 3.0,
        })
    }
}
