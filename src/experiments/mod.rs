//! Module `experiments`.
//!
//! One module per randomized experiment. Each exposes a serde config with the
//! default run size and an [`Experiment`](crate::core::Experiment)
//! implementation the engine drives.

pub mod birthday;
pub mod euler;
pub mod integration;
pub mod monty_hall;
pub mod option;
pub mod pi;

pub use birthday::{BirthdayConfig, BirthdayParadox, has_collision};
pub use euler::{EulerConfig, UniformSumStopping};
pub use integration::{GaussianIntegral, Integrand, IntegrationConfig};
pub use monty_hall::{MontyHall, MontyHallConfig, MontyHallGame, Strategy};
pub use option::{EuropeanOptionMc, OptionConfig, inner_values, terminal_values};
pub use pi::{CircleInSquare, PiConfig, Point};
