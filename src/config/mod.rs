//! Module `config`.
//!
//! `SimulationConfig` aggregates one serde section per experiment plus the
//! shared run settings. Every field has a default, so a JSON file only needs
//! the values it overrides:
//!
//! ```rust
//! use mcsim::config::SimulationConfig;
//!
//! let payload = r#"{ "run": { "seed": 7 }, "pi": { "trials": 1000 } }"#;
//! let config = SimulationConfig::from_json(payload).expect("valid config");
//! assert_eq!(config.pi.trials, 1_000);
//! assert_eq!(config.birthday.people, 23);
//! assert_eq!(config.engine().seed, 7);
//! ```
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::{Experiment, SimulationError, ensure_positive, ensure_trials};
use crate::experiments::{
    BirthdayConfig, EulerConfig, IntegrationConfig, MontyHallConfig, OptionConfig, PiConfig,
};
use crate::math::RngKind;
use crate::mc::MonteCarloEngine;
use crate::mc::simulation::ensure_bounds;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config section `{section}`: {source}")]
    Invalid {
        section: &'static str,
        #[source]
        source: SimulationError,
    },
}

/// Seeding and stream policy shared by every experiment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunSettings {
    /// `None` draws the base seed from the OS.
    pub seed: Option<u64>,
    pub rng: RngKind,
    pub streams: usize,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            seed: Some(MonteCarloEngine::DEFAULT_SEED),
            rng: RngKind::default(),
            streams: MonteCarloEngine::DEFAULT_STREAMS,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub run: RunSettings,
    pub birthday: BirthdayConfig,
    pub option: OptionConfig,
    pub euler: EulerConfig,
    pub pi: PiConfig,
    pub monty_hall: MontyHallConfig,
    pub integration: IntegrationConfig,
}

impl SimulationConfig {
    pub fn from_json(payload: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(payload)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let payload = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&payload)
    }

    /// Checks every section without drawing a single trial.
    ///
    /// The option section must satisfy both pricers: the path simulator accepts
    /// `sigma = 0` but the integrated pricer divides by it, so `sigma > 0`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let check = |section: &'static str, result: Result<(), SimulationError>| {
            result.map_err(|source| ConfigError::Invalid { section, source })
        };

        if self.run.streams == 0 {
            return Err(ConfigError::Invalid {
                section: "run",
                source: SimulationError::invalid("streams must be > 0"),
            });
        }
        check("birthday", ensure_trials(self.birthday.trials))?;
        check("birthday", self.birthday.experiment().validate())?;

        check("option", ensure_trials(self.option.trials))?;
        check("option", ensure_trials(self.option.integration_points))?;
        check("option", self.option.experiment().validate())?;
        check("option", ensure_positive("sigma", self.option.sigma))?;
        if !self.option.lower_bound.is_finite() {
            return Err(ConfigError::Invalid {
                section: "option",
                source: SimulationError::invalid("lower_bound must be finite"),
            });
        }

        check("euler", ensure_trials(self.euler.trials))?;
        check("euler", self.euler.experiment().validate())?;
        check("pi", ensure_trials(self.pi.trials))?;
        check("monty_hall", ensure_trials(self.monty_hall.trials))?;
        check("monty_hall", self.monty_hall.experiment().validate())?;
        check("integration", ensure_trials(self.integration.trials))?;
        check(
            "integration",
            ensure_bounds(self.integration.lower, self.integration.upper),
        )
    }

    pub fn engine(&self) -> MonteCarloEngine {
        let engine = MonteCarloEngine::new(self.run.seed.unwrap_or(0))
            .with_rng_kind(self.run.rng)
            .with_streams(self.run.streams);
        match self.run.seed {
            Some(_) => engine,
            None => engine.with_randomized_streams(),
        }
    }

    /// Overrides the trial count of every section, as `--trials` does.
    pub fn set_trials(&mut self, trials: usize) {
        self.birthday.trials = trials;
        self.option.trials = trials;
        self.option.integration_points = trials;
        self.euler.trials = trials;
        self.pi.trials = trials;
        self.monty_hall.trials = trials;
        self.integration.trials = trials;
    }
}
