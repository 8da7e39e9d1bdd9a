//! Raw sample arrays handed to plotting collaborators as JSON.
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::{Experiment, SimulationError};
use crate::experiments::option::{EuropeanOptionMc, inner_values, terminal_values};
use crate::experiments::pi::{CircleInSquare, Point};
use crate::mc::MonteCarloEngine;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SampleData {
    /// Full price paths plus the arrays behind the terminal and payoff histograms.
    Paths {
        paths: Vec<Vec<f64>>,
        terminal_values: Vec<f64>,
        inner_values: Vec<f64>,
    },
    /// Scatter points coloured by circle membership.
    Points { points: Vec<Point>, inside: Vec<bool> },
    /// One reduced value per trial.
    Values { values: Vec<f64> },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleSet {
    pub experiment: String,
    pub data: SampleData,
}

impl SampleSet {
    pub fn option_paths(
        experiment: &EuropeanOptionMc,
        engine: &MonteCarloEngine,
        n: usize,
    ) -> Result<Self, SimulationError> {
        let paths = engine.sample(experiment, n)?;
        let terminal = terminal_values(&paths);
        let inner = inner_values(&paths, experiment.params.strike, experiment.option_type);
        Ok(Self {
            experiment: experiment.name().to_string(),
            data: SampleData::Paths {
                paths,
                terminal_values: terminal,
                inner_values: inner,
            },
        })
    }

    pub fn pi_points(engine: &MonteCarloEngine, n: usize) -> Result<Self, SimulationError> {
        let points = engine.sample(&CircleInSquare, n)?;
        let inside = points.iter().map(Point::inside_unit_circle).collect();
        Ok(Self {
            experiment: CircleInSquare.name().to_string(),
            data: SampleData::Points { points, inside },
        })
    }

    /// Reduced values of `n` fresh trials of any experiment.
    pub fn reduced<E: Experiment>(
        experiment: &E,
        engine: &MonteCarloEngine,
        n: usize,
    ) -> Result<Self, SimulationError> {
        let values = engine
            .sample(experiment, n)?
            .iter()
            .map(|outcome| experiment.reduce(outcome))
            .collect();
        Ok(Self {
            experiment: experiment.name().to_string(),
            data: SampleData::Values { values },
        })
    }

    pub fn len(&self) -> usize {
        match &self.data {
            SampleData::Paths { paths, .. } => paths.len(),
            SampleData::Points { points, .. } => points.len(),
            SampleData::Values { values } => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn write_json(&self, path: &Path) -> io::Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer(&mut writer, self)?;
        writer.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::experiments::{BirthdayParadox, OptionConfig};

    #[test]
    fn option_samples_carry_histogram_arrays() {
        let experiment = OptionConfig::default().experiment();
        let set = SampleSet::option_paths(&experiment, &MonteCarloEngine::new(9), 50).unwrap();
        assert_eq!(set.experiment, "option");
        assert_eq!(set.len(), 50);
        match set.data {
            SampleData::Paths {
                paths,
                terminal_values,
                inner_values,
            } => {
                assert_eq!(paths[0].len(), 51);
                assert_eq!(terminal_values.len(), 50);
                assert!(inner_values.iter().all(|v| *v >= 0.0));
            }
            other => panic!("unexpected sample data: {other:?}"),
        }
    }

    #[test]
    fn pi_points_flag_circle_membership() {
        let set = SampleSet::pi_points(&MonteCarloEngine::new(2), 100).unwrap();
        let SampleData::Points { points, inside } = &set.data else {
            panic!("expected points");
        };
        for (p, flag) in points.iter().zip(inside) {
            assert_eq!(p.inside_unit_circle(), *flag);
        }
    }

    #[test]
    fn reduced_values_are_indicators_for_birthday() {
        let experiment = BirthdayParadox {
            people: 23,
            days: 365,
        };
        let set = SampleSet::reduced(&experiment, &MonteCarloEngine::new(3), 200).unwrap();
        let SampleData::Values { values } = &set.data else {
            panic!("expected values");
        };
        assert!(values.iter().all(|v| *v == 0.0 || *v == 1.0));
    }

    #[test]
    fn json_file_is_tagged_by_kind() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pi.json");
        SampleSet::pi_points(&MonteCarloEngine::new(2), 10)
            .unwrap()
            .write_json(&path)
            .unwrap();
        let payload = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&payload).unwrap();
        assert_eq!(value["data"]["kind"], "points");
        assert_eq!(value["data"]["points"].as_array().unwrap().len(), 10);
    }
}
