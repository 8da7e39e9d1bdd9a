//! Rayon driver: trials split across independent streams.
//!
//! Each chunk owns its stream and accumulator; partial accumulators are merged
//! in chunk order, so a fixed seed and stream count give the same result on any
//! thread pool size.
use rayon::prelude::*;
use tracing::debug;

use crate::core::{Accumulator, Estimate, Experiment, SimulationError, ensure_trials};
use crate::mc::simulation::{MonteCarloEngine, split_trials};

impl MonteCarloEngine {
    pub fn run_parallel<E: Experiment>(
        &self,
        experiment: &E,
        n_trials: usize,
    ) -> Result<Estimate, SimulationError> {
        ensure_trials(n_trials)?;
        experiment.validate()?;

        let chunks = split_trials(n_trials, self.streams);
        debug!(
            experiment = experiment.name(),
            trials = n_trials,
            chunks = chunks.len(),
            threads = rayon::current_num_threads(),
            "starting parallel monte carlo run"
        );

        let partials = chunks
            .par_iter()
            .enumerate()
            .map(|(index, &count)| {
                let mut rng = self.stream(index);
                let mut acc = Accumulator::default();
                for _ in 0..count {
                    let outcome = experiment.generate(&mut rng)?;
                    acc.push(experiment.reduce(&outcome));
                }
                Ok::<_, SimulationError>(acc)
            })
            .collect::<Result<Vec<_>, SimulationError>>()?;

        let total = partials
            .into_iter()
            .fold(Accumulator::default(), Accumulator::merge);
        Ok(total.finish().scaled(experiment.scale()))
    }
}
