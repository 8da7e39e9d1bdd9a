//! Module `mc::simulation`.
//!
//! Implements the Monte Carlo driver: draw `n` independent outcomes from an
//! explicit random stream, reduce each to a real value, accumulate, and
//! return a point estimate.
//!
//! Key types and purpose: `MonteCarloEngine` owns seeding and stream policy;
//! `estimate_on` is the single tight loop every estimator goes through.
//!
//! Numerical considerations: the sequential driver consumes one stream in
//! order, so a fixed seed and generator kind reproduce bit-identical results.
use rand::RngExt;
use tracing::debug;

use crate::core::{Accumulator, Estimate, Experiment, SimulationError, ensure_trials};
use crate::math::{RngKind, RngStream};

#[derive(Debug, Clone)]
pub struct MonteCarloEngine {
    pub seed: u64,
    pub rng_kind: RngKind,
    pub reproducible: bool,
    /// Number of independent streams used by the parallel driver.
    pub streams: usize,
}

impl Default for MonteCarloEngine {
    fn default() -> Self {
        Self::new(Self::DEFAULT_SEED)
    }
}

impl MonteCarloEngine {
    pub const DEFAULT_SEED: u64 = 20_000;
    pub const DEFAULT_STREAMS: usize = 64;
    /// Odd stride separating the seeds of neighbouring streams.
    const STREAM_STRIDE: u64 = 0x9E37_79B9_7F4A_7C15;

    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng_kind: RngKind::Xoshiro256PlusPlus,
            reproducible: true,
            streams: Self::DEFAULT_STREAMS,
        }
    }

    pub fn with_rng_kind(mut self, rng_kind: RngKind) -> Self {
        self.rng_kind = rng_kind;
        if matches!(rng_kind, RngKind::ThreadRng) {
            self.reproducible = false;
        }
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self.reproducible = !matches!(self.rng_kind, RngKind::ThreadRng);
        self
    }

    pub fn with_randomized_streams(mut self) -> Self {
        self.reproducible = false;
        self
    }

    pub fn with_streams(mut self, streams: usize) -> Self {
        self.streams = streams.max(1);
        self
    }

    /// Seed of stream `index`, or a fresh OS-derived seed when not reproducible.
    pub fn stream_seed(&self, index: usize) -> u64 {
        if self.reproducible {
            self.seed.wrapping_add((index as u64).wrapping_mul(Self::STREAM_STRIDE))
        } else {
            rand::rng().random()
        }
    }

    /// Opens stream `index`; stream 0 drives every sequential run.
    pub fn stream(&self, index: usize) -> RngStream {
        RngStream::from_seed(self.rng_kind, self.stream_seed(index))
    }

    /// `estimate(generator, reducer, n_trials)`: mean of `n_trials` reduced outcomes.
    ///
    /// # Errors
    /// [`SimulationError::InvalidInput`] when `n_trials == 0`; any error the
    /// generator returns is propagated unchanged.
    pub fn estimate_with<O, G, R>(
        &self,
        generator: G,
        reducer: R,
        n_trials: usize,
    ) -> Result<Estimate, SimulationError>
    where
        G: FnMut(&mut RngStream) -> Result<O, SimulationError>,
        R: Fn(&O) -> f64,
    {
        let mut rng = self.stream(0);
        estimate_on(&mut rng, generator, reducer, n_trials)
    }

    /// Runs `experiment` for `n_trials` on a fresh stream and applies its scale.
    pub fn run<E: Experiment>(
        &self,
        experiment: &E,
        n_trials: usize,
    ) -> Result<Estimate, SimulationError> {
        let mut rng = self.stream(0);
        self.run_on(experiment, n_trials, &mut rng)
    }

    /// Same as [`MonteCarloEngine::run`] but consumes a caller-owned stream.
    pub fn run_on<E: Experiment>(
        &self,
        experiment: &E,
        n_trials: usize,
        rng: &mut RngStream,
    ) -> Result<Estimate, SimulationError> {
        ensure_trials(n_trials)?;
        experiment.validate()?;
        debug!(
            experiment = experiment.name(),
            trials = n_trials,
            seed = self.seed,
            rng = self.rng_kind.as_str(),
            "starting monte carlo run"
        );

        let estimate = estimate_on(
            rng,
            |rng| experiment.generate(rng),
            |outcome| experiment.reduce(outcome),
            n_trials,
        )?
        .scaled(experiment.scale());

        debug!(
            experiment = experiment.name(),
            value = estimate.value,
            std_error = estimate.std_error,
            "finished monte carlo run"
        );
        Ok(estimate)
    }

    /// Monte Carlo integral `(b − a)/n · Σ f(a + (b − a)·u)` of `f` over `[a, b]`.
    pub fn integrate<F>(
        &self,
        f: F,
        a: f64,
        b: f64,
        n_trials: usize,
    ) -> Result<Estimate, SimulationError>
    where
        F: Fn(f64) -> f64,
    {
        ensure_bounds(a, b)?;
        let estimate = self.estimate_with(|rng| Ok(rng.uniform(a, b)), |&x| f(x), n_trials)?;
        Ok(estimate.scaled(b - a))
    }

    /// Draws raw outcomes without reducing them, for plotting collaborators.
    pub fn sample<E: Experiment>(
        &self,
        experiment: &E,
        n: usize,
    ) -> Result<Vec<E::Outcome>, SimulationError> {
        ensure_trials(n)?;
        experiment.validate()?;
        let mut rng = self.stream(0);
        (0..n).map(|_| experiment.generate(&mut rng)).collect()
    }
}

/// The driver loop: exactly `n_trials` draws on `rng`, no early exit.
pub fn estimate_on<O, G, R>(
    rng: &mut RngStream,
    mut generator: G,
    reducer: R,
    n_trials: usize,
) -> Result<Estimate, SimulationError>
where
    G: FnMut(&mut RngStream) -> Result<O, SimulationError>,
    R: Fn(&O) -> f64,
{
    ensure_trials(n_trials)?;
    let mut acc = Accumulator::default();
    for _ in 0..n_trials {
        let outcome = generator(rng)?;
        acc.push(reducer(&outcome));
    }
    Ok(acc.finish())
}

pub(crate) fn ensure_bounds(a: f64, b: f64) -> Result<(), SimulationError> {
    if !a.is_finite() || !b.is_finite() {
        return Err(SimulationError::invalid(format!(
            "integration bounds must be finite, got [{a}, {b}]"
        )));
    }
    if a >= b {
        return Err(SimulationError::invalid(format!(
            "integration bounds must satisfy a < b, got [{a}, {b}]"
        )));
    }
    Ok(())
}

/// Splits `n` trials into at most `chunks` non-empty, near-equal parts.
#[inline]
pub fn split_trials(n: usize, chunks: usize) -> Vec<usize> {
    let chunks = chunks.max(1);
    let base = n / chunks;
    let rem = n % chunks;
    (0..chunks)
        .map(|i| if i < rem { base + 1 } else { base })
        .filter(|&n| n > 0)
        .collect()
}
