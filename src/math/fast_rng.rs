//! Seedable random streams used by every experiment generator.
//!
//! A [`RngStream`] is an explicit, owned handle: the engine creates one per run
//! (or one per parallel chunk) and passes it by `&mut` into each trial.
use std::ops::Range;

use rand::distr::uniform::SampleUniform;
use rand::rngs::{StdRng, ThreadRng};
use rand::{RngExt, SeedableRng};
use rand_distr::StandardNormal;
use rand_pcg::Pcg64;
use rand_xoshiro::Xoshiro256PlusPlus;
use serde::{Deserialize, Serialize};

/// Generator backing a [`RngStream`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RngKind {
    #[default]
    #[serde(rename = "xoshiro256plusplus", alias = "xoshiro")]
    Xoshiro256PlusPlus,
    Pcg64,
    StdRng,
    /// Entropy-seeded; never reproducible.
    ThreadRng,
}

impl RngKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Xoshiro256PlusPlus => "xoshiro256plusplus",
            Self::Pcg64 => "pcg64",
            Self::StdRng => "std_rng",
            Self::ThreadRng => "thread_rng",
        }
    }
}

impl std::str::FromStr for RngKind {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "xoshiro" | "xoshiro256plusplus" | "xoshiro256++" => Ok(Self::Xoshiro256PlusPlus),
            "pcg" | "pcg64" => Ok(Self::Pcg64),
            "std" | "std_rng" | "stdrng" => Ok(Self::StdRng),
            "thread" | "thread_rng" | "threadrng" => Ok(Self::ThreadRng),
            other => Err(format!("unknown rng kind `{other}`")),
        }
    }
}

/// Owned random stream handed to experiment generators.
#[derive(Debug)]
pub enum RngStream {
    Xoshiro256PlusPlus(Xoshiro256PlusPlus),
    Pcg64(Pcg64),
    StdRng(StdRng),
    ThreadRng(ThreadRng),
}

/// Runs `$body` with `$rng` bound to the concrete generator.
macro_rules! with_rng {
    ($stream:expr, $rng:ident => $body:expr) => {
        match $stream {
            RngStream::Xoshiro256PlusPlus($rng) => $body,
            RngStream::Pcg64($rng) => $body,
            RngStream::StdRng($rng) => $body,
            RngStream::ThreadRng($rng) => $body,
        }
    };
}

impl RngStream {
    /// `seed` is ignored for [`RngKind::ThreadRng`].
    pub fn from_seed(kind: RngKind, seed: u64) -> Self {
        match kind {
            RngKind::Xoshiro256PlusPlus => {
                Self::Xoshiro256PlusPlus(Xoshiro256PlusPlus::seed_from_u64(seed))
            }
            RngKind::Pcg64 => Self::Pcg64(Pcg64::seed_from_u64(seed)),
            RngKind::StdRng => Self::StdRng(StdRng::seed_from_u64(seed)),
            RngKind::ThreadRng => Self::ThreadRng(rand::rng()),
        }
    }

    /// Uniform draw in `[0, 1)`.
    #[inline]
    pub fn random_f64(&mut self) -> f64 {
        with_rng!(self, rng => rng.random::<f64>())
    }

    /// Uniform draw in `[low, high)`.
    #[inline]
    pub fn uniform(&mut self, low: f64, high: f64) -> f64 {
        (high - low).mul_add(self.random_f64(), low)
    }

    /// Uniform integer in a non-empty half-open range.
    #[inline]
    pub fn random_range<T: SampleUniform + PartialOrd>(&mut self, range: Range<T>) -> T {
        with_rng!(self, rng => rng.random_range(range))
    }

    #[inline]
    pub fn standard_normal(&mut self) -> f64 {
        with_rng!(self, rng => rng.sample(StandardNormal))
    }

    pub fn fill_standard_normal(&mut self, out: &mut [f64]) {
        for z in out.iter_mut() {
            *z = self.standard_normal();
        }
    }
}
