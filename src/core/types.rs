use serde::{Deserialize, Serialize};

/// Option payoff direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionType {
    /// Call option payoff profile.
    #[default]
    Call,
    /// Put option payoff profile.
    Put,
}

impl OptionType {
    /// Intrinsic value at `spot`.
    #[inline]
    pub fn payoff(self, spot: f64, strike: f64) -> f64 {
        match self {
            Self::Call => (spot - strike).max(0.0),
            Self::Put => (strike - spot).max(0.0),
        }
    }
}

/// Running sums over reduced values.
///
/// Parallel chunks each own one and are combined with [`Accumulator::merge`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Accumulator {
    pub sum: f64,
    pub sum_sq: f64,
    pub count: usize,
}

impl Accumulator {
    #[inline]
    pub fn push(&mut self, x: f64) {
        self.sum += x;
        self.sum_sq += x * x;
        self.count += 1;
    }

    #[inline]
    pub fn merge(self, other: Self) -> Self {
        Self {
            sum: self.sum + other.sum,
            sum_sq: self.sum_sq + other.sum_sq,
            count: self.count + other.count,
        }
    }

    /// Mean and standard error of the mean. `count` must be non-zero.
    pub fn finish(&self) -> Estimate {
        let n = self.count as f64;
        let mean = self.sum / n;
        let var = if self.count > 1 {
            ((self.sum_sq - n * mean * mean) / (n - 1.0)).max(0.0)
        } else {
            0.0
        };
        Estimate {
            value: mean,
            std_error: (var / n).sqrt(),
            trials: self.count,
        }
    }
}

/// Point estimate produced by one run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Estimate {
    pub value: f64,
    /// Sample standard error of `value`; informational only.
    pub std_error: f64,
    pub trials: usize,
}

impl Estimate {
    /// Rescales the estimate, e.g. by `b - a` or a discount factor.
    pub fn scaled(self, factor: f64) -> Self {
        Self {
            value: self.value * factor,
            std_error: self.std_error * factor.abs(),
            trials: self.trials,
        }
    }
}
