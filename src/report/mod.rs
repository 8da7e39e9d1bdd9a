//! Module `report`.
//!
//! Text and JSON rendering of a finished run: estimate, closed-form reference
//! and the percentage error between them.
//!
//! # Examples
//! ```rust
//! use mcsim::core::Estimate;
//! use mcsim::report::{Report, from_json, to_json_pretty};
//!
//! let estimate = Estimate { value: 3.1416, std_error: 0.0016, trials: 1_000_000 };
//! let report = Report::new("pi", estimate, Some(std::f64::consts::PI)).expect("report");
//! assert!(report.to_string().contains("estimate:  3.141600"));
//!
//! let json = to_json_pretty(&report).expect("json serialization");
//! let decoded: Report = from_json(&json).expect("json deserialization");
//! assert_eq!(decoded, report);
//! ```

pub mod samples;

pub use samples::{SampleData, SampleSet};

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::core::{Estimate, SimulationError};
use crate::math::relative_error_pct;

/// Outcome of one experiment run, ready for printing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub experiment: String,
    pub trials: usize,
    pub estimate: f64,
    pub std_error: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_pct: Option<f64>,
}

impl Report {
    /// Builds a report; the error column is filled only when a reference exists.
    ///
    /// # Errors
    /// [`SimulationError::NumericalError`] when the reference is zero or either
    /// value is non-finite.
    pub fn new(
        experiment: impl Into<String>,
        estimate: Estimate,
        reference: Option<f64>,
    ) -> Result<Self, SimulationError> {
        let error_pct = reference
            .map(|r| relative_error_pct(estimate.value, r))
            .transpose()?;
        Ok(Self {
            experiment: experiment.into(),
            trials: estimate.trials,
            estimate: estimate.value,
            std_error: estimate.std_error,
            reference,
            error_pct,
        })
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[{}]", self.experiment)?;
        writeln!(f, "  trials:    {}", self.trials)?;
        write!(f, "  estimate:  {:.6} (± {:.6})", self.estimate, self.std_error)?;
        if let Some(reference) = self.reference {
            write!(f, "\n  reference: {reference:.6}")?;
        }
        if let Some(error_pct) = self.error_pct {
            write!(f, "\n  error:     {error_pct:.2}%")?;
        }
        Ok(())
    }
}

/// Serialize a value to pretty JSON.
pub fn to_json_pretty<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(value)
}

/// Deserialize a value from JSON.
pub fn from_json<T: DeserializeOwned>(payload: &str) -> Result<T, serde_json::Error> {
    serde_json::from_str(payload)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn estimate(value: f64) -> Estimate {
        Estimate {
            value,
            std_error: 0.001,
            trials: 1_000,
        }
    }

    #[test]
    fn text_report_uses_fixed_precision() {
        let report = Report::new("euler", estimate(2.7183), Some(std::f64::consts::E)).unwrap();
        let text = report.to_string();
        assert!(text.starts_with("[euler]"));
        assert!(text.contains("estimate:  2.718300 (± 0.001000)"));
        assert!(text.contains("reference: 2.718282"));
        assert!(text.contains("error:     0.00%"));
    }

    #[test]
    fn report_without_reference_omits_error() {
        let report = Report::new("custom", estimate(1.5), None).unwrap();
        assert_eq!(report.error_pct, None);
        assert!(!report.to_string().contains("error:"));
        let json = to_json_pretty(&report).unwrap();
        assert!(!json.contains("reference"));
    }

    #[test]
    fn zero_reference_is_a_numerical_error() {
        let err = Report::new("zero", estimate(0.1), Some(0.0)).unwrap_err();
        assert!(matches!(err, SimulationError::NumericalError(_)));
    }

    #[test]
    fn json_payload_has_stable_field_names() {
        let report = Report::new("pi", estimate(3.0), Some(3.0)).unwrap();
        let value: serde_json::Value = from_json(&to_json_pretty(&report).unwrap()).unwrap();
        assert_eq!(value["experiment"], "pi");
        assert_eq!(value["trials"], 1_000);
        assert_eq!(value["error_pct"], 0.0);
    }

    #[test]
    fn json_round_trip_preserves_float_bits() {
        let report = Report::new("pi", estimate(3.1416), Some(std::f64::consts::PI)).unwrap();
        let decoded: Report = from_json(&to_json_pretty(&report).unwrap()).unwrap();
        assert_eq!(decoded.error_pct.map(f64::to_bits), report.error_pct.map(f64::to_bits));
        assert_eq!(decoded, report);
    }
}
