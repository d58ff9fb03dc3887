//! Recognition confidence in the closed interval [0, 1]

use std::fmt;

use serde::{Deserialize, Serialize};

/// A probability in `[0, 1]`
///
/// Construction clamps out-of-range values and maps NaN to zero, so every
/// value that reaches a response is a valid probability.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct Confidence(f64);

impl Confidence {
    /// Create a confidence, clamping into `[0, 1]`
    #[must_use]
    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            return Self(0.0);
        }
        Self(value.clamp(0.0, 1.0))
    }

    /// Create a confidence from a percentage (`0..=100`)
    #[must_use]
    pub fn from_percent(percent: f64) -> Self {
        Self::new(percent / 100.0)
    }

    /// The probability value
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }
}

impl From<f64> for Confidence {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl From<Confidence> for f64 {
    fn from(value: Confidence) -> Self {
        value.0
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_in_range_values() {
        assert!((Confidence::new(0.42).value() - 0.42).abs() < f64::EPSILON);
    }

    #[test]
    fn clamps_out_of_range_values() {
        assert!((Confidence::new(1.7).value() - 1.0).abs() < f64::EPSILON);
        assert!(Confidence::new(-0.3).value().abs() < f64::EPSILON);
    }

    #[test]
    fn nan_becomes_zero() {
        assert!(Confidence::new(f64::NAN).value().abs() < f64::EPSILON);
    }

    #[test]
    fn from_percent_scales() {
        assert!((Confidence::from_percent(96.5).value() - 0.965).abs() < 1e-9);
        assert!((Confidence::from_percent(140.0).value() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn serializes_as_number() {
        let json = serde_json::to_string(&Confidence::new(0.5)).unwrap();
        assert_eq!(json, "0.5");
    }

    #[test]
    fn display_uses_three_decimals() {
        assert_eq!(Confidence::new(0.12345).to_string(), "0.123");
    }
}
