//! Measured stress-strain curves and material labels

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{AnalysisError, AnalysisResult};

/// A measured stress-strain curve.
///
/// Strain is dimensionless and stress is in MPa. Samples are kept in
/// acquisition order; neither sequence has to be monotonic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SampleCurve {
    strain: Vec<f64>,
    stress: Vec<f64>,
}

impl SampleCurve {
    /// Create a curve from two equal-length sequences
    pub fn new(strain: Vec<f64>, stress: Vec<f64>) -> AnalysisResult<Self> {
        if strain.len() != stress.len() {
            return Err(AnalysisError::LengthMismatch {
                strain: strain.len(),
                stress: stress.len(),
            });
        }
        Ok(Self { strain, stress })
    }

    /// Create a curve from (strain, stress) pairs
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        let (strain, stress) = pairs.into_iter().unzip();
        Self { strain, stress }
    }

    /// Append a single sample
    pub fn push(&mut self, strain: f64, stress: f64) {
        self.strain.push(strain);
        self.stress.push(stress);
    }

    pub fn strain(&self) -> &[f64] {
        &self.strain
    }

    pub fn stress(&self) -> &[f64] {
        &self.stress
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.strain.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strain.is_empty()
    }
}

/// Free-form material tag such as "steel" or "aluminum".
///
/// Only selects a synthetic curve profile and annotates titles; it has no
/// influence on the analysis itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MaterialLabel(String);

impl MaterialLabel {
    pub fn new(label: &str) -> Self {
        Self(label.trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Lowercase form used for profile lookup
    pub fn normalized(&self) -> String {
        self.0.to_lowercase()
    }
}

impl Default for MaterialLabel {
    fn default() -> Self {
        Self::new("unknown")
    }
}

impl fmt::Display for MaterialLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MaterialLabel {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}
