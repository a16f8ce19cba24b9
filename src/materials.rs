//! Synthetic stress-strain curves for demo data

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::curve::{MaterialLabel, SampleCurve};
use crate::error::{AnalysisError, AnalysisResult};

/// Largest accepted noise amplitude in MPa
pub const MAX_NOISE_AMPLITUDE: f64 = 1e6;

/// Parameters of a piecewise elastic / power-law plastic curve
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialProfile {
    /// Profile name
    pub name: String,
    /// Elastic modulus in MPa
    pub modulus: f64,
    /// Strain at the end of the linear segment
    pub threshold: f64,
    /// Hardening coefficient in MPa
    pub coefficient: f64,
    /// Hardening exponent
    pub exponent: f64,
    /// Last strain of the generated curve
    pub max_strain: f64,
}

impl MaterialProfile {
    /// Structural steel
    pub fn steel() -> Self {
        Self {
            name: "steel".to_string(),
            modulus: 200_000.0, // 200 GPa
            threshold: 0.00125, // 250 MPa
            coefficient: 550.0,
            exponent: 0.35,
            max_strain: 0.25,
        }
    }

    /// Aluminum alloy (6061-T6 like)
    pub fn aluminum() -> Self {
        Self {
            name: "aluminum".to_string(),
            modulus: 69_000.0,
            threshold: 0.004, // 276 MPa
            coefficient: 120.0,
            exponent: 0.3,
            max_strain: 0.12,
        }
    }

    /// Annealed copper
    pub fn copper() -> Self {
        Self {
            name: "copper".to_string(),
            modulus: 117_000.0,
            threshold: 0.0006, // 70 MPa
            coefficient: 330.0,
            exponent: 0.45,
            max_strain: 0.35,
        }
    }

    /// Profile for labels without a dedicated entry
    pub fn generic() -> Self {
        Self {
            name: "generic".to_string(),
            modulus: 150_000.0,
            threshold: 0.002,
            coefficient: 400.0,
            exponent: 0.4,
            max_strain: 0.2,
        }
    }

    /// Select the profile for a material label
    pub fn for_label(label: &MaterialLabel) -> Self {
        match label.normalized().as_str() {
            "steel" => Self::steel(),
            "aluminum" | "aluminium" => Self::aluminum(),
            "copper" => Self::copper(),
            _ => Self::generic(),
        }
    }

    /// Stress at a given strain
    pub fn stress_at(&self, strain: f64) -> f64 {
        if strain <= self.threshold {
            self.modulus * strain
        } else {
            let base = self.modulus * self.threshold;
            base + self.coefficient * (strain - self.threshold).powf(self.exponent)
        }
    }

    /// Generate a noiseless curve with `points` samples.
    ///
    /// A quarter of the samples cover the elastic segment so the modulus fit
    /// has enough points.
    pub fn generate(&self, points: usize) -> SampleCurve {
        let points = points.max(2);
        let elastic_points = (points / 4).max(1);
        let plastic_points = points - elastic_points;

        let mut curve = SampleCurve::default();
        for i in 0..elastic_points {
            let strain = self.threshold * i as f64 / elastic_points as f64;
            curve.push(strain, self.stress_at(strain));
        }
        let span = self.max_strain - self.threshold;
        for i in 0..plastic_points {
            let t = if plastic_points > 1 {
                i as f64 / (plastic_points - 1) as f64
            } else {
                1.0
            };
            let strain = self.threshold + span * t;
            curve.push(strain, self.stress_at(strain));
        }
        curve
    }

    /// Generate a curve with uniform stress noise of +/- `amplitude` MPa.
    /// The same seed gives the same curve.
    pub fn generate_noisy(
        &self,
        points: usize,
        amplitude: f64,
        seed: u64,
    ) -> AnalysisResult<SampleCurve> {
        let amplitude = amplitude.abs();
        if !amplitude.is_finite() || amplitude > MAX_NOISE_AMPLITUDE {
            return Err(AnalysisError::InvalidParameter(format!(
                "noise amplitude must be finite and at most {:e} MPa, got {}",
                MAX_NOISE_AMPLITUDE, amplitude
            )));
        }

        let clean = self.generate(points);
        let mut rng = StdRng::seed_from_u64(seed);
        Ok(SampleCurve::from_pairs(
            clean.strain().iter().zip(clean.stress()).map(|(&e, &s)| {
                let noise = if amplitude > 0.0 {
                    rng.random_range(-amplitude..=amplitude)
                } else {
                    0.0
                };
                (e, s + noise)
            }),
        ))
    }
}

impl Default for MaterialProfile {
    fn default() -> Self {
        Self::generic()
    }
}
