//! Mechanical property engine
//!
//! Pipeline: smooth stress, fit the elastic modulus, intersect the 0.2%
//! offset line for yield, take the peak for tensile strength and fracture
//! strain, integrate for toughness. Each stage returns an
//! [`AnalysisResult`]; only [`AnalysisEngine::compute`] collapses a failure
//! into the fallback result.

use log::{debug, warn};

use super::AnalysisOptions;
use crate::curve::SampleCurve;
use crate::error::{AnalysisError, AnalysisResult};
use crate::math::{self, savgol_filter};
use crate::results::PropertyResult;

/// Stateless stress-strain analyzer
#[derive(Debug, Clone, Default)]
pub struct AnalysisEngine {
    options: AnalysisOptions,
}

impl AnalysisEngine {
    pub fn new(options: AnalysisOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &AnalysisOptions {
        &self.options
    }

    /// Compute properties, substituting the fallback set on any failure
    pub fn compute(&self, strain: &[f64], stress: &[f64]) -> PropertyResult {
        match self.try_compute(strain, stress) {
            Ok(result) => result,
            Err(e) => {
                warn!("Analysis failed, using fallback properties: {}", e);
                PropertyResult::fallback(e.to_string())
            }
        }
    }

    pub fn compute_curve(&self, curve: &SampleCurve) -> PropertyResult {
        self.compute(curve.strain(), curve.stress())
    }

    /// Compute properties, reporting the first failure
    pub fn try_compute(&self, strain: &[f64], stress: &[f64]) -> AnalysisResult<PropertyResult> {
        check_input(strain, stress)?;
        let opts = &self.options;

        let stress_smooth = self.smooth(stress)?;
        let modulus = self.elastic_modulus(strain, &stress_smooth)?;
        let yield_strength = self.yield_strength(strain, &stress_smooth, modulus)?;

        let peak_idx = math::argmax(&stress_smooth)
            .ok_or_else(|| AnalysisError::InsufficientData("no stress samples".to_string()))?;
        let tensile_strength = stress_smooth[peak_idx];
        let fracture_strain = strain[peak_idx];
        let toughness = math::trapezoid(&stress_smooth, strain) / opts.toughness_scale;

        let values = [
            ("elastic modulus", modulus),
            ("yield strength", yield_strength),
            ("tensile strength", tensile_strength),
            ("fracture strain", fracture_strain),
            ("toughness", toughness),
        ];
        for (name, value) in values {
            if !value.is_finite() {
                return Err(AnalysisError::NumericFailure(format!(
                    "{} is not finite",
                    name
                )));
            }
        }

        debug!(
            "E={:.3} GPa, Rp0.2={:.3} MPa, Rm={:.3} MPa, eps_f={:.5}, U={:.5}",
            modulus, yield_strength, tensile_strength, fracture_strain, toughness
        );

        Ok(PropertyResult::computed(
            modulus,
            yield_strength,
            tensile_strength,
            fracture_strain,
            toughness,
        ))
    }

    /// Savitzky-Golay smoothed stress, or the raw stress for short curves
    pub fn smooth(&self, stress: &[f64]) -> AnalysisResult<Vec<f64>> {
        let opts = &self.options;
        let n = stress.len();
        if !opts.smoothing || n <= opts.smoothing_min_samples {
            return Ok(stress.to_vec());
        }

        let mut window = opts.smoothing_window.min(n);
        if window % 2 == 0 {
            window = window.saturating_sub(1);
        }
        if window < 3 || window <= opts.smoothing_polyorder {
            debug!("Skipping smoothing, window {} too small", window);
            return Ok(stress.to_vec());
        }

        debug!(
            "Smoothing {} samples (window {}, order {})",
            n, window, opts.smoothing_polyorder
        );
        savgol_filter(stress, window, opts.smoothing_polyorder)
    }

    /// Elastic modulus in GPa from a linear fit of the elastic region
    pub fn elastic_modulus(&self, strain: &[f64], stress_smooth: &[f64]) -> AnalysisResult<f64> {
        let opts = &self.options;
        let elastic: Vec<usize> = strain
            .iter()
            .enumerate()
            .filter(|&(_, &e)| e <= opts.elastic_limit)
            .map(|(i, _)| i)
            .collect();

        if elastic.len() < opts.min_elastic_points {
            debug!(
                "{} elastic samples, using default modulus {} GPa",
                elastic.len(),
                opts.default_modulus
            );
            return Ok(opts.default_modulus);
        }

        let (x, y): (Vec<f64>, Vec<f64>) = elastic
            .iter()
            .take(opts.max_elastic_points)
            .map(|&i| (strain[i], stress_smooth[i]))
            .unzip();

        let coefficients = math::polyfit(&x, &y, 1)?;
        Ok(coefficients[1] / opts.modulus_scale)
    }

    /// Yield strength by the offset method
    pub fn yield_strength(
        &self,
        strain: &[f64],
        stress_smooth: &[f64],
        modulus: f64,
    ) -> AnalysisResult<f64> {
        let opts = &self.options;
        let slope = modulus * opts.modulus_scale;

        let mut best: Option<(usize, f64)> = None;
        for (i, (&e, &s)) in strain.iter().zip(stress_smooth).enumerate() {
            if e <= opts.offset_strain {
                continue;
            }
            let diff = (s - slope * (e - opts.offset_strain)).abs();
            match best {
                Some((_, d)) if diff >= d => {}
                _ => best = Some((i, diff)),
            }
        }

        match best {
            Some((i, _)) => Ok(stress_smooth[i]),
            None => {
                let peak = math::max_value(stress_smooth).ok_or_else(|| {
                    AnalysisError::InsufficientData("no stress samples".to_string())
                })?;
                debug!("No samples past the offset strain, yield from peak");
                Ok(peak * opts.yield_fallback_ratio)
            }
        }
    }
}

fn check_input(strain: &[f64], stress: &[f64]) -> AnalysisResult<()> {
    if strain.len() != stress.len() {
        return Err(AnalysisError::LengthMismatch {
            strain: strain.len(),
            stress: stress.len(),
        });
    }
    if strain.is_empty() {
        return Err(AnalysisError::InsufficientData("curve has no samples".to_string()));
    }
    if let Some(i) = strain.iter().position(|v| !v.is_finite()) {
        return Err(AnalysisError::NonFinite(format!("strain[{}]", i)));
    }
    if let Some(i) = stress.iter().position(|v| !v.is_finite()) {
        return Err(AnalysisError::NonFinite(format!("stress[{}]", i)));
    }
    Ok(())
}
