//! Analysis options and the property engine

pub mod engine;

use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, AnalysisResult};

pub use engine::AnalysisEngine;

/// Options for the property engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisOptions {
    /// Apply Savitzky-Golay smoothing to stress
    pub smoothing: bool,
    /// Smoothing only runs when the sample count exceeds this
    pub smoothing_min_samples: usize,
    /// Largest smoothing window (shrunk to the sample count, forced odd)
    pub smoothing_window: usize,
    /// Polynomial order of the smoothing filter
    pub smoothing_polyorder: usize,
    /// Upper strain of the elastic region
    pub elastic_limit: f64,
    /// Minimum elastic samples needed for a modulus fit
    pub min_elastic_points: usize,
    /// Elastic samples used for the fit (taken from the start)
    pub max_elastic_points: usize,
    /// Modulus used when the elastic region is too sparse (GPa)
    pub default_modulus: f64,
    /// Strain offset of the yield line (0.2%)
    pub offset_strain: f64,
    /// Yield as a fraction of peak stress when nothing lies past the offset
    pub yield_fallback_ratio: f64,
    /// Stress units per GPa, 1e3 for MPa input
    pub modulus_scale: f64,
    /// Divisor turning the stress-strain integral into MJ/m³
    pub toughness_scale: f64,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            smoothing: true,
            smoothing_min_samples: 10,
            smoothing_window: 11,
            smoothing_polyorder: 3,
            elastic_limit: 0.002,
            min_elastic_points: 6,
            max_elastic_points: 10,
            default_modulus: 200.0,
            offset_strain: 0.002,
            yield_fallback_ratio: 0.8,
            modulus_scale: 1e3,
            toughness_scale: 1e3,
        }
    }
}

impl AnalysisOptions {
    /// Options for stress given in Pa instead of MPa
    pub fn pascal_input() -> Self {
        Self {
            modulus_scale: 1e9,
            toughness_scale: 1e6,
            ..Self::default()
        }
    }

    /// Disable smoothing
    pub fn without_smoothing(mut self) -> Self {
        self.smoothing = false;
        self
    }

    /// Set the toughness divisor
    pub fn with_toughness_scale(mut self, scale: f64) -> Self {
        self.toughness_scale = scale;
        self
    }

    /// Set the stress units per GPa
    pub fn with_modulus_scale(mut self, scale: f64) -> Self {
        self.modulus_scale = scale;
        self
    }

    /// Set the elastic region limit
    pub fn with_elastic_limit(mut self, limit: f64) -> Self {
        self.elastic_limit = limit;
        self
    }

    /// Check that the options describe a usable pipeline
    pub fn validate(&self) -> AnalysisResult<()> {
        let positive = [
            ("modulus_scale", self.modulus_scale),
            ("toughness_scale", self.toughness_scale),
            ("default_modulus", self.default_modulus),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(AnalysisError::Config(format!(
                    "{} must be positive, got {}",
                    name, value
                )));
            }
        }
        if !self.elastic_limit.is_finite() || !self.offset_strain.is_finite() {
            return Err(AnalysisError::Config(
                "strain limits must be finite".to_string(),
            ));
        }
        if self.smoothing_window < 3 {
            return Err(AnalysisError::Config(format!(
                "smoothing_window must be at least 3, got {}",
                self.smoothing_window
            )));
        }
        if self.smoothing_polyorder >= self.smoothing_window {
            return Err(AnalysisError::Config(format!(
                "smoothing_polyorder ({}) must be below smoothing_window ({})",
                self.smoothing_polyorder, self.smoothing_window
            )));
        }
        if self.min_elastic_points < 2 {
            return Err(AnalysisError::Config(
                "min_elastic_points must be at least 2".to_string(),
            ));
        }
        if self.max_elastic_points < self.min_elastic_points {
            return Err(AnalysisError::Config(format!(
                "max_elastic_points ({}) is below min_elastic_points ({})",
                self.max_elastic_points, self.min_elastic_points
            )));
        }
        Ok(())
    }
}
