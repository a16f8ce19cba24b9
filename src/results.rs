//! Result types for curve analysis

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the five reported mechanical properties
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PropertyKind {
    /// Young's modulus from the elastic region
    ElasticModulus,
    /// 0.2% offset yield strength
    YieldStrength,
    /// Ultimate tensile strength (peak stress)
    TensileStrength,
    /// Strain at peak stress
    FractureStrain,
    /// Area under the curve
    Toughness,
}

impl PropertyKind {
    /// All kinds in report order
    pub const ALL: [PropertyKind; 5] = [
        PropertyKind::ElasticModulus,
        PropertyKind::YieldStrength,
        PropertyKind::TensileStrength,
        PropertyKind::FractureStrain,
        PropertyKind::Toughness,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            PropertyKind::ElasticModulus => "Elastic modulus",
            PropertyKind::YieldStrength => "Yield strength",
            PropertyKind::TensileStrength => "Tensile strength",
            PropertyKind::FractureStrain => "Fracture strain",
            PropertyKind::Toughness => "Toughness",
        }
    }

    /// Unit symbol; fracture strain is dimensionless
    pub fn unit(&self) -> &'static str {
        match self {
            PropertyKind::ElasticModulus => "GPa",
            PropertyKind::YieldStrength | PropertyKind::TensileStrength => "MPa",
            PropertyKind::FractureStrain => "-",
            PropertyKind::Toughness => "MJ/m³",
        }
    }

    /// Value substituted when the analysis fails
    pub fn fallback(&self) -> f64 {
        match self {
            PropertyKind::ElasticModulus => 200.0,
            PropertyKind::YieldStrength => 400.0,
            PropertyKind::TensileStrength => 500.0,
            PropertyKind::FractureStrain => 0.15,
            PropertyKind::Toughness => 80.0,
        }
    }

    /// Label with unit, e.g. "Yield strength (MPa)"
    pub fn display_name(&self) -> String {
        match self {
            PropertyKind::FractureStrain => self.label().to_string(),
            _ => format!("{} ({})", self.label(), self.unit()),
        }
    }
}

impl fmt::Display for PropertyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Whether the values were computed or substituted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ResultOrigin {
    Computed,
    Fallback { reason: String },
}

/// Mechanical properties of a specimen.
///
/// Always fully populated and every value is non-negative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyResult {
    /// Elastic modulus in GPa
    pub elastic_modulus: f64,
    /// Yield strength in MPa
    pub yield_strength: f64,
    /// Tensile strength in MPa
    pub tensile_strength: f64,
    /// Fracture strain (dimensionless)
    pub fracture_strain: f64,
    /// Toughness in MJ/m³
    pub toughness: f64,
    /// Computed or fallback
    pub origin: ResultOrigin,
}

impl PropertyResult {
    /// Build a computed result, clamping each value at zero
    pub fn computed(
        elastic_modulus: f64,
        yield_strength: f64,
        tensile_strength: f64,
        fracture_strain: f64,
        toughness: f64,
    ) -> Self {
        Self {
            elastic_modulus: elastic_modulus.max(0.0),
            yield_strength: yield_strength.max(0.0),
            tensile_strength: tensile_strength.max(0.0),
            fracture_strain: fracture_strain.max(0.0),
            toughness: toughness.max(0.0),
            origin: ResultOrigin::Computed,
        }
    }

    /// The fixed fallback set
    pub fn fallback(reason: impl Into<String>) -> Self {
        Self {
            elastic_modulus: PropertyKind::ElasticModulus.fallback(),
            yield_strength: PropertyKind::YieldStrength.fallback(),
            tensile_strength: PropertyKind::TensileStrength.fallback(),
            fracture_strain: PropertyKind::FractureStrain.fallback(),
            toughness: PropertyKind::Toughness.fallback(),
            origin: ResultOrigin::Fallback {
                reason: reason.into(),
            },
        }
    }

    pub fn get(&self, kind: PropertyKind) -> f64 {
        match kind {
            PropertyKind::ElasticModulus => self.elastic_modulus,
            PropertyKind::YieldStrength => self.yield_strength,
            PropertyKind::TensileStrength => self.tensile_strength,
            PropertyKind::FractureStrain => self.fracture_strain,
            PropertyKind::Toughness => self.toughness,
        }
    }

    /// (kind, value) pairs in report order
    pub fn entries(&self) -> [(PropertyKind, f64); 5] {
        PropertyKind::ALL.map(|kind| (kind, self.get(kind)))
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self.origin, ResultOrigin::Fallback { .. })
    }

    pub fn fallback_reason(&self) -> Option<&str> {
        match &self.origin {
            ResultOrigin::Fallback { reason } => Some(reason),
            ResultOrigin::Computed => None,
        }
    }
}
