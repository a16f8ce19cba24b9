//! Tensile Analyzer - mechanical properties from stress-strain curves
//!
//! This library derives standard tensile test metrics from measured
//! stress-strain data:
//! - Elastic modulus (linear fit of the elastic region)
//! - Yield strength (0.2% offset method)
//! - Tensile strength and fracture strain (peak stress)
//! - Toughness (area under the curve)
//!
//! Stress is smoothed with a Savitzky-Golay filter before analysis. Any
//! failure yields a fixed fallback property set, never a partial result.
//!
//! ## Example
//! ```rust
//! use tensile_analyzer::prelude::*;
//!
//! let curve = MaterialProfile::steel().generate(200);
//!
//! let engine = AnalysisEngine::new(AnalysisOptions::default());
//! let result = engine.compute(curve.strain(), curve.stress());
//! assert!(!result.is_fallback());
//!
//! let png = ChartRenderer::default().render(
//!     curve.strain(),
//!     curve.stress(),
//!     Some(&result),
//!     "steel",
//! );
//! assert!(!png.is_empty());
//! ```

pub mod analysis;
pub mod chart;
pub mod config;
pub mod curve;
pub mod error;
pub mod materials;
pub mod math;
pub mod parser;
pub mod report;
pub mod results;
pub mod session;

// Re-export common types
pub mod prelude {
    pub use crate::analysis::{AnalysisEngine, AnalysisOptions};
    pub use crate::chart::{ChartOptions, ChartPlan, ChartRenderer};
    pub use crate::config::Config;
    pub use crate::curve::{MaterialLabel, SampleCurve};
    pub use crate::error::{AnalysisError, AnalysisResult};
    pub use crate::materials::MaterialProfile;
    pub use crate::parser::{parse_text, ParsedData};
    pub use crate::report::{format_report, ReportMeta};
    pub use crate::results::{PropertyKind, PropertyResult, ResultOrigin};
    pub use crate::session::{AnalysisSession, SessionReport};
}
