//! Per-session analysis context
//!
//! Holds the "current curve" of one user session: data is loaded from an
//! upload or a synthetic example, analyzed, and cleared. A session is a
//! plain value owned by its caller; nothing is shared between sessions.

use log::info;

use crate::analysis::AnalysisEngine;
use crate::chart::ChartRenderer;
use crate::curve::{MaterialLabel, SampleCurve};
use crate::error::{AnalysisError, AnalysisResult};
use crate::materials::MaterialProfile;
use crate::parser::{self, ParsedData};
use crate::report::{format_report, ReportMeta};
use crate::results::PropertyResult;

/// Points generated for synthetic example curves
pub const EXAMPLE_POINTS: usize = 200;

/// Output of one analysis run
#[derive(Debug, Clone)]
pub struct SessionReport {
    pub result: PropertyResult,
    /// PNG bytes
    pub chart: Vec<u8>,
    pub report: String,
}

/// Where the loaded curve came from
#[derive(Debug, Clone, PartialEq)]
pub enum CurveSource {
    Upload { filename: String },
    Example,
}

#[derive(Debug, Clone)]
struct LoadedCurve {
    curve: SampleCurve,
    label: MaterialLabel,
    source: CurveSource,
}

/// Analysis state of one session
#[derive(Debug, Clone, Default)]
pub struct AnalysisSession {
    engine: AnalysisEngine,
    renderer: ChartRenderer,
    loaded: Option<LoadedCurve>,
}

impl AnalysisSession {
    pub fn new(engine: AnalysisEngine, renderer: ChartRenderer) -> Self {
        Self {
            engine,
            renderer,
            loaded: None,
        }
    }

    /// Parse uploaded text and make it the current curve.
    ///
    /// Returns the parse details; fails only if no sample was found, in
    /// which case the previous curve is kept.
    pub fn load_data(
        &mut self,
        filename: &str,
        text: &str,
        label: MaterialLabel,
    ) -> AnalysisResult<ParsedData> {
        let parsed = parser::parse_text(text);
        if parsed.is_empty() {
            return Err(AnalysisError::InsufficientData(format!(
                "no numeric samples found in '{}'",
                filename
            )));
        }
        info!("Loaded {} samples from '{}'", parsed.curve.len(), filename);
        self.loaded = Some(LoadedCurve {
            curve: parsed.curve.clone(),
            label,
            source: CurveSource::Upload {
                filename: filename.to_string(),
            },
        });
        Ok(parsed)
    }

    /// Load a synthetic curve for the given material
    pub fn load_example(&mut self, label: MaterialLabel) -> &SampleCurve {
        let curve = MaterialProfile::for_label(&label).generate(EXAMPLE_POINTS);
        info!("Loaded synthetic '{}' curve", label);
        let loaded = self.loaded.insert(LoadedCurve {
            curve,
            label,
            source: CurveSource::Example,
        });
        &loaded.curve
    }

    /// Load a curve directly
    pub fn load_curve(&mut self, curve: SampleCurve, label: MaterialLabel, source: CurveSource) {
        self.loaded = Some(LoadedCurve {
            curve,
            label,
            source,
        });
    }

    pub fn curve(&self) -> Option<&SampleCurve> {
        self.loaded.as_ref().map(|l| &l.curve)
    }

    pub fn label(&self) -> Option<&MaterialLabel> {
        self.loaded.as_ref().map(|l| &l.label)
    }

    pub fn source(&self) -> Option<&CurveSource> {
        self.loaded.as_ref().map(|l| &l.source)
    }

    /// Analyze the current curve: properties, chart and text report
    pub fn analyze(&self) -> AnalysisResult<SessionReport> {
        let loaded = self
            .loaded
            .as_ref()
            .ok_or_else(|| AnalysisError::InsufficientData("no curve loaded".to_string()))?;
        let curve = &loaded.curve;

        let result = self.engine.compute_curve(curve);
        let chart = self.renderer.render(
            curve.strain(),
            curve.stress(),
            Some(&result),
            loaded.label.as_str(),
        );
        let filename = match &loaded.source {
            CurveSource::Upload { filename } => Some(filename.clone()),
            CurveSource::Example => None,
        };
        let meta = ReportMeta::now(loaded.label.clone(), filename, curve.len());
        let report = format_report(&result, &meta);

        Ok(SessionReport {
            result,
            chart,
            report,
        })
    }

    /// Drop the current curve
    pub fn clear(&mut self) {
        self.loaded = None;
    }
}
