//! Plain-text analysis report

use chrono::{DateTime, Local};
use std::fmt::Write;

use crate::curve::MaterialLabel;
use crate::results::{PropertyResult, ResultOrigin};

/// Metadata printed in the report header
#[derive(Debug, Clone)]
pub struct ReportMeta {
    pub label: MaterialLabel,
    /// Name of the uploaded file, `None` for synthetic data
    pub filename: Option<String>,
    pub timestamp: DateTime<Local>,
    pub samples: usize,
}

impl ReportMeta {
    /// Metadata stamped with the current local time
    pub fn now(label: MaterialLabel, filename: Option<String>, samples: usize) -> Self {
        Self {
            label,
            filename,
            timestamp: Local::now(),
            samples,
        }
    }
}

/// Render the fixed report layout
pub fn format_report(result: &PropertyResult, meta: &ReportMeta) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail
    let _ = writeln!(out, "=== Material Mechanical Property Report ===");
    let _ = writeln!(out);
    let _ = writeln!(out, "Material: {}", meta.label);
    let _ = writeln!(
        out,
        "Source file: {}",
        meta.filename.as_deref().unwrap_or("(synthetic example)")
    );
    let _ = writeln!(
        out,
        "Generated: {}",
        meta.timestamp.format("%Y-%m-%d %H:%M:%S")
    );
    let _ = writeln!(out, "Samples: {}", meta.samples);
    match &result.origin {
        ResultOrigin::Computed => {
            let _ = writeln!(out, "Result: computed");
        }
        ResultOrigin::Fallback { reason } => {
            let _ = writeln!(out, "Result: fallback values ({})", reason);
        }
    }
    let _ = writeln!(out);
    for (kind, value) in result.entries() {
        let _ = writeln!(out, "{}: {:.2}", kind.display_name(), value);
    }
    out
}
