//! Lenient tokenizer for uploaded stress-strain text
//!
//! Accepts CSV, whitespace separated columns or loosely formatted logs.
//! Each line is handled on its own:
//!
//! - blank lines and lines starting with `#` or `//` are skipped;
//! - every numeric substring on the line is extracted;
//! - no numbers: the line is skipped (headers such as `Strain,Stress`);
//! - one number `v`: the sample is `(v, v * 200000)`;
//! - two or more: the first two are `(strain, stress)`.
//!
//! Parsing never fails; rejected lines are reported as skips.

use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;

use crate::curve::SampleCurve;

/// Stress synthesized per unit strain for single-column lines (MPa)
pub const SINGLE_COLUMN_MODULUS: f64 = 200_000.0;

const NUMBER_PATTERN: &str = r"[-+]?(?:\d+(?:\.\d*)?|\.\d+)(?:[eE][-+]?\d+)?";

fn number_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(NUMBER_PATTERN).expect("numeric token pattern is valid"))
}

/// Why a line produced no sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SkipReason {
    Blank,
    Comment,
    NoNumbers,
    /// A token was not a finite number (overflowing exponent etc.)
    Invalid,
}

/// Outcome of parsing one line
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum ParsedLine {
    Sample { strain: f64, stress: f64 },
    Skipped(SkipReason),
}

/// A skipped line with its 1-based line number
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SkippedLine {
    pub line: usize,
    pub reason: SkipReason,
}

/// Samples extracted from a text plus the lines that were ignored
#[derive(Debug, Clone, Default)]
pub struct ParsedData {
    pub curve: SampleCurve,
    pub skipped: Vec<SkippedLine>,
}

impl ParsedData {
    pub fn is_empty(&self) -> bool {
        self.curve.is_empty()
    }

    /// Lines skipped for a reason other than being blank or a comment
    pub fn rejected(&self) -> impl Iterator<Item = &SkippedLine> {
        self.skipped
            .iter()
            .filter(|s| !matches!(s.reason, SkipReason::Blank | SkipReason::Comment))
    }
}

/// Extract all numeric substrings of a line
pub fn numeric_tokens(line: &str) -> Vec<&str> {
    number_regex().find_iter(line).map(|m| m.as_str()).collect()
}

/// Parse a single line
pub fn parse_line(line: &str) -> ParsedLine {
    let line = line.trim();
    if line.is_empty() {
        return ParsedLine::Skipped(SkipReason::Blank);
    }
    if line.starts_with('#') || line.starts_with("//") {
        return ParsedLine::Skipped(SkipReason::Comment);
    }

    let values: Option<Vec<f64>> = numeric_tokens(line)
        .into_iter()
        .take(2)
        .map(|t| t.parse::<f64>().ok().filter(|v| v.is_finite()))
        .collect();

    match values.as_deref() {
        None => ParsedLine::Skipped(SkipReason::Invalid),
        Some([]) => ParsedLine::Skipped(SkipReason::NoNumbers),
        Some([strain]) => ParsedLine::Sample {
            strain: *strain,
            stress: strain * SINGLE_COLUMN_MODULUS,
        },
        Some([strain, stress, ..]) => ParsedLine::Sample {
            strain: *strain,
            stress: *stress,
        },
    }
}

/// Parse a whole text into a curve
pub fn parse_text(text: &str) -> ParsedData {
    let mut data = ParsedData::default();
    for (i, line) in text.lines().enumerate() {
        match parse_line(line) {
            ParsedLine::Sample { strain, stress } => data.curve.push(strain, stress),
            ParsedLine::Skipped(reason) => data.skipped.push(SkippedLine {
                line: i + 1,
                reason,
            }),
        }
    }
    log::debug!(
        "Parsed {} samples, skipped {} lines",
        data.curve.len(),
        data.skipped.len()
    );
    data
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_columns() {
        assert_eq!(
            parse_line("0.001, 200.5"),
            ParsedLine::Sample { strain: 0.001, stress: 200.5 }
        );
        assert_eq!(
            parse_line("  1e-3\t2.5E2  extra 7"),
            ParsedLine::Sample { strain: 0.001, stress: 250.0 }
        );
    }

    #[test]
    fn test_single_column_synthesizes_stress() {
        assert_eq!(
            parse_line("0.5"),
            ParsedLine::Sample { strain: 0.5, stress: 100_000.0 }
        );
    }

    #[test]
    fn test_skips() {
        assert_eq!(parse_line("   "), ParsedLine::Skipped(SkipReason::Blank));
        assert_eq!(parse_line("# 1 2"), ParsedLine::Skipped(SkipReason::Comment));
        assert_eq!(parse_line("// 1 2"), ParsedLine::Skipped(SkipReason::Comment));
        assert_eq!(
            parse_line("Strain,Stress"),
            ParsedLine::Skipped(SkipReason::NoNumbers)
        );
        assert_eq!(
            parse_line("1e999 5"),
            ParsedLine::Skipped(SkipReason::Invalid)
        );
    }

    #[test]
    fn test_negative_and_leading_dot() {
        assert_eq!(
            parse_line("-.5;+3"),
            ParsedLine::Sample { strain: -0.5, stress: 3.0 }
        );
    }

    #[test]
    fn test_parse_text_tracks_lines() {
        let text = "Strain,Stress\n# header\n0,0\n0.001,200\n\n0.002,400\n";
        let data = parse_text(text);
        assert_eq!(data.curve.len(), 3);
        assert_eq!(data.curve.stress(), &[0.0, 200.0, 400.0]);
        assert_eq!(data.skipped.len(), 3);
        let rejected: Vec<_> = data.rejected().collect();
        assert_eq!(rejected.len(), 1);
        assert_eq!(rejected[0].line, 1);
    }
}
