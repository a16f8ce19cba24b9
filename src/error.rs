//! Error types for the tensile analyzer

use thiserror::Error;

/// Main error type for curve analysis
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    #[error("Strain and stress lengths differ ({strain} vs {stress})")]
    LengthMismatch { strain: usize, stress: usize },

    #[error("Non-finite value in input: {0}")]
    NonFinite(String),

    #[error("Numeric failure: {0}")]
    NumericFailure(String),

    #[error("Render failed: {0}")]
    RenderFailure(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for analysis operations
pub type AnalysisResult<T> = Result<T, AnalysisError>;
