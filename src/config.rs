//! TOML configuration
//!
//! ```toml
//! [analysis]
//! toughness_scale = 1000.0
//! elastic_limit = 0.002
//!
//! [chart]
//! width = 1080
//! height = 600
//! ```
//!
//! Every key is optional; missing keys take their defaults.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::analysis::AnalysisOptions;
use crate::chart::ChartOptions;
use crate::error::{AnalysisError, AnalysisResult};

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub analysis: AnalysisOptions,
    pub chart: ChartOptions,
}

impl Config {
    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> AnalysisResult<Self> {
        let cfg: Config =
            toml::from_str(content).map_err(|e| AnalysisError::Config(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn to_toml_string(&self) -> AnalysisResult<String> {
        toml::to_string_pretty(self).map_err(|e| AnalysisError::Config(e.to_string()))
    }

    pub fn validate(&self) -> AnalysisResult<()> {
        self.analysis.validate()?;
        self.chart.validate()
    }

    /// Write the configuration to a file
    pub fn save(&self, path: &Path) -> AnalysisResult<()> {
        fs::write(path, self.to_toml_string()?)?;
        Ok(())
    }
}

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> AnalysisResult<Config> {
    let content = fs::read_to_string(path)?;
    let cfg = Config::from_toml_str(&content)?;
    log::info!("Loaded configuration from {}", path.display());
    Ok(cfg)
}

/// Load configuration from `path` if given, defaults otherwise
pub fn load_or_default(path: Option<&Path>) -> AnalysisResult<Config> {
    match path {
        Some(p) => load_config(p),
        None => Ok(Config::default()),
    }
}
