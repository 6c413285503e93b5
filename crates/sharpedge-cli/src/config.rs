//! Pipeline configuration for the CLI.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use sharpedge_adjusters::{AdjusterRegistry, AdjusterSettings};
use sharpedge_gatekeeper::{GateConfig, Gatekeeper};
use std::fs;
use std::path::Path;

/// Everything the pipeline needs, loadable from one TOML file.
///
/// Every section is optional and falls back to the baseline defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Gate thresholds and penalty table
    pub gate: GateConfig,

    /// Adjuster overrides
    pub adjusters: AdjusterSettings,

    /// Output settings
    pub output: Settings,
}

/// Output settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet (minimal) format
    Quiet,
}

impl From<crate::cli::CliFormat> for OutputFormat {
    fn from(format: crate::cli::CliFormat) -> Self {
        match format {
            crate::cli::CliFormat::Table => OutputFormat::Table,
            crate::cli::CliFormat::Json => OutputFormat::Json,
            crate::cli::CliFormat::Quiet => OutputFormat::Quiet,
        }
    }
}

impl PipelineConfig {
    /// Load and validate a configuration file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&contents)?;
        tracing::info!(path = %path.display(), "Loaded pipeline configuration");
        Ok(config)
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: PipelineConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a path if given, otherwise use the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Validate the gate and every adjuster before anything is evaluated.
    pub fn validate(&self) -> Result<()> {
        self.gate.validate()?;
        AdjusterRegistry::from_settings(self.adjusters.clone())?;
        Ok(())
    }

    /// Build the gatekeeper for this configuration.
    pub fn gatekeeper(&self) -> Result<Gatekeeper> {
        Ok(Gatekeeper::new(self.gate.clone())?)
    }

    /// Build the adjuster registry for this configuration.
    pub fn registry(&self) -> Result<AdjusterRegistry> {
        Ok(AdjusterRegistry::from_settings(self.adjusters.clone())?)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}
