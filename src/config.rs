//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.penguinstats.toml` files.

use crate::cli::OutputFormat;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the configuration file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = ".penguinstats.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Input settings.
    #[serde(default)]
    pub input: InputConfig,

    /// Report settings.
    #[serde(default)]
    pub report: ReportConfig,
}

/// Input data settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    /// Survey CSV to load.
    #[serde(default = "default_input")]
    pub path: PathBuf,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            path: default_input(),
        }
    }
}

fn default_input() -> PathBuf {
    PathBuf::from("penguins.csv")
}

/// Report output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Path of the short summary report.
    #[serde(default = "default_summary_output")]
    pub summary_output: PathBuf,

    /// Path of the comprehensive report.
    #[serde(default = "default_comprehensive_output")]
    pub comprehensive_output: PathBuf,

    /// Output format of the comprehensive report.
    #[serde(default)]
    pub format: OutputFormat,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            summary_output: default_summary_output(),
            comprehensive_output: default_comprehensive_output(),
            format: OutputFormat::default(),
        }
    }
}

fn default_summary_output() -> PathBuf {
    PathBuf::from("penguin_analysis_results.txt")
}

fn default_comprehensive_output() -> PathBuf {
    PathBuf::from("comprehensive_penguin_analysis.txt")
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from a default location such as
    /// [`CONFIG_FILE_NAME`] in the working directory.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default(default_path: &Path) -> Result<Option<Self>> {
        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// Only values given explicitly on the command line override the file.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(ref input) = args.input {
            self.input.path = input.clone();
        }
        if let Some(ref summary_output) = args.summary_output {
            self.report.summary_output = summary_output.clone();
        }
        if let Some(ref output) = args.output {
            self.report.comprehensive_output = output.clone();
        }
        if let Some(format) = args.format {
            self.report.format = format;
        }
    }

    /// Check settings that cannot be expressed by the types alone.
    pub fn validate(&self) -> Result<(), String> {
        if self.report.format == OutputFormat::Text
            && self.report.summary_output == self.report.comprehensive_output
        {
            return Err(format!(
                "Summary and comprehensive reports would both be written to {}",
                self.report.summary_output.display()
            ));
        }
        Ok(())
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}
