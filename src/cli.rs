//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation. Defaults live in [`crate::config`] so that a
//! `.penguinstats.toml` can supply them.

use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// PenguinStats - descriptive statistics for penguin survey data
///
/// Loads a survey CSV (one row per observed animal), counts species per
/// island, sexes per island with male:female ratios, and averages body
/// mass and bill length, then writes a summary and a comprehensive report.
///
/// Examples:
///   penguinstats
///   penguinstats data/penguins.csv --output full_report.txt
///   penguinstats data/penguins.csv --format json --output report.json
///   penguinstats --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Survey CSV file to analyze
    ///
    /// Defaults to penguins.csv in the current directory.
    #[arg(value_name = "INPUT", env = "PENGUINSTATS_INPUT")]
    pub input: Option<PathBuf>,

    /// Output file for the short summary report
    ///
    /// Defaults to penguin_analysis_results.txt. Ignored with --format json.
    #[arg(long, value_name = "FILE")]
    pub summary_output: Option<PathBuf>,

    /// Output file for the comprehensive report
    ///
    /// Defaults to comprehensive_penguin_analysis.txt.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format of the comprehensive report (text, json)
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .penguinstats.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long)]
    pub quiet: bool,

    /// Generate a default .penguinstats.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

/// Output format for the comprehensive report.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Plain text, plus the summary report (default)
    #[default]
    Text,
    /// JSON document with every aggregate
    Json,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        // Skip validation for --init-config
        if self.init_config {
            return Ok(());
        }

        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if let Some(ref input) = self.input {
            if input.as_os_str().is_empty() {
                return Err("Input path must not be empty".to_string());
            }
        }

        if let (Some(summary), Some(output)) = (&self.summary_output, &self.output) {
            if summary == output {
                return Err("--summary-output and --output must be different files".to_string());
            }
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}
