//! PenguinStats - descriptive statistics for penguin survey data
//!
//! A CLI tool that loads a survey CSV, aggregates species, sex and
//! measurement statistics, and writes human-readable reports.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Runtime error (invalid arguments, parse failure, write failure)
//!       or no usable data loaded

mod analysis;
mod cli;
mod config;
mod loader;
mod models;
mod report;

use anyhow::{Context, Result};
use chrono::Utc;
use cli::{Args, OutputFormat};
use config::{Config, CONFIG_FILE_NAME};
use models::{Report, ReportMetadata};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, error, info, warn};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    init_logging(&args);

    info!("PenguinStats v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    match run_report(args) {
        Ok(exit_code) => {
            std::process::exit(exit_code);
        }
        Err(e) => {
            error!("Analysis failed: {:#}", e);
            eprintln!("\n❌ Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

/// Handle --init-config: generate a default .penguinstats.toml.
fn handle_init_config() -> Result<()> {
    let path = Path::new(CONFIG_FILE_NAME);

    if path.exists() {
        eprintln!(
            "⚠️  {} already exists. Remove it first or edit it manually.",
            CONFIG_FILE_NAME
        );
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content)
        .with_context(|| format!("Failed to write {}", CONFIG_FILE_NAME))?;

    println!("✅ Created {} with default settings.", CONFIG_FILE_NAME);
    println!("   Edit it to change the input file, report paths and format.");
    Ok(())
}

/// Initialize logging based on verbosity settings.
///
/// `RUST_LOG` takes precedence over the command-line verbosity.
fn init_logging(args: &Args) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::default().add_directive(LevelFilter::from_level(args.log_level()).into())
    });

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

/// Resolve the configuration and run the workflow. Returns the exit code.
fn run_report(args: Args) -> Result<i32> {
    let mut config = load_config(&args, Path::new(CONFIG_FILE_NAME))?;
    config.merge_with_args(&args);
    config.validate().map_err(anyhow::Error::msg)?;

    execute(&config)
}

/// Load, aggregate and write the reports named by `config`.
///
/// Returns 1 without writing anything when no records could be loaded.
fn execute(config: &Config) -> Result<i32> {
    let start_time = Instant::now();

    // Step 1: Load the survey records
    let input = &config.input.path;
    println!("📥 Loading survey data: {}", input.display());

    let records = loader::load_records(input)
        .with_context(|| format!("Failed to load survey data from {}", input.display()))?;

    if records.is_empty() {
        error!("No records loaded from {}", input.display());
        eprintln!("\n❌ Error: Could not load penguin data.");
        return Ok(1);
    }

    println!("   Loaded {} penguin records.", records.len());

    // Step 2: Aggregate
    println!("\n🔬 Running analysis...");
    let summary = analysis::run_analysis(&records);

    println!("   Total penguins: {}", summary.total_count);
    println!(
        "   Analyzed {} species across multiple islands.",
        summary.species.len()
    );
    println!(
        "   Analyzed gender distribution across {} islands.",
        summary.sex_counts.len()
    );
    println!(
        "   Calculated body weight statistics for {} species.",
        summary.body_mass.len()
    );

    let report = Report {
        metadata: ReportMetadata {
            source: input.display().to_string(),
            generated_at: Utc::now(),
            record_count: records.len(),
        },
        summary,
    };

    // Step 3: Render and write the reports
    println!("\n📝 Generating reports...");

    match config.report.format {
        OutputFormat::Text => {
            let summary_text = report::generate_summary_report(&report.summary);
            save_report(&config.report.summary_output, &summary_text)?;
            println!(
                "   Summary report written to: {}",
                config.report.summary_output.display()
            );

            let comprehensive_text = report::generate_comprehensive_report(&report);
            save_report(&config.report.comprehensive_output, &comprehensive_text)?;
        }
        OutputFormat::Json => {
            let json = report::generate_json_report(&report)?;
            save_report(&config.report.comprehensive_output, &json)?;
        }
    }

    println!(
        "   Comprehensive report written to: {}",
        config.report.comprehensive_output.display()
    );

    let duration = start_time.elapsed().as_secs_f64();
    info!("Finished in {:.3}s", duration);
    println!("\n✅ Analysis complete!");

    Ok(0)
}

/// Write report content to a file.
fn save_report(path: &Path, content: &str) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create report file {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    report::write_report(&mut writer, content)
        .with_context(|| format!("Failed to write report to {}", path.display()))?;

    debug!("Wrote {} bytes to {}", content.len(), path.display());
    Ok(())
}

/// Load configuration from file or use defaults.
///
/// An explicit `--config` must load; a broken default file only warns.
fn load_config(args: &Args, default_path: &Path) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        info!("Loading config from: {}", config_path.display());
        return Config::load(config_path);
    }

    // Try default location
    match Config::load_default(default_path) {
        Ok(Some(config)) => {
            info!("Loaded default config from {}", default_path.display());
            Ok(config)
        }
        Ok(None) => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
        Err(e) => {
            warn!("Failed to load config: {:#}", e);
            Ok(Config::default())
        }
    }
}
