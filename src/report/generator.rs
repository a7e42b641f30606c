//! Text and JSON report generation.
//!
//! Reports are rendered to strings from an [`AnalysisSummary`]; writing
//! them anywhere goes through [`write_report`], which takes any
//! [`std::io::Write`] sink.

use crate::models::{
    format_decimal, AnalysisSummary, Average, BillLengths, GroupCount, RatioResult, Report,
    ReportMetadata, Sex, SpeciesDistribution, WeightStats,
};
use anyhow::Result;
use std::io::Write;

const SUMMARY_WIDTH: usize = 60;
const COMPREHENSIVE_WIDTH: usize = 70;

/// Generate the short summary report: sex distribution and body mass.
pub fn generate_summary_report(summary: &AnalysisSummary) -> String {
    let mut output = String::new();
    let rule = "=".repeat(SUMMARY_WIDTH);

    output.push_str(&format!("{rule}\nPenguin Analysis Results\n{rule}\n\n"));

    output.push_str("Gender distribution by island:\n");
    output.push_str(&format!("{}\n", "-".repeat(30)));
    for (island, counts) in &summary.sex_counts {
        output.push_str(&format!("Island: {}\n", island));
        output.push_str(&format!("  Males: {}\n", counts.male));
        output.push_str(&format!("  Females: {}\n", counts.female));
        output.push_str(&format!(
            "  Male:Female Ratio: {}\n",
            ratio_for(&summary.ratios, island)
        ));
    }

    output.push_str(&format!("\n{rule}\n"));
    output.push_str(&generate_body_mass_section(&summary.body_mass, 30));

    output.push_str(&format!("\n{rule}\nAnalysis complete.\n"));

    output
}

/// Generate the comprehensive report with every section.
pub fn generate_comprehensive_report(report: &Report) -> String {
    let mut output = String::new();
    let rule = "=".repeat(COMPREHENSIVE_WIDTH);
    let summary = &report.summary;

    output.push_str(&format!(
        "{rule}\nCOMPREHENSIVE PENGUIN DATA ANALYSIS\n{rule}\n\n"
    ));

    output.push_str(&generate_overview_section(&report.metadata, summary));

    output.push_str(&format!("{rule}\n"));
    output.push_str(&generate_species_section(&summary.species));

    output.push_str(&format!("\n{rule}\n"));
    output.push_str(&generate_sex_section(&summary.sex_counts, &summary.ratios));

    output.push_str(&format!("\n{rule}\n"));
    output.push_str(&generate_body_mass_section(&summary.body_mass, 40));

    if !summary.bill_length.is_empty() {
        output.push_str(&format!("\n{rule}\n"));
        output.push_str(&generate_bill_length_section(&summary.bill_length));
    }

    output.push_str(&format!(
        "\n{rule}\nAnalysis complete. Data processed successfully!\n{rule}\n"
    ));

    output
}

/// Generate the dataset overview section.
fn generate_overview_section(metadata: &ReportMetadata, summary: &AnalysisSummary) -> String {
    let mut section = String::new();

    section.push_str("DATASET OVERVIEW\n");
    section.push_str(&format!("{}\n", "-".repeat(40)));
    section.push_str(&format!("Source file: {}\n", metadata.source));
    section.push_str(&format!(
        "Generated: {}\n",
        metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    section.push_str(&format!("Total number of penguins: {}\n", summary.total_count));
    section.push_str(&format!("Number of species: {}\n", summary.species.len()));
    section.push_str(&format!("Number of islands: {}\n", summary.sex_counts.len()));
    section.push('\n');

    section
}

/// Generate the species distribution section.
fn generate_species_section(species: &SpeciesDistribution) -> String {
    let mut section = String::new();

    section.push_str("SPECIES DISTRIBUTION BY ISLAND\n");
    section.push_str(&format!("{}\n", "-".repeat(40)));

    for (i, (name, info)) in species.iter().enumerate() {
        section.push_str(&format!("\nSpecies {}: {}\n", i + 1, name));
        section.push_str(&format!("  Total count: {}\n", info.total));
        section.push_str("  Island distribution:\n");
        for (island, count) in &info.islands {
            let percentage = *count as f64 / info.total as f64 * 100.0;
            section.push_str(&format!("    - {}: {} ({:.1}%)\n", island, count, percentage));
        }
    }

    section
}

/// Generate the per-island sex distribution section.
fn generate_sex_section(counts: &GroupCount, ratios: &RatioResult) -> String {
    let mut section = String::new();

    section.push_str("GENDER DISTRIBUTION BY ISLAND\n");
    section.push_str(&format!("{}\n", "-".repeat(40)));

    for (island, c) in counts {
        section.push_str(&format!("\nIsland: {}\n", island));
        section.push_str(&format!("  Males: {}\n", c.male));
        section.push_str(&format!("  Females: {}\n", c.female));
        section.push_str(&format!("  Total: {}\n", c.total()));
        section.push_str(&format!(
            "  Male:Female Ratio: {}\n",
            ratio_for(ratios, island)
        ));
    }

    section
}

/// Generate the average body mass section.
///
/// Only the exact `male` and `female` groups are listed, males first.
fn generate_body_mass_section(weights: &WeightStats, rule_width: usize) -> String {
    let mut section = String::new();

    section.push_str("AVERAGE BODY WEIGHT (g) BY SPECIES, ISLAND, AND GENDER\n");
    section.push_str(&format!("{}\n", "-".repeat(rule_width)));

    for (species, islands) in weights {
        section.push_str(&format!("\n{}:\n", species));
        for (island, sexes) in islands {
            section.push_str(&format!("  {}:\n", island));
            for sex in [Sex::Male, Sex::Female] {
                if let Some(average) = sexes.get(sex_key(sex)) {
                    match average {
                        Average::Value(v) => section
                            .push_str(&format!("    {}: {} g\n", sex, format_decimal(*v))),
                        Average::NoData => section.push_str(&format!("    {}: {}\n", sex, average)),
                    }
                }
            }
        }
    }

    section
}

/// Generate the average bill length section.
fn generate_bill_length_section(lengths: &BillLengths) -> String {
    let mut section = String::new();

    section.push_str("AVERAGE BILL LENGTH (mm) BY SPECIES\n");
    section.push_str(&format!("{}\n", "-".repeat(40)));

    for (species, length) in lengths {
        section.push_str(&format!("  {}: {} mm\n", species, format_decimal(*length)));
    }

    section
}

fn ratio_for(ratios: &RatioResult, island: &str) -> String {
    ratios
        .get(island)
        .map(ToString::to_string)
        .unwrap_or_else(|| "N/A".to_string())
}

fn sex_key(sex: Sex) -> &'static str {
    match sex {
        Sex::Male => "male",
        Sex::Female => "female",
    }
}

/// Generate a JSON report.
pub fn generate_json_report(report: &Report) -> Result<String> {
    serde_json::to_string_pretty(report).map_err(Into::into)
}

/// Write rendered report content to a sink.
pub fn write_report<W: Write>(sink: &mut W, content: &str) -> Result<()> {
    sink.write_all(content.as_bytes())?;
    sink.flush()?;
    Ok(())
}
