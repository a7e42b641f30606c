//! Data models for the survey analyzer.
//!
//! This module contains the parsed observation record and every
//! aggregate structure handed from the analysis layer to the report layer.

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// A single parsed observation row.
///
/// Every schema field is always present: categorical fields hold an empty
/// string when the cell was blank or `NA`, numeric fields hold `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Record {
    /// Species name (e.g. "Adelie").
    pub species: String,
    /// Island where the animal was observed.
    pub island: String,
    /// Bill length in millimetres.
    pub bill_length_mm: Option<f64>,
    /// Bill depth in millimetres.
    pub bill_depth_mm: Option<f64>,
    /// Flipper length in millimetres.
    pub flipper_length_mm: Option<f64>,
    /// Body mass in grams.
    pub body_mass_g: Option<f64>,
    /// Recorded sex, verbatim (usually "male" or "female").
    pub sex: String,
    /// Survey year.
    pub year: Option<i32>,
    /// Any other named column, kept as a categorical attribute.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, String>,
}

/// Sex of an animal, normalized case-insensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    /// Parse a raw sex value. Anything other than male/female is `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.eq_ignore_ascii_case("male") {
            Some(Sex::Male)
        } else if raw.eq_ignore_ascii_case("female") {
            Some(Sex::Female)
        } else {
            None
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sex::Male => write!(f, "Male"),
            Sex::Female => write!(f, "Female"),
        }
    }
}

/// Male and female counts for one island.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SexCounts {
    pub male: usize,
    pub female: usize,
}

impl SexCounts {
    /// Total of both known sexes.
    pub fn total(&self) -> usize {
        self.male + self.female
    }
}

/// Island -> male/female counts.
pub type GroupCount = BTreeMap<String, SexCounts>;

/// Outcome of a male:female ratio computation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Ratio {
    /// Male count divided by female count, rounded to 2 decimals.
    Value(f64),
    /// Both counts are zero.
    NoData,
    /// Female count is zero but male count is not.
    NoFemales,
}

impl fmt::Display for Ratio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ratio::Value(v) => write!(f, "{}", format_decimal(*v)),
            Ratio::NoData => write!(f, "No data"),
            Ratio::NoFemales => write!(f, "No females"),
        }
    }
}

impl Serialize for Ratio {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Ratio::Value(v) => serializer.serialize_f64(*v),
            other => serializer.serialize_str(&other.to_string()),
        }
    }
}

/// Island -> ratio outcome.
pub type RatioResult = BTreeMap<String, Ratio>;

/// Averaged measurement for one group.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Average {
    /// Arithmetic mean rounded to 2 decimals.
    Value(f64),
    /// The group was created but holds no measurements.
    NoData,
}

impl fmt::Display for Average {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Average::Value(v) => write!(f, "{}", format_decimal(*v)),
            Average::NoData => write!(f, "No data"),
        }
    }
}

impl Serialize for Average {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Average::Value(v) => serializer.serialize_f64(*v),
            Average::NoData => serializer.serialize_str("No data"),
        }
    }
}

/// Species -> island -> sex -> average body mass.
pub type WeightStats = BTreeMap<String, BTreeMap<String, BTreeMap<String, Average>>>;

/// Per-species headcount with the island breakdown.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SpeciesCount {
    /// Number of records for the species.
    pub total: usize,
    /// Island -> number of records.
    pub islands: BTreeMap<String, usize>,
}

/// Species -> headcount and island breakdown.
pub type SpeciesDistribution = BTreeMap<String, SpeciesCount>;

/// Species -> average bill length.
pub type BillLengths = BTreeMap<String, f64>;

/// Every aggregate computed over one record set.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AnalysisSummary {
    /// Number of records loaded.
    pub total_count: usize,
    /// Species distribution across islands.
    pub species: SpeciesDistribution,
    /// Male/female counts per island.
    pub sex_counts: GroupCount,
    /// Male:female ratio per island.
    pub ratios: RatioResult,
    /// Average body mass by species, island and sex.
    pub body_mass: WeightStats,
    /// Average bill length by species.
    pub bill_length: BillLengths,
}

/// Metadata about a generated report.
#[derive(Debug, Clone, Serialize)]
pub struct ReportMetadata {
    /// Path of the CSV the data was loaded from.
    pub source: String,
    /// Date and time the report was generated.
    pub generated_at: DateTime<Utc>,
    /// Number of records loaded.
    pub record_count: usize,
}

/// A complete report: metadata plus all aggregates.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub metadata: ReportMetadata,
    pub summary: AnalysisSummary,
}

/// Render a float the way the reports show it: whole values keep one
/// decimal (`2.0`), everything else uses the shortest exact form (`0.75`).
pub fn format_decimal(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        value.to_string()
    }
}
