//! Analysis modules.
//!
//! The aggregators live in [`aggregator`]; [`run_analysis`] runs all of
//! them over one record set and bundles the results for reporting.

pub mod aggregator;

pub use aggregator::*;

use crate::models::{AnalysisSummary, Record};
use tracing::debug;

/// Run every aggregator over the same records.
pub fn run_analysis(records: &[Record]) -> AnalysisSummary {
    let total_count = count_total(records);
    debug!("Total records: {}", total_count);

    let species = count_species_by_island(records);
    debug!("Species found: {}", species.len());

    let sex_counts = count_sex_by_island(records);
    debug!("Islands with sexed records: {}", sex_counts.len());

    let ratios = calculate_ratios(&sex_counts);

    let body_mass = average_body_mass(records);
    debug!("Species with body mass data: {}", body_mass.len());

    let bill_length = average_bill_length(records);

    AnalysisSummary {
        total_count,
        species,
        sex_counts,
        ratios,
        body_mass,
        bill_length,
    }
}
