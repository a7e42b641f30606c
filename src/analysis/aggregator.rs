//! Record aggregation and statistics.
//!
//! Each function here is an independent pass over the loaded records.
//! None of them mutate their input, so they can run in any order.

use crate::models::{
    Average, BillLengths, GroupCount, Ratio, RatioResult, Record, Sex, SpeciesDistribution,
    WeightStats,
};
use std::collections::BTreeMap;

/// Round to two decimals, halves away from zero (0.125 -> 0.13).
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Arithmetic mean, `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Total number of records.
pub fn count_total(records: &[Record]) -> usize {
    records.len()
}

/// Count species per island.
///
/// Species and island are trimmed; records where either ends up empty
/// are skipped.
pub fn count_species_by_island(records: &[Record]) -> SpeciesDistribution {
    let mut distribution = SpeciesDistribution::new();

    for record in records {
        let species = record.species.trim();
        let island = record.island.trim();

        if species.is_empty() || island.is_empty() {
            continue;
        }

        let entry = distribution.entry(species.to_string()).or_default();
        entry.total += 1;
        *entry.islands.entry(island.to_string()).or_default() += 1;
    }

    distribution
}

/// Count males and females on each island.
///
/// Records without an island or a sex are skipped. An unrecognized sex
/// still creates the island entry but increments neither count.
pub fn count_sex_by_island(records: &[Record]) -> GroupCount {
    let mut counts = GroupCount::new();

    for record in records {
        if record.island.is_empty() || record.sex.is_empty() {
            continue;
        }

        let entry = counts.entry(record.island.clone()).or_default();
        match Sex::parse(&record.sex) {
            Some(Sex::Male) => entry.male += 1,
            Some(Sex::Female) => entry.female += 1,
            None => {}
        }
    }

    counts
}

/// Male:female ratio for each island.
pub fn calculate_ratios(counts: &GroupCount) -> RatioResult {
    counts
        .iter()
        .map(|(island, c)| {
            let ratio = match (c.male, c.female) {
                (0, 0) => Ratio::NoData,
                (_, 0) => Ratio::NoFemales,
                (male, female) => Ratio::Value(round2(male as f64 / female as f64)),
            };
            (island.clone(), ratio)
        })
        .collect()
}

/// Average body mass by species, island and sex.
///
/// Only records with all three keys and a body mass contribute, so a
/// group with no measurements never appears.
pub fn average_body_mass(records: &[Record]) -> WeightStats {
    let mut masses: BTreeMap<&str, BTreeMap<&str, BTreeMap<&str, Vec<f64>>>> = BTreeMap::new();

    for record in records {
        let Some(mass) = record.body_mass_g else {
            continue;
        };
        if record.species.is_empty() || record.island.is_empty() || record.sex.is_empty() {
            continue;
        }

        masses
            .entry(record.species.as_str())
            .or_default()
            .entry(record.island.as_str())
            .or_default()
            .entry(record.sex.as_str())
            .or_default()
            .push(mass);
    }

    masses
        .into_iter()
        .map(|(species, islands)| {
            let islands = islands
                .into_iter()
                .map(|(island, sexes)| {
                    let sexes = sexes
                        .into_iter()
                        .map(|(sex, values)| {
                            let average = mean(&values)
                                .map(|m| Average::Value(round2(m)))
                                .unwrap_or(Average::NoData);
                            (sex.to_string(), average)
                        })
                        .collect();
                    (island.to_string(), sexes)
                })
                .collect();
            (species.to_string(), islands)
        })
        .collect()
}

/// Average bill length per species (trimmed).
///
/// Species without any bill measurement are left out.
pub fn average_bill_length(records: &[Record]) -> BillLengths {
    let mut lengths: BTreeMap<&str, Vec<f64>> = BTreeMap::new();

    for record in records {
        let species = record.species.trim();
        let Some(length) = record.bill_length_mm else {
            continue;
        };
        if species.is_empty() {
            continue;
        }

        lengths.entry(species).or_default().push(length);
    }

    lengths
        .into_iter()
        .filter_map(|(species, values)| mean(&values).map(|m| (species.to_string(), round2(m))))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SexCounts;

    fn observation(species: &str, island: &str, sex: &str, mass: Option<f64>) -> Record {
        Record {
            species: species.to_string(),
            island: island.to_string(),
            sex: sex.to_string(),
            body_mass_g: mass,
            ..Record::default()
        }
    }

    fn counts(pairs: &[(&str, usize, usize)]) -> GroupCount {
        pairs
            .iter()
            .map(|(island, male, female)| {
                (
                    island.to_string(),
                    SexCounts {
                        male: *male,
                        female: *female,
                    },
                )
            })
            .collect()
    }

    #[test]
    fn test_round2_halves_away_from_zero() {
        assert_eq!(round2(0.125), 0.13);
        assert_eq!(round2(0.625), 0.63);
        assert_eq!(round2(2.0 / 3.0), 0.67);
        assert_eq!(round2(4100.0), 4100.0);
    }

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[]), None);
        assert_eq!(mean(&[4000.0, 4100.0, 4200.0]), Some(4100.0));
    }

    #[test]
    fn test_count_total() {
        assert_eq!(count_total(&[]), 0);

        let records = vec![
            observation("Adelie", "Torgersen", "male", Some(3750.0)),
            observation("Adelie", "Torgersen", "female", Some(3800.0)),
            observation("Adelie", "Torgersen", "female", Some(3250.0)),
        ];
        assert_eq!(count_total(&records), 3);
    }

    #[test]
    fn test_count_sex_by_island() {
        let records = vec![
            observation("", "Biscoe", "male", None),
            observation("", "Biscoe", "female", None),
            observation("", "Biscoe", "male", None),
            observation("", "Dream", "female", None),
            observation("", "Dream", "female", None),
        ];

        let result = count_sex_by_island(&records);

        assert_eq!(result["Biscoe"], SexCounts { male: 2, female: 1 });
        assert_eq!(result["Dream"], SexCounts { male: 0, female: 2 });
    }

    #[test]
    fn test_count_sex_is_case_insensitive() {
        let records = vec![
            observation("", "Torgersen", "Male", None),
            observation("", "Torgersen", "FEMALE", None),
            observation("", "Torgersen", "male", None),
        ];

        let result = count_sex_by_island(&records);
        assert_eq!(result["Torgersen"], SexCounts { male: 2, female: 1 });
    }

    #[test]
    fn test_count_sex_skips_missing_keys() {
        assert!(count_sex_by_island(&[]).is_empty());

        let records = vec![
            observation("", "", "male", None),
            observation("", "Biscoe", "", None),
            observation("", "Dream", "other", None),
            observation("", "Dream", "male", None),
        ];

        let result = count_sex_by_island(&records);

        assert_eq!(result.len(), 1);
        assert_eq!(result["Dream"], SexCounts { male: 1, female: 0 });
    }

    #[test]
    fn test_unknown_sex_still_creates_island() {
        let records = vec![observation("", "Torgersen", "unknown", None)];
        let result = count_sex_by_island(&records);
        assert_eq!(result["Torgersen"], SexCounts::default());
    }

    #[test]
    fn test_count_sex_is_order_independent() {
        let mut records = vec![
            observation("", "Biscoe", "male", None),
            observation("", "Dream", "female", None),
            observation("", "Biscoe", "female", None),
            observation("", "Torgersen", "male", None),
            observation("", "Dream", "male", None),
        ];

        let forward = count_sex_by_island(&records);
        records.reverse();
        let reversed = count_sex_by_island(&records);
        records.rotate_left(2);
        let rotated = count_sex_by_island(&records);

        assert_eq!(forward, reversed);
        assert_eq!(forward, rotated);
    }

    #[test]
    fn test_calculate_ratios() {
        let result = calculate_ratios(&counts(&[("Biscoe", 100, 50), ("Dream", 30, 40)]));
        assert_eq!(result["Biscoe"], Ratio::Value(2.0));
        assert_eq!(result["Dream"], Ratio::Value(0.75));

        let equal = calculate_ratios(&counts(&[("Island1", 25, 25), ("Island2", 1, 1)]));
        assert_eq!(equal["Island1"], Ratio::Value(1.0));
        assert_eq!(equal["Island2"], Ratio::Value(1.0));
    }

    #[test]
    fn test_calculate_ratios_zero_counts() {
        let result = calculate_ratios(&counts(&[
            ("MaleOnly", 75, 0),
            ("Empty", 0, 0),
            ("FemaleOnly", 0, 100),
        ]));

        assert_eq!(result["MaleOnly"], Ratio::NoFemales);
        assert_eq!(result["Empty"], Ratio::NoData);
        assert_eq!(result["FemaleOnly"], Ratio::Value(0.0));
    }

    #[test]
    fn test_calculate_ratios_rounding() {
        let result = calculate_ratios(&counts(&[("Half", 1, 8), ("Third", 1, 3)]));
        assert_eq!(result["Half"], Ratio::Value(0.13));
        assert_eq!(result["Third"], Ratio::Value(0.33));
    }

    #[test]
    fn test_average_body_mass() {
        let records = vec![
            observation("Adelie", "Biscoe", "male", Some(4000.0)),
            observation("Adelie", "Biscoe", "male", Some(4100.0)),
            observation("Adelie", "Biscoe", "male", Some(4200.0)),
            observation("Adelie", "Biscoe", "female", Some(3600.0)),
        ];

        let result = average_body_mass(&records);

        assert_eq!(result["Adelie"]["Biscoe"]["male"], Average::Value(4100.0));
        assert_eq!(result["Adelie"]["Biscoe"]["female"], Average::Value(3600.0));
    }

    #[test]
    fn test_average_body_mass_multiple_species() {
        let records = vec![
            observation("Gentoo", "Dream", "male", Some(5000.0)),
            observation("Gentoo", "Dream", "male", Some(5200.0)),
            observation("Chinstrap", "Torgersen", "female", Some(3800.0)),
        ];

        let result = average_body_mass(&records);

        assert_eq!(result.len(), 2);
        assert_eq!(result["Gentoo"]["Dream"]["male"], Average::Value(5100.0));
        assert_eq!(
            result["Chinstrap"]["Torgersen"]["female"],
            Average::Value(3800.0)
        );
    }

    #[test]
    fn test_average_body_mass_skips_incomplete_records() {
        assert!(average_body_mass(&[]).is_empty());

        let records = vec![
            observation("Adelie", "Biscoe", "male", None),
            observation("Adelie", "Biscoe", "male", Some(4000.0)),
            observation("", "Dream", "female", Some(3500.0)),
            observation("Gentoo", "", "male", Some(5000.0)),
            observation("Chinstrap", "Dream", "", Some(3700.0)),
        ];

        let result = average_body_mass(&records);

        assert_eq!(result.len(), 1);
        assert_eq!(result["Adelie"]["Biscoe"]["male"], Average::Value(4000.0));
        assert!(!result.contains_key("Gentoo"));
        assert!(!result.contains_key("Chinstrap"));
    }

    #[test]
    fn test_group_without_measurements_is_absent() {
        let records = vec![
            observation("Adelie", "Biscoe", "male", Some(4000.0)),
            observation("Adelie", "Biscoe", "female", None),
        ];

        let result = average_body_mass(&records);
        assert!(!result["Adelie"]["Biscoe"].contains_key("female"));
    }

    #[test]
    fn test_average_body_mass_rounds() {
        let records = vec![
            observation("Adelie", "Dream", "female", Some(3400.0)),
            observation("Adelie", "Dream", "female", Some(3450.0)),
            observation("Adelie", "Dream", "female", Some(3350.0)),
            observation("Adelie", "Dream", "female", Some(3300.0)),
            observation("Adelie", "Dream", "female", Some(3275.0)),
            observation("Adelie", "Dream", "female", Some(3325.0)),
        ];

        assert_eq!(
            average_body_mass(&records)["Adelie"]["Dream"]["female"],
            Average::Value(3350.0)
        );
        assert_eq!(
            average_body_mass(&[records[0].clone(), records[1].clone(), records[3].clone()])
                ["Adelie"]["Dream"]["female"],
            Average::Value(3383.33)
        );
    }

    #[test]
    fn test_count_species_by_island() {
        let records = vec![
            observation("Adelie", "Torgersen", "male", None),
            observation("Adelie", "Torgersen", "female", None),
            observation("Adelie", "Dream", "female", None),
            observation("Chinstrap", "Dream", "female", None),
            observation("Gentoo", "Biscoe", "male", None),
        ];

        let result = count_species_by_island(&records);

        assert_eq!(result.len(), 3);
        assert_eq!(result["Adelie"].total, 3);
        assert_eq!(result["Adelie"].islands["Torgersen"], 2);
        assert_eq!(result["Adelie"].islands["Dream"], 1);
        assert_eq!(result["Chinstrap"].total, 1);
        assert_eq!(result["Chinstrap"].islands["Dream"], 1);
        assert_eq!(result["Gentoo"].total, 1);
        assert_eq!(result["Gentoo"].islands["Biscoe"], 1);
    }

    #[test]
    fn test_count_species_trims_whitespace() {
        let records = vec![
            observation("  Adelie ", "  Torgersen ", "male", None),
            observation("Adelie", " Torgersen ", "female", None),
            observation("Adelie ", " Dream", "female", None),
            observation("Chinstrap", "   ", "female", None),
        ];

        let result = count_species_by_island(&records);

        assert_eq!(result.len(), 1);
        assert_eq!(result["Adelie"].total, 3);
        assert_eq!(result["Adelie"].islands["Torgersen"], 2);
        assert_eq!(result["Adelie"].islands["Dream"], 1);
        assert!(count_species_by_island(&[]).is_empty());
    }

    #[test]
    fn test_average_bill_length() {
        let bill = |species: &str, length: Option<f64>| Record {
            species: species.to_string(),
            bill_length_mm: length,
            ..Record::default()
        };

        let records = vec![
            bill("Adelie", Some(40.1)),
            bill(" Adelie ", Some(39.9)),
            bill("Gentoo", Some(46.5)),
            bill("Gentoo", Some(46.0)),
            bill("Chinstrap", None),
            bill("", Some(50.0)),
        ];

        let result = average_bill_length(&records);

        assert_eq!(result.len(), 2);
        assert_eq!(result["Adelie"], 40.0);
        assert_eq!(result["Gentoo"], 46.25);
        assert!(!result.contains_key("Chinstrap"));
        assert!(average_bill_length(&[]).is_empty());
    }
}
