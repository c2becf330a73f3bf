//! Statistical imputation methods.
//!
//! Provides the mean fill for ages and the mode fill for embarkation ports.

use crate::types::Passenger;
use crate::utils::{mean, round_to};
use tracing::{debug, warn};

/// Port used when no record carries an embarkation code (Southampton).
pub const DEFAULT_EMBARKED: &str = "S";

/// Statistical imputation methods for filling missing values.
pub struct StatisticalImputer;

impl StatisticalImputer {
    /// Mean of all non-null ages, or `None` when no age is known.
    pub fn mean_age(records: &[Passenger]) -> Option<f64> {
        let ages: Vec<f64> = records.iter().filter_map(|p| p.age).collect();
        mean(&ages)
    }

    /// Most frequent non-empty embarkation code.
    ///
    /// Ties go to the code encountered first in a left-to-right scan;
    /// falls back to [`DEFAULT_EMBARKED`] when every code is missing.
    pub fn embarked_mode(records: &[Passenger]) -> String {
        // Insertion-ordered counts so ties resolve to the earliest code.
        let mut counts: Vec<(&str, usize)> = Vec::new();
        for code in records.iter().filter_map(|p| p.embarked.as_deref()) {
            if code.is_empty() {
                continue;
            }
            match counts.iter_mut().find(|(seen, _)| *seen == code) {
                Some((_, count)) => *count += 1,
                None => counts.push((code, 1)),
            }
        }

        let mut mode = DEFAULT_EMBARKED;
        let mut max_count = 0;
        for (code, count) in counts {
            if count > max_count {
                mode = code;
                max_count = count;
            }
        }
        mode.to_string()
    }

    /// Replace every null age with the mean age rounded to one decimal.
    ///
    /// Returns the input unchanged when there is no known age to average.
    pub fn fill_ages(records: Vec<Passenger>, processing_steps: &mut Vec<String>) -> Vec<Passenger> {
        let Some(mean_age) = Self::mean_age(&records) else {
            warn!("No non-null ages to average; leaving missing ages as-is");
            processing_steps.push("Skipped age imputation: no known ages".to_string());
            return records;
        };

        let fill_value = round_to(mean_age, 1);
        let mut filled = 0usize;
        let records: Vec<Passenger> = records
            .into_iter()
            .map(|mut p| {
                if p.age.is_none() {
                    p.age = Some(fill_value);
                    filled += 1;
                }
                p
            })
            .collect();

        debug!("Filled {} missing ages with {}", filled, fill_value);
        processing_steps.push(format!(
            "Filled {} missing 'Age' values with mean: {:.1}",
            filled, fill_value
        ));
        records
    }

    /// Replace every null or empty embarkation code with the mode.
    pub fn fill_embarked(
        records: Vec<Passenger>,
        processing_steps: &mut Vec<String>,
    ) -> Vec<Passenger> {
        let mode = Self::embarked_mode(&records);
        let mut filled = 0usize;
        let records: Vec<Passenger> = records
            .into_iter()
            .map(|mut p| {
                if p.embarked_missing() {
                    p.embarked = Some(mode.clone());
                    filled += 1;
                }
                p
            })
            .collect();

        debug!("Filled {} missing embarkation codes with '{}'", filled, mode);
        processing_steps.push(format!(
            "Filled {} missing 'Embarked' values with mode: '{}'",
            filled, mode
        ));
        records
    }
}
