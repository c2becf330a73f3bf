//! Data cleaning module for passenger datasets.
//!
//! This module provides the fixed cleaning transformation:
//! - Filling missing ages with the mean age
//! - Filling missing embarkation ports with the most common port
//! - Adding the `FamilySize` derived field
//! - Extracting a normalized `Title` from the name
//!
//! Cleaning is a pure function of the input records and the options: the
//! input is never mutated and every run starts from the records it is given.

mod features;
mod titles;

pub use features::family_size;
pub use titles::{extract_title, normalize_title};

use crate::config::CleaningOptions;
use crate::imputers::StatisticalImputer;
use crate::types::Passenger;
use tracing::{debug, info};

/// Produce a cleaned copy of `records` according to `options`.
///
/// Stages run in the order ages → embarked → family size → title, each one
/// reading the previous stage's output.
pub fn clean(records: &[Passenger], options: &CleaningOptions) -> Vec<Passenger> {
    clean_with_steps(records, options, &mut Vec::new())
}

/// Same as [`clean`], also recording a human-readable line per stage.
pub fn clean_with_steps(
    records: &[Passenger],
    options: &CleaningOptions,
    processing_steps: &mut Vec<String>,
) -> Vec<Passenger> {
    info!(
        "Cleaning {} records ({} stages enabled)",
        records.len(),
        options.enabled_stages().len()
    );

    let mut processed = records.to_vec();

    if options.fill_missing_ages {
        processed = StatisticalImputer::fill_ages(processed, processing_steps);
    }

    if options.fill_missing_embarked {
        processed = StatisticalImputer::fill_embarked(processed, processing_steps);
    }

    if options.add_family_size {
        processed = features::attach_family_size(processed);
        processing_steps.push("Added 'FamilySize' = SibSp + Parch + 1".to_string());
    }

    if options.extract_title {
        processed = titles::attach_titles(processed);
        processing_steps.push("Extracted 'Title' from 'Name'".to_string());
    }

    debug!("Cleaning produced {} records", processed.len());
    processed
}
