//! Statistics over passenger record sets.
//!
//! This module provides:
//! - The statistics summary (survival rate, age stats, sex/class counts)
//! - A missing-value overview for Age, Embarked and Cabin
//! - Per-group survival breakdowns used for charting
//!
//! All functions are single pass per metric and infallible.

mod breakdowns;
mod statistics;

pub use breakdowns::{
    breakdowns, fare_by_class, survival_by_age_group, survival_by_class, survival_by_fare_band,
    survival_by_sex,
};
pub use statistics::{missing_values, summarize};

use crate::types::{MissingValueOverview, Passenger, StatisticsSummary, SurvivalBreakdowns};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Everything the profiler knows about one record set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetProfile {
    /// `None` for an empty record set.
    pub summary: Option<StatisticsSummary>,
    pub missing_values: MissingValueOverview,
    pub breakdowns: SurvivalBreakdowns,
}

/// Data profiler for passenger record sets.
pub struct DataProfiler;

impl DataProfiler {
    /// Profile a record set: summary, missing values and breakdowns.
    pub fn profile_dataset(records: &[Passenger]) -> DatasetProfile {
        debug!("Profiling {} records", records.len());
        DatasetProfile {
            summary: summarize(records),
            missing_values: missing_values(records),
            breakdowns: breakdowns(records),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_empty_dataset() {
        let profile = DataProfiler::profile_dataset(&[]);
        assert!(profile.summary.is_none());
        assert_eq!(profile.missing_values.total_records, 0);
    }
}
