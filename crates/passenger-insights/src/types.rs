use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Records
// ============================================================================

/// One passenger row from the dataset.
///
/// Field names serialize to the CSV header names (`PassengerId`, `SibSp`, ...).
/// Derived columns live in [`DerivedFields`] and are only present after
/// cleaning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Passenger {
    pub passenger_id: i64,
    /// 1 when the passenger survived, 0 otherwise.
    pub survived: u8,
    /// Ticket class (1, 2 or 3).
    pub pclass: u8,
    pub name: String,
    /// "male" or "female" in well-formed data; other values are kept verbatim.
    pub sex: String,
    pub age: Option<f64>,
    pub sib_sp: u32,
    pub parch: u32,
    pub ticket: String,
    pub fare: Option<f64>,
    pub cabin: Option<String>,
    /// Port code: "C", "Q" or "S".
    pub embarked: Option<String>,
    #[serde(flatten)]
    pub derived: DerivedFields,
}

impl Passenger {
    /// Whether the embarkation code is null or empty.
    pub fn embarked_missing(&self) -> bool {
        self.embarked.as_deref().is_none_or(str::is_empty)
    }

    /// Whether the cabin is null or empty.
    pub fn cabin_missing(&self) -> bool {
        self.cabin.as_deref().is_none_or(str::is_empty)
    }

    pub fn has_survived(&self) -> bool {
        self.survived == 1
    }
}

/// Columns attached by cleaning. Both are `None` on raw records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DerivedFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family_size: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<Title>,
}

/// Normalized honorific extracted from a passenger name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Title {
    Mr,
    Miss,
    Mrs,
    Master,
    /// Military, medical and clerical titles (Capt, Col, Major, Dr, Rev).
    Officer,
    Other,
}

impl Title {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mr => "Mr",
            Self::Miss => "Miss",
            Self::Mrs => "Mrs",
            Self::Master => "Master",
            Self::Officer => "Officer",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for Title {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Statistics Summary
// ============================================================================

/// Aggregate metrics over a record set.
///
/// `Default` is the all-zero summary shown before any data is loaded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsSummary {
    pub total_passengers: usize,
    /// Percentage of passengers with `Survived == 1`, unrounded.
    pub survival_rate: f64,
    pub age_stats: AgeStats,
    pub gender_distribution: GenderDistribution,
    pub class_distribution: ClassDistribution,
}

/// Age statistics over non-null ages. All zero when no age is known.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AgeStats {
    /// Mean age rounded to two decimals.
    pub average: f64,
    /// Element at index `n / 2` of the sorted ages (upper median).
    pub median: f64,
    pub min: f64,
    pub max: f64,
    /// Number of records with a null age.
    pub missing: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenderDistribution {
    pub male: usize,
    pub female: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassDistribution {
    pub first: usize,
    pub second: usize,
    pub third: usize,
}

// ============================================================================
// Missing Value Overview
// ============================================================================

/// Missing-value counts for the columns the cleaning step cares about.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MissingValueOverview {
    pub total_records: usize,
    pub age: MissingCount,
    pub embarked: MissingCount,
    pub cabin: MissingCount,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MissingCount {
    pub count: usize,
    /// Share of records missing this value, 0-100.
    pub percentage: f64,
}

impl MissingCount {
    pub fn new(count: usize, total: usize) -> Self {
        let percentage = if total == 0 {
            0.0
        } else {
            count as f64 / total as f64 * 100.0
        };
        Self { count, percentage }
    }
}

// ============================================================================
// Survival Breakdowns (chart data)
// ============================================================================

/// Survived/died counts for one group of passengers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupSurvival {
    pub name: String,
    pub survived: usize,
    pub died: usize,
}

impl GroupSurvival {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            survived: 0,
            died: 0,
        }
    }

    pub fn total(&self) -> usize {
        self.survived + self.died
    }

    /// Survival rate in percent, 0 for an empty group.
    pub fn survival_rate(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            0.0
        } else {
            self.survived as f64 / total as f64 * 100.0
        }
    }

    pub(crate) fn record(&mut self, survived: bool) {
        if survived {
            self.survived += 1;
        } else {
            self.died += 1;
        }
    }
}

/// Fare range for one passenger class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassFareStats {
    pub pclass: u8,
    pub min: f64,
    pub max: f64,
    /// Mean fare rounded to two decimals.
    pub average: f64,
    pub count: usize,
}

/// All per-group aggregates the dashboard charts are built from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurvivalBreakdowns {
    pub by_sex: Vec<GroupSurvival>,
    pub by_class: Vec<GroupSurvival>,
    pub by_age_group: Vec<GroupSurvival>,
    /// Non-empty fare bands only.
    pub by_fare_band: Vec<GroupSurvival>,
    pub fare_by_class: Vec<ClassFareStats>,
}
