//! Passenger Insights Library
//!
//! Cleaning and summary statistics for the Titanic passenger dataset, built
//! with Rust and Polars.
//!
//! # Overview
//!
//! This library provides:
//!
//! - **Loading**: CSV file type check, parsing, required-column validation and
//!   conversion into typed [`Passenger`] records
//! - **Cleaning**: Mean-age and modal-port imputation plus the `FamilySize` and
//!   `Title` derived fields, each stage independently switchable
//! - **Statistics**: Survival rate, age statistics, sex and class counts,
//!   missing-value overview and per-group survival breakdowns
//! - **Record Store**: Owned state holding the raw and cleaned sets with
//!   cheap immutable snapshots
//! - **Reporting**: A JSON dashboard report and cleaned-CSV export
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use passenger_insights::{CleaningOptions, DatasetLoader, LoaderConfig, RecordStore};
//!
//! let loader = DatasetLoader::new(LoaderConfig::default());
//! let store = RecordStore::new();
//!
//! // Load a file, or the public sample with `loader.fetch_sample()?`
//! store.load(loader.load_path("data/train.csv")?);
//!
//! let steps = store.apply_cleaning(&CleaningOptions::default())?;
//! for step in &steps {
//!     println!("{step}");
//! }
//!
//! let stats = store.statistics();
//! println!("Survival rate: {:.1}%", stats.survival_rate);
//! ```
//!
//! # Cleaning Without a Store
//!
//! The transform functions are pure and can be used directly:
//!
//! ```rust,ignore
//! use passenger_insights::{clean, summarize, CleaningOptions};
//!
//! let options = CleaningOptions::builder()
//!     .fill_missing_ages(true)
//!     .extract_title(false)
//!     .build();
//!
//! let cleaned = clean(&records, &options);
//! let summary = summarize(&cleaned); // None for an empty set
//! ```

pub mod cleaner;
pub mod config;
pub mod error;
pub mod imputers;
pub mod loader;
pub mod profiler;
pub mod reporting;
pub mod store;
pub mod types;
pub mod utils;

// Re-exports for convenient access
pub use cleaner::{clean, clean_with_steps, extract_title, family_size, normalize_title};
pub use config::{
    CleaningOptions, CleaningOptionsBuilder, ConfigValidationError, LoaderConfig,
    LoaderConfigBuilder, REQUIRED_COLUMNS,
};
pub use error::{InsightsError, Result as InsightsResult, ResultExt};
pub use imputers::StatisticalImputer;
pub use loader::{DatasetLoader, LoadedDataset, export_csv, is_csv_file};
pub use profiler::{DataProfiler, DatasetProfile, breakdowns, missing_values, summarize};
pub use reporting::{DashboardReport, DatasetOverview, ReportGenerator};
pub use store::{RecordStore, StoreSnapshot};
pub use types::{
    AgeStats, ClassDistribution, ClassFareStats, DerivedFields, GenderDistribution,
    GroupSurvival, MissingCount, MissingValueOverview, Passenger, StatisticsSummary,
    SurvivalBreakdowns, Title,
};
