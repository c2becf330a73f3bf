//! Record Store: the single owner of the loaded and cleaned passenger sets.
//!
//! The store holds one [`StoreSnapshot`] behind a `parking_lot::RwLock`.
//! Every update builds a new snapshot and swaps it in, so readers holding an
//! earlier snapshot keep seeing the data they were given.
//!
//! # Lifecycle
//!
//! ```text
//! new() ──► load(dataset) ──► apply_cleaning(options) ──► apply_cleaning(...)
//!              │                     │
//!              │ raw = cleaned       │ cleaned = clean(raw, options)
//!              └──► statistics       └──► statistics (prior kept if empty)
//! ```
//!
//! Cleaning always starts from the raw set: applying different options
//! twice never compounds.

use crate::cleaner;
use crate::config::CleaningOptions;
use crate::error::{InsightsError, Result};
use crate::loader::LoadedDataset;
use crate::profiler::{self, DataProfiler, DatasetProfile};
use crate::types::{MissingValueOverview, Passenger, StatisticsSummary};
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{debug, info};

/// An immutable view of the store at one point in time.
///
/// Cloning is cheap: record sets are shared `Arc` slices.
#[derive(Debug, Clone, Default)]
pub struct StoreSnapshot {
    /// Name of the loaded dataset, `None` before the first load.
    pub source: Option<String>,
    pub raw: Arc<[Passenger]>,
    pub cleaned: Arc<[Passenger]>,
    pub statistics: StatisticsSummary,
    /// Options of the last cleaning run since the last load.
    pub options: Option<CleaningOptions>,
    /// Steps recorded by the last cleaning run.
    pub processing_steps: Arc<[String]>,
}

impl StoreSnapshot {
    pub fn has_data(&self) -> bool {
        self.source.is_some()
    }

    /// Missing values of the raw set, as shown before cleaning.
    pub fn missing_before(&self) -> MissingValueOverview {
        profiler::missing_values(&self.raw)
    }

    /// Full profile of the cleaned set.
    pub fn profile(&self) -> DatasetProfile {
        DataProfiler::profile_dataset(&self.cleaned)
    }
}

/// Owner of the raw records, the cleaned records and their statistics.
#[derive(Debug, Default)]
pub struct RecordStore {
    state: RwLock<StoreSnapshot>,
}

static_assertions::assert_impl_all!(RecordStore: Send, Sync);
static_assertions::assert_impl_all!(StoreSnapshot: Send, Sync);

impl RecordStore {
    /// An empty store with the all-zero summary and no source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace both record sets with a freshly loaded dataset.
    ///
    /// A failed load never reaches this point, so the store is only ever
    /// updated with a fully validated dataset.
    pub fn load(&self, dataset: LoadedDataset) {
        let records: Arc<[Passenger]> = dataset.records.into();
        let mut state = self.state.write();

        let statistics = recompute(&records, &state.statistics);
        info!(
            "Stored dataset '{}' with {} records",
            dataset.name,
            records.len()
        );

        *state = StoreSnapshot {
            source: Some(dataset.name),
            raw: Arc::clone(&records),
            cleaned: records,
            statistics,
            options: None,
            processing_steps: Arc::from(Vec::new()),
        };
    }

    /// Clean the raw set with `options` and replace the cleaned set.
    ///
    /// Returns the processing steps of this run.
    pub fn apply_cleaning(&self, options: &CleaningOptions) -> Result<Vec<String>> {
        let mut state = self.state.write();
        if !state.has_data() {
            return Err(InsightsError::NoDataLoaded);
        }

        let mut steps = Vec::new();
        let cleaned: Arc<[Passenger]> =
            cleaner::clean_with_steps(&state.raw, options, &mut steps).into();
        let statistics = recompute(&cleaned, &state.statistics);
        debug!("Cleaning recorded {} steps", steps.len());

        *state = StoreSnapshot {
            source: state.source.clone(),
            raw: Arc::clone(&state.raw),
            cleaned,
            statistics,
            options: Some(*options),
            processing_steps: steps.clone().into(),
        };

        Ok(steps)
    }

    pub fn raw(&self) -> Arc<[Passenger]> {
        Arc::clone(&self.state.read().raw)
    }

    pub fn cleaned(&self) -> Arc<[Passenger]> {
        Arc::clone(&self.state.read().cleaned)
    }

    pub fn statistics(&self) -> StatisticsSummary {
        self.state.read().statistics.clone()
    }

    pub fn source(&self) -> Option<String> {
        self.state.read().source.clone()
    }

    pub fn snapshot(&self) -> StoreSnapshot {
        self.state.read().clone()
    }
}

/// New summary for `records`, or the prior one when the set is empty.
fn recompute(records: &[Passenger], prior: &StatisticsSummary) -> StatisticsSummary {
    match profiler::summarize(records) {
        Some(summary) => summary,
        None => {
            debug!("Empty record set, keeping prior statistics");
            prior.clone()
        }
    }
}
