use crate::config::CleaningOptions;
use crate::error::{Result, ResultExt};
use crate::loader;
use crate::store::StoreSnapshot;
use crate::types::{MissingValueOverview, StatisticsSummary, SurvivalBreakdowns};
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

// ============================================================================
// Dashboard Report Types
// ============================================================================

/// Everything the dashboard shows for one dataset, in one document.
///
/// Use this for both JSON output (`--json`) and file writing (`--emit-report`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardReport {
    // Metadata
    /// Timestamp when the report was generated
    pub generated_at: String,
    /// Name of the loaded dataset
    pub source: String,
    /// Path of the exported cleaned CSV (if written)
    pub output_file: Option<String>,

    // Cleaning
    /// Options of the cleaning run, `None` when the data was not cleaned
    pub options: Option<CleaningOptions>,
    /// Processing steps recorded while cleaning
    pub processing_steps: Vec<String>,

    // Overview
    pub overview: DatasetOverview,
    /// Missing values in the uploaded data
    pub missing_before: MissingValueOverview,
    /// Missing values after cleaning
    pub missing_after: MissingValueOverview,

    // Statistics
    pub summary: StatisticsSummary,
    pub breakdowns: SurvivalBreakdowns,
}

/// Shape of the dataset before and after cleaning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetOverview {
    pub records: usize,
    /// Derived fields present on the cleaned records
    pub derived_fields: Vec<String>,
}

pub struct ReportGenerator {
    output_dir: PathBuf,
    output_name: Option<String>,
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("./outputs"),
            output_name: None,
        }
    }
}

impl ReportGenerator {
    /// Create a new ReportGenerator with custom output settings.
    ///
    /// `output_name` replaces the base name passed to the write methods.
    pub fn new(output_dir: PathBuf, output_name: Option<String>) -> Self {
        Self {
            output_dir,
            output_name,
        }
    }

    pub fn output_dir(&self) -> &PathBuf {
        &self.output_dir
    }

    /// Build a dashboard report from a store snapshot.
    pub fn build_dashboard_report(
        snapshot: &StoreSnapshot,
        output_file: Option<&str>,
    ) -> DashboardReport {
        let mut derived_fields = Vec::new();
        if snapshot.cleaned.iter().any(|p| p.derived.family_size.is_some()) {
            derived_fields.push("FamilySize".to_string());
        }
        if snapshot.cleaned.iter().any(|p| p.derived.title.is_some()) {
            derived_fields.push("Title".to_string());
        }

        let profile = snapshot.profile();

        DashboardReport {
            generated_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            source: snapshot.source.clone().unwrap_or_default(),
            output_file: output_file.map(String::from),
            options: snapshot.options,
            processing_steps: snapshot.processing_steps.to_vec(),
            overview: DatasetOverview {
                records: snapshot.cleaned.len(),
                derived_fields,
            },
            missing_before: snapshot.missing_before(),
            missing_after: profile.missing_values,
            summary: snapshot.statistics.clone(),
            breakdowns: profile.breakdowns,
        }
    }

    /// Write a dashboard report to a JSON file.
    ///
    /// If `base_name` is "train", the file will be "train_report.json".
    pub fn write_report_to_file(&self, report: &DashboardReport, base_name: &str) -> Result<PathBuf> {
        fs::create_dir_all(&self.output_dir).context("Failed to create output directory")?;

        let report_path = self
            .output_dir
            .join(format!("{}_report.json", self.base_name(base_name)));
        let mut file = File::create(&report_path).context("Failed to create report file")?;
        file.write_all(serde_json::to_string_pretty(report)?.as_bytes())?;

        info!("Report saved: {}", report_path.display());

        Ok(report_path)
    }

    /// Export the cleaned records of a snapshot as `<base>_cleaned.csv`.
    pub fn export_cleaned(&self, snapshot: &StoreSnapshot, base_name: &str) -> Result<PathBuf> {
        fs::create_dir_all(&self.output_dir).context("Failed to create output directory")?;

        let output_path = self
            .output_dir
            .join(format!("{}_cleaned.csv", self.base_name(base_name)));
        loader::export_csv(&snapshot.cleaned, &output_path)?;

        info!("Dataset saved: {}", output_path.display());

        Ok(output_path)
    }

    fn base_name<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.output_name.as_deref().unwrap_or(fallback)
    }
}
