//! Report generation module.
//!
//! This module turns a [`crate::store::StoreSnapshot`] into a
//! [`DashboardReport`] and writes reports and cleaned datasets to disk.
//!
//! The same report is used for:
//! - JSON output to stdout (`--json` CLI flag)
//! - JSON file output (`--emit-report` CLI flag)
//! - Programmatic access in library mode
//!
//! # Example
//!
//! ```rust,ignore
//! use passenger_insights::reporting::ReportGenerator;
//!
//! let report = ReportGenerator::build_dashboard_report(&store.snapshot(), None);
//! println!("{}", serde_json::to_string_pretty(&report)?);
//!
//! let generator = ReportGenerator::new(PathBuf::from("outputs"), None);
//! generator.write_report_to_file(&report, "train")?;
//! ```

mod generator;

pub use generator::{DashboardReport, DatasetOverview, ReportGenerator};
