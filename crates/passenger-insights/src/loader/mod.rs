//! Upload boundary: turning CSV text into passenger records.
//!
//! This module provides:
//! - The CSV file type check performed before parsing
//! - CSV parsing with Polars and required-column validation
//! - Conversion of parsed rows into typed [`Passenger`] records
//! - Downloading the public sample dataset (with the "remote" feature)
//!
//! Every error produced here is recoverable: nothing is stored until a
//! dataset has been fully converted.

mod records;
#[cfg(feature = "remote")]
mod remote;

use crate::config::{LoaderConfig, REQUIRED_COLUMNS};
use crate::error::{InsightsError, Result, ResultExt};
use crate::types::Passenger;
use polars::io::csv::read::CsvReadOptions;
use polars::prelude::*;
use serde::Serialize;
use std::fs::File;
use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

pub(crate) use records::passengers_to_dataframe;

/// MIME type browsers report for CSV uploads.
pub const CSV_MIME_TYPE: &str = "text/csv";

/// Columns mapped onto [`Passenger`] fields. They are read as text and
/// converted cell by cell, so their type never depends on the leading rows.
const PASSENGER_COLUMNS: [&str; 12] = [
    "PassengerId",
    "Survived",
    "Pclass",
    "Name",
    "Sex",
    "Age",
    "SibSp",
    "Parch",
    "Ticket",
    "Fare",
    "Cabin",
    "Embarked",
];

/// A parsed and validated dataset, ready to be stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoadedDataset {
    /// Display name: the file name, or `"<file> (sample)"` for the sample.
    pub name: String,
    pub records: Vec<Passenger>,
    /// Header columns in file order.
    pub columns: Vec<String>,
}

/// Accept a file when either its MIME type or its name says CSV.
pub fn is_csv_file(name: &str, mime: Option<&str>) -> bool {
    mime == Some(CSV_MIME_TYPE) || name.to_ascii_lowercase().ends_with(".csv")
}

/// Required columns absent from `columns`, in canonical order.
pub fn missing_required_columns<S: AsRef<str>>(columns: &[S]) -> Vec<String> {
    REQUIRED_COLUMNS
        .iter()
        .filter(|required| !columns.iter().any(|c| c.as_ref() == **required))
        .map(|c| c.to_string())
        .collect()
}

/// Loads passenger datasets from files, uploaded bytes, text or the sample URL.
#[derive(Debug, Clone, Default)]
pub struct DatasetLoader {
    config: LoaderConfig,
}

impl DatasetLoader {
    pub fn new(config: LoaderConfig) -> Self {
        Self { config }
    }

    /// Create a loader after validating `config`.
    pub fn try_new(config: LoaderConfig) -> Result<Self> {
        config
            .validate()
            .map_err(|e| InsightsError::InvalidConfig(e.to_string()))?;
        Ok(Self::new(config))
    }

    /// Load a CSV file from disk.
    pub fn load_path(&self, path: impl AsRef<Path>) -> Result<LoadedDataset> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        if !is_csv_file(&name, None) {
            return Err(InsightsError::InvalidFileType(name));
        }

        info!("Loading {}", path.display());
        let bytes = std::fs::read(path).context(format!("Failed to read {}", path.display()))?;
        self.parse(&name, &bytes)
    }

    /// Load an uploaded file. The type check runs before any parsing.
    pub fn load_bytes(&self, name: &str, mime: Option<&str>, bytes: &[u8]) -> Result<LoadedDataset> {
        if !is_csv_file(name, mime) {
            return Err(InsightsError::InvalidFileType(name.to_string()));
        }
        self.parse(name, bytes)
    }

    /// Load CSV text that is already known to be CSV.
    pub fn load_text(&self, name: &str, text: &str) -> Result<LoadedDataset> {
        self.parse(name, text.as_bytes())
    }

    /// Download and load the public sample dataset.
    #[cfg(feature = "remote")]
    pub fn fetch_sample(&self) -> Result<LoadedDataset> {
        let url = &self.config.sample_url;
        info!("Fetching sample dataset from {}", url);

        let text = remote::fetch_text(
            url,
            std::time::Duration::from_secs(self.config.fetch_timeout_secs),
        )?;

        let file_name = url
            .rsplit('/')
            .next()
            .filter(|s| !s.is_empty())
            .unwrap_or("titanic.csv");
        self.load_text(&format!("{file_name} (sample)"), &text)
    }

    fn parse(&self, name: &str, bytes: &[u8]) -> Result<LoadedDataset> {
        let text = std::str::from_utf8(bytes)
            .map_err(|e| InsightsError::Parse(format!("input is not valid UTF-8: {e}")))?;
        let content = strip_blank_lines(text);
        if content.is_empty() {
            return Err(InsightsError::Parse("the file is empty".to_string()));
        }

        let header_line = content.lines().next().unwrap_or_default().to_string();
        let header = read_frame(CsvReadOptions::default(), header_line)?;
        let df = read_frame(
            CsvReadOptions::default()
                .with_infer_schema_length(Some(self.config.infer_schema_length))
                .with_schema_overwrite(Some(Arc::new(text_schema(&header)))),
            content,
        )?;

        let columns: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|c| c.to_string())
            .collect();
        debug!("Parsed {} rows with columns {:?}", df.height(), columns);

        let missing = missing_required_columns(&columns);
        if !missing.is_empty() {
            return Err(InsightsError::MissingColumns(missing));
        }

        let records = records::dataframe_to_passengers(&df)?;
        info!("Loaded {} passengers from '{}'", records.len(), name);

        Ok(LoadedDataset {
            name: name.to_string(),
            records,
            columns,
        })
    }
}

/// Write records to a CSV file, derived columns included when present.
pub fn export_csv(records: &[Passenger], path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let mut df = passengers_to_dataframe(records)?;
    let mut file = File::create(path).context(format!("Failed to create {}", path.display()))?;

    CsvWriter::new(&mut file)
        .include_header(true)
        .with_separator(b',')
        .with_quote_char(b'"')
        .finish(&mut df)?;

    info!("Exported {} records to {}", records.len(), path.display());
    Ok(())
}

fn read_frame(options: CsvReadOptions, content: String) -> Result<DataFrame> {
    options
        .with_has_header(true)
        .with_parse_options(CsvParseOptions::default().with_quote_char(Some(b'"')))
        .into_reader_with_file_handle(Cursor::new(content))
        .finish()
        .map_err(|e| InsightsError::Parse(e.to_string()))
}

/// String dtypes for the passenger columns present in `header`.
///
/// Columns outside [`PASSENGER_COLUMNS`] keep their inferred type.
fn text_schema(header: &DataFrame) -> Schema {
    let mut schema = Schema::with_capacity(PASSENGER_COLUMNS.len());
    for name in header.get_column_names() {
        if PASSENGER_COLUMNS.contains(&name.as_str()) {
            schema.with_column(name.clone(), DataType::String);
        }
    }
    schema
}

/// Drop a leading BOM and every blank line.
///
/// Works line by line without tracking quotes: a quoted field that contains
/// an empty line loses that line.
fn strip_blank_lines(text: &str) -> String {
    text.trim_start_matches('\u{feff}')
        .lines()
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SMALL_CSV: &str = "\
PassengerId,Survived,Pclass,Name,Sex,Age,SibSp,Parch,Ticket,Fare,Cabin,Embarked
1,0,3,\"Braund, Mr. Owen Harris\",male,22,1,0,A/5 21171,7.25,,S

2,1,1,\"Cumings, Mrs. John Bradley (Florence Briggs Thayer)\",female,38,1,0,PC 17599,71.2833,C85,C
3,1,3,\"Heikkinen, Miss. Laina\",female,,0,0,STON/O2. 3101282,7.925,,
";

    #[test]
    fn test_is_csv_file() {
        assert!(is_csv_file("train.csv", None));
        assert!(is_csv_file("TRAIN.CSV", None));
        assert!(is_csv_file("upload", Some("text/csv")));
        assert!(!is_csv_file("train.xlsx", None));
        assert!(!is_csv_file("notes.txt", Some("text/plain")));
    }

    #[test]
    fn test_missing_required_columns_in_canonical_order() {
        let missing = missing_required_columns(&["Sex", "Name", "Age"]);
        assert_eq!(missing, vec!["PassengerId", "Survived", "Pclass"]);
        assert!(missing_required_columns(&REQUIRED_COLUMNS).is_empty());
    }

    #[test]
    fn test_load_text() {
        let dataset = DatasetLoader::default().load_text("train.csv", SMALL_CSV).unwrap();

        assert_eq!(dataset.name, "train.csv");
        assert_eq!(dataset.records.len(), 3);
        assert_eq!(dataset.columns.len(), 12);
        assert_eq!(
            dataset.records[1].name,
            "Cumings, Mrs. John Bradley (Florence Briggs Thayer)"
        );
        assert_eq!(dataset.records[0].cabin, None);
        assert_eq!(dataset.records[2].age, None);
        assert_eq!(dataset.records[2].embarked, None);
    }

    #[test]
    fn test_load_bytes_rejects_non_csv_before_parsing() {
        let err = DatasetLoader::default()
            .load_bytes("data.json", Some("application/json"), b"not even csv")
            .unwrap_err();
        assert_eq!(err.error_code(), "INVALID_FILE_TYPE");
    }

    #[test]
    fn test_load_bytes_accepts_csv_mime() {
        let dataset = DatasetLoader::default()
            .load_bytes("upload", Some(CSV_MIME_TYPE), SMALL_CSV.as_bytes())
            .unwrap();
        assert_eq!(dataset.records.len(), 3);
    }

    #[test]
    fn test_missing_columns_error() {
        let csv = "PassengerId,Name,Age\n1,\"Doe, Mr. John\",30\n";
        let err = DatasetLoader::default().load_text("bad.csv", csv).unwrap_err();

        assert_eq!(err.to_string(), "Missing required columns: Survived, Pclass, Sex");
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_try_new_rejects_invalid_config() {
        let config = LoaderConfig {
            infer_schema_length: 0,
            ..LoaderConfig::default()
        };
        let err = DatasetLoader::try_new(config).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_CONFIG");
    }

    #[test]
    fn test_empty_input_is_parse_error() {
        let err = DatasetLoader::default().load_text("empty.csv", "\n\n").unwrap_err();
        assert_eq!(err.error_code(), "PARSE_ERROR");
    }

    #[test]
    fn test_header_only_yields_no_records() {
        let csv = "PassengerId,Survived,Pclass,Name,Sex\n";
        let dataset = DatasetLoader::default().load_text("header.csv", csv).unwrap();
        assert!(dataset.records.is_empty());
    }

    #[test]
    fn test_late_fractional_age_and_alphanumeric_ticket() {
        let mut csv = String::from(
            "PassengerId,Survived,Pclass,Name,Sex,Age,SibSp,Parch,Ticket,Fare,Cabin,Embarked\n",
        );
        for id in 1..=120 {
            csv.push_str(&format!(
                "{id},0,3,\"Passenger, Mr. Number{id}\",male,30,0,0,{},8,,S\n",
                100_000 + id
            ));
        }
        csv.push_str("121,1,2,\"Late, Miss. Fraction\",female,14.5,0,0,PC 17599,30.0708,,C\n");

        let dataset = DatasetLoader::default().load_text("late.csv", &csv).unwrap();

        assert_eq!(dataset.records.len(), 121);
        assert_eq!(dataset.records[0].age, Some(30.0));
        assert_eq!(dataset.records[0].ticket, "100001");
        let last = &dataset.records[120];
        assert_eq!(last.age, Some(14.5));
        assert_eq!(last.ticket, "PC 17599");
        assert_eq!(last.fare, Some(30.0708));
    }

    #[test]
    fn test_extra_columns_are_kept_out_of_records() {
        let csv = "PassengerId,Survived,Pclass,Name,Sex,Boat\n1,1,1,\"Doe, Mrs. Jane\",female,4\n";
        let dataset = DatasetLoader::default().load_text("boat.csv", csv).unwrap();

        assert_eq!(dataset.columns.last().map(String::as_str), Some("Boat"));
        assert_eq!(dataset.records[0].passenger_id, 1);
    }

    #[test]
    fn test_strip_blank_lines() {
        assert_eq!(strip_blank_lines("\u{feff}a,b\n\n1,2\n   \n"), "a,b\n1,2");
        // Quotes are not tracked
        assert_eq!(strip_blank_lines("a\n\"x\n\ny\"\n"), "a\n\"x\ny\"");
    }

    #[test]
    fn test_export_csv_includes_derived_columns() {
        let mut records = DatasetLoader::default()
            .load_text("train.csv", SMALL_CSV)
            .unwrap()
            .records;
        for p in &mut records {
            p.derived.family_size = Some(p.sib_sp + p.parch + 1);
        }

        let path = std::env::temp_dir().join("passenger_insights_export_test.csv");
        export_csv(&records, &path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        let header = written.lines().next().unwrap();
        assert!(header.ends_with("Embarked,FamilySize"));
        assert_eq!(written.lines().count(), 4);

        let reloaded = DatasetLoader::default().load_path(&path).unwrap();
        assert_eq!(reloaded.records.len(), 3);
        assert_eq!(reloaded.records[1].fare, Some(71.2833));

        std::fs::remove_file(&path).ok();
    }
}
