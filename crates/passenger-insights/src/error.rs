//! Custom error types for loading and processing passenger datasets.
//!
//! This module provides the error hierarchy using `thiserror`. Every error
//! that can reach a user comes from the upload boundary (file type, parsing,
//! schema, download); the cleaning and statistics code is infallible.
//!
//! Errors are serializable so a UI can show them as `{ code, message }`.

use serde::Serialize;
use serde::ser::SerializeStruct;
use thiserror::Error;

/// The main error type for the crate.
#[derive(Error, Debug)]
pub enum InsightsError {
    /// The uploaded file is not a CSV file (checked before parsing).
    #[error("Please upload a CSV file (got '{0}')")]
    InvalidFileType(String),

    /// The CSV parser rejected the input.
    #[error("Error parsing CSV: {0}")]
    Parse(String),

    /// One or more required columns are absent from the header.
    #[error("Missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    /// A row could not be converted into a passenger record.
    #[error("Invalid value in row {row}, column '{column}': {reason}")]
    InvalidRecord {
        row: usize,
        column: String,
        reason: String,
    },

    /// Downloading the sample dataset failed.
    #[error("Error loading sample data: {0}")]
    Fetch(String),

    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// An operation needed data but nothing has been loaded yet.
    #[error("No data loaded")]
    NoDataLoaded,

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Polars error wrapper.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP request error (only with the "remote" feature).
    #[cfg(feature = "remote")]
    #[error("HTTP request error: {0}")]
    HttpRequest(#[from] reqwest::Error),

    /// Generic error with context.
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<InsightsError>,
    },
}

impl InsightsError {
    /// Add context to an error.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        InsightsError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Get error code for frontend handling.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidFileType(_) => "INVALID_FILE_TYPE",
            Self::Parse(_) => "PARSE_ERROR",
            Self::MissingColumns(_) => "MISSING_COLUMNS",
            Self::InvalidRecord { .. } => "INVALID_RECORD",
            Self::Fetch(_) => "FETCH_ERROR",
            Self::InvalidConfig(_) => "INVALID_CONFIG",
            Self::NoDataLoaded => "NO_DATA_LOADED",
            Self::Io(_) => "IO_ERROR",
            Self::Polars(_) => "POLARS_ERROR",
            Self::Json(_) => "JSON_ERROR",
            #[cfg(feature = "remote")]
            Self::HttpRequest(_) => "HTTP_REQUEST_ERROR",
            Self::WithContext { source, .. } => source.error_code(),
        }
    }

    /// Check if this error is recoverable at the upload boundary.
    ///
    /// Recoverable errors leave all state untouched; the user can simply
    /// try again with another file.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::InvalidFileType(_)
            | Self::Parse(_)
            | Self::MissingColumns(_)
            | Self::InvalidRecord { .. }
            | Self::Fetch(_)
            | Self::NoDataLoaded
            | Self::InvalidConfig(_) => true,
            Self::WithContext { source, .. } => source.is_recoverable(),
            _ => false,
        }
    }
}

/// Errors are serialized as a struct with `code` and `message` fields.
impl Serialize for InsightsError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("InsightsError", 2)?;
        state.serialize_field("code", &self.error_code())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

/// Result type alias for crate operations.
pub type Result<T> = std::result::Result<T, InsightsError>;

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, std::io::Error> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| InsightsError::Io(e).with_context(context))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code() {
        assert_eq!(
            InsightsError::InvalidFileType("data.txt".to_string()).error_code(),
            "INVALID_FILE_TYPE"
        );
        assert_eq!(
            InsightsError::MissingColumns(vec!["Sex".to_string()]).error_code(),
            "MISSING_COLUMNS"
        );
    }

    #[test]
    fn test_missing_columns_message_lists_all() {
        let error = InsightsError::MissingColumns(vec!["Pclass".to_string(), "Sex".to_string()]);
        assert_eq!(error.to_string(), "Missing required columns: Pclass, Sex");
    }

    #[test]
    fn test_is_recoverable() {
        assert!(InsightsError::Parse("bad row".to_string()).is_recoverable());
        assert!(InsightsError::Fetch("404".to_string()).is_recoverable());
        let io = std::io::Error::other("disk on fire");
        assert!(!InsightsError::Io(io).is_recoverable());
    }

    #[test]
    fn test_error_serialization() {
        let error = InsightsError::MissingColumns(vec!["Name".to_string()]);
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("MISSING_COLUMNS"));
        assert!(json.contains("Name"));
    }

    #[test]
    fn test_with_context() {
        let error = InsightsError::Parse("unterminated quote".to_string())
            .with_context("Loading train.csv");
        assert!(error.to_string().contains("Loading train.csv"));
        assert_eq!(error.error_code(), "PARSE_ERROR");
        assert!(error.is_recoverable());
    }
}
