//! Configuration types for cleaning and loading.
//!
//! This module provides configuration options using the builder pattern
//! for flexible and ergonomic setup.

use serde::{Deserialize, Serialize};

/// Default URL of the public Titanic training set used as a sample dataset.
pub const DEFAULT_SAMPLE_URL: &str =
    "https://raw.githubusercontent.com/datasciencedojo/datasets/master/titanic.csv";

/// Environment variable that overrides [`DEFAULT_SAMPLE_URL`].
pub const SAMPLE_URL_ENV: &str = "PASSENGER_SAMPLE_URL";

/// Columns every uploaded dataset must provide.
pub const REQUIRED_COLUMNS: [&str; 5] = ["PassengerId", "Survived", "Pclass", "Name", "Sex"];

/// The four independent cleaning toggles.
///
/// Stages always run in the order ages → embarked → family size → title,
/// regardless of which subset is enabled.
///
/// # Example
///
/// ```rust,ignore
/// use passenger_insights::CleaningOptions;
///
/// let options = CleaningOptions::builder()
///     .fill_missing_ages(true)
///     .extract_title(false)
///     .build();
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CleaningOptions {
    /// Replace null ages with the mean age (one decimal).
    pub fill_missing_ages: bool,

    /// Replace null/empty embarkation codes with the most common port.
    pub fill_missing_embarked: bool,

    /// Attach `FamilySize = SibSp + Parch + 1`.
    pub add_family_size: bool,

    /// Attach the normalized title extracted from the name.
    pub extract_title: bool,
}

impl Default for CleaningOptions {
    fn default() -> Self {
        Self {
            fill_missing_ages: true,
            fill_missing_embarked: true,
            add_family_size: true,
            extract_title: true,
        }
    }
}

impl CleaningOptions {
    /// Create a new options builder. Unset toggles default to enabled.
    pub fn builder() -> CleaningOptionsBuilder {
        CleaningOptionsBuilder::default()
    }

    /// Options with every stage disabled.
    pub fn none() -> Self {
        Self {
            fill_missing_ages: false,
            fill_missing_embarked: false,
            add_family_size: false,
            extract_title: false,
        }
    }

    /// Whether at least one stage is enabled.
    pub fn any_enabled(&self) -> bool {
        self.fill_missing_ages
            || self.fill_missing_embarked
            || self.add_family_size
            || self.extract_title
    }

    /// Short descriptions of the enabled stages, in execution order.
    pub fn enabled_stages(&self) -> Vec<&'static str> {
        let mut stages = Vec::new();
        if self.fill_missing_ages {
            stages.push("Fill missing ages with the mean age");
        }
        if self.fill_missing_embarked {
            stages.push("Fill missing embarkation ports with the most common port");
        }
        if self.add_family_size {
            stages.push("Add FamilySize (SibSp + Parch + 1)");
        }
        if self.extract_title {
            stages.push("Extract and normalize Title from Name");
        }
        stages
    }
}

/// Builder for [`CleaningOptions`] with fluent API.
#[derive(Debug, Default)]
pub struct CleaningOptionsBuilder {
    fill_missing_ages: Option<bool>,
    fill_missing_embarked: Option<bool>,
    add_family_size: Option<bool>,
    extract_title: Option<bool>,
}

impl CleaningOptionsBuilder {
    pub fn fill_missing_ages(mut self, enable: bool) -> Self {
        self.fill_missing_ages = Some(enable);
        self
    }

    pub fn fill_missing_embarked(mut self, enable: bool) -> Self {
        self.fill_missing_embarked = Some(enable);
        self
    }

    pub fn add_family_size(mut self, enable: bool) -> Self {
        self.add_family_size = Some(enable);
        self
    }

    pub fn extract_title(mut self, enable: bool) -> Self {
        self.extract_title = Some(enable);
        self
    }

    pub fn build(self) -> CleaningOptions {
        CleaningOptions {
            fill_missing_ages: self.fill_missing_ages.unwrap_or(true),
            fill_missing_embarked: self.fill_missing_embarked.unwrap_or(true),
            add_family_size: self.add_family_size.unwrap_or(true),
            extract_title: self.extract_title.unwrap_or(true),
        }
    }
}

/// Configuration for [`crate::loader::DatasetLoader`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoaderConfig {
    /// URL of the sample dataset fetched when no local file is available.
    /// Default: [`DEFAULT_SAMPLE_URL`]
    pub sample_url: String,

    /// Number of rows the CSV reader scans to infer column types.
    /// Default: 100
    pub infer_schema_length: usize,

    /// Timeout for the sample download, in seconds.
    /// Default: 30
    pub fetch_timeout_secs: u64,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            sample_url: DEFAULT_SAMPLE_URL.to_string(),
            infer_schema_length: 100,
            fetch_timeout_secs: 30,
        }
    }
}

impl LoaderConfig {
    /// Create a new configuration builder.
    pub fn builder() -> LoaderConfigBuilder {
        LoaderConfigBuilder::default()
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        let url = self.sample_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigValidationError::InvalidSampleUrl(
                self.sample_url.clone(),
            ));
        }

        if self.infer_schema_length == 0 {
            return Err(ConfigValidationError::InvalidSchemaLength(
                self.infer_schema_length,
            ));
        }

        if self.fetch_timeout_secs == 0 {
            return Err(ConfigValidationError::InvalidTimeout(
                self.fetch_timeout_secs,
            ));
        }

        Ok(())
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid sample URL '{0}' (must start with http:// or https://)")]
    InvalidSampleUrl(String),

    #[error("Invalid schema inference length: {0} (must be at least 1)")]
    InvalidSchemaLength(usize),

    #[error("Invalid fetch timeout: {0}s (must be at least 1)")]
    InvalidTimeout(u64),
}

/// Builder for [`LoaderConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct LoaderConfigBuilder {
    sample_url: Option<String>,
    infer_schema_length: Option<usize>,
    fetch_timeout_secs: Option<u64>,
}

impl LoaderConfigBuilder {
    /// Set the URL of the sample dataset.
    pub fn sample_url(mut self, url: impl Into<String>) -> Self {
        self.sample_url = Some(url.into());
        self
    }

    /// Set how many rows are scanned for schema inference.
    pub fn infer_schema_length(mut self, rows: usize) -> Self {
        self.infer_schema_length = Some(rows);
        self
    }

    /// Set the download timeout in seconds.
    pub fn fetch_timeout_secs(mut self, secs: u64) -> Self {
        self.fetch_timeout_secs = Some(secs);
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `LoaderConfig` or an error if validation fails.
    pub fn build(self) -> Result<LoaderConfig, ConfigValidationError> {
        let config = LoaderConfig {
            sample_url: self
                .sample_url
                .unwrap_or_else(|| DEFAULT_SAMPLE_URL.to_string()),
            infer_schema_length: self.infer_schema_length.unwrap_or(100),
            fetch_timeout_secs: self.fetch_timeout_secs.unwrap_or(30),
        };

        config.validate()?;
        Ok(config)
    }
}
