//! Sample dataset download over HTTP.

use crate::error::{InsightsError, Result};
use std::time::Duration;
use tracing::{debug, warn};

/// Fetch a text body, treating any non-success status as a fetch error.
pub(crate) fn fetch_text(url: &str, timeout: Duration) -> Result<String> {
    let client = reqwest::blocking::Client::builder()
        .timeout(timeout)
        .build()?;

    let response = client.get(url).send().map_err(|e| {
        warn!("Sample request failed: {}", e);
        InsightsError::Fetch(e.to_string())
    })?;

    let status = response.status();
    debug!("Sample request returned {}", status);
    if !status.is_success() {
        return Err(InsightsError::Fetch(format!(
            "Failed to fetch sample data (HTTP {status})"
        )));
    }

    response
        .text()
        .map_err(|e| InsightsError::Fetch(e.to_string()))
}
