//! Title extraction from passenger names.

use crate::types::{Passenger, Title};
use once_cell::sync::Lazy;
use regex::Regex;

/// First run of letters immediately followed by a period, e.g. "Mr." in
/// "Braund, Mr. Owen Harris".
///
/// The word boundary is ASCII-only: an accented letter does not count as
/// part of a word.
static TITLE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?-u:\b)([A-Za-z]+)\.").expect("Invalid regex: title token"));

/// Raw token used when a name carries no title.
const DEFAULT_TITLE_TOKEN: &str = "Mr";

/// Extract the raw title token from a name, defaulting to "Mr".
pub(crate) fn raw_title(name: &str) -> &str {
    TITLE_PATTERN
        .captures(name)
        .and_then(|caps| caps.get(1))
        .map_or(DEFAULT_TITLE_TOKEN, |m| m.as_str())
}

/// Map a raw title token onto the fixed title categories.
pub fn normalize_title(token: &str) -> Title {
    match token {
        "Mlle" | "Ms" | "Miss" => Title::Miss,
        "Mme" | "Mrs" => Title::Mrs,
        "Capt" | "Col" | "Major" | "Dr" | "Rev" => Title::Officer,
        "Mr" => Title::Mr,
        "Master" => Title::Master,
        _ => Title::Other,
    }
}

/// Extract and normalize the title of a passenger name.
pub fn extract_title(name: &str) -> Title {
    normalize_title(raw_title(name))
}

/// Attach the normalized title to every record.
pub(crate) fn attach_titles(records: Vec<Passenger>) -> Vec<Passenger> {
    records
        .into_iter()
        .map(|mut p| {
            p.derived.title = Some(extract_title(&p.name));
            p
        })
        .collect()
}
