//! Conversion between Polars DataFrames and typed passenger records.

use crate::error::{InsightsError, Result};
use crate::types::{DerivedFields, Passenger};
use polars::prelude::*;

/// Convert a parsed passenger DataFrame into typed records.
///
/// Required columns must already have been validated. Optional columns that
/// are absent fall back to zero counts, empty tickets and null values.
pub(crate) fn dataframe_to_passengers(df: &DataFrame) -> Result<Vec<Passenger>> {
    let height = df.height();

    let ids = required(numeric_column(df, "PassengerId")?, "PassengerId")?;
    let survived = required(numeric_column(df, "Survived")?, "Survived")?;
    let pclass = required(numeric_column(df, "Pclass")?, "Pclass")?;
    let names = required(string_column(df, "Name")?, "Name")?;
    let sexes = required(string_column(df, "Sex")?, "Sex")?;

    let ages = numeric_column(df, "Age")?.unwrap_or_else(|| vec![None; height]);
    let sib_sp = numeric_column(df, "SibSp")?.unwrap_or_else(|| vec![None; height]);
    let parch = numeric_column(df, "Parch")?.unwrap_or_else(|| vec![None; height]);
    let tickets = string_column(df, "Ticket")?.unwrap_or_else(|| vec![None; height]);
    let fares = numeric_column(df, "Fare")?.unwrap_or_else(|| vec![None; height]);
    let cabins = string_column(df, "Cabin")?.unwrap_or_else(|| vec![None; height]);
    let embarked = string_column(df, "Embarked")?.unwrap_or_else(|| vec![None; height]);

    let mut records = Vec::with_capacity(height);
    for idx in 0..height {
        let row = idx + 1;
        records.push(Passenger {
            passenger_id: integral(ids[idx], row, "PassengerId")?,
            survived: small_integral(survived[idx], row, "Survived")?,
            pclass: small_integral(pclass[idx], row, "Pclass")?,
            name: required_text(names[idx].clone(), row, "Name")?,
            sex: required_text(sexes[idx].clone(), row, "Sex")?,
            age: non_negative(ages[idx], row, "Age")?,
            sib_sp: count(sib_sp[idx], row, "SibSp")?,
            parch: count(parch[idx], row, "Parch")?,
            ticket: tickets[idx].clone().unwrap_or_default(),
            fare: non_negative(fares[idx], row, "Fare")?,
            cabin: non_empty(cabins[idx].clone()),
            embarked: non_empty(embarked[idx].clone()),
            derived: DerivedFields::default(),
        });
    }

    Ok(records)
}

/// Build a DataFrame from records, including derived columns that are set
/// on at least one record.
pub(crate) fn passengers_to_dataframe(records: &[Passenger]) -> Result<DataFrame> {
    let mut columns = vec![
        Column::new(
            "PassengerId".into(),
            records.iter().map(|p| p.passenger_id).collect::<Vec<i64>>(),
        ),
        Column::new(
            "Survived".into(),
            records.iter().map(|p| i32::from(p.survived)).collect::<Vec<i32>>(),
        ),
        Column::new(
            "Pclass".into(),
            records.iter().map(|p| i32::from(p.pclass)).collect::<Vec<i32>>(),
        ),
        Column::new(
            "Name".into(),
            records.iter().map(|p| p.name.clone()).collect::<Vec<String>>(),
        ),
        Column::new(
            "Sex".into(),
            records.iter().map(|p| p.sex.clone()).collect::<Vec<String>>(),
        ),
        Column::new(
            "Age".into(),
            records.iter().map(|p| p.age).collect::<Vec<Option<f64>>>(),
        ),
        Column::new(
            "SibSp".into(),
            records.iter().map(|p| p.sib_sp).collect::<Vec<u32>>(),
        ),
        Column::new(
            "Parch".into(),
            records.iter().map(|p| p.parch).collect::<Vec<u32>>(),
        ),
        Column::new(
            "Ticket".into(),
            records.iter().map(|p| p.ticket.clone()).collect::<Vec<String>>(),
        ),
        Column::new(
            "Fare".into(),
            records.iter().map(|p| p.fare).collect::<Vec<Option<f64>>>(),
        ),
        Column::new(
            "Cabin".into(),
            records.iter().map(|p| p.cabin.clone()).collect::<Vec<Option<String>>>(),
        ),
        Column::new(
            "Embarked".into(),
            records.iter().map(|p| p.embarked.clone()).collect::<Vec<Option<String>>>(),
        ),
    ];

    if records.iter().any(|p| p.derived.family_size.is_some()) {
        columns.push(Column::new(
            "FamilySize".into(),
            records
                .iter()
                .map(|p| p.derived.family_size)
                .collect::<Vec<Option<u32>>>(),
        ));
    }

    if records.iter().any(|p| p.derived.title.is_some()) {
        columns.push(Column::new(
            "Title".into(),
            records
                .iter()
                .map(|p| p.derived.title.map(|t| t.as_str()))
                .collect::<Vec<Option<&str>>>(),
        ));
    }

    Ok(DataFrame::new(columns)?)
}

// ============================================================================
// Column extraction
// ============================================================================

/// Read a column as `f64` values, or `None` when the column is absent.
///
/// A cell that is present but does not parse as a number is an error rather
/// than a silent null.
fn numeric_column(df: &DataFrame, name: &str) -> Result<Option<Vec<Option<f64>>>> {
    let Ok(column) = df.column(name) else {
        return Ok(None);
    };
    let series = column.as_materialized_series();
    let floats = series.cast(&DataType::Float64)?;
    let values: Vec<Option<f64>> = floats.f64()?.into_iter().collect();

    let originally_null = series.is_null();
    for (idx, value) in values.iter().enumerate() {
        if value.is_none() && originally_null.get(idx) == Some(false) {
            let raw = series.str_value(idx)?;
            return Err(invalid(idx + 1, name, format!("expected a number, got '{raw}'")));
        }
    }

    Ok(Some(values))
}

/// Read a column as strings, or `None` when the column is absent.
fn string_column(df: &DataFrame, name: &str) -> Result<Option<Vec<Option<String>>>> {
    let Ok(column) = df.column(name) else {
        return Ok(None);
    };
    let strings = column.as_materialized_series().cast(&DataType::String)?;
    let values = strings
        .str()?
        .into_iter()
        .map(|v| v.map(str::to_string))
        .collect();
    Ok(Some(values))
}

fn required<T>(column: Option<T>, name: &str) -> Result<T> {
    column.ok_or_else(|| InsightsError::MissingColumns(vec![name.to_string()]))
}

// ============================================================================
// Cell conversion
// ============================================================================

fn invalid(row: usize, column: &str, reason: impl Into<String>) -> InsightsError {
    InsightsError::InvalidRecord {
        row,
        column: column.to_string(),
        reason: reason.into(),
    }
}

/// A short row leaves trailing cells null; required text must be present.
fn required_text(value: Option<String>, row: usize, column: &str) -> Result<String> {
    non_empty(value).ok_or_else(|| invalid(row, column, "value is required"))
}

fn integral(value: Option<f64>, row: usize, column: &str) -> Result<i64> {
    let value = value.ok_or_else(|| invalid(row, column, "value is required"))?;
    if value.fract() != 0.0 || !value.is_finite() {
        return Err(invalid(row, column, format!("expected an integer, got {value}")));
    }
    Ok(value as i64)
}

fn small_integral(value: Option<f64>, row: usize, column: &str) -> Result<u8> {
    let value = integral(value, row, column)?;
    u8::try_from(value).map_err(|_| invalid(row, column, format!("{value} is out of range")))
}

/// Sibling/parent counts: null means zero.
fn count(value: Option<f64>, row: usize, column: &str) -> Result<u32> {
    match value {
        None => Ok(0),
        Some(_) => {
            let value = integral(value, row, column)?;
            u32::try_from(value)
                .map_err(|_| invalid(row, column, format!("{value} is not a valid count")))
        }
    }
}

fn non_negative(value: Option<f64>, row: usize, column: &str) -> Result<Option<f64>> {
    match value {
        Some(v) if v < 0.0 || !v.is_finite() => {
            Err(invalid(row, column, format!("expected a non-negative number, got {v}")))
        }
        other => Ok(other),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}
