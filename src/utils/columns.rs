//! DataFrame column extraction with validation
//!
//! Dataset CSVs come from several upstream exporters, so numeric columns may
//! be inferred as integers, floats or strings. These helpers coerce to the
//! type the loader expects and keep nulls as `None` so the profile merge can
//! fall back to defaults field by field.

use anyhow::{anyhow, Context, Result};
use polars::prelude::*;
use std::collections::HashSet;

/// Check that every required column is present
///
/// # Errors
/// Lists the missing column and the available columns, prefixed by `context`.
pub fn require_columns(df: &DataFrame, columns: &[&str], context: &str) -> Result<()> {
    let actual: HashSet<String> = df
        .get_column_names()
        .into_iter()
        .map(|s| s.to_string())
        .collect();

    for &expected in columns {
        if !actual.contains(expected) {
            return Err(anyhow!(
                "{}: Missing expected column '{}'. Available columns: {:?}",
                context, expected, actual
            ));
        }
    }
    Ok(())
}

/// Numeric column as `Option<f64>` per row
///
/// A column that is absent yields all-`None` (the field is simply not
/// provided by this exporter). A column that exists but cannot be cast is an error.
pub fn f64_values(df: &DataFrame, name: &str, context: &str) -> Result<Vec<Option<f64>>> {
    let Ok(column) = df.column(name) else {
        return Ok(vec![None; df.height()]);
    };

    let cast = column
        .cast(&DataType::Float64)
        .with_context(|| format!("{}: column '{}' is not numeric", context, name))?;
    let values = cast.f64()?;
    Ok(values.into_iter().collect())
}

/// String column as owned `Option<String>` per row
pub fn str_values(df: &DataFrame, name: &str, context: &str) -> Result<Vec<Option<String>>> {
    let Ok(column) = df.column(name) else {
        return Ok(vec![None; df.height()]);
    };

    let cast = column
        .cast(&DataType::String)
        .with_context(|| format!("{}: column '{}' is not text", context, name))?;
    let values = cast.str()?;
    Ok(values
        .into_iter()
        .map(|opt| opt.map(|s| s.trim().to_string()))
        .collect())
}

/// Boolean column, accepting native booleans, 0/1 numbers and yes/no text
pub fn bool_values(df: &DataFrame, name: &str, context: &str) -> Result<Vec<Option<bool>>> {
    let Ok(column) = df.column(name) else {
        return Ok(vec![None; df.height()]);
    };

    match column.dtype() {
        DataType::Boolean => Ok(column.bool()?.into_iter().collect()),
        DataType::String => Ok(column
            .str()?
            .into_iter()
            .map(|opt| opt.and_then(parse_flag))
            .collect()),
        _ => Ok(f64_values(df, name, context)?
            .into_iter()
            .map(|opt| opt.map(|v| v != 0.0))
            .collect()),
    }
}

/// Required region key column
///
/// Rows without a region name cannot be attributed and are reported as `None`
/// so callers can skip them.
pub fn region_keys(df: &DataFrame, context: &str) -> Result<Vec<Option<String>>> {
    require_columns(df, &["region"], context)?;
    Ok(str_values(df, "region", context)?
        .into_iter()
        .map(|opt| opt.filter(|s| !s.is_empty()))
        .collect())
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "y" | "1" => Some(true),
        "false" | "no" | "n" | "0" => Some(false),
        _ => None,
    }
}
