//! Loader: reads a dataset file into raw records.
//!
//! The whole file is first decoded as one JSON document: an array of
//! objects, or a column-oriented object (`{"NAME": {"0": ..}, ..}`). If that
//! fails it is decoded as JSON Lines, one object per non-blank line. When
//! both fail the load fails.

use crate::error::{LoadError, RecordsError};
use crate::normalize::{normalize_records, RawRecord};
use crate::table::ListingTable;
use serde_json::{Map, Value};
use std::cmp::Ordering;
use std::path::Path;

/// Read, decode and normalise the dataset at `path`.
pub fn load_path(path: impl AsRef<Path>) -> Result<ListingTable, LoadError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let records = parse_records(&text).map_err(|source| LoadError::Format {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::info!(path = %path.display(), records = records.len(), "dataset loaded");
    Ok(normalize_records(records).with_source(path))
}

/// Decode dataset text, whole-document first, then line-delimited.
pub fn parse_records(text: &str) -> Result<Vec<RawRecord>, RecordsError> {
    let document = match parse_document(text) {
        Ok(records) => return Ok(records),
        Err(e) => e,
    };
    tracing::debug!(reason = %document, "not a single JSON document, trying JSON Lines");

    parse_lines(text).map_err(|lines| RecordsError { document, lines })
}

fn parse_document(text: &str) -> Result<Vec<RawRecord>, String> {
    let value: Value = serde_json::from_str(text).map_err(|e| e.to_string())?;
    match value {
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(i, item)| match item {
                Value::Object(map) => Ok(map),
                other => Err(format!("element {i} is {}, not an object", kind(&other))),
            })
            .collect(),
        Value::Object(columns) => from_columns(columns),
        other => Err(format!("top-level value is {}", kind(&other))),
    }
}

/// Column-oriented layout: every top-level value maps row index → cell.
fn from_columns(columns: Map<String, Value>) -> Result<Vec<RawRecord>, String> {
    let mut index: Vec<String> = Vec::new();
    for (name, column) in &columns {
        let Value::Object(cells) = column else {
            return Err(format!("column {name:?} is {}, not an object", kind(column)));
        };
        for key in cells.keys() {
            if !index.contains(key) {
                index.push(key.clone());
            }
        }
    }
    index.sort_by(|a, b| compare_index(a, b));

    let rows = index
        .iter()
        .map(|row| {
            columns
                .iter()
                .filter_map(|(name, column)| {
                    column.get(row).map(|cell| (name.clone(), cell.clone()))
                })
                .collect::<RawRecord>()
        })
        .collect();
    Ok(rows)
}

/// Numeric row labels sort numerically and before any non-numeric ones.
fn compare_index(a: &str, b: &str) -> Ordering {
    match (a.parse::<u64>(), b.parse::<u64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}

fn parse_lines(text: &str) -> Result<Vec<RawRecord>, String> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(n, line)| match serde_json::from_str::<Value>(line) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(other) => Err(format!("line {} is {}, not an object", n + 1, kind(&other))),
            Err(e) => Err(format!("line {}: {e}", n + 1)),
        })
        .collect()
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
