//! Lenient CSV loading
//!
//! Reads comma-delimited, double-quoted files with a header row. Ragged
//! records are accepted: missing trailing cells are left out of the row and
//! tokens past the header width land in the row's overflow bucket, where
//! [`super::repair`] can recover them.

use super::row::{normalize_row, Row, Value};
use crate::{Error, Result};
use regex::Regex;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::sync::LazyLock;

static FLOAT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*-?(\d+\.?|\.\d+|\d+\.\d+)([eE][-+]?\d+)?\s*$").expect("Invalid float regex")
});

/// Parsed file: header order plus normalized rows.
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

impl RawTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Read and normalize a CSV file.
pub fn read_csv(path: impl AsRef<Path>) -> Result<RawTable> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| Error::ParseFailure {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    parse_csv(file, path)
}

/// Parse CSV from any reader. `source` is only used in error messages.
pub fn parse_csv<R: Read>(reader: R, source: &Path) -> Result<RawTable> {
    let parse_err = |e: csv::Error| Error::ParseFailure {
        path: source.to_path_buf(),
        message: e.to_string(),
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .delimiter(b',')
        .quote(b'"')
        .from_reader(reader);

    let columns: Vec<String> = reader.headers().map_err(parse_err)?.iter().map(String::from).collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(parse_err)?;
        if record.iter().all(|field| field.trim().is_empty()) {
            continue;
        }

        let mut row = Row::new();
        for (column, field) in columns.iter().zip(record.iter()) {
            row.set(column, parse_field(field));
        }
        if record.len() > columns.len() {
            row.set_overflow(record.iter().skip(columns.len()).map(String::from).collect());
        }
        rows.push(normalize_row(&row));
    }

    tracing::debug!(source = %source.display(), rows = rows.len(), "parsed csv");
    Ok(RawTable { columns, rows })
}

/// Dynamic typing of a raw field: booleans, numbers, null for empty, text otherwise.
pub fn parse_field(raw: &str) -> Value {
    match raw {
        "" => Value::Null,
        "true" | "TRUE" => Value::Bool(true),
        "false" | "FALSE" => Value::Bool(false),
        _ if FLOAT_REGEX.is_match(raw) => {
            raw.trim().parse::<f64>().map_or_else(|_| Value::Text(raw.to_string()), Value::Number)
        }
        _ => Value::Text(raw.to_string()),
    }
}

/// Rough share of missing cells in percent, rounded to one decimal.
///
/// Columns are taken from the first row; an empty table counts as 100%.
pub fn missing_pct(rows: &[Row]) -> f64 {
    let Some(first) = rows.first() else {
        return 100.0;
    };
    let cols: Vec<&str> = first.iter().map(|(k, _)| k).collect();
    let total = rows.len() * cols.len();
    if total == 0 {
        return 100.0;
    }
    let missing = rows
        .iter()
        .flat_map(|r| cols.iter().map(move |c| r.get(c)))
        .filter(|v| v.is_null() || v.as_text() == Some(""))
        .count();
    (1000.0 * missing as f64 / total as f64).round() / 10.0
}
