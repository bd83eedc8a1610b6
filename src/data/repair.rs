//! Repair of rows shifted by a broken name field
//!
//! Some CSV exports split the quoted `"Last, Title First"` name on its comma.
//! The second half of the name then sits in `Sex`, the real sex value in
//! `Age`, and every following column is one slot to the right, with the
//! port pushed past the header width into the row's overflow bucket.
//!
//! Only this one corruption shape is detected. Rows broken in any other way
//! pass through unchanged.

use super::row::{col, Row, Value};
use crate::{Error, Result};
use regex::Regex;
use std::sync::LazyLock;

static SEX_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(male|female)$").expect("Invalid sex regex"));

fn is_sex_text(v: &Value) -> bool {
    v.as_text().is_some_and(|s| SEX_REGEX.is_match(s.trim()))
}

/// Drop a leading run of quotes (with whitespace before it) and a trailing
/// run of quotes (with whitespace after it). Unquoted whitespace is kept.
fn strip_quotes(s: &str) -> &str {
    let head = s.trim_start();
    let s = if head.starts_with('"') { head.trim_start_matches('"') } else { s };
    let tail = s.trim_end();
    if tail.ends_with('"') {
        tail.trim_end_matches('"')
    } else {
        s
    }
}

/// True when `Sex` is not a valid sex value but `Age` is.
pub fn looks_shifted(row: &Row) -> bool {
    !is_sex_text(row.get(col::SEX)) && is_sex_text(row.get(col::AGE))
}

/// Join the split name and move every later field one slot left.
///
/// Fails with [`Error::RepairFailure`] if the result would still be flagged
/// as shifted.
pub fn repair(row: &Row) -> Result<Row> {
    let mut r = row.clone();

    let left_raw = r.get(col::NAME).to_string();
    let right_raw = r.get(col::SEX).to_string();
    let left = strip_quotes(&left_raw);
    let right = strip_quotes(&right_raw);
    let joined = match (left.is_empty(), right.is_empty()) {
        (false, false) => format!("{left}, {right}"),
        (false, true) => left.to_string(),
        (true, _) => right.to_string(),
    };
    r.set(col::NAME, strip_quotes(&joined));

    r.set(col::SEX, row.get(col::AGE).to_string().trim());
    r.set(col::AGE, row.get(col::SIBSP).number_or_null());
    r.set(col::SIBSP, row.get(col::PARCH).number_or_null());
    r.set(col::PARCH, row.get(col::TICKET).number_or_null());
    r.set(col::TICKET, row.get(col::FARE).to_string());
    r.set(col::FARE, row.get(col::CABIN).number_or_null());

    if let Some(port) = r.take_overflow().and_then(|mut extra| extra.pop()) {
        r.set(col::EMBARKED, port);
    }

    if looks_shifted(&r) {
        return Err(Error::RepairFailure(format!(
            "row {} still shifted after repair",
            row.get(col::PASSENGER_ID)
        )));
    }
    Ok(r)
}

/// Repair every shifted row; copy the rest with the overflow bucket dropped.
///
/// A failed repair falls back to the plain copy. One odd row never fails
/// the batch.
pub fn repair_all(rows: &[Row]) -> Vec<Row> {
    let mut repaired = 0usize;
    let out: Vec<Row> = rows
        .iter()
        .map(|row| {
            if looks_shifted(row) {
                match repair(row) {
                    Ok(fixed) => {
                        repaired += 1;
                        return fixed;
                    }
                    Err(e) => tracing::warn!(error = %e, "falling back to unrepaired row"),
                }
            }
            row.without_overflow()
        })
        .collect();

    if repaired > 0 {
        tracing::info!(repaired, total = rows.len(), "repaired shifted rows");
    }
    out
}
