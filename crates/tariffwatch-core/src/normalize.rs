//! Row normalizer
//!
//! Maps one export row, already keyed by canonical column name, into a
//! [`TariffRecord`]. The only failure is a row without a usable HTS code.
//! Every other gap degrades to an empty string or an unparseable rate.

use crate::errors::{Result, TariffWatchError};
use crate::model::{RateValue, TariffRecord};
use std::collections::BTreeMap;

/// Version of the normalization rules. Bump whenever a change here could
/// alter the records produced for the same input.
pub const NORMALIZER_SCHEMA_VERSION: u32 = 1;

/// Canonical column names
pub mod columns {
    pub const HTS_CODE: &str = "hts_code";
    pub const DESCRIPTION: &str = "description";
    pub const RATE_GENERAL: &str = "rate_general";
    pub const RATE_SPECIAL: &str = "rate_special";
    pub const RATE_COLUMN2: &str = "rate_column2";
    pub const ADDITIONAL_DUTIES: &str = "additional_duties";

    pub const ALL: [&str; 6] = [
        HTS_CODE,
        DESCRIPTION,
        RATE_GENERAL,
        RATE_SPECIAL,
        RATE_COLUMN2,
        ADDITIONAL_DUTIES,
    ];
}

/// One raw row: canonical column name → cell text
pub type RawRow = BTreeMap<String, String>;

/// Strip dots and whitespace from a code. `None` when nothing is left.
///
/// No padding, truncation or digit validation takes place.
///
/// ```
/// use tariffwatch_core::normalize::normalize_hts_code;
///
/// assert_eq!(normalize_hts_code("6111.20.10 00"), Some("6111201000".to_string()));
/// assert_eq!(normalize_hts_code(" . "), None);
/// ```
pub fn normalize_hts_code(raw: &str) -> Option<String> {
    let code: String = raw
        .chars()
        .filter(|c| *c != '.' && !c.is_whitespace())
        .collect();
    if code.is_empty() {
        None
    } else {
        Some(code)
    }
}

/// Collapse whitespace runs to single spaces and trim
pub fn clean_description(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Render a row as `column=value` pairs, canonical columns first
///
/// Used in error messages so an operator sees the row exactly as read.
pub fn render_row(row: &RawRow) -> String {
    let canonical = columns::ALL
        .iter()
        .filter_map(|col| row.get(*col).map(|v| format!("{}={}", col, v)));
    let extra = row
        .iter()
        .filter(|(k, _)| !columns::ALL.contains(&k.as_str()))
        .map(|(k, v)| format!("{}={}", k, v));
    canonical.chain(extra).collect::<Vec<_>>().join(", ")
}

fn rate_cell(row: &RawRow, column: &str) -> RateValue {
    match row.get(column) {
        Some(text) => RateValue::parse(text),
        None => RateValue::absent(),
    }
}

/// Normalize one raw row into a canonical record
///
/// # Errors
///
/// [`TariffWatchError::MalformedRow`] when the HTS code column is missing
/// or blank after stripping dots and whitespace.
pub fn normalize_row(row: &RawRow) -> Result<TariffRecord> {
    let hts_code = row
        .get(columns::HTS_CODE)
        .and_then(|raw| normalize_hts_code(raw))
        .ok_or_else(|| TariffWatchError::MalformedRow {
            row: render_row(row),
        })?;

    let description = row
        .get(columns::DESCRIPTION)
        .map(|d| clean_description(d))
        .unwrap_or_default();

    let additional_duties = row
        .get(columns::ADDITIONAL_DUTIES)
        .map(|s| s.trim().to_string())
        .unwrap_or_default();

    Ok(TariffRecord::new(
        hts_code,
        description,
        rate_cell(row, columns::RATE_GENERAL),
        rate_cell(row, columns::RATE_SPECIAL),
        rate_cell(row, columns::RATE_COLUMN2),
        additional_duties,
    ))
}
