//! CSV export adapter
//!
//! Reads a tabular schedule export and maps its headers onto the canonical
//! column set the row normalizer expects. Headers are matched after
//! trimming, lowercasing and replacing spaces with `_`. Unknown headers
//! are ignored.

use crate::errors::{from_csv, io_error_at, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tariffwatch_core::normalize::{columns, RawRow};
use tariffwatch_core::{log_op_end, log_op_error, log_op_start};

/// Accepted header spellings per canonical column
const ALIASES: &[(&str, &[&str])] = &[
    (columns::HTS_CODE, &["hts_code", "hts_number", "htsno", "hts"]),
    (
        columns::DESCRIPTION,
        &["description", "brief_description", "article_description"],
    ),
    (
        columns::RATE_GENERAL,
        &[
            "rate_general",
            "rate_general_raw",
            "general",
            "general_rate_of_duty",
            "rate_of_duty_general",
        ],
    ),
    (
        columns::RATE_SPECIAL,
        &[
            "rate_special",
            "rate_special_raw",
            "special",
            "special_rate_of_duty",
            "rate_of_duty_special",
        ],
    ),
    (
        columns::RATE_COLUMN2,
        &[
            "rate_column2",
            "rate_column2_raw",
            "column_2",
            "col2",
            "column_2_rate_of_duty",
            "rate_of_duty_col2",
        ],
    ),
    (
        columns::ADDITIONAL_DUTIES,
        &["additional_duties", "additional_duty", "footnotes"],
    ),
];

/// Canonical rows read from one export
#[derive(Debug, Clone, Default)]
pub struct ExportTable {
    pub rows: Vec<RawRow>,
    /// Canonical columns present in the header, in canonical order
    pub columns: Vec<&'static str>,
}

impl ExportTable {
    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| *c == column)
    }
}

fn normalize_header(header: &str) -> String {
    header
        .trim_start_matches('\u{feff}')
        .trim()
        .to_lowercase()
        .replace(' ', "_")
}

/// Canonical column name for an export header, if it is a known alias
///
/// ```
/// use tariffwatch_store::export::canonical_column;
///
/// assert_eq!(canonical_column("HTS Number"), Some("hts_code"));
/// assert_eq!(canonical_column("Column 2 Rate of Duty"), Some("rate_column2"));
/// assert_eq!(canonical_column("Quota Quantity"), None);
/// ```
pub fn canonical_column(header: &str) -> Option<&'static str> {
    let normalized = normalize_header(header);
    ALIASES
        .iter()
        .find(|(_, aliases)| aliases.contains(&normalized.as_str()))
        .map(|(canonical, _)| *canonical)
}

/// Read an export from any reader
///
/// # Errors
///
/// `ERR_EXPORT` when the CSV cannot be parsed (including invalid UTF-8).
pub fn read_export<R: Read>(reader: R) -> Result<ExportTable> {
    log_op_start!("read_export");
    let start = std::time::Instant::now();

    let result = read_rows(reader);
    match &result {
        Ok(table) => {
            log_op_end!(
                "read_export",
                duration_ms = start.elapsed().as_millis() as u64,
                rows = table.rows.len() as u64,
                columns = table.columns.len() as u64
            );
        }
        Err(e) => {
            log_op_error!(
                "read_export",
                e.clone(),
                duration_ms = start.elapsed().as_millis() as u64
            );
        }
    }
    result
}

/// Read an export from a file path
///
/// # Errors
///
/// `ERR_IO` when the file cannot be opened, `ERR_EXPORT` when it cannot be
/// parsed.
pub fn read_export_path(path: &Path) -> Result<ExportTable> {
    let file = File::open(path).map_err(|e| io_error_at("read_export", path, e))?;
    tracing::debug!(path = %path.display(), "reading export");
    read_export(file)
}

fn read_rows<R: Read>(reader: R) -> Result<ExportTable> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|e| from_csv("read_export", e))?
        .clone();

    // header index → canonical column; the first matching header wins
    let mut mapping: Vec<(usize, &'static str)> = Vec::new();
    for (idx, header) in headers.iter().enumerate() {
        if let Some(canonical) = canonical_column(header) {
            if mapping.iter().all(|(_, c)| *c != canonical) {
                mapping.push((idx, canonical));
            }
        }
    }

    let found: Vec<&'static str> = columns::ALL
        .iter()
        .copied()
        .filter(|c| mapping.iter().any(|(_, m)| m == c))
        .collect();
    for missing in columns::ALL.iter().filter(|c| !found.contains(*c)) {
        tracing::debug!(column = *missing, "canonical column missing from export header");
    }

    let mut rows = Vec::new();
    for record in csv_reader.records() {
        let record = record.map_err(|e| from_csv("read_export", e))?;
        let mut row = RawRow::new();
        for (idx, canonical) in &mapping {
            if let Some(value) = record.get(*idx) {
                row.insert((*canonical).to_string(), value.to_string());
            }
        }
        rows.push(row);
    }

    Ok(ExportTable {
        rows,
        columns: found,
    })
}
