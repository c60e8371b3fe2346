//! Snapshot construction from raw export rows.

use crate::errors::TariffWatchError;
use crate::model::TariffRecord;
use crate::normalize::{normalize_row, render_row, RawRow};
use crate::snapshot::Snapshot;
use crate::{log_op_end, log_op_start};
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// A row excluded from the snapshot because it could not be normalized
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedRow {
    /// Zero-based position of the row in the export
    pub index: usize,
    pub error: TariffWatchError,
}

/// A row dropped because an earlier row already claimed its HTS code
#[derive(Debug, Clone, PartialEq)]
pub struct DuplicateRow {
    pub index: usize,
    pub hts_code: String,
    /// The dropped row, rendered verbatim
    pub row: String,
}

/// Outcome of one normalization pass
#[derive(Debug, Clone)]
pub struct SnapshotBuild {
    pub snapshot: Snapshot,
    pub skipped: Vec<SkippedRow>,
    pub duplicates: Vec<DuplicateRow>,
}

/// Normalize every row of one export into a snapshot
///
/// Malformed rows are skipped and counted, never fatal. When several rows
/// carry the same HTS code the first one wins; the others are reported in
/// [`SnapshotBuild::duplicates`].
pub fn build_snapshot<'a, I>(date: NaiveDate, rows: I) -> SnapshotBuild
where
    I: IntoIterator<Item = &'a RawRow>,
{
    log_op_start!("build_snapshot", snapshot_date = %date);
    let start = std::time::Instant::now();

    let mut records: BTreeMap<String, TariffRecord> = BTreeMap::new();
    let mut skipped = Vec::new();
    let mut duplicates = Vec::new();
    let mut rows_seen = 0usize;

    for (index, row) in rows.into_iter().enumerate() {
        rows_seen += 1;
        match normalize_row(row) {
            Ok(record) => {
                if records.contains_key(record.hts_code()) {
                    let rendered = render_row(row);
                    tracing::warn!(
                        op = "build_snapshot",
                        index,
                        hts_code = record.hts_code(),
                        row = %rendered,
                        "duplicate HTS code, keeping first occurrence"
                    );
                    duplicates.push(DuplicateRow {
                        index,
                        hts_code: record.hts_code().to_string(),
                        row: rendered,
                    });
                } else {
                    records.insert(record.hts_code().to_string(), record);
                }
            }
            Err(error) => {
                tracing::warn!(
                    op = "build_snapshot",
                    index,
                    error = %error,
                    "skipping malformed row"
                );
                skipped.push(SkippedRow { index, error });
            }
        }
    }

    let snapshot = Snapshot::new(date, records.into_values());

    log_op_end!(
        "build_snapshot",
        duration_ms = start.elapsed().as_millis() as u64,
        rows = rows_seen as u64,
        records = snapshot.len() as u64,
        skipped = skipped.len() as u64,
        duplicates = duplicates.len() as u64
    );

    SnapshotBuild {
        snapshot,
        skipped,
        duplicates,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(code: &str, general: &str) -> RawRow {
        let mut r = RawRow::new();
        r.insert("hts_code".to_string(), code.to_string());
        r.insert("rate_general".to_string(), general.to_string());
        r
    }

    #[test]
    fn test_duplicates_keep_first_and_are_reported() {
        let rows = vec![row("0101.21", "Free"), row("010121", "5%"), row("0102", "1%")];
        let date = NaiveDate::from_ymd_opt(2025, 2, 3).unwrap();
        let build = build_snapshot(date, &rows);

        assert_eq!(build.snapshot.len(), 2);
        assert_eq!(
            build.snapshot.get("010121").unwrap().rate_general().raw(),
            "Free"
        );
        assert_eq!(build.duplicates.len(), 1);
        assert_eq!(build.duplicates[0].index, 1);
        assert_eq!(build.duplicates[0].hts_code, "010121");
        assert!(build.duplicates[0].row.contains("rate_general=5%"));
        assert!(build.skipped.is_empty());
    }
}
