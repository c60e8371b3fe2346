//! Snapshot diff computation engine.
//!
//! The core entry point is [`compute_diff`], which compares two snapshots
//! and produces an ordered list of [`ChangeEvent`]s.

use crate::diff::model::{ChangeEvent, ChangeType, DiffSummary};
use crate::errors::{Result, TariffWatchError};
use crate::model::RateField;
use crate::snapshot::Snapshot;
use crate::{log_op_end, log_op_start};

/// Compare a previous and a current snapshot.
///
/// Output order is fixed: every `ADDED`, then every `REMOVED`, then every
/// `RATE_CHANGED`, each by `hts_code` ascending. Rate changes for one code
/// follow [`RateField`] declaration order.
///
/// Rate fields compare by raw text only. Description drift produces no
/// event. Schema versions are ignored; see [`ensure_comparable`].
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use tariffwatch_core::diff::compute_diff;
/// use tariffwatch_core::snapshot::Snapshot;
///
/// let date = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap();
/// let empty = Snapshot::new(date, Vec::new());
/// assert!(compute_diff(&empty, &empty).is_empty());
/// ```
pub fn compute_diff(previous: &Snapshot, current: &Snapshot) -> Vec<ChangeEvent> {
    log_op_start!(
        "compute_diff",
        previous_date = %previous.date(),
        current_date = %current.date(),
        previous_records = previous.len() as u64,
        current_records = current.len() as u64
    );
    let start = std::time::Instant::now();

    let mut added = Vec::new();
    let mut removed = Vec::new();
    let mut rate_changed = Vec::new();

    for (code, record) in current.records() {
        if !previous.contains(code) {
            added.push(ChangeEvent::added(code.as_str(), record.description()));
        }
    }

    for (code, old) in previous.records() {
        match current.get(code) {
            None => removed.push(ChangeEvent::removed(code.as_str(), old.description())),
            Some(new) => {
                for field in RateField::ALL {
                    let (before, after) = (old.field_text(field), new.field_text(field));
                    if before != after {
                        rate_changed.push(ChangeEvent::rate_changed(
                            code.as_str(),
                            field,
                            before,
                            after,
                            new.description(),
                        ));
                    }
                }
            }
        }
    }

    // Stable sort: (change_type, hts_code, field)
    let mut events: Vec<ChangeEvent> = added
        .into_iter()
        .chain(removed)
        .chain(rate_changed)
        .collect();
    events.sort_by(|a, b| {
        (a.change_type, &a.hts_code, a.field_changed)
            .cmp(&(b.change_type, &b.hts_code, b.field_changed))
    });

    let summary = summarize(&events);
    log_op_end!(
        "compute_diff",
        duration_ms = start.elapsed().as_millis() as u64,
        added = summary.added as u64,
        removed = summary.removed as u64,
        rate_changed = summary.rate_changed as u64
    );

    events
}

/// Count events per change type and per field
pub fn summarize(events: &[ChangeEvent]) -> DiffSummary {
    let mut summary = DiffSummary::default();
    for event in events {
        match event.change_type {
            ChangeType::Added => summary.added += 1,
            ChangeType::Removed => summary.removed += 1,
            ChangeType::RateChanged => {
                summary.rate_changed += 1;
                if let Some(field) = event.field_changed {
                    *summary.by_field.entry(field).or_insert(0) += 1;
                }
            }
        }
    }
    summary
}

/// Check that two snapshots were produced by the same normalizer schema
///
/// The diff engine never calls this. Callers that load snapshots from
/// storage call it before diffing and abort on mismatch.
///
/// # Errors
///
/// [`TariffWatchError::SchemaMismatch`] when the schema versions differ.
pub fn ensure_comparable(previous: &Snapshot, current: &Snapshot) -> Result<()> {
    if previous.schema_version() != current.schema_version() {
        return Err(TariffWatchError::SchemaMismatch {
            previous: previous.schema_version(),
            current: current.schema_version(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{RateValue, TariffRecord};
    use chrono::NaiveDate;

    fn record(code: &str, general: &str) -> TariffRecord {
        TariffRecord::new(
            code.to_string(),
            format!("desc {}", code),
            RateValue::parse(general),
            RateValue::parse("Free"),
            RateValue::parse("35%"),
            String::new(),
        )
    }

    fn snapshot(day: u32, records: Vec<TariffRecord>) -> Snapshot {
        Snapshot::new(NaiveDate::from_ymd_opt(2025, 3, day).unwrap(), records)
    }

    #[test]
    fn test_output_grouped_by_change_type() {
        let prev = snapshot(3, vec![record("0201", "1%"), record("0301", "2%")]);
        let curr = snapshot(10, vec![record("0101", "1%"), record("0301", "3%")]);
        let events = compute_diff(&prev, &curr);
        let types: Vec<ChangeType> = events.iter().map(|e| e.change_type).collect();
        assert_eq!(
            types,
            vec![ChangeType::Added, ChangeType::Removed, ChangeType::RateChanged]
        );
    }

    #[test]
    fn test_removed_carries_previous_description() {
        let prev = snapshot(3, vec![record("0201", "1%")]);
        let curr = snapshot(10, vec![]);
        let events = compute_diff(&prev, &curr);
        assert_eq!(events[0].description, "desc 0201");
    }

    #[test]
    fn test_summarize_counts_by_field() {
        let events = vec![
            ChangeEvent::added("01", "a"),
            ChangeEvent::rate_changed("02", RateField::RateGeneral, "1%", "2%", "b"),
            ChangeEvent::rate_changed("03", RateField::RateGeneral, "1%", "2%", "c"),
            ChangeEvent::rate_changed("03", RateField::AdditionalDuties, "", "x", "c"),
        ];
        let summary = summarize(&events);
        assert_eq!(summary.added, 1);
        assert_eq!(summary.rate_changed, 3);
        assert_eq!(summary.by_field.get(&RateField::RateGeneral), Some(&2));
        assert_eq!(summary.total(), 4);
    }

    #[test]
    fn test_ensure_comparable_rejects_other_schema() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 3).unwrap();
        let old = Snapshot::with_schema_version(date, 0, Vec::new());
        let new = Snapshot::new(date, Vec::new());
        assert_eq!(
            ensure_comparable(&old, &new),
            Err(TariffWatchError::SchemaMismatch {
                previous: 0,
                current: 1
            })
        );
        assert!(ensure_comparable(&new, &new).is_ok());
    }
}
