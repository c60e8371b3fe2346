//! Tracked-only pre-filter.
//!
//! Applied to both snapshots before diffing when only a set of code
//! prefixes is of interest. The diff engine itself never sees prefixes.

use crate::normalize::normalize_hts_code;
use crate::snapshot::Snapshot;
use serde::{Deserialize, Serialize};

/// Which part of the schedule a run reports on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackingMode {
    /// Only codes under the tracked prefixes
    #[default]
    TrackedOnly,
    /// Every code in the export
    FullTable,
}

impl TrackingMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrackingMode::TrackedOnly => "tracked_only",
            TrackingMode::FullTable => "full_table",
        }
    }
}

impl std::fmt::Display for TrackingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TrackingMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "tracked_only" => Ok(TrackingMode::TrackedOnly),
            "full_table" => Ok(TrackingMode::FullTable),
            other => Err(format!(
                "unknown mode '{}', expected tracked_only or full_table",
                other
            )),
        }
    }
}

/// Normalize prefixes like codes, dropping blanks and duplicates.
///
/// Order of first appearance is kept.
pub fn normalize_prefixes<S: AsRef<str>>(prefixes: &[S]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for prefix in prefixes {
        if let Some(p) = normalize_hts_code(prefix.as_ref()) {
            if !out.contains(&p) {
                out.push(p);
            }
        }
    }
    out
}

/// Keep only records whose code starts with one of `prefixes`
///
/// An empty effective prefix list yields an empty snapshot. Prefixes that
/// match nothing are logged at warn level.
pub fn filter_tracked<S: AsRef<str>>(snapshot: &Snapshot, prefixes: &[S]) -> Snapshot {
    let prefixes = normalize_prefixes(prefixes);

    if prefixes.is_empty() {
        tracing::warn!(
            op = "filter_tracked",
            snapshot_date = %snapshot.date(),
            "no valid tracked prefixes, filtered snapshot is empty"
        );
        return Snapshot::with_schema_version(
            snapshot.date(),
            snapshot.schema_version(),
            std::iter::empty(),
        );
    }

    let mut matched = vec![false; prefixes.len()];
    let kept: Vec<_> = snapshot
        .records()
        .values()
        .filter(|record| {
            let mut keep = false;
            for (i, prefix) in prefixes.iter().enumerate() {
                if record.hts_code().starts_with(prefix.as_str()) {
                    matched[i] = true;
                    keep = true;
                }
            }
            keep
        })
        .cloned()
        .collect();

    for (prefix, hit) in prefixes.iter().zip(&matched) {
        if !hit {
            tracing::warn!(
                op = "filter_tracked",
                prefix = %prefix,
                snapshot_date = %snapshot.date(),
                "tracked prefix matched no records"
            );
        }
    }

    tracing::debug!(
        op = "filter_tracked",
        prefixes = prefixes.len() as u64,
        kept = kept.len() as u64,
        total = snapshot.len() as u64,
        "applied tracked filter"
    );

    Snapshot::with_schema_version(snapshot.date(), snapshot.schema_version(), kept)
}
