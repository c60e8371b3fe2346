//! Snapshots of the tariff schedule.
//!
//! A [`Snapshot`] is the keyed set of canonical records observed on one
//! date. It is built once from one export and never mutated.
//!
//! ## Responsibilities
//!
//! - Build snapshots from raw rows, skipping malformed rows (`build`)
//! - Restrict snapshots to tracked code prefixes (`filter`)
//! - Compute content digests for idempotent re-runs (`digest`)
//!
//! ## Non-Responsibilities
//!
//! - Persistence (handled by `tariffwatch-store`)
//! - Change detection (handled by `diff`)

pub mod build;
pub mod digest;
pub mod filter;

pub use build::{build_snapshot, DuplicateRow, SkippedRow, SnapshotBuild};
pub use digest::compute_content_digest;
pub use filter::{filter_tracked, normalize_prefixes, TrackingMode};

use crate::errors::Result;
use crate::model::TariffRecord;
use crate::normalize::NORMALIZER_SCHEMA_VERSION;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Canonical records as of one observation date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    date: NaiveDate,
    schema_version: u32,
    records: BTreeMap<String, TariffRecord>,
}

impl Snapshot {
    /// Build a snapshot from records at the current normalizer schema version.
    ///
    /// When two records share an HTS code the first one wins.
    pub fn new(date: NaiveDate, records: impl IntoIterator<Item = TariffRecord>) -> Self {
        Self::with_schema_version(date, NORMALIZER_SCHEMA_VERSION, records)
    }

    /// Build a snapshot stamped with an explicit schema version
    pub fn with_schema_version(
        date: NaiveDate,
        schema_version: u32,
        records: impl IntoIterator<Item = TariffRecord>,
    ) -> Self {
        let mut map = BTreeMap::new();
        for record in records {
            map.entry(record.hts_code().to_string()).or_insert(record);
        }
        Self {
            date,
            schema_version,
            records: map,
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn schema_version(&self) -> u32 {
        self.schema_version
    }

    pub fn records(&self) -> &BTreeMap<String, TariffRecord> {
        &self.records
    }

    pub fn get(&self, hts_code: &str) -> Option<&TariffRecord> {
        self.records.get(hts_code)
    }

    pub fn contains(&self, hts_code: &str) -> bool {
        self.records.contains_key(hts_code)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// SHA-256 over the canonical JSON of the records, date excluded
    pub fn content_digest(&self) -> Result<String> {
        compute_content_digest(&self.records)
    }
}
