//! Cached HTS lookups against an export file
//!
//! The service owns its cache. Each export path is read and normalized at
//! most once per TTL window.

use crate::errors::Result;
use crate::export::read_export_path;
use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tariffwatch_core::cache::{Clock, SystemClock, TtlCache, DEFAULT_TTL};
use tariffwatch_core::model::TariffRecord;
use tariffwatch_core::snapshot::{build_snapshot, filter_tracked, Snapshot};
use tariffwatch_core::{log_op_end, log_op_error, log_op_start};

pub struct LookupService<C: Clock = SystemClock> {
    cache: TtlCache<PathBuf, Snapshot, C>,
    as_of: NaiveDate,
}

impl LookupService<SystemClock> {
    /// Service with the default one-hour TTL
    ///
    /// `as_of` is the date stamped on snapshots built from exports.
    pub fn new(as_of: NaiveDate) -> Self {
        Self::with_clock(as_of, DEFAULT_TTL, SystemClock)
    }
}

impl<C: Clock> LookupService<C> {
    pub fn with_clock(as_of: NaiveDate, ttl: Duration, clock: C) -> Self {
        Self {
            cache: TtlCache::new(ttl, clock),
            as_of,
        }
    }

    /// Records whose HTS code starts with any of `codes`, in code order
    ///
    /// Codes are matched after normalization, so `"8471.30"` finds
    /// `8471300000`. No match is an empty result, not an error.
    ///
    /// # Errors
    ///
    /// `ERR_IO` or `ERR_EXPORT` if the export has to be (re)loaded and
    /// cannot be read.
    pub fn lookup<S: AsRef<str>>(&mut self, export: &Path, codes: &[S]) -> Result<Vec<TariffRecord>> {
        log_op_start!("lookup", export = %export.display(), codes = codes.len() as u64);
        let start = std::time::Instant::now();

        let result = self.lookup_inner(export, codes);
        match &result {
            Ok(records) => {
                log_op_end!(
                    "lookup",
                    duration_ms = start.elapsed().as_millis() as u64,
                    records = records.len() as u64
                );
            }
            Err(e) => {
                log_op_error!(
                    "lookup",
                    e.clone(),
                    duration_ms = start.elapsed().as_millis() as u64
                );
            }
        }
        result
    }

    fn lookup_inner<S: AsRef<str>>(
        &mut self,
        export: &Path,
        codes: &[S],
    ) -> Result<Vec<TariffRecord>> {
        let key = export.to_path_buf();
        let records = match self.cache.get(&key) {
            Some(snapshot) => {
                tracing::debug!(op = "lookup", export = %export.display(), "cache hit");
                matching(snapshot, codes)
            }
            None => {
                let snapshot = self.load(export)?;
                let records = matching(&snapshot, codes);
                self.cache.purge_expired();
                self.cache.insert(key, snapshot);
                records
            }
        };
        Ok(records)
    }

    fn load(&self, export: &Path) -> Result<Snapshot> {
        let table = read_export_path(export)?;
        let build = build_snapshot(self.as_of, &table.rows);
        if !build.skipped.is_empty() {
            tracing::warn!(
                op = "lookup",
                export = %export.display(),
                skipped = build.skipped.len() as u64,
                "export rows skipped during normalization"
            );
        }
        Ok(build.snapshot)
    }

    /// Drop a cached export so the next lookup re-reads it
    pub fn invalidate(&mut self, export: &Path) -> bool {
        self.cache.invalidate(&export.to_path_buf()).is_some()
    }

    pub fn cached_exports(&self) -> usize {
        self.cache.len()
    }
}

fn matching<S: AsRef<str>>(snapshot: &Snapshot, codes: &[S]) -> Vec<TariffRecord> {
    filter_tracked(snapshot, codes)
        .records()
        .values()
        .cloned()
        .collect()
}
