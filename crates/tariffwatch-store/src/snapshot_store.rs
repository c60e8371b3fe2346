//! Filesystem snapshot store
//!
//! One pretty-printed JSON file per observation date, named
//! `hts_snapshot_YYYYMMDD.json`. Files that do not match the pattern are
//! ignored by every operation here.

use crate::errors::{io_error_at, serialization_error, Result};
use crate::fs::atomic_write;
use chrono::NaiveDate;
use std::fs;
use std::path::{Path, PathBuf};
use tariffwatch_core::errors::ExError;
use tariffwatch_core::snapshot::Snapshot;
use tariffwatch_core::{log_op_end, log_op_error, log_op_start};

const FILE_PREFIX: &str = "hts_snapshot_";
const FILE_SUFFIX: &str = ".json";
const DATE_FORMAT: &str = "%Y%m%d";

/// What `save` did on disk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// No snapshot existed for this date
    Created,
    /// Identical content already stored; nothing written
    Unchanged,
    /// Different content for the same date was overwritten
    Replaced,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedSnapshot {
    pub path: PathBuf,
    pub outcome: SaveOutcome,
    pub content_digest: String,
}

/// A stored snapshot file and the date encoded in its name
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct StoredSnapshot {
    pub date: NaiveDate,
    pub path: PathBuf,
}

/// File name for a snapshot date
///
/// ```
/// use chrono::NaiveDate;
/// use tariffwatch_store::snapshot_store::snapshot_file_name;
///
/// let date = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap();
/// assert_eq!(snapshot_file_name(date), "hts_snapshot_20250106.json");
/// ```
pub fn snapshot_file_name(date: NaiveDate) -> String {
    format!("{}{}{}", FILE_PREFIX, date.format(DATE_FORMAT), FILE_SUFFIX)
}

/// Date encoded in a snapshot file name, if it matches the pattern
pub fn parse_snapshot_file_name(name: &str) -> Option<NaiveDate> {
    let stem = name.strip_prefix(FILE_PREFIX)?.strip_suffix(FILE_SUFFIX)?;
    if stem.len() != 8 {
        return None;
    }
    NaiveDate::parse_from_str(stem, DATE_FORMAT).ok()
}

/// Dated snapshot files under one directory
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    dir: PathBuf,
}

impl SnapshotStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, date: NaiveDate) -> PathBuf {
        self.dir.join(snapshot_file_name(date))
    }

    /// Persist a snapshot under its date
    ///
    /// Re-saving identical records and schema version for the same date is
    /// a no-op.
    ///
    /// # Errors
    ///
    /// `ERR_SERIALIZATION` if the snapshot cannot be encoded, `ERR_IO` if
    /// the write fails.
    pub fn save(&self, snapshot: &Snapshot) -> Result<SavedSnapshot> {
        log_op_start!("save_snapshot", snapshot_date = %snapshot.date());
        let start = std::time::Instant::now();

        let result = self.save_inner(snapshot);
        match &result {
            Ok(saved) => {
                log_op_end!(
                    "save_snapshot",
                    duration_ms = start.elapsed().as_millis() as u64,
                    outcome = ?saved.outcome,
                    path = %saved.path.display()
                );
            }
            Err(e) => {
                log_op_error!(
                    "save_snapshot",
                    e.clone(),
                    duration_ms = start.elapsed().as_millis() as u64
                );
            }
        }
        result
    }

    fn save_inner(&self, snapshot: &Snapshot) -> Result<SavedSnapshot> {
        let path = self.path_for(snapshot.date());
        let content_digest = snapshot
            .content_digest()
            .map_err(|e| ExError::from(e).with_op("save_snapshot"))?;

        let outcome = if path.exists() {
            match self.load(&path) {
                Ok(existing)
                    if existing.schema_version() == snapshot.schema_version()
                        && existing.content_digest().ok().as_deref()
                            == Some(content_digest.as_str()) =>
                {
                    SaveOutcome::Unchanged
                }
                Ok(_) => SaveOutcome::Replaced,
                Err(e) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %e,
                        "existing snapshot unreadable, replacing"
                    );
                    SaveOutcome::Replaced
                }
            }
        } else {
            SaveOutcome::Created
        };

        if outcome != SaveOutcome::Unchanged {
            let json = serde_json::to_vec_pretty(snapshot)
                .map_err(|e| serialization_error("save_snapshot", e))?;
            atomic_write(&path, &json)?;
        }

        Ok(SavedSnapshot {
            path,
            outcome,
            content_digest,
        })
    }

    /// Load a snapshot file
    ///
    /// # Errors
    ///
    /// `ERR_IO` if unreadable, `ERR_SERIALIZATION` if not a snapshot.
    pub fn load(&self, path: &Path) -> Result<Snapshot> {
        let bytes = fs::read(path).map_err(|e| io_error_at("load_snapshot", path, e))?;
        serde_json::from_slice(&bytes).map_err(|e| {
            serialization_error("load_snapshot", format!("{}: {}", path.display(), e))
        })
    }

    /// Stored snapshots, oldest first
    ///
    /// A missing directory is an empty store.
    ///
    /// # Errors
    ///
    /// `ERR_IO` if the directory exists but cannot be read.
    pub fn list(&self) -> Result<Vec<StoredSnapshot>> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }
        let entries =
            fs::read_dir(&self.dir).map_err(|e| io_error_at("list_snapshots", &self.dir, e))?;

        let mut stored = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| io_error_at("list_snapshots", &self.dir, e))?;
            let name = entry.file_name();
            if let Some(date) = name.to_str().and_then(parse_snapshot_file_name) {
                stored.push(StoredSnapshot {
                    date,
                    path: entry.path(),
                });
            }
        }
        stored.sort();
        Ok(stored)
    }

    /// Most recent snapshot strictly older than `date`
    ///
    /// # Errors
    ///
    /// See [`SnapshotStore::list`].
    pub fn find_previous(&self, date: NaiveDate) -> Result<Option<StoredSnapshot>> {
        Ok(self.list()?.into_iter().rev().find(|s| s.date < date))
    }

    /// Keep the newest `max(retain_weeks * 2, 2)` snapshots and delete the rest
    ///
    /// Returns the deleted paths, oldest first.
    ///
    /// # Errors
    ///
    /// `ERR_IO` if listing or deleting fails.
    pub fn apply_retention(&self, retain_weeks: u32) -> Result<Vec<PathBuf>> {
        let keep = retain_weeks.saturating_mul(2).max(2) as usize;
        let stored = self.list()?;
        if stored.len() <= keep {
            return Ok(Vec::new());
        }

        let excess = stored.len() - keep;
        let mut deleted = Vec::with_capacity(excess);
        for old in stored.into_iter().take(excess) {
            fs::remove_file(&old.path)
                .map_err(|e| io_error_at("apply_retention", &old.path, e))?;
            tracing::info!(
                op = "apply_retention",
                path = %old.path.display(),
                "deleted old snapshot"
            );
            deleted.push(old.path);
        }
        Ok(deleted)
    }
}
