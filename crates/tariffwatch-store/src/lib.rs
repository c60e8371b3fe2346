//! Tariff Watch Store - file-backed adapters around the core kernel
//!
//! Provides:
//! - CSV export reading with header aliasing
//! - Dated JSON snapshot files with retention
//! - YAML configuration with `ENV:` indirection
//! - Report writing
//! - Cached lookups against an export

pub mod config;
pub mod errors;
pub mod export;
pub mod fs;
pub mod lookup;
pub mod report_writer;
pub mod snapshot_store;

// Re-export key types
pub use config::{load_config, load_tracked_hts_file, AppConfig};
pub use errors::Result;
pub use export::{read_export, read_export_path, ExportTable};
pub use lookup::LookupService;
pub use report_writer::{write_reports, WrittenReports};
pub use snapshot_store::{SaveOutcome, SavedSnapshot, SnapshotStore, StoredSnapshot};
