//! Tariff Watch Core - normalization and snapshot-diff kernel
//!
//! This crate turns raw rows of a published tariff schedule into canonical
//! records and computes a deterministic delta between two snapshots:
//! - Rate parsing into FREE / PERCENT / SPECIFIC / COMPOUND / UNPARSEABLE
//! - Row normalization keyed by HTS code
//! - Snapshots with content digests and tracked-prefix filtering
//! - Field-level diffing by published text
//! - Markdown, JSON and short text reports
//!
//! The kernel is synchronous and performs no I/O. Reading exports and
//! persisting snapshots live in `tariffwatch-store`.

pub use tariffwatch_core_types as core_types;

pub mod cache;
pub mod diff;
pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod normalize;
pub mod rate_parser;
pub mod report;
pub mod snapshot;

// Re-export commonly used types
pub use diff::{compute_diff, ensure_comparable, ChangeEvent, ChangeType};
pub use errors::{ExError, ExErrorKind, Result, TariffWatchError};
pub use model::{RateField, RateKind, RateValue, TariffRecord};
pub use normalize::{normalize_row, RawRow, NORMALIZER_SCHEMA_VERSION};
pub use rate_parser::parse_rate;
pub use snapshot::{build_snapshot, filter_tracked, Snapshot, SnapshotBuild, TrackingMode};
