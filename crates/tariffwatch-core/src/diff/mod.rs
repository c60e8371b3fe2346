//! Snapshot diff engine.
//!
//! Compares two snapshots of the schedule and produces the ordered list of
//! change events that reports and change history are built from.
//!
//! ## Entry point
//!
//! ```ignore
//! use tariffwatch_core::diff::{compute_diff, summarize};
//!
//! let events = compute_diff(&previous, &current);
//! let summary = summarize(&events);
//! ```
//!
//! ## Guarantees
//!
//! - **Determinism**: identical inputs produce identical output.
//! - **Purity**: inputs are borrowed immutably; nothing else is touched
//!   except log events.
//! - **Raw-text semantics**: only published text is compared, never derived
//!   percentages.
//! - **Prefix agnosticism**: tracked-only mode filters snapshots beforehand.

pub mod engine;
pub mod model;

pub use engine::{compute_diff, ensure_comparable, summarize};
pub use model::{ChangeEvent, ChangeType, DiffSummary};
