//! Content digests for snapshots.
//!
//! A digest covers the records only. The observation date and schema
//! version are excluded, so re-normalizing an unchanged export on another
//! day yields the same digest.
//!
//! ## Determinism Guarantees
//!
//! - Records are held in a sorted map, so serialization order is key order
//! - Same records → same digest, regardless of insertion order

use crate::errors::Result;
use crate::model::TariffRecord;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;

/// Compute the content digest of a record set.
///
/// ## Returns
///
/// Hex-encoded SHA256 digest (64 characters)
///
/// ## Errors
///
/// Returns `TariffWatchError::Serialization` if JSON serialization fails.
pub fn compute_content_digest(records: &BTreeMap<String, TariffRecord>) -> Result<String> {
    let canonical = serde_json::to_string(records)?;
    Ok(hash_string(&canonical))
}

fn hash_string(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    hex::encode(hasher.finalize())
}
