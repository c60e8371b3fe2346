//! Change event types.
//!
//! A [`ChangeEvent`] serializes to exactly six fields. This is the
//! persisted change-history schema, so field names and enum spellings are
//! fixed.

use crate::model::RateField;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Kind of difference between two snapshots
///
/// Declaration order is output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChangeType {
    Added,
    Removed,
    RateChanged,
}

impl ChangeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeType::Added => "ADDED",
            ChangeType::Removed => "REMOVED",
            ChangeType::RateChanged => "RATE_CHANGED",
        }
    }
}

impl std::fmt::Display for ChangeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One detected difference between a previous and a current snapshot
///
/// For `Added` and `Removed`, `field_changed`, `old_value` and `new_value`
/// are all `None`. For `RateChanged` all three are set and the values are
/// the raw published text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeEvent {
    pub hts_code: String,
    pub change_type: ChangeType,
    pub field_changed: Option<RateField>,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
    pub description: String,
}

impl ChangeEvent {
    pub fn added(hts_code: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            hts_code: hts_code.into(),
            change_type: ChangeType::Added,
            field_changed: None,
            old_value: None,
            new_value: None,
            description: description.into(),
        }
    }

    pub fn removed(hts_code: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            hts_code: hts_code.into(),
            change_type: ChangeType::Removed,
            field_changed: None,
            old_value: None,
            new_value: None,
            description: description.into(),
        }
    }

    pub fn rate_changed(
        hts_code: impl Into<String>,
        field: RateField,
        old_value: impl Into<String>,
        new_value: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            hts_code: hts_code.into(),
            change_type: ChangeType::RateChanged,
            field_changed: Some(field),
            old_value: Some(old_value.into()),
            new_value: Some(new_value.into()),
            description: description.into(),
        }
    }
}

/// Event counts for one diff pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffSummary {
    pub added: usize,
    pub removed: usize,
    pub rate_changed: usize,
    /// `RateChanged` events per field
    pub by_field: BTreeMap<RateField, usize>,
}

impl DiffSummary {
    pub fn total(&self) -> usize {
        self.added + self.removed + self.rate_changed
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}
