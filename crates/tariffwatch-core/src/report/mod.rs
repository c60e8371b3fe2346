//! Report builder.
//!
//! Renders change events into Markdown, JSON and a short plain-text
//! summary. Reports consume diff output only; they never look at
//! snapshots.

pub mod json;
pub mod markdown;
pub mod summary;

pub use json::{render_json, JsonReport, ReportMeta};
pub use markdown::render_markdown;
pub use summary::{render_text_summary, MAX_SUMMARY_LINES};

use crate::diff::{ChangeEvent, ChangeType};
use crate::snapshot::TrackingMode;
use chrono::NaiveDate;

/// How many events the highlight sections show
pub const HIGHLIGHT_COUNT: usize = 3;

pub(crate) const DISCLAIMER: &str = "This report is for informational purposes only and does not \
constitute legal or trade compliance advice. Rates are reported as published; verify with \
official tariff schedules and binding rulings.";

/// Run metadata shown alongside the events
#[derive(Debug, Clone, PartialEq)]
pub struct ReportContext {
    pub run_date: NaiveDate,
    /// Where the export came from, if known
    pub source: Option<String>,
    pub mode: TrackingMode,
    pub tracked_hts: Vec<String>,
}

impl ReportContext {
    pub fn new(run_date: NaiveDate, mode: TrackingMode) -> Self {
        Self {
            run_date,
            source: None,
            mode,
            tracked_hts: Vec::new(),
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn with_tracked_hts(mut self, tracked: Vec<String>) -> Self {
        self.tracked_hts = tracked;
        self
    }
}

fn highlight_rank(change_type: ChangeType) -> u8 {
    match change_type {
        ChangeType::RateChanged => 0,
        ChangeType::Added => 1,
        ChangeType::Removed => 2,
    }
}

/// Up to `n` events, rate changes first, then additions, then removals
///
/// Ties keep diff order.
pub fn top_changes(events: &[ChangeEvent], n: usize) -> Vec<&ChangeEvent> {
    let mut ranked: Vec<&ChangeEvent> = events.iter().collect();
    ranked.sort_by_key(|e| highlight_rank(e.change_type));
    ranked.truncate(n);
    ranked
}

pub(crate) fn change_label(change_type: ChangeType) -> &'static str {
    match change_type {
        ChangeType::Added => "Added",
        ChangeType::Removed => "Removed",
        ChangeType::RateChanged => "Rate Changed",
    }
}
