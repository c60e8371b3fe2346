//! JSON report rendering.

use crate::diff::{summarize, ChangeEvent, DiffSummary};
use crate::errors::Result;
use crate::report::ReportContext;
use crate::snapshot::TrackingMode;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct ReportMeta {
    pub date: String,
    pub source_urls: Vec<String>,
    pub mode: TrackingMode,
    pub tracked_hts: Vec<String>,
    pub total_changes: usize,
    pub summary: DiffSummary,
}

/// JSON document: run metadata plus the events in diff order
#[derive(Debug, Clone, Serialize)]
pub struct JsonReport<'a> {
    pub meta: ReportMeta,
    pub changes: &'a [ChangeEvent],
}

impl<'a> JsonReport<'a> {
    pub fn new(events: &'a [ChangeEvent], ctx: &ReportContext) -> Self {
        Self {
            meta: ReportMeta {
                date: ctx.run_date.format("%Y-%m-%d").to_string(),
                source_urls: ctx.source.iter().cloned().collect(),
                mode: ctx.mode,
                tracked_hts: ctx.tracked_hts.clone(),
                total_changes: events.len(),
                summary: summarize(events),
            },
            changes: events,
        }
    }
}

/// Render the JSON report, pretty-printed
///
/// # Errors
///
/// Returns `TariffWatchError::Serialization` if JSON serialization fails.
pub fn render_json(events: &[ChangeEvent], ctx: &ReportContext) -> Result<String> {
    Ok(serde_json::to_string_pretty(&JsonReport::new(events, ctx))?)
}
