//! Writes rendered reports to the reports directory
//!
//! Each run produces `report_YYYYMMDD.md` and `report_YYYYMMDD.json`.
//! Existing reports for the same date are overwritten.

use crate::errors::Result;
use crate::fs::atomic_write;
use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use tariffwatch_core::diff::ChangeEvent;
use tariffwatch_core::errors::ExError;
use tariffwatch_core::report::{render_json, render_markdown, render_text_summary, ReportContext};
use tariffwatch_core::{log_op_end, log_op_error, log_op_start};

/// Paths of the written reports and the text summary that points at them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenReports {
    pub markdown_path: PathBuf,
    pub json_path: PathBuf,
    pub summary: String,
}

pub fn report_file_stem(date: NaiveDate) -> String {
    format!("report_{}", date.format("%Y%m%d"))
}

/// Render and write both reports for one run
///
/// # Errors
///
/// `ERR_SERIALIZATION` if the JSON report cannot be encoded, `ERR_IO` if
/// either file cannot be written.
pub fn write_reports(
    events: &[ChangeEvent],
    ctx: &ReportContext,
    reports_dir: &Path,
) -> Result<WrittenReports> {
    log_op_start!(
        "write_reports",
        run_date = %ctx.run_date,
        changes = events.len() as u64
    );
    let start = std::time::Instant::now();

    let result = write_inner(events, ctx, reports_dir);
    match &result {
        Ok(written) => {
            log_op_end!(
                "write_reports",
                duration_ms = start.elapsed().as_millis() as u64,
                markdown = %written.markdown_path.display(),
                json = %written.json_path.display()
            );
        }
        Err(e) => {
            log_op_error!(
                "write_reports",
                e.clone(),
                duration_ms = start.elapsed().as_millis() as u64
            );
        }
    }
    result
}

fn write_inner(
    events: &[ChangeEvent],
    ctx: &ReportContext,
    reports_dir: &Path,
) -> Result<WrittenReports> {
    let stem = report_file_stem(ctx.run_date);
    let markdown_path = reports_dir.join(format!("{}.md", stem));
    let json_path = reports_dir.join(format!("{}.json", stem));

    let json = render_json(events, ctx).map_err(|e| ExError::from(e).with_op("write_reports"))?;
    let markdown = render_markdown(events, ctx);

    atomic_write(&markdown_path, markdown.as_bytes())?;
    atomic_write(&json_path, json.as_bytes())?;

    let summary = render_text_summary(
        events,
        ctx.run_date,
        &markdown_path.display().to_string(),
        &json_path.display().to_string(),
    );

    Ok(WrittenReports {
        markdown_path,
        json_path,
        summary,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_file_stem() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 3).unwrap();
        assert_eq!(report_file_stem(date), "report_20250303");
    }
}
