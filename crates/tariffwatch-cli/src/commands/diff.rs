//! Diff two exports without touching the snapshot store

use crate::commands::{run_date, CommandResult};
use chrono::NaiveDate;
use clap::Args;
use std::path::{Path, PathBuf};
use tariffwatch_core::errors::{ExError, ExErrorKind};
use tariffwatch_core::logging_facility::{self, Profile};
use tariffwatch_core::normalize::normalize_hts_code;
use tariffwatch_core::report::{render_markdown, ReportContext};
use tariffwatch_core::snapshot::{build_snapshot, filter_tracked, Snapshot};
use tariffwatch_core::{compute_diff, TrackingMode};
use tariffwatch_store::export::read_export_path;
use tariffwatch_store::Result;

#[derive(Debug, Args)]
pub struct DiffArgs {
    /// Earlier export (CSV)
    pub previous: PathBuf,

    /// Later export (CSV)
    pub current: PathBuf,

    /// Comma-separated HTS prefixes; diff only matching codes
    #[arg(long, value_delimiter = ',')]
    pub tracked: Vec<String>,

    /// Print change events as JSON instead of the Markdown report
    #[arg(long)]
    pub json: bool,

    /// Date to stamp on the report, defaults to today
    #[arg(long)]
    pub date: Option<NaiveDate>,
}

fn load(path: &Path, date: NaiveDate) -> Result<Snapshot> {
    let table = read_export_path(path)?;
    Ok(build_snapshot(date, &table.rows).snapshot)
}

pub fn execute(args: DiffArgs) -> CommandResult {
    let invalid: Vec<String> = args
        .tracked
        .iter()
        .filter(|p| normalize_hts_code(p).is_none())
        .map(|p| format!("{:?}", p))
        .collect();
    if !invalid.is_empty() {
        return Err(ExError::new(ExErrorKind::InvalidInput)
            .with_op("diff")
            .with_message(format!("invalid --tracked prefix(es): {}", invalid.join(", ")))
            .into());
    }

    logging_facility::init(Profile::Development);

    let date = run_date(args.date);
    let previous = load(&args.previous, date)?;
    let current = load(&args.current, date)?;

    let (events, mode) = if args.tracked.is_empty() {
        (compute_diff(&previous, &current), TrackingMode::FullTable)
    } else {
        let events = compute_diff(
            &filter_tracked(&previous, &args.tracked),
            &filter_tracked(&current, &args.tracked),
        );
        (events, TrackingMode::TrackedOnly)
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&events)?);
    } else {
        let ctx = ReportContext::new(date, mode)
            .with_source(args.current.display().to_string())
            .with_tracked_hts(args.tracked);
        print!("{}", render_markdown(&events, &ctx));
    }
    Ok(())
}
