//! Weekly pipeline command

use crate::commands::{run_date, CommandResult};
use chrono::NaiveDate;
use clap::Args;
use std::path::PathBuf;
use tariffwatch_core::errors::ExError;
use tariffwatch_core::logging_facility;
use tariffwatch_core::report::{render_text_summary, ReportContext};
use tariffwatch_core::snapshot::{build_snapshot, filter_tracked, Snapshot};
use tariffwatch_core::{compute_diff, ensure_comparable, ChangeEvent, TrackingMode};
use tariffwatch_store::config::{load_config, load_tracked_hts_file};
use tariffwatch_store::errors::config_error;
use tariffwatch_store::export::read_export_path;
use tariffwatch_store::report_writer::write_reports;
use tariffwatch_store::snapshot_store::SnapshotStore;

#[derive(Debug, Args)]
pub struct RunArgs {
    /// Path to config.yaml
    #[arg(long, default_value = "config.yaml")]
    pub config: PathBuf,

    /// Override the configured mode
    #[arg(long)]
    pub mode: Option<TrackingMode>,

    /// File with one HTS code per line; replaces the configured list
    #[arg(long)]
    pub tracked_hts_file: Option<PathBuf>,

    /// Export to read instead of `sources.export_path`
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Observation date (YYYY-MM-DD), defaults to today
    #[arg(long)]
    pub date: Option<NaiveDate>,

    /// Diff and print the summary without saving the snapshot or writing reports
    #[arg(long)]
    pub dry_run: bool,
}

pub fn execute(args: RunArgs) -> CommandResult {
    let config = load_config(&args.config)?;
    logging_facility::init(config.runtime.log_profile);

    let mode = args.mode.unwrap_or(config.mode);
    let tracked = match &args.tracked_hts_file {
        Some(path) => load_tracked_hts_file(path)?,
        None => config.tracked_hts.clone(),
    };
    if mode == TrackingMode::TrackedOnly && tracked.is_empty() {
        return Err(config_error("tracked_only mode needs at least one tracked HTS code").into());
    }
    let export = args
        .export
        .clone()
        .or_else(|| config.sources.export_path.clone())
        .ok_or_else(|| config_error("no export given: set sources.export_path or pass --export"))?;
    let date = run_date(args.date);

    tracing::info!(
        op = "run",
        %date,
        mode = %mode,
        export = %export.display(),
        dry_run = args.dry_run,
        "starting weekly run"
    );

    let table = read_export_path(&export)?;
    let build = build_snapshot(date, &table.rows);
    if !build.skipped.is_empty() || !build.duplicates.is_empty() {
        tracing::warn!(
            op = "run",
            skipped = build.skipped.len() as u64,
            duplicates = build.duplicates.len() as u64,
            "export rows dropped during normalization"
        );
    }
    let current = build.snapshot;

    let store = SnapshotStore::new(&config.storage.snapshots_dir);
    if !args.dry_run {
        store.save(&current)?;
        store.apply_retention(config.storage.retain_weeks)?;
    }

    let events = match store.find_previous(date)? {
        Some(stored) => {
            let previous = store.load(&stored.path)?;
            ensure_comparable(&previous, &current).map_err(ExError::from)?;
            diff_in_mode(&previous, &current, mode, &tracked)
        }
        None => {
            tracing::info!(op = "run", %date, "no previous snapshot, skipping diff (first run)");
            Vec::new()
        }
    };

    let mut ctx = ReportContext::new(date, mode).with_source(export.display().to_string());
    if mode == TrackingMode::TrackedOnly {
        ctx = ctx.with_tracked_hts(tracked);
    }

    let summary = if args.dry_run {
        render_text_summary(&events, date, "(dry run, not written)", "(dry run, not written)")
    } else {
        write_reports(&events, &ctx, &config.storage.reports_dir)?.summary
    };
    println!("{}", summary);
    Ok(())
}

fn diff_in_mode(
    previous: &Snapshot,
    current: &Snapshot,
    mode: TrackingMode,
    tracked: &[String],
) -> Vec<ChangeEvent> {
    match mode {
        TrackingMode::FullTable => compute_diff(previous, current),
        TrackingMode::TrackedOnly => compute_diff(
            &filter_tracked(previous, tracked),
            &filter_tracked(current, tracked),
        ),
    }
}
