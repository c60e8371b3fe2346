//! Rate lookup command

use crate::commands::{run_date, CommandResult};
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;
use tariffwatch_core::errors::{ExError, ExErrorKind};
use tariffwatch_core::logging_facility::{self, Profile};
use tariffwatch_core::normalize::normalize_hts_code;
use tariffwatch_core::TariffRecord;
use tariffwatch_store::config::load_config;
use tariffwatch_store::errors::{config_error, not_found};
use tariffwatch_store::lookup::LookupService;

#[derive(Debug, Args)]
pub struct LookupArgs {
    /// HTS codes or prefixes, dots optional; comma-separate several
    #[arg(long, value_delimiter = ',', required = true)]
    pub hts: Vec<String>,

    /// Export to search; defaults to `sources.export_path` from --config
    #[arg(long)]
    pub export: Option<PathBuf>,

    #[arg(long, default_value = "config.yaml")]
    pub config: PathBuf,

    /// Print only JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct LookupRow<'a> {
    hts_code: &'a str,
    description: &'a str,
    rate_general_raw: &'a str,
    rate_special_raw: &'a str,
    rate_column2_raw: &'a str,
    rate_general_value: Option<f64>,
}

impl<'a> From<&'a TariffRecord> for LookupRow<'a> {
    fn from(record: &'a TariffRecord) -> Self {
        Self {
            hts_code: record.hts_code(),
            description: record.description(),
            rate_general_raw: record.rate_general().raw(),
            rate_special_raw: record.rate_special().raw(),
            rate_column2_raw: record.rate_column2().raw(),
            rate_general_value: record.rate_general().percent_value(),
        }
    }
}

pub fn execute(args: LookupArgs) -> CommandResult {
    let codes: Vec<String> = args
        .hts
        .iter()
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .collect();
    if codes.is_empty() {
        return Err(invalid_input("--hts requires at least one HTS code").into());
    }
    let invalid: Vec<&str> = codes
        .iter()
        .filter(|c| normalize_hts_code(c).is_none())
        .map(String::as_str)
        .collect();
    if !invalid.is_empty() {
        return Err(invalid_input(format!("invalid HTS code(s): {}", invalid.join(", "))).into());
    }

    let export = match args.export {
        Some(path) => {
            logging_facility::init(Profile::Development);
            path
        }
        None => {
            let config = load_config(&args.config)?;
            logging_facility::init(config.runtime.log_profile);
            config.sources.export_path.ok_or_else(|| {
                config_error("no export given: set sources.export_path or pass --export")
            })?
        }
    };

    let mut service = LookupService::new(run_date(None));
    let records = service.lookup(&export, &codes)?;
    if records.is_empty() {
        return Err(not_found(
            "lookup",
            format!("no HTS rows found matching: {}", codes.join(", ")),
        )
        .into());
    }

    let rows: Vec<LookupRow<'_>> = records.iter().map(LookupRow::from).collect();
    let json = serde_json::to_string_pretty(&rows)?;
    if args.json {
        println!("{}", json);
        return Ok(());
    }

    let sep = "-".repeat(80);
    println!("{}", sep);
    println!(
        "  HTS Lookup: {} result(s) for {}",
        rows.len(),
        codes.join(", ")
    );
    println!("{}", sep);
    for row in &rows {
        println!("  HTS Code    : {}", row.hts_code);
        println!("  Description : {}", row.description);
        match row.rate_general_value {
            Some(v) => println!("  General Rate: {}  ({}%)", row.rate_general_raw, v),
            None => println!("  General Rate: {}", row.rate_general_raw),
        }
        println!("  Special Rate: {}", row.rate_special_raw);
        println!("  Column 2    : {}", row.rate_column2_raw);
        println!("{}", sep);
    }
    println!();
    println!("JSON:");
    println!("{}", json);
    Ok(())
}

fn invalid_input(message: impl Into<String>) -> ExError {
    ExError::new(ExErrorKind::InvalidInput)
        .with_op("lookup")
        .with_message(message)
}
