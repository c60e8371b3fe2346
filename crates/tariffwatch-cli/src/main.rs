//! Tariff Watch CLI
//!
//! Command-line interface for the snapshot-diff pipeline

use clap::{Parser, Subcommand};
use tariffwatch_core::errors::{ExError, ExErrorKind};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "tariffwatch")]
#[command(about = "Tariff Watch - weekly tariff schedule snapshots and change reports", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Snapshot the configured export, diff against the previous week and write reports
    Run(commands::run::RunArgs),
    /// Diff two exports directly
    Diff(commands::diff::DiffArgs),
    /// Look up current rates for HTS codes or prefixes
    Lookup(commands::lookup::LookupArgs),
}

/// Process exit code for a failed command
///
/// 1 no lookup match, 2 configuration or usage, 3 export unreadable,
/// 4 anything else.
fn exit_code(err: &(dyn std::error::Error + 'static)) -> i32 {
    let Some(ex) = err.downcast_ref::<ExError>() else {
        return 4;
    };
    match ex.kind() {
        ExErrorKind::NotFound => 1,
        ExErrorKind::Config | ExErrorKind::InvalidInput => 2,
        ExErrorKind::Export => 3,
        ExErrorKind::Io if ex.op() == Some("read_export") => 3,
        _ => 4,
    }
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run(args) => commands::run::execute(args),
        Commands::Diff(args) => commands::diff::execute(args),
        Commands::Lookup(args) => commands::lookup::execute(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(exit_code(e.as_ref()));
    }
}
