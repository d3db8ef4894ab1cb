//! TimeBridge - cross-instance time-entry reconciliation CLI.

use std::process::ExitCode;

use clap::{Parser, Subcommand};

mod commands;
mod report;

/// Reconcile time entries between two instances of a time-tracking service
#[derive(Parser)]
#[command(name = "timebridge")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Reconcile activities from a source instance into a target instance
    Sync(commands::sync::SyncArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Commands::Sync(args) => commands::sync::run(args),
    }
}
