//! The `sync` subcommand

use std::process::ExitCode;
use std::sync::Arc;

use clap::Args;
use timebridge_core::SyncEngine;
use timebridge_domain::constants::{
    DEFAULT_PROJECT_MATCH_THRESHOLD, DEFAULT_TASK_MATCH_THRESHOLD,
};
use timebridge_domain::{ActivityFilters, Result, SyncOptions, TimebridgeError};
use timebridge_infra::api::{RemoteClient, RemoteClientConfig};
use timebridge_infra::config;
use tracing::error;

use crate::report::ConsoleReporter;

/// Arguments for `timebridge sync`.
#[derive(Debug, Args)]
pub struct SyncArgs {
    /// Source instance name, as listed in the config file
    pub source: String,

    /// Target instance name
    pub target: String,

    /// Start date (YYYY-MM-DD)
    #[arg(short = 'f', long)]
    pub from: Option<String>,

    /// End date (YYYY-MM-DD)
    #[arg(short = 't', long)]
    pub to: Option<String>,

    /// Source project id to filter by
    #[arg(short = 'p', long)]
    pub project: Option<i64>,

    /// Project matching threshold (0.0 - 1.0)
    #[arg(long, default_value_t = DEFAULT_PROJECT_MATCH_THRESHOLD)]
    pub project_threshold: f64,

    /// Task matching threshold (0.0 - 1.0)
    #[arg(long, default_value_t = DEFAULT_TASK_MATCH_THRESHOLD)]
    pub task_threshold: f64,

    /// Compute and report classifications without writing
    #[arg(long)]
    pub dry_run: bool,

    /// Verbose tracing
    #[arg(long)]
    pub debug: bool,
}

pub fn run(args: SyncArgs) -> ExitCode {
    init_tracing(args.debug);

    match execute(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err @ (TimebridgeError::Config(_) | TimebridgeError::InvalidInput(_))) => {
            error!(%err, "configuration error");
            eprintln!("error: {err}");
            ExitCode::from(2)
        }
        Err(err) => {
            error!(%err, "sync failed");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn execute(args: SyncArgs) -> Result<()> {
    let catalog = config::load()?;

    let source = instance_client(&catalog, &args.source)?;
    let target = instance_client(&catalog, &args.target)?;

    let date_filters = ActivityFilters {
        from: args.from.clone(),
        to: args.to.clone(),
        ..ActivityFilters::default()
    };
    let options = SyncOptions {
        project_match_threshold: args.project_threshold,
        task_match_threshold: args.task_threshold,
        // the project filter names a source-side id; it has no meaning on
        // the target instance
        source_filters: ActivityFilters { project_id: args.project, ..date_filters.clone() },
        target_filters: date_filters,
        dry_run: args.dry_run,
        debug: args.debug,
    };

    let engine = SyncEngine::new(source, target, options)?;
    let mut reporter = ConsoleReporter::new(args.dry_run);
    engine.sync(&mut reporter)?;

    println!("{}", reporter.summary());
    Ok(())
}

fn instance_client(
    catalog: &timebridge_domain::Config,
    name: &str,
) -> Result<Arc<RemoteClient>> {
    let instance = catalog.instance(name).ok_or_else(|| {
        TimebridgeError::Config(format!("instance '{name}' not found in config"))
    })?;
    Ok(Arc::new(RemoteClient::new(RemoteClientConfig::from_instance(instance))?))
}

fn init_tracing(debug: bool) {
    let default_directive = if debug { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_directive));

    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();
}
