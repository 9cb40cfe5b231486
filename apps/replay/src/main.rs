//! docwatch replay tool.
//!
//! Feeds saved push envelopes (file arguments, or stdin when none are given)
//! through the same decode path as the push endpoint.

#![forbid(unsafe_code)]

mod replay;

use std::env;
use std::io;
use std::path::PathBuf;

use clap::Parser;
use docwatch_application::ObjectNotificationService;
use docwatch_core::AppError;
use docwatch_infrastructure::ObjectSinkConfig;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Replays saved Pub/Sub push envelopes through the storage object sink.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Envelope files to replay; reads one envelope from stdin when empty
    inputs: Vec<PathBuf>,

    /// Decode and log only, never hand notices to the sink
    #[arg(long, env = "REPLAY_DRY_RUN")]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing();

    let object_sink = ObjectSinkConfig::from_lookup(&|name: &str| env::var(name).ok())?;
    let service = ObjectNotificationService::new(object_sink.build()?);

    info!(
        inputs = cli.inputs.len(),
        dry_run = cli.dry_run,
        object_sink = object_sink.name(),
        "docwatch-replay started"
    );

    if cli.inputs.is_empty() {
        let notice = replay::replay_reader(&service, cli.dry_run, io::stdin().lock()).await?;
        replay::log_notice("stdin", &notice);
        return Ok(());
    }

    replay::replay_files(&service, cli.dry_run, &cli.inputs)
        .await
        .into_result()
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}
