use crate::config::{AppConfig, ConfigError};
use crate::demo::{run_demo, DemoArgs};
use crate::error::AppError;
use crate::scoring::{CsvScoreStore, RecomputeTrigger};
use crate::server;
use crate::telemetry;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(
    name = "Pageant Tabulator",
    about = "Run the pageant scoring service and tabulation tools from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Rebuild the derived overall standings from the stored category tables
    Recompute(RecomputeArgs),
    /// Run a seeded end-to-end demo printing rankings and overall standings
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Override the data directory backing the CSV score tables
    #[arg(long)]
    pub(crate) data_dir: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct RecomputeArgs {
    /// Data directory backing the CSV score tables (defaults to APP_DATA_DIR)
    #[arg(long)]
    pub(crate) data_dir: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Recompute(args) => run_recompute(args),
        Command::Demo(args) => run_demo(args),
    }
}

fn run_recompute(args: RecomputeArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let data_dir = args
        .data_dir
        .or(config.storage.data_dir)
        .ok_or(ConfigError::MissingDataDir)?;

    let store = Arc::new(CsvScoreStore::new(data_dir)?);
    let trigger = RecomputeTrigger::new(store);
    let count = trigger.rebuild()?;
    println!("Recomputed overall standings for {count} candidate(s)");
    Ok(())
}
