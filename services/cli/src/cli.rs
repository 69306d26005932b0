use crate::demo::run_demo;
use crate::search::{run_search, SearchArgs};
use buscapet::config::AppConfig;
use buscapet::error::AppError;
use buscapet::telemetry;
use clap::{Parser, Subcommand};
use tracing::debug;

#[derive(Parser, Debug)]
#[command(
    name = "BuscaPet",
    about = "Exercise the BuscaPet adoption core from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Walk through shelter, adopter, and application lifecycles (default command)
    Demo,
    /// Filter the sample catalog
    Search(SearchArgs),
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    debug!(environment = ?config.environment, policy = ?config.policy, "configuration loaded");

    match cli.command.unwrap_or(Command::Demo) {
        Command::Demo => run_demo(&config),
        Command::Search(args) => run_search(&config, args),
    }
}
