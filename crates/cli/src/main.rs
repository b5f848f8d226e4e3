//! farm-assistant CLI entry point

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod args;
mod commands;
mod config;

use args::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    // Secrets may live in a local .env file; a missing file is fine
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    // Logs go to stderr; the chat itself owns stdout
    let log_level = cli.log_level.as_deref().unwrap_or("warn");
    init_logging(log_level)?;

    match cli.command {
        Commands::Chat(args) => commands::chat::execute(args, cli.config).await,
        Commands::Ask(args) => commands::ask::execute(args, cli.config).await,
        Commands::Classify(args) => commands::classify::execute(args, cli.config).await,
        Commands::Status(args) => commands::status::execute(args, cli.config).await,
        Commands::Examples => commands::examples::execute(),
        Commands::Config(args) => commands::config::execute(args).await,
        Commands::Doctor(args) => commands::doctor::execute(args, cli.config).await,
    }
}

fn init_logging(level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(level))?;

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(filter)
        .init();

    Ok(())
}
