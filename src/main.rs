//! Industry Index CLI entry point.

use anyhow::Result;
use clap::Parser;

use industry_index::cli::commands::{build_service, query, serve};
use industry_index::cli::{Cli, Commands};
use industry_index::infrastructure::logging::LoggerImpl;
use industry_index::{Config, ConfigLoader};

#[tokio::main]
async fn main() {
    // A missing .env file is fine.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let json = cli.json;

    if let Err(err) = run(cli).await {
        industry_index::cli::handle_error(&err, json);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config: Config = match &cli.config {
        Some(path) => ConfigLoader::load_from_file(path)?,
        None => ConfigLoader::load()?,
    };
    let _logger = LoggerImpl::init(&config.logging)?;

    match cli.command {
        Commands::Serve(args) => serve::execute(args, &config).await,
        command => {
            let service = build_service(&config)?;
            query::execute(command, &service, cli.json).await
        }
    }
}
