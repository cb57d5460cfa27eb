mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use mailscrub_config::Config;
use mailscrub_storage::Storage;

use crate::cli::Commands;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = cli::Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    let db_path = match cli.database.or_else(|| config.database.clone()) {
        Some(path) => path,
        None => Storage::default_path()?,
    };
    // Opening storage creates the pool and runs migrations
    let open = || Storage::new(Some(db_path.clone()));

    match cli.command {
        Commands::Migrate => commands::migrate::handle(&open().await?, &db_path).await,
        Commands::Import { path } => commands::import::handle(&open().await?, &path).await,
        Commands::Redact => commands::redact::handle(&open().await?, &config).await,
        Commands::Report { out, source } => {
            commands::report::handle(&open().await?, &config, out, source).await
        }
        Commands::Run => commands::run::handle(&open().await?, &config).await,
        Commands::Scrub { path } => commands::scrub::handle(path, &config).await,
    }
}
