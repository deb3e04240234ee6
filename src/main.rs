mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use lakescraper_core::config::AppConfig;
use lakescraper_storage::Storage;
use tracing::warn;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use crate::cli::{Cli, Commands};

fn main() -> Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread().enable_all().build()?;
    runtime.block_on(async_main())
}

async fn async_main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    let config_str = std::fs::read_to_string(&cli.config).unwrap_or_else(|_| {
        warn!(path = %cli.config, "config file not found, using defaults");
        include_str!("../config/default.toml").to_string()
    });
    let config: AppConfig = toml::from_str(&config_str)?;

    if let Ok(url) = std::env::var("DATABASE_URL") {
        return run_with_database_url(cli, config, url).await;
    }

    let postgres_url = config.database.postgres_url.clone();
    run_with_database_url(cli, config, postgres_url).await
}

async fn run_with_database_url(cli: Cli, config: AppConfig, database_url: String) -> Result<()> {
    let storage = Storage::new(&database_url, config.database.pool_size).await?;
    storage.run_migrations().await?;

    match cli.command {
        Commands::Submit { domain, template_id, max_pages, data_types } => {
            commands::run_submit(storage, config, domain, template_id, max_pages, data_types).await
        }
        Commands::Discover { query, search_pages, data_types, template_id, max_pages_per_domain } => {
            commands::run_discover(storage, config, query, search_pages, data_types, template_id, max_pages_per_domain).await
        }
        Commands::Run { max_concurrent_jobs } => {
            let mut config = config;
            config.general.max_concurrent_jobs = max_concurrent_jobs;
            commands::run_daemon(storage, config).await
        }
        Commands::Status { limit } => commands::run_status(storage, limit).await,
    }
}
