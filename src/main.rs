mod config;
mod database;
mod entities;
mod genres;
mod http_server;
mod logging;
mod seed;
mod services;
#[cfg(test)]
mod test_utils;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use color_eyre::{Result, eyre::Context};

use crate::{
    config::Config, database::Database, http_server::app::HttpServerConfig,
    logging::setup_logging, seed::seed_demo_data,
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// The config file to use
    #[arg(short, long, env = "VENUE_LISTINGS_CONFIG")]
    config: Option<PathBuf>,

    /// Console log level (default: info)
    #[arg(long, default_value = "info", global = true, env = "LOG_LEVEL")]
    log_level: log::LevelFilter,

    /// File log level (default: debug)
    #[arg(long, default_value = "debug", global = true)]
    log_file_level: log::LevelFilter,

    /// Path to log file
    #[arg(long, env = "VENUE_LISTINGS_LOG_FILE", global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Serve the listings over HTTP
    Serve {
        /// The port to run the server on (default: from config)
        #[arg(short, long, env = "VENUE_LISTINGS_HTTP_PORT")]
        port: Option<u16>,

        /// The address to bind to (default: from config)
        #[arg(long, env = "VENUE_LISTINGS_HTTP_HOST")]
        host: Option<String>,
    },
    /// Load demo venues, artists and shows into an empty database
    Seed,
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand, Debug)]
enum ConfigCommands {
    /// Create a default config file, if it doesn't exist
    CreateDefault,
    /// Print the path to the config file
    Path,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    setup_logging(args.log_level, args.log_file.clone(), args.log_file_level)?;

    log::debug!("Venue listings starting");

    // Config commands work without a database
    if let Commands::Config(config_commands) = &args.command {
        match config_commands {
            ConfigCommands::CreateDefault => {
                log::debug!("Creating default config");
                let path = Config::create_default()?;
                log::info!("Default config available at: {}", path.display());
            }
            ConfigCommands::Path => match Config::config_path() {
                Some(path) => println!("{}", path.display()),
                None => println!("No default config path found"),
            },
        }
        return Ok(());
    }

    log::debug!("Loading configuration");
    let config = {
        if let Some(config) = &args.config {
            Config::from_file(config)
        } else {
            Config::load()
        }
    }
    .with_context(|| "Failed to load venue-listings config")?;

    let database = Database::open(&config.database_path()).await?;

    match args.command {
        Commands::Serve { port, host } => {
            let port = port.unwrap_or(config.server.port);
            let host = host.unwrap_or_else(|| config.server.host.clone());
            log::info!("Starting HTTP server on {}:{}", host, port);
            http_server::app::start(HttpServerConfig {
                host,
                port,
                database,
            })
            .await?;
        }
        Commands::Seed => {
            let summary = seed_demo_data(Arc::new(database)).await?;
            println!(
                "Seeded {} venues, {} artists and {} shows",
                summary.venues, summary.artists, summary.shows
            );
        }
        Commands::Config(_) => {}
    }

    Ok(())
}
