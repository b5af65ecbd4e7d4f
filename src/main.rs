mod config;
mod database;
mod entities;
mod forms;
mod http_server;
mod logging;
mod seed;
mod services;

#[cfg(test)]
mod test_utils;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand};
use color_eyre::{Result, eyre::Context};

use crate::{config::Config, database::Database, logging::init_tracing};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// The config file to use
    #[arg(short, long, env = "VENUE_BOOKER_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Log filter, e.g. `info` or `venue_booker=debug,tower_http=debug`
    #[arg(long, default_value = "info", global = true, env = "LOG_LEVEL")]
    log_level: String,

    /// OTLP gRPC endpoint to export traces to
    #[arg(long, global = true, env = "OTEL_EXPORTER_OTLP_ENDPOINT")]
    otlp_endpoint: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Serve the booking site
    Serve {
        /// The port to run the server on (overrides the config file)
        #[arg(short, long, env = "VENUE_BOOKER_HTTP_PORT")]
        port: Option<u16>,

        /// The address to bind to (overrides the config file)
        #[arg(long, env = "VENUE_BOOKER_HTTP_HOST")]
        host: Option<String>,
    },
    /// Load the demo venues, artists and shows into an empty database
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
    let tracer_provider = init_tracing(
        "venue-booker",
        args.otlp_endpoint.as_deref(),
        &args.log_level,
    )?;

    let result = run(args).await;

    if let Some(provider) = tracer_provider
        && let Err(e) = provider.shutdown()
    {
        eprintln!("Failed to shut down tracer provider: {e}");
    }

    result
}

async fn run(args: Args) -> Result<()> {
    match args.command {
        Commands::Serve { port, host } => {
            let config = load_config(args.config.as_deref())?;
            let database = Arc::new(Database::open(&config.database_path()).await?);

            let host = host.unwrap_or(config.server.host);
            let port = port.unwrap_or(config.server.port);
            tracing::info!("Starting HTTP server on {}:{}", host, port);
            http_server::app::start(&host, port, database).await?;
        }
        Commands::Seed => {
            let config = load_config(args.config.as_deref())?;
            let database = Database::open(&config.database_path()).await?;

            if seed::seed(&database).await? {
                tracing::info!("Demo data loaded");
            }
        }
        Commands::Config(config_commands) => match config_commands {
            ConfigCommands::CreateDefault => {
                tracing::debug!("Creating default config");
                let path = Config::create_default()?;
                tracing::info!("Default config at: {}", path.display());
            }
            ConfigCommands::Path => match Config::config_path() {
                Some(path) => println!("{}", path.display()),
                None => println!("No default config path found"),
            },
        },
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    tracing::debug!("Loading configuration");
    match path {
        Some(path) => Config::from_file(path),
        None => Config::load(),
    }
    .wrap_err("Failed to load venue-booker config")
}
