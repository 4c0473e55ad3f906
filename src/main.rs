//! CLI entry point for terra_health.
//!
//! `serve` runs the HTTP API; the other subcommands run a single lookup
//! and print the result as JSON.

use std::ffi::OsStr;
use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use chrono::Utc;
use clap::{Parser, Subcommand};
use terra_health::{
    analyzers::{coord, greenhouse, health},
    catalog::{Granularity, Molecule},
    config::Config,
    fetch::BasicClient,
    infra::HttpSource,
    output::print_json,
    services::EnvironmentSource,
    web,
};
use tracing::debug;
use tracing_subscriber::{
    EnvFilter, Layer,
    filter::LevelFilter,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "terra_health")]
#[command(about = "Environmental lookups and a composite health score", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API
    Serve,
    /// Print the raw series of one greenhouse gas
    Greenhouse {
        #[arg(value_enum)]
        molecule: Molecule,

        #[arg(short, long, value_enum, default_value_t = Granularity::Monthly)]
        range: Granularity,
    },
    /// Print the yearly reading of every greenhouse gas
    Snapshot {
        /// Years before the latest measurement (0-40)
        #[arg(short, long, default_value_t = 0, allow_negative_numbers = true)]
        year_back: i64,
    },
    /// Print air, marine and climate data around a coordinate
    Coord {
        #[arg(allow_negative_numbers = true)]
        latitude: f64,

        #[arg(allow_negative_numbers = true)]
        longitude: f64,

        /// Grid radius, at least 8
        #[arg(allow_negative_numbers = true)]
        radius: f64,
    },
    /// Print the composite environmental health score
    Health {
        /// Years into the past to score (0-40)
        #[arg(short, long, default_value_t = 0, allow_negative_numbers = true)]
        year_back: i64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/terra_health.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("terra_health.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(env_filter("RUST_LOG", LevelFilter::INFO));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(env_filter("RUST_LOG_JSON", LevelFilter::DEBUG));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?;
    debug!(?config, "Configuration loaded");

    let client = BasicClient::new(config.request_timeout)?;
    let source: Arc<dyn EnvironmentSource> =
        Arc::new(HttpSource::new(client, config.endpoints.clone()));
    let today = Utc::now().date_naive();

    match cli.command {
        Commands::Serve => {
            web::serve(&config, source).await?;
        }
        Commands::Greenhouse { molecule, range } => {
            let body = greenhouse::lookup_molecule(&*source, molecule, range).await?;
            print_json(&body)?;
        }
        Commands::Snapshot { year_back } => {
            let snapshot = greenhouse::snapshot(&*source, year_back).await?;
            print_json(&snapshot)?;
        }
        Commands::Coord {
            latitude,
            longitude,
            radius,
        } => {
            let response = coord::aggregate(
                &*source,
                &config.climate,
                latitude,
                longitude,
                radius.trunc() as i64,
                today,
            )
            .await?;
            print_json(&response)?;
        }
        Commands::Health { year_back } => {
            let score = health::score(&*source, &config.climate, year_back, today).await?;
            print_json(&score)?;
        }
    }

    Ok(())
}

/// Reads `var` as a filter directive, falling back to `default` when unset.
fn env_filter(var: &str, default: LevelFilter) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(default.into())
        .with_env_var(var)
        .from_env_lossy()
}
