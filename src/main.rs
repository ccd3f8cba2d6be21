use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use fpl_wrapped::config::AppConfig;
use fpl_wrapped::rate_limiter::RateLimiter;
use fpl_wrapped::server;
use fpl_wrapped::service::SeasonService;

#[derive(Parser)]
#[command(name = "fpl-wrapped")]
#[command(about = "Season wrapped summaries for Fantasy Premier League managers")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the HTTP API
    Serve {
        /// TOML configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Print one manager's season summary as JSON
    Summary {
        /// FPL manager id, or `demo`
        id: String,

        /// TOML configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { config } => {
            let config = AppConfig::load(config.as_deref()).context("loading configuration")?;
            let service = SeasonService::from_config(&config).context("building HTTP client")?;
            let limiter = RateLimiter::from_config(&config.rate_limit);
            let shutdown = async {
                if tokio::signal::ctrl_c().await.is_ok() {
                    info!("shutdown requested");
                }
            };
            server::serve(config.server.socket_addr(), service, limiter, shutdown)
                .await
                .context("starting server")?;
        }
        Commands::Summary { id, config } => {
            let config = AppConfig::load(config.as_deref()).context("loading configuration")?;
            let service = SeasonService::from_config(&config).context("building HTTP client")?;
            let served = service
                .summary(&id)
                .await
                .with_context(|| format!("building summary for {id}"))?;
            info!(
                source = %served.source,
                score = served.quality_score,
                "summary ready"
            );
            println!("{}", serde_json::to_string_pretty(&served.summary)?);
        }
    }

    Ok(())
}
