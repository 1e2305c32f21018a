//! booking-web - venue/artist/show booking listing site
//!
//! Serves server-rendered listing, detail and form pages backed by a SQLite
//! database.

use std::path::PathBuf;

use anyhow::{Context, Result};
use booking_common::config::{BootstrapConfig, Overrides};
use booking_common::db::{init_database, seed_sample_data};
use booking_web::{build_router, AppState};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "booking-web")]
#[command(about = "Venue and artist booking listings")]
#[command(version)]
struct Args {
    /// SQLite database file
    #[arg(long, env = "BOOKING_DATABASE")]
    database: Option<PathBuf>,

    /// Address to bind
    #[arg(long, env = "BOOKING_HOST")]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "BOOKING_PORT")]
    port: Option<u16>,

    /// TOML config file
    #[arg(short, long, env = "BOOKING_CONFIG")]
    config: Option<PathBuf>,

    /// Insert sample venues, artists and shows into an empty database
    #[arg(long)]
    seed: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let overrides = Overrides {
        database_path: args.database,
        host: args.host,
        port: args.port,
        config_file: args.config,
    };

    // The log level lives in the config file, so config warnings go to a
    // temporary stderr subscriber
    let bootstrap_logger = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::WARN)
        .finish();
    let config = tracing::subscriber::with_default(bootstrap_logger, || {
        BootstrapConfig::resolve(&overrides)
    });

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "booking_web={level},booking_common={level},tower_http={level}",
                    level = config.log_level
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Build identification first, before any database delay
    info!(
        "Starting booking-web v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    info!("Database path: {}", config.database_path.display());
    let pool = match init_database(&config.database_path).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("Failed to open database: {}", e);
            return Err(e).context("Failed to initialize database");
        }
    };

    if args.seed && seed_sample_data(&pool).await.context("Failed to insert sample data")? {
        info!("Sample listings inserted");
    }

    let app = build_router(AppState::new(pool));

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;
    info!("booking-web listening on http://{}", address);
    info!("Health check: http://{}/health", address);

    axum::serve(listener, app).await?;

    Ok(())
}
