//! Codeboard server
//!
//! Run with: cargo run
//!
//! # Configuration
//!
//! Searches `~/.config/codeboard/config.toml`, `/etc/codeboard/config.toml`,
//! then `./config.toml`; environment variables override (`CODEBOARD_DB_PATH`,
//! `CODEBOARD_HOST`, `CODEBOARD_PORT`, `CODEBOARD_LOG_LEVEL`, ...).
//! `RUST_LOG` overrides the configured log level entirely.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use codeboard::api::{serve, ApiConfig, AppState};
use codeboard::config::{generate_default_config, Config};
use codeboard::store::{EntryStore, SqliteStore};
use codeboard::view::{BoardConfig, BoardView};
use codeboard::websocket::spawn_change_forwarder;

#[derive(Parser)]
#[command(name = "codeboard", version, about = "Community referral-code board")]
struct Cli {
    /// Path to a config file (otherwise default locations are searched)
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Print a default config file to stdout
    InitConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Some(Command::InitConfig) = cli.command {
        print!("{}", generate_default_config());
        return Ok(());
    }

    let config = match &cli.config {
        Some(path) => Config::load_with_env(path)
            .with_context(|| format!("loading config from {:?}", path))?,
        None => Config::load_default(),
    };

    init_tracing(&config);

    tracing::info!("Starting Codeboard v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Database: {}", config.store.db_path);

    // Entry store
    let store: Arc<dyn EntryStore> = Arc::new(
        SqliteStore::open(Path::new(&config.store.db_path)).context("opening entry store")?,
    );

    // Live entry view
    let board_config = BoardConfig {
        active_window_secs: config.board.active_window_secs,
        sweep_interval_secs: config.board.sweep_interval_secs,
    };
    let view = Arc::new(BoardView::new(Arc::clone(&store), board_config));
    view.start().await;

    // API + push channel
    let api_config = ApiConfig::new(config.api.host.clone(), config.api.port);
    let state = AppState::new(
        Arc::clone(&store),
        Arc::clone(&view),
        api_config.clone(),
        config.announcement.clone(),
    );

    let forwarder = spawn_change_forwarder(Arc::clone(&store), Arc::clone(&state.hub));

    serve(state, &api_config).await?;

    // Graceful teardown: timer and subscription released deterministically
    view.stop();
    forwarder.abort();
    tracing::info!("Codeboard stopped");

    Ok(())
}

/// Initialize tracing from the logging config, honoring RUST_LOG
fn init_tracing(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(format!(
            "codeboard={},tower_http=warn",
            config.logging.level
        ))
    });

    let registry = tracing_subscriber::registry().with(filter);

    if config.logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
