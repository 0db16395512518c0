//! Horse tournament server.
//!
//! Serves the horse registry and single-elimination tournament API backed by
//! PostgreSQL.

mod api;
mod config;

use std::sync::Arc;

use anyhow::Error;
use log::info;
use paddock::db::{
    Database, HorseRepository, PgHorseRepository, PgTournamentRepository, TournamentRepository,
};
use paddock::{HorseManager, TournamentManager};
use pico_args::Arguments;

use crate::config::ServerConfig;

const HELP: &str = "\
Run a horse tournament server

USAGE:
  paddock_server [OPTIONS]

OPTIONS:
  --bind       IP:PORT     Server socket bind address  [default: env SERVER_BIND or 127.0.0.1:6868]
  --db-url     URL         Database connection string  [default: env DATABASE_URL or postgres://postgres@localhost/paddock_db]

FLAGS:
  -h, --help               Print help information

ENVIRONMENT:
  SERVER_BIND              Server bind address (e.g., 0.0.0.0:8080)
  DATABASE_URL             PostgreSQL connection string
  DB_MAX_CONNECTIONS       Connection pool upper bound
  (See .env file for all configuration options)
";

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();

    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    env_logger::builder().format_target(false).init();

    let mut config = ServerConfig::from_env();
    if let Ok(bind) = pargs.value_from_str("--bind") {
        config.bind = bind;
    }
    if let Ok(db_url) = pargs.value_from_str("--db-url") {
        config.database.database_url = db_url;
    }

    info!("Starting horse tournament server at {}", config.bind);

    info!("Connecting to database: {}", config.database.database_url);
    let db = Database::new(&config.database)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to connect to database: {}", e))?;
    info!("Database connected successfully");

    let pool = Arc::new(db.pool().clone());
    let horse_repo: Arc<dyn HorseRepository> =
        Arc::new(PgHorseRepository::new(db.pool().clone()));
    let tournament_repo: Arc<dyn TournamentRepository> =
        Arc::new(PgTournamentRepository::new(db.pool().clone()));

    let horse_manager = Arc::new(HorseManager::new(
        horse_repo.clone(),
        tournament_repo.clone(),
    ));
    let tournament_manager = Arc::new(TournamentManager::new(tournament_repo, horse_repo));

    let state = api::AppState {
        horse_manager,
        tournament_manager,
        pool,
    };
    let app = api::create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind to {}: {}", config.bind, e))?;

    info!(
        "Server is running at http://{}. Press Ctrl+C to stop.",
        config.bind
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    info!("Shutting down server...");

    Ok(())
}

/// Graceful shutdown signal
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install CTRL+C signal handler");
}
