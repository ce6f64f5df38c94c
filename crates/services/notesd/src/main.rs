//! notesd service entry point.
//!
//! ```bash
//! export JWT_SECRET=your_jwt_secret
//! export DATABASE_URL=notes.db
//! notesd --bind 127.0.0.1:8080
//! ```

use clap::Parser;
use notes_models::db::connection::DbConnection;
use notesd::{
    api::{ApiState, router},
    cli::Cli,
    config::AppConfig,
    logging,
    prelude::*,
};
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let dotenv = dotenvy::dotenv();
    logging::init();
    if let Err(err) = dotenv {
        warn!(".env file not loaded: {err}");
    }
    let cli = Cli::parse();

    if let Err(err) = run(&cli).await {
        error!("notesd failed: {err}");
        return Err(err);
    }
    Ok(())
}

async fn run(cli: &Cli) -> Result<()> {
    let config = AppConfig::load(cli)?;
    info!("Using database {}", config.db);
    let connection = DbConnection::new(&config.db)?.setup()?;
    let state = ApiState {
        connection,
        keys: config.keys,
    };

    let listener = tokio::net::TcpListener::bind(&config.bind).await?;
    info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shutting down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal {err}");
        std::future::pending::<()>().await;
    }
}
