use anyhow::Result;
use common::{database::DatabaseConfig, session::SessionProvider};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use persons::{AppState, config::ServerConfig, create_router, schema};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    info!("Starting persons service");

    let server_config = ServerConfig::load()?;
    let db_config = DatabaseConfig::from_env()?;

    // Build the session factory up front so a bad configuration stops startup
    let sessions = SessionProvider::new(db_config);
    let factory = sessions.factory().await?;

    if common::database::health_check(factory.pool()).await? {
        info!("Database connection successful");
    } else {
        anyhow::bail!("Failed to connect to database");
    }

    if server_config.auto_create_schema {
        schema::ensure_schema(&sessions).await?;
    }

    let app = create_router(AppState::new(sessions.clone()));

    let address = server_config.bind_address();
    let listener = TcpListener::bind(&address).await?;
    info!("Persons service listening on {}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shutting down persons service");
    sessions.shutdown().await;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
