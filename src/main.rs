//! Bookshelf Server - book catalog REST API

use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bookshelf_server::{
    api,
    config::AppConfig,
    repository::{BookStore, MemoryRepository, Repository, UserStore},
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("bookshelf_server={},tower_http=debug", config.logging.level).into()
    });
    let registry = tracing_subscriber::registry().with(filter);
    if config.logging.format == "json" {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::info!("Starting Bookshelf Server v{}", env!("CARGO_PKG_VERSION"));

    let (books, users): (Arc<dyn BookStore>, Arc<dyn UserStore>) = if config.database.is_in_memory() {
        tracing::warn!("Using in-memory store, data will not survive a restart");
        let repository = MemoryRepository::new();
        let books: Arc<dyn BookStore> = Arc::new(repository.clone());
        let users: Arc<dyn UserStore> = Arc::new(repository);
        (books, users)
    } else {
        let repository = Repository::connect(&config.database).await?;
        tracing::info!("Connected to database");

        repository.migrate().await?;
        tracing::info!("Database migrations completed");

        let books: Arc<dyn BookStore> = Arc::new(repository.clone());
        let users: Arc<dyn UserStore> = Arc::new(repository);
        (books, users)
    };

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);
    let state = AppState::new(config, books, users);

    if let (Some(username), Some(password)) = (
        state.config.auth.bootstrap_username.as_deref(),
        state.config.auth.bootstrap_password.as_deref(),
    ) {
        if !state.services.auth.ensure_user(username, password).await? {
            tracing::info!(username, "Bootstrap user already exists");
        }
    }

    let app = api::router(state);

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
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

    tracing::info!("Received shutdown signal, stopping server...");
}
