use anyhow::{Context, Result};
use axum::Router;
use sqlx::{MySqlPool, mysql::MySqlPoolOptions};
use std::{io::ErrorKind, sync::Arc};
use tokio::{net::TcpListener, signal};
use tracing_subscriber::EnvFilter;

mod config;
mod errors;
mod handlers;
mod models;
mod routes;
mod services;
mod state;
mod views;

use services::{catalog_service::MySqlCatalog, link_service::S3LinkIssuer};
use state::AppState;

const PRODUCTS_MIGRATION: &str = include_str!("../migrations/0001_products.sql");

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // --- Logging setup ---
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("product_showcase=info,tower_http=info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    // --- Parse config + migrate flag; incomplete config never reaches bind ---
    let (cfg, migrate) = match config::AppConfig::from_env_and_args() {
        Ok(parsed) => parsed,
        Err(err) => {
            tracing::error!(groups = ?err.incomplete_groups(), "Refusing to start: {}", err);
            return Err(err).context("invalid configuration");
        }
    };

    tracing::info!("Starting product-showcase with config: {:?}", cfg);

    // --- Initialize MySQL pool (connections are opened on first checkout) ---
    let db: Arc<MySqlPool> = Arc::new(
        MySqlPoolOptions::new()
            .max_connections(cfg.database.max_connections)
            .connect_lazy_with(cfg.database.connect_options()),
    );

    // --- Handle migration mode ---
    if migrate {
        run_migrations(&db).await?;
        tracing::info!("Database migration complete.");
        db.close().await;
        return Ok(()); // exit after migration
    }

    // --- Initialize dependencies ---
    let catalog = MySqlCatalog::new(db.clone());
    let links = S3LinkIssuer::new(&cfg.object_store);
    let state = AppState::new(
        Arc::new(catalog),
        Arc::new(links),
        cfg.object_store.object_key.as_str(),
    );

    // --- Build router ---
    let app: Router = routes::routes::routes(&cfg.static_dir).with_state(state);

    // --- Start server ---
    let addr = cfg.addr();
    let listener = match TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(err)
            if err.kind() == ErrorKind::PermissionDenied
                && matches!(cfg.host.as_str(), "0.0.0.0" | "::") =>
        {
            let fallback_addr = format!("127.0.0.1:{}", cfg.port);
            tracing::warn!(
                "Permission denied binding to {} ({}). Falling back to {}",
                addr,
                err,
                fallback_addr
            );
            TcpListener::bind(&fallback_addr).await?
        }
        Err(err) => return Err(err).with_context(|| format!("binding {}", addr)),
    };

    tracing::info!("Server listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Waits for checked-out connections to be returned before closing them.
    tracing::info!("Shutting down, closing database pool...");
    db.close().await;
    tracing::info!("Exited gracefully.");

    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                tracing::error!("Failed to listen for SIGTERM: {}", err);
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

    tracing::info!("Shutdown signal received, starting graceful exit...");
}

/// Apply the embedded schema statements.
async fn run_migrations(db: &Arc<MySqlPool>) -> Result<()> {
    let statements = PRODUCTS_MIGRATION
        .split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>();

    tracing::info!("Running {} migration statements...", statements.len());

    for stmt in statements {
        tracing::debug!("Executing migration SQL: {}", stmt);
        sqlx::query(stmt)
            .execute(&**db)
            .await
            .context("applying products migration")?;
    }

    Ok(())
}
