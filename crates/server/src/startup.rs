use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use configs::{AppConfig, ServerConfig};
use migration::MigratorTrait;
use models::db::{connect_with_config, DatabaseConfig};
use service::SeaOrmAccountRepository;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

use crate::errors::StartupError;
use crate::routes::{self, ServerState};

/// `Access-Control-Allow-Origin: *` on every response, any method and header.
pub fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}

fn bind_addr(server: &ServerConfig) -> Result<SocketAddr, StartupError> {
    format!("{}:{}", server.host, server.port)
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("bad bind address {}:{}: {}", server.host, server.port, e)))
}

/// Connect the store, apply migrations if enabled, and serve the router.
pub async fn serve(cfg: AppConfig) -> Result<(), StartupError> {
    let db = connect_with_config(&DatabaseConfig::from(&cfg.database))
        .await
        .map_err(|e| StartupError::Database(e.to_string()))?;

    if cfg.database.run_migrations {
        migration::Migrator::up(&db, None)
            .await
            .map_err(|e| StartupError::Migration(e.to_string()))?;
        info!("database migrations applied");
    }

    let state = ServerState::new(Arc::new(SeaOrmAccountRepository::new(db)));
    let app: Router = routes::build_router(state, build_cors());

    let addr = bind_addr(&cfg.server)?;
    info!(%addr, "starting account service");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("account service stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("received Ctrl+C, draining in-flight requests"),
        Err(e) => {
            warn!(error = %e, "cannot listen for Ctrl+C; graceful shutdown disabled");
            std::future::pending::<()>().await;
        }
    }
}
