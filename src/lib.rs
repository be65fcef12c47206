pub mod config;
pub mod error;
pub mod graphql;
pub mod handler;
pub mod model;
pub mod service;
pub mod telemetry;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tracing::info;

use crate::config::AppConfig;
use crate::graphql::HttpGraphqlTransport;
use crate::handler::AppState;
use crate::service::SharedConfigService;

pub async fn start_service(app_config: AppConfig) -> anyhow::Result<()> {
    let transport = HttpGraphqlTransport::new(app_config.request_timeout())
        .context("failed to build the HTTP client")?;

    if app_config.connection().is_err() {
        tracing::warn!("WCD_URL or WCD_TOKEN is missing; /config/shared will answer 500");
    }

    let addr = SocketAddr::from(([0, 0, 0, 0], app_config.api_port));
    let service = SharedConfigService::new(Arc::new(app_config), Arc::new(transport));
    let app = handler::router(AppState::new(service));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(%addr, "shared config service listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("shared config service stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    info!("shutdown signal received");
}
