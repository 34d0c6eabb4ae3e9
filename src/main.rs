//! Tasks Generator API server entry point.

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tracing::info;
use tracing_subscriber::EnvFilter;

use taskgen::config::ServerConfig;
use taskgen::handlers::{build_router, AppContext};
use taskgen::llm::{CompletionClient, GroqClient};
use taskgen::storage;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    info!("Starting Tasks Generator API...");

    // Load configuration from environment
    let config = ServerConfig::from_env();
    config.log();

    // Storage backend is selected exactly once here, based on whether a
    // connection string is configured. Handlers only ever see the trait.
    let store = storage::connect(&config).await?;

    let llm = Arc::new(GroqClient::from_config(&config.llm)?);
    if !llm.is_configured() {
        tracing::warn!("GROQ_API_KEY not set - /api/generate will fail until configured");
    }

    let cors = config.cors.to_layer();

    let state = Arc::new(AppContext::new(store, llm, config.clone()));
    let app = build_router(state).layer(cors);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");

    Ok(())
}

/// Resolve on ctrl-c or SIGTERM so axum can drain in-flight requests.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install ctrl-c handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
