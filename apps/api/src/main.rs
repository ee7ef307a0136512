mod agents;
mod auth;
mod config;
mod errors;
mod llm_client;
mod models;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::auth::AccountStore;
use crate::config::Config;
use crate::llm_client::{OllamaBackend, StructuredInvoker};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_CRATE_NAME"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Agent Suite API v{}", env!("CARGO_PKG_VERSION"));

    let backend = OllamaBackend::new(&config.ollama_host, config.llm_timeout)?;
    info!(
        "Ollama backend at {} (model: {}, timeout: {}s)",
        backend.base_url(),
        config.ollama_model,
        config.llm_timeout.as_secs()
    );
    let llm = StructuredInvoker::new(Arc::new(backend), config.ollama_model.clone());

    let state = AppState {
        llm,
        accounts: AccountStore::default(),
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        // TODO: restrict origins once the web front-end has a fixed host
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
