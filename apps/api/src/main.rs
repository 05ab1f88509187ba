mod catalog;
mod config;
mod db;
mod errors;
mod models;
mod oracle;
mod recommendation;
mod routes;
mod scoring;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::catalog::PgCatalog;
use crate::config::Config;
use crate::db::create_pool;
use crate::oracle::AnthropicOracle;
use crate::recommendation::assembler::ConfidencePolicy;
use crate::recommendation::catalog_filter::CategoryKeywordMap;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Guidance API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config).await?;

    // Initialize the oracle client
    let oracle = Arc::new(AnthropicOracle::new(config.anthropic_api_key.clone()));
    info!("Oracle client initialized (model: {})", oracle::MODEL);

    // Catalog collaborator backed by Postgres
    let catalog = Arc::new(PgCatalog::new(db.clone()));

    // Build app state
    let state = AppState {
        db,
        oracle,
        catalog,
        category_map: Arc::new(CategoryKeywordMap::default()),
        confidence_policy: ConfidencePolicy::default(),
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
