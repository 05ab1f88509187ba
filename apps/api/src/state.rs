use std::sync::Arc;

use sqlx::PgPool;

use crate::catalog::CatalogProvider;
use crate::config::Config;
use crate::oracle::Oracle;
use crate::recommendation::assembler::ConfidencePolicy;
use crate::recommendation::catalog_filter::CategoryKeywordMap;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// The generative-text collaborator. Default: AnthropicOracle.
    /// Tests substitute a scripted implementation.
    pub oracle: Arc<dyn Oracle>,
    /// Read-only catalog snapshot source, safe for concurrent reads.
    pub catalog: Arc<dyn CatalogProvider>,
    /// Injected category → keyword configuration for catalog filtering.
    pub category_map: Arc<CategoryKeywordMap>,
    /// The single home of default confidence values.
    pub confidence_policy: ConfidencePolicy,
    pub config: Config,
}
