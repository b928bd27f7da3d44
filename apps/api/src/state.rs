use std::sync::Arc;

use sqlx::PgPool;

use crate::ai::AiService;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// Generative-model adapter. Serves static fallbacks when no Vertex AI
    /// project is configured.
    pub ai: Arc<AiService>,
    pub config: Config,
}
