use std::sync::Arc;

use crate::background::visit_retention::RetentionHandle;
use crate::config::ServerConfig;
use crate::github::GitHubClient;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: everything inside is an `Arc`, a pool, or a channel handle.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: blog_db::DbPool,
    /// Server configuration, including the JWT secret.
    pub config: Arc<ServerConfig>,
    /// Sender side of the visit-log retention worker.
    pub retention: RetentionHandle,
    pub github: GitHubClient,
    /// Shared HTTP client for outbound calls (image host).
    pub http: reqwest::Client,
}
