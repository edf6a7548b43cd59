//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use safelink_auth::password::PasswordHasher;
use safelink_core::config::AppConfig;
use safelink_service::link::LinkService;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are read-only and `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Password hasher (SHA-256)
    pub password_hasher: Arc<PasswordHasher>,
    /// Link generation and decoding
    pub link_service: Arc<LinkService>,
    /// When the state was built, for uptime reporting
    pub started_at: DateTime<Utc>,
}

impl AppState {
    /// Builds the state from configuration.
    pub fn new(config: AppConfig) -> Self {
        let password_hasher = Arc::new(PasswordHasher::new());
        let link_service = Arc::new(LinkService::new(
            config.link.clone(),
            Arc::clone(&password_hasher),
        ));

        Self {
            config: Arc::new(config),
            password_hasher,
            link_service,
            started_at: Utc::now(),
        }
    }
}
