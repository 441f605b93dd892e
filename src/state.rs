//! Shared application state for request handlers.

use std::sync::Arc;

use crate::config::AppConfig;

/// Shared application state, cloneable across handlers.
///
/// Built once at startup and never mutated; handlers are pure functions of the
/// request, this configuration, and the host's clock and name.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Creates a new application state from the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }
}
