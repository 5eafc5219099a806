use std::sync::Arc;

use super::security_config::SecurityConfig;
use crate::store::DocumentStore;

/// Application state containing shared resources
#[derive(Clone)]
pub struct AppState {
    /// Document store backing every repository
    pub store: Arc<dyn DocumentStore>,
    /// Signing secrets and credential lifetimes
    pub security: SecurityConfig,
}

impl AppState {
    pub fn new(store: Arc<dyn DocumentStore>, security: SecurityConfig) -> Self {
        Self { store, security }
    }

    /// Fresh in-memory store and random secrets
    #[cfg(test)]
    pub fn for_tests() -> Self {
        Self::new(
            Arc::new(crate::store::MemoryStore::new()),
            SecurityConfig::for_tests(),
        )
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("store", &"<dyn DocumentStore>")
            .field("security", &self.security)
            .finish()
    }
}
