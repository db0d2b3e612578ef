//! Application state module
//!
//! Defines shared state accessible across all request handlers.

use std::sync::Arc;

use obscura_core::AttestationRegistry;

use crate::store::RegistryStore;

/// Application state containing shared resources.
#[derive(Clone)]
pub struct AppState {
    /// The attestation registry over the configured storage backend
    pub registry: Arc<AttestationRegistry<Arc<RegistryStore>>>,
    /// Storage handle for health checks
    pub store: Arc<RegistryStore>,
}

impl AppState {
    /// Build state over an already-constructed storage backend.
    pub fn new(store: RegistryStore) -> Self {
        let store = Arc::new(store);
        Self {
            registry: Arc::new(AttestationRegistry::new(store.clone())),
            store,
        }
    }

    /// In-memory state for tests and local development.
    pub fn in_memory() -> Self {
        Self::new(RegistryStore::in_memory())
    }
}
