use std::sync::Arc;

use kintree_core::memory::{MemoryActivityLog, MemoryStore};
use kintree_core::store::{ActivityLog, PersonStore};

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`). Handlers reach
/// storage only through these injected handles.
#[derive(Clone)]
pub struct AppState {
    /// Person record store.
    pub store: Arc<dyn PersonStore>,
    /// Activity log sink.
    pub activity: Arc<dyn ActivityLog>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// State backed by in-process stores.
    pub fn in_memory(config: ServerConfig) -> Self {
        Self {
            store: Arc::new(MemoryStore::new()),
            activity: Arc::new(MemoryActivityLog::new()),
            config: Arc::new(config),
        }
    }
}
