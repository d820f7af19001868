//! Application state for the web layer.

use std::sync::Arc;

use crate::query::{QueryConfig, QueryEngine};
use crate::snapshot::Snapshot;

/// Shared application state.
///
/// The snapshot is loaded once at startup and never changes, so handlers
/// share it without locking.
#[derive(Clone)]
pub struct AppState {
    /// Query engine over the loaded snapshot
    pub engine: Arc<QueryEngine>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(snapshot: Snapshot, config: QueryConfig) -> Self {
        Self {
            engine: Arc::new(QueryEngine::new(Arc::new(snapshot), config)),
        }
    }

    /// The loaded snapshot.
    pub fn snapshot(&self) -> &Snapshot {
        self.engine.snapshot()
    }
}
