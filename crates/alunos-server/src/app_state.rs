// ABOUTME: Shared application state for the alunos HTTP server.
// ABOUTME: Owns the store handle opened at startup and the directory of static assets.

use std::path::PathBuf;
use std::sync::Arc;

use alunos_store::StudentStore;
use tokio::sync::Mutex;

/// Shared application state accessible by all Axum handlers.
/// The store is opened once by the caller and lives as long as the state.
pub struct AppState {
    pub store: Mutex<StudentStore>,
    pub public_dir: PathBuf,
}

/// Type alias for the Arc-wrapped state used with Axum's State extractor.
pub type SharedState = Arc<AppState>;

impl AppState {
    pub fn new(store: StudentStore, public_dir: PathBuf) -> Self {
        Self {
            store: Mutex::new(store),
            public_dir,
        }
    }
}
