// ABOUTME: HTTP server for alunos, exposing the /alunos REST API and the static front end.
// ABOUTME: Uses Axum with a shared SQLite store handle injected through AppState.

pub mod api;
pub mod app_state;
pub mod config;
pub mod error;
pub mod routes;

pub use app_state::{AppState, SharedState};
pub use config::{ConfigError, ServerConfig};
pub use error::ApiError;
pub use routes::create_router;
