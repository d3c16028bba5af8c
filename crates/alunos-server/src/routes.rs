// ABOUTME: Route definitions for the alunos HTTP API and static front end.
// ABOUTME: Assembles the /alunos routes, health check, and file serving into one Axum Router.

use axum::Router;
use axum::routing::{MethodRouter, get};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::api;
use crate::app_state::SharedState;

/// Build the complete Axum router with all routes and shared state.
/// The student routes also answer with a trailing slash. `GET /` serves
/// `index.html` from the public directory; any other unmatched path is looked
/// up as a file under it.
pub fn create_router(state: SharedState) -> Router {
    let public_dir = state.public_dir.clone();

    Router::new()
        .route("/health", get(health))
        .route("/alunos", students())
        .route("/alunos/", students())
        .route("/alunos/{id}", student())
        .route("/alunos/{id}/", student())
        .route_service("/", ServeFile::new(public_dir.join("index.html")))
        .fallback_service(ServeDir::new(public_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn students() -> MethodRouter<SharedState> {
    get(api::students::list_students).post(api::students::create_student)
}

fn student() -> MethodRouter<SharedState> {
    get(api::students::get_student)
        .put(api::students::update_student)
        .delete(api::students::delete_student)
}

/// Health check handler. Returns 200 OK with a simple JSON body.
async fn health() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({ "status": "ok" }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app_state::AppState;
    use alunos_store::StudentStore;
    use axum::body::Body;
    use http::Request;
    use std::sync::Arc;
    use tempfile::TempDir;
    use tower::ServiceExt;

    fn test_state(public_dir: std::path::PathBuf) -> SharedState {
        let store = StudentStore::open_in_memory().unwrap();
        Arc::new(AppState::new(store, public_dir))
    }

    #[tokio::test]
    async fn health_returns_ok() {
        let app = create_router(test_state(std::env::temp_dir()));
        let resp = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(resp.status(), 200);

        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "ok");
    }

    #[tokio::test]
    async fn root_serves_index_html() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("index.html"), "<!DOCTYPE html><title>Alunos</title>")
            .unwrap();
        std::fs::write(dir.path().join("app.js"), "console.log('ok');").unwrap();
        let state = test_state(dir.path().to_path_buf());

        let resp = create_router(Arc::clone(&state))
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        assert!(String::from_utf8_lossy(&body).contains("Alunos"));

        let resp = create_router(Arc::clone(&state))
            .oneshot(Request::get("/app.js").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);

        let resp = create_router(state)
            .oneshot(Request::get("/missing.css").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), 404);
    }
}
