//! Board REST API
//!
//! HTTP API layer for the community board, built with Axum.
//!
//! # Endpoints
//!
//! ## Entries
//! - `GET /api/v1/entries` - Active entries (five-minute window), newest first
//! - `POST /api/v1/entries` - Submit an entry
//! - `POST /api/v1/entries/:id/codes/:slot/toggle` - Flip one used-flag
//!
//! ## Announcement
//! - `GET /api/v1/announcement` - Banner text and external link
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe
//! - `GET /health` - Full health status
//!
//! ## WebSocket
//! - `GET /api/v1/ws` - Push channel; one `change` message per mutation

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::{ApiConfig, AppState};

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::websocket::websocket_handler;

/// Build the API router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/entries", get(routes::entries::list_entries))
        .route("/entries", post(routes::entries::create_entry))
        .route(
            "/entries/:id/codes/:slot/toggle",
            post(routes::entries::toggle_code),
        )
        .route("/announcement", get(routes::announcement::get_announcement))
        .route("/ws", get(websocket_handler));

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/ready", get(routes::health::readiness))
        .route("/", get(routes::health::full_health));

    let shared_state = Arc::new(state);

    Router::new()
        .nest("/api/v1", api_routes)
        .nest("/health", health_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(shared_state)
}

/// Start the API server
pub async fn serve(state: AppState, config: &ApiConfig) -> Result<(), ApiError> {
    let router = build_router(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Codeboard API listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("Codeboard API shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AnnouncementConfig;
    use crate::store::{EntryStore, SqliteStore};
    use crate::view::{BoardConfig, BoardView};
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::util::ServiceExt;

    async fn create_test_app() -> Router {
        let store: Arc<dyn EntryStore> = Arc::new(SqliteStore::open_in_memory().unwrap());
        let view = Arc::new(BoardView::new(Arc::clone(&store), BoardConfig::default()));
        view.start().await;

        let state = AppState::new(
            store,
            view,
            ApiConfig::default(),
            AnnouncementConfig::default(),
        );
        build_router(state)
    }

    fn json_post(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_endpoints() {
        let app = create_test_app().await;

        for uri in ["/health/live", "/health/ready", "/health"] {
            let response = app
                .clone()
                .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK, "uri: {}", uri);
        }
    }

    #[tokio::test]
    async fn test_list_entries_empty() {
        let app = create_test_app().await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/entries")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["total"], 0);
        assert_eq!(json["loading"], false);
    }

    #[tokio::test]
    async fn test_create_entry_and_list() {
        let app = create_test_app().await;

        let response = app
            .clone()
            .oneshot(json_post(
                "/api/v1/entries",
                r#"{"user_name": "Ana", "code_1": "A1", "message": "hola"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let created = body_json(response).await;
        assert_eq!(created["user_name"], "Ana");
        assert_eq!(created["is_used_1"], false);

        // Give the view's change listener a beat to refetch
        tokio::time::sleep(std::time::Duration::from_millis(100)).await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/entries")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let json = body_json(response).await;
        assert_eq!(json["total"], 1);
        assert_eq!(json["entries"][0]["code_1"], "A1");
    }

    #[tokio::test]
    async fn test_create_entry_validation_failure() {
        let app = create_test_app().await;

        let response = app
            .oneshot(json_post(
                "/api/v1/entries",
                r#"{"user_name": "Ana", "message": "hola"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_toggle_code() {
        let app = create_test_app().await;

        let response = app
            .clone()
            .oneshot(json_post(
                "/api/v1/entries",
                r#"{"user_name": "Ana", "code_2": "B2", "message": "hola"}"#,
            ))
            .await
            .unwrap();
        let created = body_json(response).await;
        let id = created["id"].as_str().unwrap().to_string();

        tokio::time::sleep(std::time::Duration::from_millis(100)).await;

        let response = app
            .clone()
            .oneshot(json_post(
                &format!("/api/v1/entries/{}/codes/2/toggle", id),
                "",
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        tokio::time::sleep(std::time::Duration::from_millis(100)).await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/entries")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let json = body_json(response).await;
        assert_eq!(json["entries"][0]["is_used_2"], true);
        assert_eq!(json["entries"][0]["is_used_1"], false);
    }

    #[tokio::test]
    async fn test_toggle_unknown_entry() {
        let app = create_test_app().await;

        let response = app
            .oneshot(json_post("/api/v1/entries/missing/codes/1/toggle", ""))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_toggle_invalid_slot() {
        let app = create_test_app().await;

        let response = app
            .oneshot(json_post("/api/v1/entries/whatever/codes/9/toggle", ""))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_announcement() {
        let app = create_test_app().await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/announcement")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert!(json["link"].as_str().unwrap().starts_with("http"));
    }
}
