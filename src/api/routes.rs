//! API Routes
//!
//! Configures the Axum router with all endpoints.

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    clear_handler, delete_handler, get_handler, has_handler, health_handler, locate_handler,
    scan_handler, set_handler, stats_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `PUT /cache/set` - Store a JSON value under a key
/// - `GET /cache/get/:key` - Retrieve a value by key
/// - `GET /cache/has/:key` - Check whether a key is live
/// - `DELETE /cache/del/:key` - Delete a key
/// - `POST /cache/clear` - Remove every entry
/// - `GET /cache/stats` - Cache counters
/// - `POST /fields/locate` - Find the control matching a field name
/// - `POST /fields/scan` - List a page's fillable fields
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: the browser extension calls from arbitrary page origins
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/cache/set", put(set_handler))
        .route("/cache/get/:key", get(get_handler))
        .route("/cache/has/:key", get(has_handler))
        .route("/cache/del/:key", delete(delete_handler))
        .route("/cache/clear", post(clear_handler))
        .route("/cache/stats", get(stats_handler))
        .route("/fields/locate", post(locate_handler))
        .route("/fields/scan", post(scan_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::Cache;
    use crate::config::CacheConfig;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::util::ServiceExt;

    fn create_test_app() -> Router {
        let cache = Cache::new(CacheConfig::default().with_max_entries(100)).unwrap();
        create_router(AppState::new(cache))
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let response = create_test_app()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_set_endpoint() {
        let response = create_test_app()
            .oneshot(
                Request::builder()
                    .method("PUT")
                    .uri("/cache/set")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"key":"test","value":"hello"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_get_not_found() {
        let response = create_test_app()
            .oneshot(
                Request::builder()
                    .uri("/cache/get/nonexistent")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_locate_endpoint() {
        let response = create_test_app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/fields/locate")
                    .header("content-type", "application/json")
                    .body(Body::from(
                        r#"{"query":"uci","document":{"controls":[{"id":"uci"}]}}"#,
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }
}
