//! Error-of-last-resort responder.
//!
//! Served instead of the gateway when bootstrap fails. Every path and each
//! of GET, POST, PUT, DELETE, PATCH, OPTIONS answers 500 with
//! `{"error": "<diagnostic>"}`.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{Method, StatusCode, Uri},
    routing::{on, MethodFilter},
    Json, Router,
};
use serde::Serialize;

/// Served when no diagnostic was recorded.
pub const GENERIC_FAILURE_MESSAGE: &str =
    "Gateway application could not be loaded. Backend is misconfigured.";

const FALLBACK_METHODS: MethodFilter = MethodFilter::GET
    .or(MethodFilter::POST)
    .or(MethodFilter::PUT)
    .or(MethodFilter::DELETE)
    .or(MethodFilter::PATCH)
    .or(MethodFilter::OPTIONS);

#[derive(Debug, Serialize)]
struct FallbackBody {
    error: String,
}

/// Build the catch-all fallback router for a load diagnostic.
pub fn fallback_router(diagnostic: &str) -> Router {
    let message: Arc<str> = if diagnostic.trim().is_empty() {
        Arc::from(GENERIC_FAILURE_MESSAGE)
    } else {
        Arc::from(diagnostic)
    };

    let catch_all = on(FALLBACK_METHODS, fallback_route).with_state(message);

    // `/{*path}` does not match the bare root.
    Router::new()
        .route("/", catch_all.clone())
        .route("/{*path}", catch_all)
}

async fn fallback_route(
    State(message): State<Arc<str>>,
    method: Method,
    uri: Uri,
) -> (StatusCode, Json<FallbackBody>) {
    tracing::warn!(
        %method,
        path = %uri.path(),
        diagnostic = %message,
        "Fallback route hit; gateway application is not loaded"
    );

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(FallbackBody {
            error: message.to_string(),
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    async fn send(router: Router, method: &str, path: &str) -> (StatusCode, serde_json::Value) {
        let response = router
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(path)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_every_supported_method_reports_diagnostic() {
        let router = fallback_router("provider registry failed to initialize");

        for method in ["GET", "POST", "PUT", "DELETE", "PATCH", "OPTIONS"] {
            let (status, body) = send(router.clone(), method, "/anything/at/all").await;
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{method}");
            assert_eq!(body, serde_json::json!({"error": "provider registry failed to initialize"}));
        }
    }

    #[tokio::test]
    async fn test_root_path_is_covered() {
        let (status, body) = send(fallback_router("boom"), "GET", "/").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "boom");
    }

    #[tokio::test]
    async fn test_empty_diagnostic_uses_generic_message() {
        let (status, body) = send(fallback_router(""), "POST", "/v1/chat/completions").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], GENERIC_FAILURE_MESSAGE);
    }

    #[tokio::test]
    async fn test_odd_diagnostic_is_served_verbatim() {
        let diagnostic = "line one\nline \"two\"\t\u{1F4A5}";
        let (_, body) = send(fallback_router(diagnostic), "PATCH", "/x").await;
        assert_eq!(body["error"], diagnostic);
    }

    #[tokio::test]
    async fn test_unsupported_method_is_not_routed() {
        let response = fallback_router("boom")
            .oneshot(
                Request::builder()
                    .method("TRACE")
                    .uri("/anything")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
