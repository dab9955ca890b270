//! Request-audit logging.
//!
//! Observes traffic only: the request reaches the handler and the response
//! reaches the client exactly as they were.

use std::time::Instant;

use axum::{body::Body, http::Request, middleware::Next, response::Response};
use uuid::Uuid;

pub async fn audit_requests(request: Request<Body>, next: Next) -> Response {
    let audit_id = Uuid::new_v4();
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let started = Instant::now();

    tracing::info!(%audit_id, %method, %path, "Gateway request received");

    let response = next.run(request).await;

    tracing::info!(
        %audit_id,
        %method,
        %path,
        status = response.status().as_u16(),
        latency_ms = started.elapsed().as_millis() as u64,
        "Gateway request completed"
    );

    response
}
