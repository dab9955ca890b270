//! Middleware attached to a successfully loaded gateway.

pub mod audit;
pub mod cors;

use axum::middleware;
use thiserror::Error;

use crate::gateway::GatewayApp;

pub use audit::audit_requests;
pub use cors::{strip_unmatched_cors, AllowedOrigins};

/// Failure to decorate a loaded gateway. Fatal at startup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttachError {
    #[error("allowed origin '{origin}' is not a valid header value: {reason}")]
    InvalidOrigin { origin: String, reason: String },

    #[error("'*' cannot be an allowed origin when credentials are allowed")]
    WildcardOrigin,
}

/// Install CORS and request-audit logging on the gateway.
///
/// The audit layer is outermost so pre-flight requests answered by the
/// CORS layer are logged too. The origin filter sits directly around the
/// CORS layer so non-matching origins leave with no CORS grants.
pub fn attach_middleware(app: GatewayApp, origins: &AllowedOrigins) -> Result<GatewayApp, AttachError> {
    let cors = origins.cors_layer()?;

    Ok(app.map_router(|router| {
        router
            .layer(cors)
            .layer(middleware::map_response(strip_unmatched_cors))
            .layer(middleware::from_fn(audit_requests))
    }))
}
