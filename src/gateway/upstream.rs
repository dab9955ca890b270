//! Gateway factory that forwards to an externally running gateway process.
//!
//! # Responsibilities
//! - Validate the upstream location before anything is served
//! - Mount a catch-all forwarder under each configured prefix
//! - Stream requests and responses through unchanged
//!
//! # Design Decisions
//! - Plain HTTP only: the upstream is expected on a private network
//! - The upstream base path is prepended to every forwarded path
//! - Connection failures answer 502 with the same `{"error": ..}` shape
//!   the fallback responder uses

use std::time::Duration;

use axum::{
    body::Body,
    extract::State,
    http::{
        header,
        uri::{Authority, PathAndQuery, Scheme},
        Request, StatusCode, Uri, Version,
    },
    response::{IntoResponse, Response},
    routing::any,
    Json,
};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use tower_http::timeout::TimeoutLayer;
use url::Url;

use crate::config::GatewayConfig;
use crate::gateway::{AppFactory, FactoryError, GatewayApp};

/// Factory for the forwarding gateway.
pub struct UpstreamFactory {
    config: GatewayConfig,
}

impl UpstreamFactory {
    pub fn new(config: GatewayConfig) -> Self {
        Self { config }
    }
}

/// Where forwarded requests go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamTarget {
    pub authority: Authority,
    /// Base path without a trailing slash ("" for the root).
    pub base_path: String,
}

impl UpstreamTarget {
    /// Parse and check an upstream base URL.
    pub fn parse(raw: &str) -> Result<Self, FactoryError> {
        let url = Url::parse(raw.trim()).map_err(|e| {
            FactoryError::Unavailable(format!("upstream gateway URL '{}' is invalid: {}", raw, e))
        })?;

        if url.scheme() != "http" {
            return Err(FactoryError::Unavailable(format!(
                "upstream gateway URL '{}' uses unsupported scheme '{}'",
                raw,
                url.scheme()
            )));
        }

        let host = url.host_str().ok_or_else(|| {
            FactoryError::Unavailable(format!("upstream gateway URL '{}' has no host", raw))
        })?;
        let authority = match url.port() {
            Some(port) => format!("{}:{}", host, port),
            None => host.to_string(),
        };
        let authority = authority.parse::<Authority>().map_err(|e| {
            FactoryError::Unavailable(format!("upstream gateway host '{}' is invalid: {}", authority, e))
        })?;

        Ok(Self {
            authority,
            base_path: url.path().trim_end_matches('/').to_string(),
        })
    }

    /// Build the upstream URI for an inbound one.
    pub fn rewrite(&self, inbound: &Uri) -> Result<Uri, axum::http::Error> {
        let path_and_query = match inbound.query() {
            Some(query) => format!("{}{}?{}", self.base_path, inbound.path(), query),
            None => format!("{}{}", self.base_path, inbound.path()),
        };

        Uri::builder()
            .scheme(Scheme::HTTP)
            .authority(self.authority.clone())
            .path_and_query(PathAndQuery::try_from(path_and_query)?)
            .build()
    }
}

/// Route patterns for the configured mount prefixes, de-duplicated.
pub fn mount_patterns(mount_paths: &[String]) -> Vec<String> {
    let mut patterns: Vec<String> = Vec::new();
    for mount in mount_paths {
        let prefix = mount.trim().trim_end_matches('/');
        let candidates = if prefix.is_empty() {
            ["/".to_string(), "/{*path}".to_string()]
        } else {
            [prefix.to_string(), format!("{}/{{*path}}", prefix)]
        };
        for candidate in candidates {
            if !patterns.contains(&candidate) {
                patterns.push(candidate);
            }
        }
    }
    patterns
}

#[derive(Clone)]
struct ForwardState {
    client: Client<HttpConnector, Body>,
    target: UpstreamTarget,
}

impl AppFactory for UpstreamFactory {
    fn name(&self) -> &str {
        "upstream"
    }

    #[allow(deprecated)]
    fn create_app(&self) -> Result<GatewayApp, FactoryError> {
        let target = UpstreamTarget::parse(&self.config.upstream_url)?;

        tracing::debug!(
            authority = %target.authority,
            base_path = %target.base_path,
            "Resolved upstream gateway"
        );

        let state = ForwardState {
            client: Client::builder(TokioExecutor::new()).build(HttpConnector::new()),
            target,
        };

        let app = mount_patterns(&self.config.mount_paths)
            .iter()
            .fold(GatewayApp::new(), |app, pattern| {
                app.route(pattern, any(forward).with_state(state.clone()))
            });

        let timeout = Duration::from_secs(self.config.request_timeout_secs);
        Ok(app.map_router(|router| router.layer(TimeoutLayer::new(timeout))))
    }
}

async fn forward(State(state): State<ForwardState>, request: Request<Body>) -> Response {
    let (mut parts, body) = request.into_parts();

    let uri = match state.target.rewrite(&parts.uri) {
        Ok(uri) => uri,
        Err(e) => {
            tracing::warn!(path = %parts.uri.path(), error = %e, "Could not build upstream URI");
            return error_response(StatusCode::BAD_REQUEST, format!("invalid request path: {}", e));
        }
    };

    tracing::debug!(method = %parts.method, upstream = %uri, "Forwarding to gateway");

    parts.uri = uri;
    parts.version = Version::HTTP_11;
    parts.headers.remove(header::HOST);

    match state.client.request(Request::from_parts(parts, body)).await {
        Ok(response) => {
            let (parts, body) = response.into_parts();
            Response::from_parts(parts, Body::new(body))
        }
        Err(e) => {
            tracing::error!(error = %e, "Upstream gateway request failed");
            error_response(
                StatusCode::BAD_GATEWAY,
                format!("upstream gateway unreachable: {}", e),
            )
        }
    }
}

fn error_response(status: StatusCode, message: String) -> Response {
    (status, Json(serde_json::json!({ "error": message }))).into_response()
}
