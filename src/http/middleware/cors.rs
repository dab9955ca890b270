//! Cross-origin policy for the loaded gateway.
//!
//! # Design Decisions
//! - Origins are matched exactly; there is no wildcard or suffix matching
//! - Credentials are allowed, so methods and headers are mirrored from the
//!   pre-flight request instead of answered with `*`
//! - The allow-list is computed once and never changes
//! - Origins off the list get none of the `access-control-allow-*`
//!   headers, not just no allow-origin

use axum::http::{header, HeaderValue};
use axum::response::Response;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

use crate::config::CorsConfig;
use crate::http::middleware::AttachError;

/// Ordered, de-duplicated origins allowed to make credentialed requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllowedOrigins {
    origins: Vec<String>,
}

impl AllowedOrigins {
    /// Fixed origins followed by `https://<deployment_host>` when a
    /// non-empty host is given.
    pub fn new<I, S>(fixed: I, deployment_host: Option<&str>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut origins: Vec<String> = Vec::new();
        let deployment = deployment_host
            .map(str::trim)
            .filter(|host| !host.is_empty())
            .map(|host| format!("https://{}", host));

        for origin in fixed.into_iter().map(Into::into).chain(deployment) {
            if !origins.contains(&origin) {
                origins.push(origin);
            }
        }

        Self { origins }
    }

    /// Build from config, reading the deployment host from the environment.
    pub fn from_env(config: &CorsConfig) -> Self {
        let host = std::env::var(&config.deployment_host_env).ok();
        let origins = Self::new(config.allowed_origins.iter().cloned(), host.as_deref());

        tracing::info!(origins = ?origins.as_slice(), "Allowed origins computed");
        origins
    }

    pub fn contains(&self, origin: &str) -> bool {
        self.origins.iter().any(|o| o == origin)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.origins
    }

    /// Build the CORS layer. Fails if an origin is not a usable header value.
    pub fn cors_layer(&self) -> Result<CorsLayer, AttachError> {
        let mut values = Vec::with_capacity(self.origins.len());
        for origin in &self.origins {
            if origin == "*" {
                return Err(AttachError::WildcardOrigin);
            }
            let value = HeaderValue::from_str(origin).map_err(|e| AttachError::InvalidOrigin {
                origin: origin.clone(),
                reason: e.to_string(),
            })?;
            values.push(value);
        }

        Ok(CorsLayer::new()
            .allow_origin(AllowOrigin::list(values))
            .allow_credentials(true)
            .allow_methods(AllowMethods::mirror_request())
            .allow_headers(AllowHeaders::mirror_request()))
    }
}

/// Headers granted only alongside a matching `access-control-allow-origin`.
const ORIGIN_BOUND_HEADERS: [header::HeaderName; 5] = [
    header::ACCESS_CONTROL_ALLOW_CREDENTIALS,
    header::ACCESS_CONTROL_ALLOW_METHODS,
    header::ACCESS_CONTROL_ALLOW_HEADERS,
    header::ACCESS_CONTROL_EXPOSE_HEADERS,
    header::ACCESS_CONTROL_MAX_AGE,
];

/// Drop CORS grants from responses whose origin did not match.
///
/// `CorsLayer` sets credentials and mirrored methods/headers regardless of
/// the origin; it only withholds the allow-origin header.
pub async fn strip_unmatched_cors(mut response: Response) -> Response {
    let headers = response.headers_mut();
    if !headers.contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN) {
        for name in ORIGIN_BOUND_HEADERS {
            headers.remove(name);
        }
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXED: [&str; 2] = ["https://www.chloe.16-b.it", "http://localhost:3000"];

    #[test]
    fn test_fixed_origins_always_present() {
        let origins = AllowedOrigins::new(FIXED, None);
        assert_eq!(origins.as_slice(), FIXED);
    }

    #[test]
    fn test_deployment_host_is_appended_with_https() {
        let origins = AllowedOrigins::new(FIXED, Some("example.vercel.app"));

        assert_eq!(origins.as_slice().len(), 3);
        assert!(origins.contains("https://www.chloe.16-b.it"));
        assert!(origins.contains("http://localhost:3000"));
        assert_eq!(origins.as_slice()[2], "https://example.vercel.app");
    }

    #[test]
    fn test_blank_deployment_host_is_ignored() {
        assert_eq!(AllowedOrigins::new(FIXED, Some("  ")).as_slice().len(), 2);
    }

    #[test]
    fn test_duplicates_are_dropped() {
        let origins = AllowedOrigins::new(
            ["https://a.example", "https://a.example"],
            Some("a.example"),
        );
        assert_eq!(origins.as_slice(), ["https://a.example"]);
    }

    #[test]
    fn test_from_env_reads_configured_variable() {
        let config = CorsConfig {
            deployment_host_env: "GATEWAY_SHIM_TEST_HOST_SET".into(),
            ..CorsConfig::default()
        };
        std::env::set_var("GATEWAY_SHIM_TEST_HOST_SET", "example.vercel.app");

        let origins = AllowedOrigins::from_env(&config);
        assert!(origins.contains("https://example.vercel.app"));
        assert!(origins.contains("https://www.chloe.16-b.it"));
        assert!(origins.contains("http://localhost:3000"));
    }

    #[test]
    fn test_from_env_without_variable() {
        let config = CorsConfig {
            deployment_host_env: "GATEWAY_SHIM_TEST_HOST_UNSET".into(),
            ..CorsConfig::default()
        };
        std::env::remove_var("GATEWAY_SHIM_TEST_HOST_UNSET");

        let origins = AllowedOrigins::from_env(&config);
        assert_eq!(origins.as_slice(), FIXED);
    }

    #[test]
    fn test_invalid_origin_fails_layer() {
        let origins = AllowedOrigins::new(["https://bad\norigin"], None);
        assert!(matches!(origins.cors_layer(), Err(AttachError::InvalidOrigin { .. })));
    }

    #[test]
    fn test_wildcard_fails_layer() {
        let origins = AllowedOrigins::new(["*"], None);
        assert!(matches!(origins.cors_layer(), Err(AttachError::WildcardOrigin)));
    }
}
