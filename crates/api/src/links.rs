//! Absolute locators for API resources.
//!
//! Locators are built from the request's `Host` header (and
//! `X-Forwarded-Proto` when behind a proxy) so clients can follow them
//! directly. Requests without a usable `Host` fall back to the configured
//! public base URL.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::header::HOST;
use snippets_core::types::DbId;

use crate::routes::API_PREFIX;
use crate::state::AppState;

/// Locator builder scoped to a single request's origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Links {
    origin: String,
}

impl Links {
    /// Build from an origin such as `http://localhost:3000` (no trailing slash).
    pub fn new(origin: impl Into<String>) -> Self {
        let origin = origin.into();
        Self {
            origin: origin.trim_end_matches('/').to_string(),
        }
    }

    /// `{origin}/api/v1`
    pub fn root(&self) -> String {
        format!("{}{API_PREFIX}", self.origin)
    }

    /// `{origin}/api/v1/{prefix}`
    pub fn collection(&self, prefix: &str) -> String {
        format!("{}/{prefix}", self.root())
    }

    /// `{origin}/api/v1/{prefix}/{id}`
    pub fn detail(&self, prefix: &str, id: DbId) -> String {
        format!("{}/{id}", self.collection(prefix))
    }

    /// `{origin}/api/v1/{prefix}/{id}/{action}`
    pub fn action(&self, prefix: &str, id: DbId, action: &str) -> String {
        format!("{}/{action}", self.detail(prefix, id))
    }
}

/// Accept a `Host` value only if it looks like `host[:port]`.
fn sane_host(host: &str) -> bool {
    !host.is_empty()
        && host
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | ':' | '[' | ']'))
}

impl FromRequestParts<AppState> for Links {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let host = parts
            .headers
            .get(HOST)
            .and_then(|v| v.to_str().ok())
            .filter(|h| sane_host(h));

        let Some(host) = host else {
            return Ok(Links::new(state.config.public_base_url.clone()));
        };

        let scheme = parts
            .headers
            .get("x-forwarded-proto")
            .and_then(|v| v.to_str().ok())
            .filter(|p| *p == "https" || *p == "http")
            .unwrap_or("http");

        Ok(Links::new(format!("{scheme}://{host}")))
    }
}
