//! Configuration loaded from environment variables.

use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use crate::error::Error;

pub const DEFAULT_PORT: u16 = 4000;
pub const DEFAULT_BLOG_API_URL: &str = "https://intent-kit-16.hasura.app/api/rest/blogs";
pub const DEFAULT_SECRET_HEADER: &str = "x-hasura-admin-secret";

/// Service configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address the HTTP server binds to.
    pub bind_addr: SocketAddr,

    /// Where blog data comes from.
    pub upstream: UpstreamConfig,
}

/// Upstream blog-listing endpoint and its credential.
#[derive(Clone)]
pub struct UpstreamConfig {
    pub url: String,
    /// Name of the header carrying the credential.
    pub secret_header: String,
    pub secret: String,
    /// Whole-request timeout. `None` waits forever.
    pub timeout: Option<Duration>,
}

impl fmt::Debug for UpstreamConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpstreamConfig")
            .field("url", &self.url)
            .field("secret_header", &self.secret_header)
            .field("secret", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Required:
    /// - `BLOG_API_SECRET`: credential sent to the upstream API
    ///
    /// Optional:
    /// - `PORT`: listening port (default: 4000)
    /// - `BIND_HOST`: listening address (default: "0.0.0.0")
    /// - `BLOG_API_URL`: upstream listing endpoint
    /// - `BLOG_API_SECRET_HEADER`: credential header name (default: "x-hasura-admin-secret")
    /// - `BLOG_API_TIMEOUT_SECS`: upstream timeout in seconds (default: none)
    pub fn from_env() -> Result<Self, Error> {
        let port = match var("PORT") {
            Some(p) => p.parse::<u16>()
                .map_err(|e| Error::Config(format!("PORT must be a port number, got {p:?}: {e}")))?,
            None => DEFAULT_PORT,
        };

        let host = match var("BIND_HOST") {
            Some(h) => h.parse::<IpAddr>()
                .map_err(|e| Error::Config(format!("BIND_HOST must be an IP address, got {h:?}: {e}")))?,
            None => IpAddr::from([0, 0, 0, 0]),
        };

        let url = var("BLOG_API_URL").unwrap_or_else(|| DEFAULT_BLOG_API_URL.to_owned());

        let secret_header =
            var("BLOG_API_SECRET_HEADER").unwrap_or_else(|| DEFAULT_SECRET_HEADER.to_owned());

        let secret = var("BLOG_API_SECRET")
            .ok_or_else(|| Error::Config("BLOG_API_SECRET environment variable is required".to_owned()))?;

        let timeout = match var("BLOG_API_TIMEOUT_SECS") {
            Some(t) => {
                let secs = t.parse::<u64>().map_err(|e| {
                    Error::Config(format!("BLOG_API_TIMEOUT_SECS must be whole seconds, got {t:?}: {e}"))
                })?;
                Some(Duration::from_secs(secs))
            }
            None => None,
        };

        let config = Self {
            bind_addr: SocketAddr::new(host, port),
            upstream: UpstreamConfig { url, secret_header, secret, timeout },
        };

        tracing::info!(
            bind_addr = %config.bind_addr,
            upstream_url = %config.upstream.url,
            secret_header = %config.upstream.secret_header,
            timeout = ?config.upstream.timeout,
            "configuration loaded"
        );

        Ok(config)
    }
}

/// A set, non-blank environment variable, trimmed.
fn var(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}
