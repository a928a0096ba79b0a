//! Upstream blog fetcher.
//!
//! One GET per call, credential header attached, no caching of the network
//! result. Every request to this service re-fetches.

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{HeaderName, HeaderValue};
use thiserror::Error;
use tracing::{debug, error};

use crate::blog::{BlogCollection, BlogListing};
use crate::config::UpstreamConfig;
use crate::error::Error;

/// Longest upstream error body kept in a [`FetchError::Status`].
const MAX_ERROR_BODY: usize = 1024;

#[derive(Debug, Error)]
pub enum FetchError {
    /// Upstream answered with a non-success status.
    #[error("upstream returned {status}: {body}")]
    Status { status: u16, body: String },

    /// The request never completed (DNS, refused connection, timeout, ...).
    #[error("upstream request failed: {0}")]
    Transport(#[source] reqwest::Error),

    /// Upstream answered 2xx but the body is not a blog listing.
    #[error("upstream returned malformed blog data: {0}")]
    Malformed(#[source] serde_json::Error),
}

/// Anything that can produce a fresh [`BlogCollection`].
#[async_trait]
pub trait BlogSource: Send + Sync {
    async fn fetch(&self) -> Result<BlogCollection, FetchError>;
}

/// [`BlogSource`] backed by the upstream REST endpoint.
pub struct HttpBlogSource {
    client: Client,
    url: String,
    secret_header: HeaderName,
    secret: HeaderValue,
}

impl HttpBlogSource {
    pub fn new(config: &UpstreamConfig) -> Result<Self, Error> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        let secret_header = HeaderName::from_bytes(config.secret_header.as_bytes())
            .map_err(|e| Error::Config(format!("invalid secret header name: {e}")))?;
        let mut secret = HeaderValue::from_str(&config.secret)
            .map_err(|e| Error::Config(format!("invalid secret header value: {e}")))?;
        secret.set_sensitive(true);

        Ok(Self { client, url: config.url.clone(), secret_header, secret })
    }

    async fn fetch_listing(&self) -> Result<BlogCollection, FetchError> {
        let resp = self.client
            .get(&self.url)
            .header(self.secret_header.clone(), self.secret.clone())
            .send()
            .await
            .map_err(FetchError::Transport)?;

        let status = resp.status();
        if !status.is_success() {
            let mut body = resp.text().await.unwrap_or_default();
            truncate_at_char_boundary(&mut body, MAX_ERROR_BODY);
            return Err(FetchError::Status { status: status.as_u16(), body });
        }

        let bytes = resp.bytes().await.map_err(FetchError::Transport)?;
        let listing: BlogListing = serde_json::from_slice(&bytes).map_err(FetchError::Malformed)?;
        Ok(BlogCollection::new(listing.blogs))
    }
}

#[async_trait]
impl BlogSource for HttpBlogSource {
    async fn fetch(&self) -> Result<BlogCollection, FetchError> {
        let result = self.fetch_listing().await;
        match &result {
            Ok(blogs) => debug!(collection = %blogs.id(), count = blogs.len(), "fetched blogs"),
            Err(e) => error!(url = %self.url, error = %e, "failed to fetch blog data"),
        }
        result
    }
}

fn truncate_at_char_boundary(s: &mut String, max: usize) {
    if s.len() > max {
        let mut end = max;
        while !s.is_char_boundary(end) {
            end -= 1;
        }
        s.truncate(end);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(header: &str, secret: &str) -> UpstreamConfig {
        UpstreamConfig {
            url: "http://127.0.0.1:1/blogs".to_owned(),
            secret_header: header.to_owned(),
            secret: secret.to_owned(),
            timeout: None,
        }
    }

    #[test]
    fn rejects_unusable_credentials() {
        assert!(matches!(
            HttpBlogSource::new(&config("bad header", "s")),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            HttpBlogSource::new(&config("x-secret", "line\nbreak")),
            Err(Error::Config(_))
        ));
        assert!(HttpBlogSource::new(&config("x-secret", "s")).is_ok());
    }

    #[tokio::test]
    async fn refused_connections_are_transport_errors() {
        let source = HttpBlogSource::new(&config("x-secret", "s")).unwrap();
        assert!(matches!(source.fetch().await, Err(FetchError::Transport(_))));
    }

    #[test]
    fn error_bodies_are_truncated_on_char_boundaries() {
        let mut s = "é".repeat(10);
        truncate_at_char_boundary(&mut s, 5);
        assert_eq!(s, "éé");
    }
}
