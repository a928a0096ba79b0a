//! Incoming HTTP request type.

use http::HeaderMap;

use crate::method::Method;

/// An incoming request: the request line and headers.
///
/// Every route is a `GET`, so the body is never read.
pub struct Request {
    method: Method,
    path: String,
    query: Option<String>,
    headers: HeaderMap,
}

impl Request {
    pub(crate) fn new(parts: http::request::Parts, method: Method) -> Self {
        Self {
            method,
            path: parts.uri.path().to_owned(),
            query: parts.uri.query().map(str::to_owned),
            headers: parts.headers,
        }
    }

    pub fn method(&self) -> Method { self.method }
    pub fn path(&self) -> &str { &self.path }

    /// Case-insensitive header lookup. Non-UTF-8 values are treated as absent.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Returns the first form-decoded value of a query-string parameter.
    ///
    /// `?query=hello%20world` yields `Some("hello world")`; `?query=` yields
    /// `Some("")`; a bare `?query` also yields `Some("")`. A parameter that
    /// does not appear at all yields `None`.
    pub fn query(&self, key: &str) -> Option<String> {
        let raw = self.query.as_deref()?;
        form_urlencoded::parse(raw.as_bytes())
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.into_owned())
    }
}
