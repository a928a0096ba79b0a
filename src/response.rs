//! Outgoing HTTP response type and the [`IntoResponse`] conversion trait.
//!
//! Build a [`Response`] in your handler and return it. The server turns it
//! into a hyper response after the middleware has had its say.

use bytes::Bytes;
use http::header::{CONTENT_TYPE, HeaderName, HeaderValue};
use http_body_util::Full;
use serde::Serialize;
use tracing::error;

use crate::status::Status;

const JSON: &str = "application/json";
const TEXT: &str = "text/plain; charset=utf-8";

// ── Response ─────────────────────────────────────────────────────────────────

/// An outgoing HTTP response.
///
/// # Shortcuts (200 OK, no custom headers needed)
///
/// ```rust
/// use blog_insights::{Response, Status};
///
/// Response::json(br#"{"id":1}"#.to_vec());
/// Response::text("hello");
/// Response::status(Status::NotFound);
/// ```
///
/// # Builder (custom status or headers)
///
/// ```rust
/// use blog_insights::{Response, Status};
///
/// Response::builder()
///     .status(Status::InternalServerError)
///     .header("retry-after", "30")
///     .json(br#"{"error":"upstream unavailable"}"#.to_vec());
/// ```
#[derive(Debug)]
pub struct Response {
    pub(crate) body: Vec<u8>,
    pub(crate) headers: Vec<(String, String)>,
    pub(crate) status: Status,
}

impl Response {
    /// `200 OK` with `application/json`, bytes passed through untouched.
    pub fn json(body: Vec<u8>) -> Self {
        Self::bytes_raw(JSON, body)
    }

    /// `200 OK` with `application/json`, serialized with serde_json.
    ///
    /// A value that fails to serialize becomes a bodiless `500`.
    pub fn json_value<T: Serialize + ?Sized>(value: &T) -> Self {
        Self::builder().json_value(value)
    }

    /// `200 OK` with `text/plain; charset=utf-8`.
    pub fn text(body: impl Into<String>) -> Self {
        Self::bytes_raw(TEXT, body.into().into_bytes())
    }

    /// Response with no body.
    pub fn status(code: Status) -> Self {
        Self { body: Vec::new(), headers: Vec::new(), status: code }
    }

    /// Builder for responses that need a custom status or extra headers.
    pub fn builder() -> ResponseBuilder {
        ResponseBuilder { headers: Vec::new(), status: Status::Ok }
    }

    pub fn status_code(&self) -> Status { self.status }
    pub fn body(&self) -> &[u8] { &self.body }

    /// First value of a header, matched case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Sets a header unless one with the same name is already present.
    pub(crate) fn set_default_header(&mut self, name: &str, value: &str) {
        if self.header(name).is_none() {
            self.headers.push((name.to_owned(), value.to_owned()));
        }
    }

    fn bytes_raw(content_type: &str, body: Vec<u8>) -> Self {
        Self {
            body,
            headers: vec![(CONTENT_TYPE.as_str().to_owned(), content_type.to_owned())],
            status: Status::Ok,
        }
    }

    /// Converts into the hyper representation.
    ///
    /// Headers whose name or value is not valid on the wire are dropped and
    /// logged rather than failing the whole response.
    pub(crate) fn into_inner(self) -> http::Response<Full<Bytes>> {
        let mut res = http::Response::new(Full::new(Bytes::from(self.body)));
        *res.status_mut() = self.status.into();

        let headers = res.headers_mut();
        for (name, value) in self.headers {
            match (
                HeaderName::from_bytes(name.as_bytes()),
                HeaderValue::from_str(&value),
            ) {
                (Ok(name), Ok(value)) => {
                    headers.append(name, value);
                }
                _ => error!(header = %name, "dropping invalid response header"),
            }
        }
        res
    }
}

// ── ResponseBuilder ───────────────────────────────────────────────────────────

/// Fluent builder for [`Response`].
///
/// Obtain via [`Response::builder()`]. Defaults to `Status::Ok` (200).
/// Terminated by a typed body method.
pub struct ResponseBuilder {
    headers: Vec<(String, String)>,
    status: Status,
}

impl ResponseBuilder {
    pub fn status(mut self, code: Status) -> Self {
        self.status = code;
        self
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_owned(), value.to_owned()));
        self
    }

    /// Terminate with a JSON body (`application/json`).
    pub fn json(self, body: Vec<u8>) -> Response {
        self.finish(JSON, body)
    }

    /// Terminate with a value serialized as JSON.
    pub fn json_value<T: Serialize + ?Sized>(self, value: &T) -> Response {
        match serde_json::to_vec(value) {
            Ok(bytes) => self.json(bytes),
            Err(e) => {
                error!(error = %e, "failed to serialize response body");
                Response::status(Status::InternalServerError)
            }
        }
    }

    /// Terminate with a plain-text body (`text/plain; charset=utf-8`).
    pub fn text(self, body: impl Into<String>) -> Response {
        self.finish(TEXT, body.into().into_bytes())
    }

    fn finish(self, content_type: &str, body: Vec<u8>) -> Response {
        let mut headers = vec![(CONTENT_TYPE.as_str().to_owned(), content_type.to_owned())];
        headers.extend(self.headers);
        Response { body, headers, status: self.status }
    }
}

// ── IntoResponse ──────────────────────────────────────────────────────────────

/// Conversion into an HTTP [`Response`].
///
/// Implement on your own types to return them directly from handlers.
pub trait IntoResponse {
    fn into_response(self) -> Response;
}

impl IntoResponse for Response {
    fn into_response(self) -> Response { self }
}

impl IntoResponse for &'static str {
    fn into_response(self) -> Response { Response::text(self) }
}

impl IntoResponse for String {
    fn into_response(self) -> Response { Response::text(self) }
}

/// Lets handlers use `?` and return whichever side they end up with.
impl<T, E> IntoResponse for Result<T, E>
where
    T: IntoResponse,
    E: IntoResponse,
{
    fn into_response(self) -> Response {
        match self {
            Ok(v) => v.into_response(),
            Err(e) => e.into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shortcuts_set_content_type() {
        assert_eq!(Response::json(b"{}".to_vec()).header("Content-Type"), Some(JSON));
        assert_eq!(Response::text("hi").header("content-type"), Some(TEXT));
        assert_eq!(Response::status(Status::NotFound).header("content-type"), None);
    }

    #[test]
    fn json_value_serializes_with_serde() {
        let res = Response::json_value(&serde_json::json!({ "a": [1, 2] }));
        assert_eq!(res.status_code(), Status::Ok);
        assert_eq!(res.body(), br#"{"a":[1,2]}"#);
    }

    #[test]
    fn builder_keeps_status_and_extra_headers() {
        let res = Response::builder()
            .status(Status::InternalServerError)
            .header("x-extra", "1")
            .text("boom");
        assert_eq!(res.status_code(), Status::InternalServerError);
        assert_eq!(res.header("x-extra"), Some("1"));
        assert_eq!(res.body(), b"boom");
    }

    #[test]
    fn default_headers_do_not_override() {
        let mut res = Response::builder().header("x-a", "mine").text("");
        res.set_default_header("x-a", "theirs");
        res.set_default_header("x-b", "theirs");
        assert_eq!(res.header("x-a"), Some("mine"));
        assert_eq!(res.header("x-b"), Some("theirs"));
    }

    #[test]
    fn into_inner_drops_invalid_headers() {
        let res = Response::builder()
            .header("bad header", "x")
            .header("x-ok", "y")
            .text("")
            .into_inner();
        assert_eq!(res.status(), http::StatusCode::OK);
        assert_eq!(res.headers().get("x-ok").unwrap(), "y");
        assert_eq!(res.headers().len(), 2);
    }

    #[test]
    fn results_convert_through_either_side() {
        let ok: Result<&'static str, Status> = Ok("fine");
        let err: Result<&'static str, Status> = Err(Status::InternalServerError);
        assert_eq!(ok.into_response().status_code(), Status::Ok);
        assert_eq!(err.into_response().status_code(), Status::InternalServerError);
    }
}
