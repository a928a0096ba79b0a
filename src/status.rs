//! HTTP status codes as a typed enum.
//!
//! Only the codes this service actually emits are listed. Use [`Status`]
//! anywhere a status code is accepted: `Response::status()` or
//! `Response::builder().status()`.
//!
//! ```rust
//! use blog_insights::{Response, Status};
//!
//! Response::status(Status::NotFound);
//!
//! Response::builder()
//!     .status(Status::InternalServerError)
//!     .json(br#"{"error":"upstream unavailable"}"#.to_vec());
//! ```

use http::StatusCode;

/// A status code emitted by this service.
#[allow(clippy::enum_variant_names)]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Status {
    // ── 2xx Success ───────────────────────────────────────────────────────────
    Ok,                            // 200

    // ── 4xx Client errors ─────────────────────────────────────────────────────
    NotFound,                      // 404
    MethodNotAllowed,              // 405

    // ── 5xx Server errors ─────────────────────────────────────────────────────
    InternalServerError,           // 500
    ServiceUnavailable,            // 503
}

impl From<Status> for u16 {
    fn from(s: Status) -> u16 {
        match s {
            Status::Ok                  => 200,
            Status::NotFound            => 404,
            Status::MethodNotAllowed    => 405,
            Status::InternalServerError => 500,
            Status::ServiceUnavailable  => 503,
        }
    }
}

impl From<Status> for StatusCode {
    fn from(s: Status) -> StatusCode {
        match s {
            Status::Ok                  => StatusCode::OK,
            Status::NotFound            => StatusCode::NOT_FOUND,
            Status::MethodNotAllowed    => StatusCode::METHOD_NOT_ALLOWED,
            Status::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
            Status::ServiceUnavailable  => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}
