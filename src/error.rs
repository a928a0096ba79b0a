//! Error types: infrastructure failures and data-route failures.

use serde::Serialize;
use thiserror::Error;

use crate::fetch::FetchError;
use crate::response::{IntoResponse, Response};
use crate::status::Status;

/// The error type returned by the service's fallible startup operations.
///
/// Request-level failures (upstream down, bad data) are expressed as HTTP
/// [`Response`](crate::Response) values, not as `Error`s. This type surfaces
/// infrastructure failures: reading configuration, building the upstream
/// client, binding to a port.
#[derive(Debug, Error)]
pub enum Error {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("http client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Failure of a data route, rendered as `500 {"error": "..."}`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
}

/// JSON error response body.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "request failed");
        Response::builder()
            .status(Status::InternalServerError)
            .json_value(&ErrorBody { error: self.to_string() })
    }
}
