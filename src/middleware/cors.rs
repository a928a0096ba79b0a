//! Static CORS policy.

use crate::response::Response;

/// Headers that browsers may send on cross-origin requests by default.
pub const DEFAULT_ALLOW_HEADERS: &str = "Origin, X-Requested-With, Content-Type, Accept";

/// A fixed set of CORS response headers.
///
/// No preflight negotiation: the same headers go on every response.
#[derive(Clone, Debug)]
pub struct Cors {
    allow_origin: String,
    allow_headers: String,
}

impl Cors {
    /// Any origin, with [`DEFAULT_ALLOW_HEADERS`].
    pub fn permissive() -> Self {
        Self::new("*", DEFAULT_ALLOW_HEADERS)
    }

    pub fn new(allow_origin: impl Into<String>, allow_headers: impl Into<String>) -> Self {
        Self { allow_origin: allow_origin.into(), allow_headers: allow_headers.into() }
    }

    /// Adds the policy headers unless the handler already set them.
    pub(crate) fn apply(&self, res: &mut Response) {
        res.set_default_header("access-control-allow-origin", &self.allow_origin);
        res.set_default_header("access-control-allow-headers", &self.allow_headers);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::Status;

    #[test]
    fn permissive_policy_allows_any_origin() {
        let mut res = Response::status(Status::NotFound);
        Cors::permissive().apply(&mut res);
        assert_eq!(res.header("access-control-allow-origin"), Some("*"));
        assert_eq!(res.header("access-control-allow-headers"), Some(DEFAULT_ALLOW_HEADERS));
    }

    #[test]
    fn handler_headers_take_precedence() {
        let mut res = Response::builder()
            .header("access-control-allow-origin", "https://example.com")
            .text("");
        Cors::permissive().apply(&mut res);
        assert_eq!(res.header("access-control-allow-origin"), Some("https://example.com"));
    }
}
