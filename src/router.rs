//! Radix-tree request router.
//!
//! One tree per HTTP method. O(path-length) lookup. Register a path, get a
//! handler; a path that exists under another method is a 405, anything else
//! a 404.

use std::collections::HashMap;
use std::sync::Arc;

use matchit::Router as MatchitRouter;

use crate::handler::{BoxedHandler, Handler};
use crate::method::Method;
use crate::middleware::Cors;

/// Outcome of a route lookup.
pub(crate) enum Route {
    Found(Method, BoxedHandler),
    MethodNotAllowed,
    NotFound,
}

/// The application router.
///
/// Build it once at startup and pass it to [`Server::serve`](crate::Server::serve).
/// Each registration returns `self` so calls chain naturally.
pub struct Router {
    routes: HashMap<Method, MatchitRouter<BoxedHandler>>,
    cors: Option<Cors>,
}

impl Router {
    pub fn new() -> Self {
        Self { routes: HashMap::new(), cors: None }
    }

    /// Register a handler for a method + path pair. Returns `self` for chaining.
    ///
    /// # Panics
    ///
    /// Panics if the path is malformed or already registered for `method`.
    pub fn on(mut self, method: Method, path: &str, handler: impl Handler) -> Self {
        self.routes
            .entry(method)
            .or_default()
            .insert(path, handler.into_boxed_handler())
            .unwrap_or_else(|e| panic!("invalid route `{method} {path}`: {e}"));
        self
    }

    /// Shorthand for `on(Method::Get, path, handler)`.
    pub fn get(self, path: &str, handler: impl Handler) -> Self {
        self.on(Method::Get, path, handler)
    }

    /// Stamp CORS headers onto every response this router produces,
    /// including 404 and 405.
    pub fn cors(mut self, cors: Cors) -> Self {
        self.cors = Some(cors);
        self
    }

    pub(crate) fn cors_policy(&self) -> Option<&Cors> {
        self.cors.as_ref()
    }

    pub(crate) fn lookup(&self, method: Option<Method>, path: &str) -> Route {
        if let Some((method, tree)) = method.and_then(|m| Some((m, self.routes.get(&m)?))) {
            if let Ok(matched) = tree.at(path) {
                return Route::Found(method, Arc::clone(matched.value));
            }
        }

        if self.routes.values().any(|tree| tree.at(path).is_ok()) {
            Route::MethodNotAllowed
        } else {
            Route::NotFound
        }
    }
}

impl Default for Router {
    fn default() -> Self { Self::new() }
}
