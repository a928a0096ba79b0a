//! Handler trait, type erasure, and state injection.
//!
//! The router stores handlers of different concrete types in one table, so
//! each one is boxed behind `dyn ErasedHandler`:
//!
//! ```text
//! async fn welcome(req: Request) -> Response { … }
//!        ↓ router.get("/", welcome)
//! Arc::new(FnHandler(welcome))          stored as BoxedHandler
//!        ↓ at request time
//! Box::pin(async { welcome(req).await.into_response() })
//! ```
//!
//! Handlers that need shared application state are built with
//! [`with_state`], which clones an `Arc` into every call.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::request::Request;
use crate::response::{IntoResponse, Response};

/// A heap-allocated, type-erased future that resolves to a [`Response`].
pub(crate) type BoxFuture = Pin<Box<dyn Future<Output = Response> + Send + 'static>>;

/// Internal dispatch interface.
///
/// `#[doc(hidden)] pub` because it appears in the signature of the public
/// [`Handler`] trait.
#[doc(hidden)]
pub trait ErasedHandler {
    fn call(&self, req: Request) -> BoxFuture;
}

/// A type-erased handler shared across concurrent requests.
#[doc(hidden)]
pub type BoxedHandler = Arc<dyn ErasedHandler + Send + Sync + 'static>;

/// Implemented for every valid route handler.
///
/// Satisfied automatically by any `async fn(Request) -> impl IntoResponse`
/// and by closures of the same shape. Sealed: only the blanket impl below
/// can implement it.
pub trait Handler: private::Sealed + Send + Sync + 'static {
    #[doc(hidden)]
    fn into_boxed_handler(self) -> BoxedHandler;
}

mod private {
    pub trait Sealed {}
}

impl<F, Fut, R> private::Sealed for F
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
}

impl<F, Fut, R> Handler for F
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
    fn into_boxed_handler(self) -> BoxedHandler {
        Arc::new(FnHandler(self))
    }
}

struct FnHandler<F>(F);

impl<F, Fut, R> ErasedHandler for FnHandler<F>
where
    F: Fn(Request) -> Fut + Send + Sync,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
    fn call(&self, req: Request) -> BoxFuture {
        let fut = (self.0)(req);
        Box::pin(async move { fut.await.into_response() })
    }
}

/// Adapts `async fn(Arc<S>, Request)` into a [`Handler`].
///
/// ```rust
/// use std::sync::Arc;
/// use blog_insights::{Request, Response, Router, handler::with_state};
///
/// struct Greeting(&'static str);
///
/// async fn greet(state: Arc<Greeting>, _req: Request) -> Response {
///     Response::text(state.0)
/// }
///
/// let app = Router::new().get("/", with_state(Arc::new(Greeting("hi")), greet));
/// ```
pub fn with_state<S, F, Fut, R>(state: Arc<S>, f: F) -> impl Handler
where
    S: Send + Sync + 'static,
    F: Fn(Arc<S>, Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
    move |req: Request| f(Arc::clone(&state), req)
}
