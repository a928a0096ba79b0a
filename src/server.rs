//! HTTP server and graceful shutdown.
//!
//! # Graceful shutdown
//!
//! On SIGTERM (Kubernetes, systemd) or Ctrl-C the server:
//! 1. Stops calling `listener.accept()`; no new connections are made.
//! 2. Asks every open connection to close once its current request is done;
//!    idle keep-alive connections close immediately.
//! 3. Returns from [`Server::serve`] when the last connection is gone, which
//!    lets `main` exit cleanly.
//!
//! A request stuck on a slow upstream holds shutdown open for as long as the
//! upstream takes, unless an upstream timeout is configured.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use http_body_util::Full;
use hyper::body::{Bytes, Incoming};
use hyper::service::service_fn;
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder as ConnBuilder;
use hyper_util::server::graceful::GracefulShutdown;
use tokio::net::TcpListener;
use tracing::{error, info};

use crate::error::Error;
use crate::method::Method;
use crate::middleware;
use crate::request::Request;
use crate::response::Response;
use crate::router::{Route, Router};
use crate::status::Status;

/// The HTTP server.
pub struct Server {
    addr: SocketAddr,
}

impl Server {
    /// Configures the server to bind to `addr` when [`serve`](Server::serve)
    /// is called.
    pub fn bind(addr: SocketAddr) -> Self {
        Self { addr }
    }

    /// Binds, then accepts connections and dispatches them through `router`
    /// until SIGTERM or Ctrl-C.
    ///
    /// Returns only after every in-flight request has completed.
    pub async fn serve(self, router: Router) -> Result<(), Error> {
        let listener = TcpListener::bind(self.addr).await?;
        serve_with_shutdown(listener, router, shutdown_signal()).await
    }
}

/// Serves `router` on an already-bound listener until `signal` resolves, then
/// drains in-flight connections.
///
/// Useful when the caller needs the bound address up front, e.g. after
/// binding to port 0.
pub async fn serve_with_shutdown<S>(
    listener: TcpListener,
    router: Router,
    signal: S,
) -> Result<(), Error>
where
    S: Future<Output = ()>,
{
    let router = Arc::new(router);
    let local_addr = listener.local_addr()?;

    info!(addr = %local_addr, "listening");

    let builder = ConnBuilder::new(TokioExecutor::new());
    // Tells watched connections to finish their current request and close,
    // instead of idling in keep-alive forever.
    let graceful = GracefulShutdown::new();
    let mut tasks = tokio::task::JoinSet::new();

    tokio::pin!(signal);

    loop {
        tokio::select! {
            // Shutdown first, so a signal stops accepts even if more are queued.
            biased;

            () = &mut signal => {
                info!(in_flight = tasks.len(), "shutdown signal received, draining connections");
                break;
            }

            res = listener.accept() => {
                let (stream, remote_addr) = match res {
                    Ok(v) => v,
                    Err(e) => {
                        error!("accept error: {e}");
                        continue;
                    }
                };

                let router = Arc::clone(&router);
                // Called once per request on the connection.
                let svc = service_fn(move |req| {
                    let router = Arc::clone(&router);
                    async move { dispatch(router, req).await }
                });

                let conn = builder
                    .serve_connection_with_upgrades(TokioIo::new(stream), svc)
                    .into_owned();
                let conn = graceful.watch(conn);

                tasks.spawn(async move {
                    if let Err(e) = conn.await {
                        error!(peer = %remote_addr, "connection error: {e}");
                    }
                });
            }

            // Reap finished connection tasks so the set stays bounded.
            Some(_) = tasks.join_next(), if !tasks.is_empty() => {}
        }
    }

    drop(listener);
    graceful.shutdown().await;
    while tasks.join_next().await.is_some() {}

    info!("server stopped");
    Ok(())
}

// ── Request dispatch ──────────────────────────────────────────────────────────

/// Routes one request and produces one response.
///
/// Every failure becomes a status code, so hyper never sees an error.
async fn dispatch(
    router: Arc<Router>,
    req: hyper::Request<Incoming>,
) -> Result<http::Response<Full<Bytes>>, std::convert::Infallible> {
    let method_name = req.method().as_str().to_owned();
    let path = req.uri().path().to_owned();

    let mut response = middleware::trace(&method_name, &path, async {
        let method = Method::try_from(req.method()).ok();
        match router.lookup(method, &path) {
            Route::Found(method, handler) => {
                let (parts, _body) = req.into_parts();
                handler.call(Request::new(parts, method)).await
            }
            Route::MethodNotAllowed => Response::status(Status::MethodNotAllowed),
            Route::NotFound => Response::status(Status::NotFound),
        }
    })
    .await;

    if let Some(cors) = router.cors_policy() {
        cors.apply(&mut response);
    }

    Ok(response.into_inner())
}

// ── Shutdown signal ───────────────────────────────────────────────────────────

/// Resolves on the first SIGTERM or SIGINT (Ctrl-C). Ctrl-C only on Windows.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let sigterm = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let sigterm = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c   => {}
        () = sigterm  => {}
    }
}
