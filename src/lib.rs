//! # blog-insights
//!
//! Analytics and search over a single upstream blog-listing API, served as
//! JSON.
//!
//! Every data request runs the same pipeline:
//!
//! ```text
//! GET /api/blog-stats ─┐                           ┌─ analytics (memoized) ─┐
//!                      ├─ fetch upstream listing ──┤                        ├─ JSON
//! GET /api/blog-search ┘                           └─ search (memoized) ────┘
//! ```
//!
//! The listing is fetched fresh for every request. The derived views are
//! pure functions of the listing, memoized on the identity of the fetched
//! collection.
//!
//! ## Running
//!
//! ```text
//! BLOG_API_SECRET=... PORT=4000 RUST_LOG=info blog-insights
//! ```
//!
//! ## Embedding
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use blog_insights::{AppState, Config, HttpBlogSource, Server, routes};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), blog_insights::Error> {
//!     let config = Config::from_env()?;
//!     let source = HttpBlogSource::new(&config.upstream)?;
//!     let state = Arc::new(AppState::new(Arc::new(source)));
//!
//!     Server::bind(config.bind_addr).serve(routes::router(state)).await
//! }
//! ```
//!
//! The HTTP layer underneath is deliberately small: a radix-tree
//! [`Router`], a buffered [`Request`], a [`Response`] builder, and a hyper
//! [`Server`] with graceful shutdown. TLS, rate limiting and body-size limits
//! are left to the reverse proxy in front.

mod blog;
mod config;
mod error;
mod fetch;
mod method;
mod request;
mod response;
mod router;
mod server;
mod state;
mod status;

pub mod derive;
pub mod handler;
pub mod health;
pub mod middleware;
pub mod routes;

pub use blog::{BlogCollection, BlogRecord, CollectionId};
pub use config::{Config, UpstreamConfig};
pub use error::{ApiError, Error};
pub use fetch::{BlogSource, FetchError, HttpBlogSource};
pub use handler::Handler;
pub use method::Method;
pub use request::Request;
pub use response::{IntoResponse, Response, ResponseBuilder};
pub use router::Router;
pub use server::{Server, serve_with_shutdown};
pub use state::AppState;
pub use status::Status;
