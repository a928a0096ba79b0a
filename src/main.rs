//! blog-insights server binary.
//!
//! Run with:
//!   BLOG_API_SECRET=... RUST_LOG=info cargo run
//!
//! Try:
//!   curl http://localhost:4000/api/blog-stats
//!   curl 'http://localhost:4000/api/blog-search?query=privacy'

use std::process::ExitCode;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use blog_insights::{AppState, Config, Error, HttpBlogSource, Server, routes};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "blog-insights failed");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), Error> {
    let config = Config::from_env()?;
    let source = HttpBlogSource::new(&config.upstream)?;
    let state = Arc::new(AppState::new(Arc::new(source)));

    Server::bind(config.bind_addr)
        .serve(routes::router(state))
        .await
}
