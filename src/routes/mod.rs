//! HTTP routes.

mod blogs;
mod home;

use std::sync::Arc;

use crate::handler::with_state;
use crate::health;
use crate::middleware::Cors;
use crate::router::Router;
use crate::state::AppState;

pub use self::blogs::MISSING_QUERY_MESSAGE;
pub use self::home::WELCOME_MESSAGE;

/// Build the complete service router.
///
/// - `GET /` - welcome text
/// - `GET /api/blog-stats` - analytics over the current upstream listing
/// - `GET /api/blog-search?query=` - title search over the current listing
/// - `GET /healthz`, `GET /readyz` - probes
///
/// Every response carries permissive CORS headers.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .get("/", home::welcome)
        .get("/api/blog-stats", with_state(Arc::clone(&state), blogs::stats))
        .get("/api/blog-search", with_state(state, blogs::search))
        .get("/healthz", health::liveness)
        .get("/readyz", health::readiness)
        .cors(Cors::permissive())
}
