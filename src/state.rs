//! Shared application state.

use std::sync::Arc;

use crate::derive::{AnalyticsDeriver, SearchDeriver};
use crate::fetch::BlogSource;

/// State shared by every request handler.
///
/// Created once at startup and kept for the life of the process; the
/// derivers' memo entries are never explicitly cleared.
pub struct AppState {
    /// Where blog data comes from; queried once per data request.
    pub source: Arc<dyn BlogSource>,
    pub analytics: AnalyticsDeriver,
    pub search: SearchDeriver,
}

impl AppState {
    pub fn new(source: Arc<dyn BlogSource>) -> Self {
        Self {
            source,
            analytics: AnalyticsDeriver::new(),
            search: SearchDeriver::new(),
        }
    }
}
