//! Blog analytics and search endpoints.

use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use crate::derive::{AnalyticsResult, SearchResult};
use crate::error::ApiError;
use crate::state::AppState;
use crate::{Request, Response};

pub const MISSING_QUERY_MESSAGE: &str = "Please enter a query string in the URL";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StatsResponse<'a> {
    analytics_results: &'a AnalyticsResult,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SearchResponse<'a> {
    search_results: &'a SearchResult,
}

/// `GET /api/blog-stats`
///
/// An empty listing is still a listing: zero totals, no longest title.
pub async fn stats(state: Arc<AppState>, _req: Request) -> Result<Response, ApiError> {
    let blogs = state.source.fetch().await?;
    let analytics = state.analytics.derive(&blogs);
    debug!(collection = %blogs.id(), total = analytics.total_blogs, "blog stats ready");
    Ok(Response::json_value(&StatsResponse { analytics_results: &analytics }))
}

/// `GET /api/blog-search?query=<text>`
///
/// Without a `query` parameter the caller gets a plain-text hint, not an
/// error. Upstream is still fetched first, so an upstream failure wins.
pub async fn search(state: Arc<AppState>, req: Request) -> Result<Response, ApiError> {
    let blogs = state.source.fetch().await?;

    let Some(query) = req.query("query") else {
        return Ok(Response::text(MISSING_QUERY_MESSAGE));
    };

    let results = state.search.derive(&blogs, &query);
    debug!(collection = %blogs.id(), query = %query, matches = results.match_count, "blog search ready");
    Ok(Response::json_value(&SearchResponse { search_results: &results }))
}
