//! Per-request tracing.

use std::future::Future;
use std::time::Instant;

use tracing::{Instrument, info, info_span};

use crate::response::Response;

/// Runs `fut` inside an `http_request` span and logs how it finished.
pub(crate) async fn trace<F>(method: &str, path: &str, fut: F) -> Response
where
    F: Future<Output = Response>,
{
    let span = info_span!("http_request", method = %method, path = %path);
    async move {
        let started = Instant::now();
        let res = fut.await;
        info!(
            status = u16::from(res.status_code()),
            latency_ms = started.elapsed().as_millis() as u64,
            "request completed"
        );
        res
    }
    .instrument(span)
    .await
}
