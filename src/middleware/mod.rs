//! Middleware layer.
//!
//! Cross-cutting concerns applied by the server around every request:
//!
//! - [`Cors`]: fixed CORS headers stamped onto every response
//! - [`trace`]: per-request span with method and path; status and latency
//!   logged when the response is ready

mod cors;
mod trace;

pub use cors::Cors;
pub(crate) use trace::trace;
