//! Derived views over a fetched [`BlogCollection`](crate::BlogCollection).
//!
//! Each view is a pure function plus a memoizing deriver wrapping it. The
//! derivers live for the whole process (one of each in [`AppState`](crate::AppState))
//! and remember only their last input, keyed on collection identity rather
//! than contents. Since every request fetches a fresh collection, a memo hit
//! only happens when the same collection is derived twice; nothing may rely
//! on it for correctness.

mod analytics;
mod memo;
mod search;

pub use analytics::{AnalyticsDeriver, AnalyticsResult, analyze};
pub use memo::Memo;
pub use search::{SearchDeriver, SearchResult, search};
