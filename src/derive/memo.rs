//! Single-entry memoization.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;
use tracing::debug;

/// Remembers the most recent `(key, value)` pair.
///
/// A lookup with the same key returns the stored value; any other key
/// computes a new value and replaces the entry. The lock is held only to read
/// or swap the entry, never while computing, so two callers racing on a cold
/// key may both compute. That is harmless: the value is a pure function of
/// the key.
pub struct Memo<K, V> {
    name: &'static str,
    last: Mutex<Option<(K, Arc<V>)>>,
    computations: AtomicU64,
}

impl<K: PartialEq, V> Memo<K, V> {
    pub fn new(name: &'static str) -> Self {
        Self { name, last: Mutex::new(None), computations: AtomicU64::new(0) }
    }

    pub fn get_or_compute<F>(&self, key: K, compute: F) -> Arc<V>
    where
        F: FnOnce() -> V,
    {
        if let Some((k, v)) = self.last.lock().as_ref() {
            if *k == key {
                debug!(memo = self.name, "memo hit");
                return Arc::clone(v);
            }
        }

        debug!(memo = self.name, "memo miss, computing");
        let value = Arc::new(compute());
        self.computations.fetch_add(1, Ordering::Relaxed);
        *self.last.lock() = Some((key, Arc::clone(&value)));
        value
    }

    /// How many times `compute` has run.
    pub fn computations(&self) -> u64 {
        self.computations.load(Ordering::Relaxed)
    }
}
