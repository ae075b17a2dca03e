//! Memoizing wrapper for naming strategies.

use std::collections::HashMap;

use parking_lot::Mutex;

use super::NamingStrategy;

/// Memoizes the results of an inner strategy, keyed by input.
///
/// Resources format the same property names on every call, so the cache
/// turns the word-splitting work into one lookup. The map is guarded by a
/// mutex and a single instance can be shared between threads.
///
/// ```rust
/// use transposer::naming::{CachingNamingStrategy, KebabCase, NamingStrategy};
///
/// let naming = CachingNamingStrategy::new(KebabCase);
/// assert_eq!(naming.format("firstName"), "first-name");
/// assert_eq!(naming.format("firstName"), "first-name");
/// assert_eq!(naming.cached_len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct CachingNamingStrategy<S> {
    inner: S,
    cache: Mutex<HashMap<String, String>>,
}

impl<S: NamingStrategy> CachingNamingStrategy<S> {
    /// Wraps `inner` with an empty cache.
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the wrapped strategy.
    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Returns the number of memoized inputs.
    pub fn cached_len(&self) -> usize {
        self.cache.lock().len()
    }
}

impl<S: NamingStrategy> NamingStrategy for CachingNamingStrategy<S> {
    fn format(&self, identifier: &str) -> String {
        if let Some(hit) = self.cache.lock().get(identifier) {
            return hit.clone();
        }
        let formatted = self.inner.format(identifier);
        self.cache
            .lock()
            .insert(identifier.to_string(), formatted.clone());
        formatted
    }

    fn normalise(&self, identifier: &str) -> String {
        self.inner.normalise(identifier)
    }
}
