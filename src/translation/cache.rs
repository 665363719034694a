//! In-memory LRU cache in front of a translation source.

use std::collections::{HashMap, VecDeque};

use async_trait::async_trait;
use parking_lot::Mutex;

use super::{SourceError, Translation, TranslationSource};

/// Wraps a source and remembers the last `capacity` successful lookups.
///
/// Keys are the exact query strings. Failures are never cached, so a
/// transient network error does not stick.
pub struct CachedSource<S> {
    inner: S,
    capacity: usize,
    entries: Mutex<LruEntries>,
}

#[derive(Default)]
struct LruEntries {
    map: HashMap<String, Vec<Translation>>,
    /// Front = least recently used.
    order: VecDeque<String>,
}

impl LruEntries {
    fn get(&mut self, key: &str) -> Option<Vec<Translation>> {
        let value = self.map.get(key)?.clone();
        self.touch(key);
        Some(value)
    }

    fn insert(&mut self, key: String, value: Vec<Translation>, capacity: usize) {
        if self.map.insert(key.clone(), value).is_some() {
            self.touch(&key);
            return;
        }
        self.order.push_back(key);
        while self.order.len() > capacity {
            if let Some(evicted) = self.order.pop_front() {
                self.map.remove(&evicted);
            }
        }
    }

    fn touch(&mut self, key: &str) {
        if let Some(pos) = self.order.iter().position(|k| k == key) {
            if let Some(k) = self.order.remove(pos) {
                self.order.push_back(k);
            }
        }
    }
}

impl<S: TranslationSource> CachedSource<S> {
    /// Create a cache holding at most `capacity` queries.
    ///
    /// A capacity of zero disables caching entirely.
    pub fn new(inner: S, capacity: usize) -> Self {
        Self {
            inner,
            capacity,
            entries: Mutex::new(LruEntries::default()),
        }
    }

    /// Number of cached queries.
    pub fn len(&self) -> usize {
        self.entries.lock().map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get a reference to the wrapped source.
    pub fn inner(&self) -> &S {
        &self.inner
    }
}

#[async_trait]
impl<S: TranslationSource> TranslationSource for CachedSource<S> {
    fn name(&self) -> &'static str {
        self.inner.name()
    }

    async fn lookup(&self, query: &str) -> Result<Vec<Translation>, SourceError> {
        if self.capacity == 0 {
            return self.inner.lookup(query).await;
        }

        // The lock is released before awaiting the inner source.
        let cached = self.entries.lock().get(query);
        if let Some(hit) = cached {
            tracing::debug!(query = %query, "Translation cache hit");
            return Ok(hit);
        }

        let result = self.inner.lookup(query).await?;
        self.entries
            .lock()
            .insert(query.to_string(), result.clone(), self.capacity);
        Ok(result)
    }
}
