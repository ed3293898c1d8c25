//! Explicit, bounded embedding cache
//!
//! The cache is an object the caller constructs and threads through scoring,
//! never process-global state. Eviction is FIFO at a fixed entry cap.

use crate::embedding::provider::EmbeddingProvider;
use crate::error::Result;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

#[derive(Debug)]
pub struct EmbeddingCache {
    inner: Mutex<CacheInner>,
    max_entries: usize,
}

#[derive(Debug, Default)]
struct CacheInner {
    map: HashMap<String, Vec<f32>>,
    order: VecDeque<String>,
}

impl EmbeddingCache {
    pub fn new(max_entries: usize) -> Self {
        Self {
            inner: Mutex::new(CacheInner::default()),
            max_entries,
        }
    }

    pub fn get(&self, text: &str) -> Option<Vec<f32>> {
        let inner = self.inner.lock().expect("embedding cache poisoned");
        inner.map.get(text).cloned()
    }

    pub fn put(&self, text: &str, embedding: Vec<f32>) {
        if self.max_entries == 0 {
            return;
        }
        let mut inner = self.inner.lock().expect("embedding cache poisoned");
        if inner.map.contains_key(text) {
            inner.map.insert(text.to_string(), embedding);
            return;
        }
        while inner.map.len() >= self.max_entries {
            match inner.order.pop_front() {
                Some(oldest) => {
                    inner.map.remove(&oldest);
                }
                None => break,
            }
        }
        inner.map.insert(text.to_string(), embedding);
        inner.order.push_back(text.to_string());
    }

    pub fn len(&self) -> usize {
        self.inner.lock().expect("embedding cache poisoned").map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Wraps a provider with a shared cache; cache hits skip the inner call.
pub struct CachedEmbedder<'a, P> {
    provider: &'a P,
    cache: &'a EmbeddingCache,
}

impl<'a, P: EmbeddingProvider> CachedEmbedder<'a, P> {
    pub fn new(provider: &'a P, cache: &'a EmbeddingCache) -> Self {
        Self { provider, cache }
    }
}

impl<P: EmbeddingProvider + Sync> EmbeddingProvider for CachedEmbedder<'_, P> {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        if let Some(hit) = self.cache.get(text) {
            return Ok(hit);
        }
        let embedding = self.provider.embed(text).await?;
        self.cache.put(text, embedding.clone());
        Ok(embedding)
    }
}
