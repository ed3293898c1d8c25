//! The embedding provider seam

use crate::error::Result;

/// A source of text embeddings. Implementations are expected to be
/// deterministic for identical input; errors propagate to the caller, which
/// owns any retry or backoff policy.
pub trait EmbeddingProvider {
    fn embed(&self, text: &str) -> impl std::future::Future<Output = Result<Vec<f32>>> + Send;
}
