//! Embedding provider seam, caching and the offline lexical provider

pub mod cache;
pub mod lexical;
pub mod provider;

pub use cache::{CachedEmbedder, EmbeddingCache};
pub use lexical::LexicalEmbedder;
pub use provider::EmbeddingProvider;
