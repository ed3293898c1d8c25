//! Deterministic offline embedding provider
//!
//! Builds a term-frequency vector over a vocabulary fitted from a corpus.
//! Vectors embedded against the same vocabulary are cosine-comparable, which
//! is all the scorer needs for offline runs and tests. Real deployments
//! inject a model-backed [`EmbeddingProvider`] instead.

use crate::embedding::provider::EmbeddingProvider;
use crate::error::Result;
use std::collections::BTreeMap;
use unicode_segmentation::UnicodeSegmentation;

pub struct LexicalEmbedder {
    vocabulary: BTreeMap<String, usize>,
}

impl LexicalEmbedder {
    /// Fit a vocabulary over the given corpus texts.
    pub fn fit<S: AsRef<str>>(corpus: &[S]) -> Self {
        let mut terms: Vec<String> = corpus
            .iter()
            .flat_map(|text| tokenize(text.as_ref()))
            .collect();
        terms.sort();
        terms.dedup();

        let vocabulary = terms
            .into_iter()
            .enumerate()
            .map(|(index, term)| (term, index))
            .collect();
        Self { vocabulary }
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    fn term_frequencies(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0.0f32; self.vocabulary.len()];
        for token in tokenize(text) {
            if let Some(&index) = self.vocabulary.get(&token) {
                vector[index] += 1.0;
            }
        }
        vector
    }
}

impl EmbeddingProvider for LexicalEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        Ok(self.term_frequencies(text))
    }
}

fn tokenize(text: &str) -> Vec<String> {
    text.unicode_words()
        .map(|word| word.to_lowercase())
        .filter(|word| word.len() > 1 && word.chars().any(|c| c.is_alphanumeric()))
        .collect()
}
