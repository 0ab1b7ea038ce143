//! Embedding-based similarity and rank scores.
//!
//! Ranking uses `score = ln(1 + count) * (1e-4 + sigmoid(a · b))`, where
//! `a · b` is the unnormalized dot product of the composite embeddings. The
//! floor keeps every similarity strictly positive.

use std::sync::Arc;

use ahash::AHashMap;
use parking_lot::RwLock;

use crate::embedding::{EmbeddingStore, Vector};
use crate::taxonomy::types::{ConsolidatedMatch, ScoredMatch, TokenSequence};

/// Added to the sigmoid so similarity never reaches zero.
pub const SIMILARITY_FLOOR: f64 = 1e-4;

/// Logistic function.
pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Combine a match count and a similarity into one rank key.
pub fn rank_score(count: usize, similarity: f64) -> f64 {
    (1.0 + count as f64).ln() * similarity
}

/// Scores candidates against a query using an embedding store.
///
/// Composite embeddings are memoized; the scorer is shared by all workers of
/// an ontology batch.
pub struct SimilarityScorer {
    store: Arc<dyn EmbeddingStore>,
    cache: RwLock<AHashMap<TokenSequence, Arc<Vector>>>,
}

impl SimilarityScorer {
    /// Create a scorer over an embedding store.
    pub fn new(store: Arc<dyn EmbeddingStore>) -> Self {
        SimilarityScorer {
            store,
            cache: RwLock::new(AHashMap::new()),
        }
    }

    /// Composite embedding of a token sequence.
    pub fn composite_embedding(&self, tokens: &[String]) -> Arc<Vector> {
        if let Some(vector) = self.cache.read().get(tokens) {
            return Arc::clone(vector);
        }

        let vector = Arc::new(self.store.vector_for(tokens));
        self.cache
            .write()
            .entry(tokens.to_vec())
            .or_insert(vector)
            .clone()
    }

    /// Dot product of two composite embeddings.
    pub fn raw_similarity(&self, a: &[String], b: &[String]) -> f64 {
        self.composite_embedding(a).dot(&self.composite_embedding(b))
    }

    /// Similarity in `(1e-4, 1 + 1e-4)` used for ranking.
    pub fn similarity(&self, a: &[String], b: &[String]) -> f64 {
        SIMILARITY_FLOOR + sigmoid(self.raw_similarity(a, b))
    }

    /// Score one candidate against a query.
    pub fn score(&self, query: &[String], candidate: &ConsolidatedMatch) -> ScoredMatch {
        let similarity = self.similarity(query, &candidate.result_tokens);
        ScoredMatch {
            query: query.to_vec(),
            result: candidate.result_tokens.clone(),
            count: candidate.count,
            similarity,
            score: rank_score(candidate.count, similarity),
            evidence: candidate.evidence.clone(),
        }
    }

    /// Score candidates and sort them by descending score.
    ///
    /// A candidate equal to the query is dropped. Ties keep input order.
    pub fn rank(&self, query: &[String], candidates: &[ConsolidatedMatch]) -> Vec<ScoredMatch> {
        let mut scored: Vec<ScoredMatch> = candidates
            .iter()
            .filter(|c| c.result_tokens.as_slice() != query)
            .map(|c| self.score(query, c))
            .collect();

        scored.sort_by(|a, b| b.score.total_cmp(&a.score));
        scored
    }

    /// Number of cached composite embeddings.
    pub fn cache_size(&self) -> usize {
        self.cache.read().len()
    }

    /// Get the embedding store.
    pub fn store(&self) -> &Arc<dyn EmbeddingStore> {
        &self.store
    }
}
