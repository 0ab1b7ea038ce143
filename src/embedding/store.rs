//! Embedding store trait.

use crate::embedding::vector::Vector;

/// Maps token sequences to composite embeddings.
///
/// Lookups never fail. A sequence the store knows nothing about yields the
/// zero vector of [`dimension`](EmbeddingStore::dimension).
pub trait EmbeddingStore: Send + Sync {
    /// Composite embedding of a token sequence.
    fn vector_for(&self, tokens: &[String]) -> Vector;

    /// Dimension of every vector returned by this store.
    fn dimension(&self) -> usize;

    /// Get the name of this store (for debugging and configuration).
    fn name(&self) -> &'static str;
}
