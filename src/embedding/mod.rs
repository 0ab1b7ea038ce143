//! Word embeddings used to score candidate relations.
//!
//! An [`EmbeddingStore`] maps a token sequence to one fixed-dimension
//! [`Vector`]. Out-of-vocabulary sequences never fail: they fall back to the
//! zero vector so similarity stays computable.

pub mod store;
pub mod vector;
pub mod word_vectors;

pub use self::store::EmbeddingStore;
pub use self::vector::Vector;
pub use self::word_vectors::WordVectors;
