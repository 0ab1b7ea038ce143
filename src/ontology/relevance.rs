//! Decay-weighted relevance of a candidate to an ontology branch.
//!
//! Each header segment is weighted `2^-d`, `d` being its distance from the
//! leaf. Relevance is the weighted sum of raw dot-product similarities between
//! the candidate and each segment's words. It is a separate metric from the
//! rank score and is only compared against its own threshold.

use crate::ontology::header::OntologyHeaderPath;
use crate::taxonomy::scorer::SimilarityScorer;

/// Segment weights for a path of `len` segments, root first.
///
/// ```
/// use taxonomer::ontology::relevance::decay_weights;
///
/// assert_eq!(decay_weights(3), vec![0.25, 0.5, 1.0]);
/// ```
pub fn decay_weights(len: usize) -> Vec<f64> {
    (0..len)
        .map(|i| 0.5f64.powi((len - 1 - i) as i32))
        .collect()
}

/// Weighted sum of raw similarities between a candidate and every segment.
pub fn relevance_to_header(
    scorer: &SimilarityScorer,
    candidate: &[String],
    path: &OntologyHeaderPath,
) -> f64 {
    let weights = decay_weights(path.len());
    path.segment_words()
        .iter()
        .zip(weights)
        .map(|(words, weight)| weight * scorer.raw_similarity(candidate, words))
        .sum()
}

/// Admits candidates whose relevance exceeds a threshold.
#[derive(Debug, Clone, Copy)]
pub struct RelevanceFilter {
    threshold: f64,
}

impl RelevanceFilter {
    pub fn new(threshold: f64) -> Self {
        RelevanceFilter { threshold }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Whether a relevance score passes; the comparison is strict.
    pub fn passes(&self, relevance: f64) -> bool {
        relevance > self.threshold
    }
}
