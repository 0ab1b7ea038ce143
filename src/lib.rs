//! # Taxonomer
//!
//! Extraction of taxonomic relations (hypernyms, hyponyms and co-hyponyms)
//! from an annotated corpus, ranked by embedding similarity, and enrichment of
//! hierarchical ontologies with the ranked terms.
//!
//! ## Pipeline
//!
//! - [`query`] compiles relation rule templates into token-sequence queries
//! - [`corpus`] executes them against an in-memory annotated corpus
//! - [`taxonomy`] consolidates, scores and ranks the extracted terms
//! - [`ontology`] filters ranked terms by decay-weighted relevance to a leaf's
//!   header path and writes enriched leaf files
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use taxonomer::analysis::lemmatizer::RuleLemmatizer;
//! use taxonomer::corpus::{Corpus, Document, Sentence};
//! use taxonomer::embedding::WordVectors;
//! use taxonomer::taxonomy::{SimilarityScorer, TaxonomyReader};
//!
//! # fn main() -> taxonomer::error::Result<()> {
//! let corpus = Corpus::from_documents(vec![Document::new(
//!     1,
//!     vec![Sentence::from_tagged(
//!         "dogs/dog/NOUN such/such/ADJ as/as/ADP poodles/poodle/NOUN",
//!     )],
//! )]);
//! let vectors = WordVectors::from_pairs(vec![("dog", vec![1.0, 0.0]), ("poodles", vec![0.9, 0.1])])?;
//!
//! let reader = TaxonomyReader::new(
//!     Arc::new(corpus),
//!     Arc::new(RuleLemmatizer::new()),
//!     Arc::new(SimilarityScorer::new(Arc::new(vectors))),
//! );
//!
//! let hyponyms = reader.get_ranked_hyponyms(&["dog".to_string()], true)?;
//! assert_eq!(hyponyms[0].result, vec!["poodles".to_string()]);
//! # Ok(())
//! # }
//! ```

pub mod analysis;
pub mod cli;
pub mod config;
pub mod corpus;
pub mod embedding;
pub mod error;
pub mod ontology;
pub mod query;
pub mod taxonomy;

pub mod prelude {
    pub use crate::config::TaxonomerConfig;
    pub use crate::error::{Result, TaxonomerError};
    pub use crate::ontology::{ExtensionOptions, OntologyExtensionEngine};
    pub use crate::query::RelationKind;
    pub use crate::taxonomy::{ScoredMatch, SimilarityScorer, TaxonomyReader};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
