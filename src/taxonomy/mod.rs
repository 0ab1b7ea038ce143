//! Extraction and ranking of taxonomic relations.
//!
//! Raw query hits are consolidated per result by [`MatchConsolidator`],
//! scored by [`SimilarityScorer`] and orchestrated by [`TaxonomyReader`].

pub mod consolidator;
pub mod reader;
pub mod scorer;
pub mod types;

pub use self::consolidator::{MatchConsolidator, consolidate};
pub use self::reader::TaxonomyReader;
pub use self::scorer::SimilarityScorer;
pub use self::types::{ConsolidatedMatch, Evidence, RawMatch, ScoredMatch, TokenSequence};
