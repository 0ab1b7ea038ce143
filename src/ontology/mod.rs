//! Ontology extension: enriching leaf files with ranked, relevant terms.

pub mod extension;
pub mod header;
pub mod leaf;
pub mod relevance;
pub mod report;

pub use self::extension::{
    ExtensionOptions, ExtensionReport, LeafCandidate, LeafExtension, OntologyExtensionEngine,
};
pub use self::header::{HeaderSegment, OntologyHeaderPath};
pub use self::leaf::OntologyLeafFile;
pub use self::relevance::{RelevanceFilter, decay_weights, relevance_to_header};
