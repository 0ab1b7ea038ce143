//! Client interface for executing compiled queries against a corpus.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::query::CompiledQuery;

/// Label of the capture group holding the extracted term.
pub const RESULT_CAPTURE: &str = "result";

/// A single query match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryHit {
    /// Document the match was found in
    pub doc_id: u64,
    /// Normalized tokens of the whole matched span
    pub span: Vec<String>,
    /// Normalized tokens of the `result` capture, if the query defines one
    pub result: Option<Vec<String>>,
    /// Full text of the sentence containing the match
    pub sentence: String,
}

impl QueryHit {
    /// Tokens of the extracted term: the `result` capture when present,
    /// otherwise the whole span.
    pub fn result_tokens(&self) -> &[String] {
        self.result.as_deref().unwrap_or(&self.span)
    }
}

/// Trait for anything able to execute compiled token-sequence queries.
///
/// Implementations must be `Send + Sync`; the ontology engine shares one
/// client between its workers.
pub trait CorpusClient: Send + Sync {
    /// Execute a query and return every match.
    fn execute(&self, query: &CompiledQuery) -> Result<Vec<QueryHit>>;

    /// Get the name of this client (for logging).
    fn name(&self) -> &str {
        "corpus"
    }
}
