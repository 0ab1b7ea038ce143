//! Records flowing through extraction, consolidation and scoring.

use serde::{Deserialize, Serialize};

use crate::corpus::client::QueryHit;

/// Ordered token sequence; the unit of query and result.
pub type TokenSequence = Vec<String>;

/// A sentence a match was found in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evidence {
    pub document_id: u64,
    pub sentence_text: String,
}

impl Evidence {
    /// Create a new evidence record.
    pub fn new<S: Into<String>>(document_id: u64, sentence_text: S) -> Self {
        Evidence {
            document_id,
            sentence_text: sentence_text.into(),
        }
    }
}

/// One query hit reduced to its extracted term.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawMatch {
    pub result_tokens: TokenSequence,
    pub evidence: Evidence,
}

impl From<QueryHit> for RawMatch {
    fn from(hit: QueryHit) -> Self {
        let result_tokens = hit.result_tokens().to_vec();
        RawMatch {
            result_tokens,
            evidence: Evidence {
                document_id: hit.doc_id,
                sentence_text: hit.sentence,
            },
        }
    }
}

/// All raw matches sharing one result, counted.
///
/// `count` is the number of collapsed raw matches; `evidence` is a bounded
/// sample of them and may be shorter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsolidatedMatch {
    pub result_tokens: TokenSequence,
    pub count: usize,
    pub evidence: Vec<Evidence>,
}

impl ConsolidatedMatch {
    /// A match with a count and no evidence.
    pub fn counted(result_tokens: TokenSequence, count: usize) -> Self {
        ConsolidatedMatch {
            result_tokens,
            count,
            evidence: Vec::new(),
        }
    }
}

/// A consolidated match scored against a query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredMatch {
    pub query: TokenSequence,
    pub result: TokenSequence,
    pub count: usize,
    pub similarity: f64,
    pub score: f64,
    pub evidence: Vec<Evidence>,
}

impl ScoredMatch {
    /// Result tokens joined with single spaces.
    pub fn result_text(&self) -> String {
        self.result.join(" ")
    }
}
