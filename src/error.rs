//! Error types for the Taxonomer library.
//!
//! All fallible operations return [`Result`], whose error side is the
//! [`TaxonomerError`] enum. Errors are grouped by the unit of work they abort:
//!
//! - [`TaxonomerError::Configuration`] - missing or invalid rule templates,
//!   embeddings or settings; fatal at startup.
//! - [`TaxonomerError::QueryCompilation`] - a malformed rule template or pattern;
//!   fatal for that query only.
//! - [`TaxonomerError::LeafProcessing`] - any failure while enriching one ontology
//!   leaf file; the batch continues with the next file.
//!
//! Out-of-vocabulary embedding lookups are not errors at all: the embedding
//! store degrades to a zero vector.
//!
//! # Examples
//!
//! ```
//! use taxonomer::error::{TaxonomerError, Result};
//!
//! fn load_rules() -> Result<()> {
//!     Err(TaxonomerError::configuration("rule file not found"))
//! }
//!
//! match load_rules() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// The main error type for Taxonomer operations.
#[derive(Error, Debug)]
pub enum TaxonomerError {
    /// I/O errors (file operations)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Missing or invalid rule template, embedding resource or setting
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Malformed rule template or pattern syntax
    #[error("Query compilation error: {0}")]
    QueryCompilation(String),

    /// Failure while enriching a single ontology leaf file
    #[error("Failed to process leaf file '{}': {source}", path.display())]
    LeafProcessing {
        path: PathBuf,
        #[source]
        source: Box<TaxonomerError>,
    },

    /// Analysis-related errors (tokenization, lemmatization)
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Corpus loading or execution errors
    #[error("Corpus error: {0}")]
    Corpus(String),

    /// Embedding file loading errors
    #[error("Embedding error: {0}")]
    Embedding(String),

    /// Invalid argument passed by a caller
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),

    /// Generic anyhow error
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with TaxonomerError.
pub type Result<T> = std::result::Result<T, TaxonomerError>;

impl TaxonomerError {
    /// Create a new configuration error.
    pub fn configuration<S: Into<String>>(msg: S) -> Self {
        TaxonomerError::Configuration(msg.into())
    }

    /// Create a new query compilation error.
    pub fn query_compilation<S: Into<String>>(msg: S) -> Self {
        TaxonomerError::QueryCompilation(msg.into())
    }

    /// Wrap an error raised while processing one leaf file.
    pub fn leaf_processing<P: Into<PathBuf>>(path: P, source: TaxonomerError) -> Self {
        TaxonomerError::LeafProcessing {
            path: path.into(),
            source: Box::new(source),
        }
    }

    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        TaxonomerError::Analysis(msg.into())
    }

    /// Create a new corpus error.
    pub fn corpus<S: Into<String>>(msg: S) -> Self {
        TaxonomerError::Corpus(msg.into())
    }

    /// Create a new embedding error.
    pub fn embedding<S: Into<String>>(msg: S) -> Self {
        TaxonomerError::Embedding(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        TaxonomerError::InvalidArgument(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        TaxonomerError::Other(msg.into())
    }

    /// Create a new internal error.
    pub fn internal<S: Into<String>>(msg: S) -> Self {
        TaxonomerError::Other(format!("Internal error: {}", msg.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let error = TaxonomerError::configuration("missing hypernym rules");
        assert_eq!(
            error.to_string(),
            "Configuration error: missing hypernym rules"
        );

        let error = TaxonomerError::query_compilation("unexpected ']'");
        assert_eq!(error.to_string(), "Query compilation error: unexpected ']'");

        let error = TaxonomerError::analysis("empty input");
        assert_eq!(error.to_string(), "Analysis error: empty input");
    }

    #[test]
    fn test_leaf_processing_wraps_source() {
        let error = TaxonomerError::leaf_processing(
            "ontology/Animals/Dogs",
            TaxonomerError::query_compilation("bad rule"),
        );
        let message = error.to_string();
        assert!(message.contains("ontology/Animals/Dogs"));
        assert!(message.contains("bad rule"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error = TaxonomerError::from(io_error);

        match error {
            TaxonomerError::Io(_) => {} // Expected
            _ => panic!("Expected IO error variant"),
        }
    }
}
