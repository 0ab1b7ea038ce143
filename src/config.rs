//! Runtime configuration.
//!
//! Loaded from a JSON file; every field has a default, so a partial file is
//! valid. Command line flags override loaded values.
//!
//! ```
//! use taxonomer::config::TaxonomerConfig;
//!
//! let config: TaxonomerConfig =
//!     serde_json::from_str(r#"{ "max_examples_to_add_per_ontology_leaf": 3 }"#).unwrap();
//! assert_eq!(config.max_examples_to_add_per_ontology_leaf, 3);
//! assert!(config.include_original_leaf_examples);
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, TaxonomerError};
use crate::taxonomy::reader::DEFAULT_EVIDENCE_CAP;

/// Configuration for the taxonomy reader and the ontology extension engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaxonomerConfig {
    /// Word vector file (word2vec/GloVe text format)
    pub embeddings_path: Option<PathBuf>,
    /// Annotated corpus in vertical format
    pub corpus_path: Option<PathBuf>,
    /// Directory overriding the built-in rule templates
    pub rules_dir: Option<PathBuf>,
    /// Match query terms by lemma instead of normalized surface form
    pub lemmatize: bool,
    /// Minimum decay-weighted relevance for a candidate to enter a leaf
    pub similarity_to_header_threshold: f64,
    /// Maximum number of examples added to one leaf
    pub max_examples_to_add_per_ontology_leaf: usize,
    /// Keep the leaf's existing examples in the output
    pub include_original_leaf_examples: bool,
    /// Query only with header-derived terms, not with existing examples
    pub query_by_header_terms_only: bool,
    /// Write the diagnostic table instead of the enriched leaf
    pub manual_eval_output: bool,
    /// Evidence sentences kept per candidate
    pub evidence_display_cap: usize,
    /// Worker threads for ontology batches; number of CPUs when absent
    pub num_threads: Option<usize>,
}

impl Default for TaxonomerConfig {
    fn default() -> Self {
        TaxonomerConfig {
            embeddings_path: None,
            corpus_path: None,
            rules_dir: None,
            lemmatize: false,
            similarity_to_header_threshold: 0.5,
            max_examples_to_add_per_ontology_leaf: 10,
            include_original_leaf_examples: true,
            query_by_header_terms_only: true,
            manual_eval_output: false,
            evidence_display_cap: DEFAULT_EVIDENCE_CAP,
            num_threads: None,
        }
    }
}

impl TaxonomerConfig {
    /// Load and validate a JSON configuration file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            TaxonomerError::configuration(format!(
                "Cannot read configuration '{}': {e}",
                path.display()
            ))
        })?;
        let config: TaxonomerConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<()> {
        if !self.similarity_to_header_threshold.is_finite() {
            return Err(TaxonomerError::configuration(
                "similarity_to_header_threshold must be a finite number",
            ));
        }
        if self.num_threads == Some(0) {
            return Err(TaxonomerError::configuration(
                "num_threads must be at least 1",
            ));
        }
        Ok(())
    }

    /// Worker thread count.
    pub fn thread_count(&self) -> usize {
        self.num_threads.unwrap_or_else(num_cpus::get).max(1)
    }

    /// The embeddings path, required to build a scorer.
    pub fn require_embeddings_path(&self) -> Result<&Path> {
        self.embeddings_path
            .as_deref()
            .ok_or_else(|| TaxonomerError::configuration("No embeddings path configured"))
    }

    /// The corpus path, required to run queries.
    pub fn require_corpus_path(&self) -> Result<&Path> {
        self.corpus_path
            .as_deref()
            .ok_or_else(|| TaxonomerError::configuration("No corpus path configured"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_are_valid() {
        let config = TaxonomerConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.thread_count() >= 1);
        assert!(config.require_corpus_path().is_err());
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "lemmatize": true, "corpus_path": "corpus.vert", "num_threads": 2 }}"#
        )
        .unwrap();

        let config = TaxonomerConfig::load(file.path()).unwrap();
        assert!(config.lemmatize);
        assert_eq!(config.thread_count(), 2);
        assert_eq!(config.require_corpus_path().unwrap(), Path::new("corpus.vert"));
        assert_eq!(config.evidence_display_cap, DEFAULT_EVIDENCE_CAP);
    }

    #[test]
    fn test_validation_errors() {
        // relevance can be negative
        let config = TaxonomerConfig {
            similarity_to_header_threshold: -1.0,
            ..Default::default()
        };
        assert!(config.validate().is_ok());

        let config = TaxonomerConfig {
            similarity_to_header_threshold: f64::INFINITY,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(TaxonomerError::Configuration(_))));

        let config = TaxonomerConfig {
            num_threads: Some(0),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = TaxonomerConfig {
            similarity_to_header_threshold: f64::NAN,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        assert!(matches!(
            TaxonomerConfig::load("/nonexistent/taxonomer.json"),
            Err(TaxonomerError::Configuration(_))
        ));
    }
}
