//! Enrichment of ontology leaf files with new example terms.
//!
//! For every query term of a leaf, ranked hyponyms and co-hyponyms are
//! collected and kept when their decay-weighted relevance to the leaf's
//! header path passes the configured threshold. Survivors are deduplicated
//! by surface form, sorted by rank score and capped.
//!
//! Leaf files are independent. [`OntologyExtensionEngine::extend_directory`]
//! processes them on a worker pool, writes each output atomically and records
//! per-file failures without stopping the batch.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use ahash::AHashMap;
use log::{debug, error, info, warn};
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use walkdir::WalkDir;

use crate::config::TaxonomerConfig;
use crate::error::{Result, TaxonomerError};
use crate::ontology::leaf::OntologyLeafFile;
use crate::ontology::relevance::{RelevanceFilter, relevance_to_header};
use crate::ontology::report::render_diagnostics;
use crate::taxonomy::reader::TaxonomyReader;
use crate::taxonomy::types::{ScoredMatch, TokenSequence};

/// Settings of the extension engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtensionOptions {
    pub lemmatize: bool,
    pub similarity_to_header_threshold: f64,
    pub max_examples_to_add_per_ontology_leaf: usize,
    pub include_original_leaf_examples: bool,
    pub query_by_header_terms_only: bool,
    pub manual_eval_output: bool,
}

impl Default for ExtensionOptions {
    fn default() -> Self {
        ExtensionOptions::from(&TaxonomerConfig::default())
    }
}

impl From<&TaxonomerConfig> for ExtensionOptions {
    fn from(config: &TaxonomerConfig) -> Self {
        ExtensionOptions {
            lemmatize: config.lemmatize,
            similarity_to_header_threshold: config.similarity_to_header_threshold,
            max_examples_to_add_per_ontology_leaf: config.max_examples_to_add_per_ontology_leaf,
            include_original_leaf_examples: config.include_original_leaf_examples,
            query_by_header_terms_only: config.query_by_header_terms_only,
            manual_eval_output: config.manual_eval_output,
        }
    }
}

/// A ranked candidate that passed the relevance filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeafCandidate {
    pub scored: ScoredMatch,
    pub relevance_to_header: f64,
}

impl LeafCandidate {
    /// Lowercased, space-joined result tokens.
    pub fn surface(&self) -> String {
        surface(&self.scored.result)
    }

    /// Whether the candidate came from a single-word query.
    pub fn from_single_word_query(&self) -> bool {
        self.scored.query.len() == 1
    }
}

/// Outcome of processing one leaf.
#[derive(Debug, Clone, PartialEq)]
pub struct LeafExtension {
    /// Every passing candidate, before deduplication
    pub candidates: Vec<LeafCandidate>,
    /// Deduplicated, sorted and capped candidates to append
    pub added: Vec<LeafCandidate>,
    /// Surfaces never added: query terms and existing examples
    pub excluded: Vec<String>,
}

/// Summary of a directory run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtensionReport {
    /// Leaf files written
    pub processed: usize,
    /// Leaf files that failed, with their error messages
    pub failed: Vec<(PathBuf, String)>,
}

impl ExtensionReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Extends ontology leaves using a taxonomy reader.
pub struct OntologyExtensionEngine {
    reader: Arc<TaxonomyReader>,
    options: ExtensionOptions,
    filter: RelevanceFilter,
    thread_pool: Arc<ThreadPool>,
}

impl OntologyExtensionEngine {
    /// Create an engine with a worker pool of `num_threads` threads.
    pub fn new(
        reader: Arc<TaxonomyReader>,
        options: ExtensionOptions,
        num_threads: usize,
    ) -> Result<Self> {
        let thread_pool = ThreadPoolBuilder::new()
            .num_threads(num_threads.max(1))
            .thread_name(|i| format!("ontology-leaf-{i}"))
            .build()
            .map_err(|e| TaxonomerError::internal(format!("Failed to create thread pool: {e}")))?;

        Ok(OntologyExtensionEngine {
            reader,
            filter: RelevanceFilter::new(options.similarity_to_header_threshold),
            options,
            thread_pool: Arc::new(thread_pool),
        })
    }

    pub fn options(&self) -> &ExtensionOptions {
        &self.options
    }

    /// Collect, filter, deduplicate and cap candidates for one leaf.
    pub fn process_leaf(&self, leaf: &OntologyLeafFile) -> Result<LeafExtension> {
        let max = self.options.max_examples_to_add_per_ontology_leaf;
        if max == 0 && !self.options.manual_eval_output {
            return Ok(LeafExtension {
                candidates: Vec::new(),
                added: Vec::new(),
                excluded: Vec::new(),
            });
        }

        let queries = self.query_terms(leaf)?;
        let mut candidates = Vec::new();
        for query in &queries {
            if query.is_empty() {
                continue;
            }
            let mut ranked = self.reader.get_ranked_hyponyms(query, self.options.lemmatize)?;
            ranked.extend(self.reader.get_ranked_cohyponyms(query, self.options.lemmatize)?);

            for scored in ranked {
                let relevance =
                    relevance_to_header(self.reader.scorer(), &scored.result, leaf.header_path());
                if self.filter.passes(relevance) {
                    candidates.push(LeafCandidate {
                        scored,
                        relevance_to_header: relevance,
                    });
                } else {
                    debug!(
                        "Rejected '{}' (relevance {relevance:.4})",
                        scored.result.join(" ")
                    );
                }
            }
        }

        let mut excluded: Vec<String> = queries.iter().map(|q| surface(q)).collect();
        excluded.extend(leaf.example_terms()?.iter().map(|e| surface(e)));

        let added = select_candidates(candidates.iter(), &excluded, max);
        Ok(LeafExtension {
            candidates,
            added,
            excluded,
        })
    }

    /// Header terms, plus existing examples unless querying by header only.
    pub fn query_terms(&self, leaf: &OntologyLeafFile) -> Result<Vec<TokenSequence>> {
        let mut terms = leaf.header_terms();
        if !self.options.query_by_header_terms_only {
            for example in leaf.example_terms()? {
                if !terms.contains(&example) {
                    terms.push(example);
                }
            }
        }
        Ok(terms)
    }

    /// Render the output text for one leaf.
    pub fn render_leaf(&self, leaf: &OntologyLeafFile) -> Result<String> {
        let extension = self.process_leaf(leaf)?;

        if self.options.manual_eval_output {
            return Ok(render_diagnostics(&extension.candidates, &extension.excluded));
        }

        let added: Vec<String> = extension.added.iter().map(LeafCandidate::surface).collect();
        Ok(leaf.render(self.options.include_original_leaf_examples, &added))
    }

    /// Extend one leaf file into `output`.
    pub fn extend_file(&self, input: &Path, output: &Path) -> Result<()> {
        let run = || -> Result<()> {
            let leaf = OntologyLeafFile::read(input)?;
            let content = self.render_leaf(&leaf)?;
            write_atomic(output, &content)
        };
        run().map_err(|e| TaxonomerError::leaf_processing(input, e))
    }

    /// Extend every leaf file below `input_dir` into the same relative paths
    /// below `output_dir`.
    pub fn extend_directory(&self, input_dir: &Path, output_dir: &Path) -> Result<ExtensionReport> {
        if !input_dir.is_dir() {
            return Err(TaxonomerError::configuration(format!(
                "Ontology directory '{}' does not exist",
                input_dir.display()
            )));
        }

        let mut report = ExtensionReport::default();
        let mut files: Vec<PathBuf> = Vec::new();
        for entry in WalkDir::new(input_dir).follow_links(false) {
            match entry {
                Ok(entry) => {
                    if entry.file_type().is_file() && !entry.path().starts_with(output_dir) {
                        files.push(entry.into_path());
                    }
                }
                Err(e) => {
                    let path = e
                        .path()
                        .map(Path::to_path_buf)
                        .unwrap_or_else(|| input_dir.to_path_buf());
                    error!("Cannot read ontology entry '{}': {e}", path.display());
                    report.failed.push((path, e.to_string()));
                }
            }
        }
        files.sort();

        if files.is_empty() {
            warn!("No leaf files found in {}", input_dir.display());
        }
        info!(
            "Extending {} leaf files from {} into {}",
            files.len(),
            input_dir.display(),
            output_dir.display()
        );

        let outcomes: Vec<(PathBuf, Result<()>)> = self.thread_pool.install(|| {
            files
                .par_iter()
                .map(|input| {
                    let outcome = input
                        .strip_prefix(input_dir)
                        .map_err(|e| TaxonomerError::internal(e.to_string()))
                        .and_then(|relative| self.extend_file(input, &output_dir.join(relative)));
                    (input.clone(), outcome)
                })
                .collect()
        });

        for (path, outcome) in outcomes {
            match outcome {
                Ok(()) => {
                    info!("Extended {}", path.display());
                    report.processed += 1;
                }
                Err(e) => {
                    error!("{e}");
                    report.failed.push((path, e.to_string()));
                }
            }
        }

        info!(
            "Ontology extension finished: {} processed, {} failed",
            report.processed,
            report.failed.len()
        );
        Ok(report)
    }
}

/// Lowercased, space-joined form of a token sequence.
pub fn surface(tokens: &[String]) -> String {
    tokens
        .iter()
        .map(|t| t.to_lowercase())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Drop excluded surfaces, keep the best-scoring candidate per surface, sort
/// by descending rank score and truncate.
pub fn select_candidates<'a, I>(candidates: I, excluded: &[String], max: usize) -> Vec<LeafCandidate>
where
    I: IntoIterator<Item = &'a LeafCandidate>,
{
    let mut best: Vec<LeafCandidate> = Vec::new();
    let mut index: AHashMap<String, usize> = AHashMap::new();

    for candidate in candidates {
        let key = candidate.surface();
        if key.is_empty() || excluded.contains(&key) {
            continue;
        }
        match index.get(&key) {
            Some(&i) => {
                if candidate.scored.score > best[i].scored.score {
                    best[i] = candidate.clone();
                }
            }
            None => {
                index.insert(key, best.len());
                best.push(candidate.clone());
            }
        }
    }

    best.sort_by(|a, b| b.scored.score.total_cmp(&a.scored.score));
    best.truncate(max);
    best
}

/// Write a file through a hidden, uniquely named sibling and rename it into place.
pub fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let parent = path
        .parent()
        .ok_or_else(|| TaxonomerError::invalid_argument(format!("Invalid output path '{}'", path.display())))?;
    fs::create_dir_all(parent)?;

    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| TaxonomerError::invalid_argument(format!("Invalid output path '{}'", path.display())))?;
    let tmp_path = parent.join(format!(".{file_name}.taxonomer.tmp.{}", Uuid::new_v4().simple()));

    let written = fs::OpenOptions::new()
        .create_new(true)
        .write(true)
        .open(&tmp_path)
        .and_then(|mut tmp| {
            tmp.write_all(content.as_bytes())?;
            tmp.sync_all()
        })
        .and_then(|()| fs::rename(&tmp_path, path));
    if let Err(e) = written {
        let _ = fs::remove_file(&tmp_path);
        return Err(e.into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(result: &str, query: &str, score: f64) -> LeafCandidate {
        LeafCandidate {
            scored: ScoredMatch {
                query: query.split(' ').map(String::from).collect(),
                result: result.split(' ').map(String::from).collect(),
                count: 1,
                similarity: 0.5,
                score,
                evidence: Vec::new(),
            },
            relevance_to_header: 1.0,
        }
    }

    #[test]
    fn test_select_candidates() {
        let candidates = vec![
            candidate("beagle", "dogs", 0.4),
            candidate("Poodle", "dogs", 0.7),
            candidate("dogs", "cats", 0.9),
            candidate("poodle", "cats", 0.8),
            candidate("siamese cat", "cats", 0.6),
        ];

        let selected = select_candidates(&candidates, &["dogs".to_string()], 2);
        let surfaces: Vec<_> = selected.iter().map(LeafCandidate::surface).collect();
        assert_eq!(surfaces, vec!["poodle", "siamese cat"]);
        assert_eq!(selected[0].scored.score, 0.8);

        assert!(select_candidates(&candidates, &[], 0).is_empty());
    }

    #[test]
    fn test_write_atomic() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("nested").join("Dogs");

        write_atomic(&path, "#Animals/Dogs\npoodle\n").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "#Animals/Dogs\npoodle\n");
        assert!(!dir.path().join("nested").join("Dogs.tmp").exists());

        write_atomic(&path, "#Animals/Dogs\n").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "#Animals/Dogs\n");
    }

    #[test]
    fn test_write_atomic_leaves_tmp_named_sibling_alone() {
        let dir = tempfile::TempDir::new().unwrap();
        let leaf = dir.path().join("Dogs");
        let sibling = dir.path().join("Dogs.tmp");

        write_atomic(&sibling, "#Animals/DogsTmp\n").unwrap();
        write_atomic(&leaf, "#Animals/Dogs\n").unwrap();

        assert_eq!(fs::read_to_string(&sibling).unwrap(), "#Animals/DogsTmp\n");
        assert_eq!(fs::read_to_string(&leaf).unwrap(), "#Animals/Dogs\n");
        let names: Vec<String> = fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names.len(), 2, "{names:?}");
    }

    #[test]
    fn test_surface() {
        assert_eq!(surface(&["Golden".to_string(), "Retriever".to_string()]), "golden retriever");
        assert!(candidate("poodle", "dogs", 0.1).from_single_word_query());
        assert!(!candidate("poodle", "guide dogs", 0.1).from_single_word_query());
    }
}
