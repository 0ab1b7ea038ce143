//! In-memory annotated corpus.

use std::path::Path;

use rayon::prelude::*;

use crate::corpus::client::{CorpusClient, QueryHit, RESULT_CAPTURE};
use crate::corpus::document::{AnnotatedToken, Document};
use crate::corpus::reader::VerticalReader;
use crate::error::Result;
use crate::query::CompiledQuery;

/// An annotated corpus held in memory.
///
/// Query execution scans documents in parallel; hits are returned in document
/// order and, within a sentence, from left to right.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    documents: Vec<Document>,
}

impl Corpus {
    /// Create a corpus from documents.
    pub fn from_documents(documents: Vec<Document>) -> Self {
        Corpus { documents }
    }

    /// Load a corpus from a vertical file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let documents = VerticalReader::read_file(path)?;
        let corpus = Corpus { documents };
        log::info!(
            "Loaded corpus '{}': {} documents, {} sentences",
            path.display(),
            corpus.document_count(),
            corpus.sentence_count()
        );
        Ok(corpus)
    }

    /// All documents.
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    /// Number of documents.
    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    /// Number of sentences across all documents.
    pub fn sentence_count(&self) -> usize {
        self.documents.iter().map(|d| d.sentences.len()).sum()
    }

    /// Iterate over every token in the corpus.
    pub fn tokens(&self) -> impl Iterator<Item = &AnnotatedToken> {
        self.documents
            .iter()
            .flat_map(|d| d.sentences.iter())
            .flat_map(|s| s.tokens.iter())
    }

    fn search_document(document: &Document, query: &CompiledQuery) -> Vec<QueryHit> {
        let mut hits = Vec::new();
        for sentence in &document.sentences {
            let matches = query.find_matches(&sentence.tokens);
            if matches.is_empty() {
                continue;
            }

            let text = sentence.text();
            for m in matches {
                let result = m
                    .capture(RESULT_CAPTURE)
                    .map(|c| sentence.norms(c.start, c.end));
                hits.push(QueryHit {
                    doc_id: document.id,
                    span: sentence.norms(m.start, m.end),
                    result,
                    sentence: text.clone(),
                });
            }
        }
        hits
    }
}

impl CorpusClient for Corpus {
    fn execute(&self, query: &CompiledQuery) -> Result<Vec<QueryHit>> {
        let hits: Vec<QueryHit> = self
            .documents
            .par_iter()
            .flat_map_iter(|document| Self::search_document(document, query))
            .collect();

        log::debug!("Query '{}' returned {} hits", query.source(), hits.len());
        Ok(hits)
    }

    fn name(&self) -> &str {
        "in-memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::document::Sentence;

    fn sample_corpus() -> Corpus {
        Corpus::from_documents(vec![
            Document::new(
                1,
                vec![
                    Sentence::from_tagged(
                        "Dogs/dog/NOUN such/such/ADJ as/as/ADP poodles/poodle/NOUN bark/bark/VERB",
                    ),
                    Sentence::from_tagged("Cats/cat/NOUN purr/purr/VERB"),
                ],
            ),
            Document::new(
                2,
                vec![Sentence::from_tagged(
                    "pets/pet/NOUN such/such/ADJ as/as/ADP golden/golden/ADJ retrievers/retriever/NOUN",
                )],
            ),
        ])
    }

    #[test]
    fn test_counts() {
        let corpus = sample_corpus();
        assert_eq!(corpus.document_count(), 2);
        assert_eq!(corpus.sentence_count(), 3);
        assert_eq!(corpus.tokens().count(), 12);
    }

    #[test]
    fn test_execute_with_result_capture() {
        let corpus = sample_corpus();
        let query = CompiledQuery::compile(
            r#"[] "such" "as" result:([pos="ADJ"]* [pos="NOUN"])"#,
        )
        .unwrap();

        let hits = corpus.execute(&query).unwrap();
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].doc_id, 1);
        assert_eq!(hits[0].result_tokens(), &["poodles".to_string()]);
        assert_eq!(hits[0].sentence, "Dogs such as poodles bark");
        assert_eq!(hits[1].doc_id, 2);
        assert_eq!(
            hits[1].result_tokens(),
            &["golden".to_string(), "retrievers".to_string()]
        );
    }

    #[test]
    fn test_execute_without_capture_uses_span() {
        let corpus = sample_corpus();
        let query = CompiledQuery::compile(r#"[lemma="cat"] [pos="VERB"]"#).unwrap();

        let hits = corpus.execute(&query).unwrap();
        assert_eq!(hits.len(), 1);
        assert!(hits[0].result.is_none());
        assert_eq!(hits[0].result_tokens(), &["cats".to_string(), "purr".to_string()]);
    }
}
