//! Taxonomy reader: extraction, consolidation and ranking of relations.

use std::sync::Arc;

use log::{debug, info, warn};

use crate::analysis::lemmatizer::{Lemmatizer, normalize_term};
use crate::corpus::client::CorpusClient;
use crate::error::{Result, TaxonomerError};
use crate::query::{CompiledQuery, PatternCompiler, RelationKind, RuleSet};
use crate::taxonomy::consolidator::{MatchConsolidator, consolidate};
use crate::taxonomy::scorer::SimilarityScorer;
use crate::taxonomy::types::{RawMatch, ScoredMatch, TokenSequence};

/// Default number of evidence sentences kept per candidate.
pub const DEFAULT_EVIDENCE_CAP: usize = 5;

/// Answers "ranked hypernyms / hyponyms / co-hyponyms of X" over a corpus.
///
/// Input terms are normalized first: lemmatized when `lemmatize` is set,
/// otherwise tokenized and lowercased. The normalized tokens are what the
/// compiled queries look for and what candidates are ranked against.
pub struct TaxonomyReader {
    compiler: PatternCompiler,
    corpus: Arc<dyn CorpusClient>,
    lemmatizer: Arc<dyn Lemmatizer>,
    scorer: Arc<SimilarityScorer>,
    evidence_cap: usize,
}

impl TaxonomyReader {
    /// Create a reader using the built-in rule templates.
    pub fn new(
        corpus: Arc<dyn CorpusClient>,
        lemmatizer: Arc<dyn Lemmatizer>,
        scorer: Arc<SimilarityScorer>,
    ) -> Self {
        TaxonomyReader {
            compiler: PatternCompiler::default(),
            corpus,
            lemmatizer,
            scorer,
            evidence_cap: DEFAULT_EVIDENCE_CAP,
        }
    }

    /// Use another rule set.
    pub fn with_rules(mut self, rules: RuleSet) -> Self {
        self.compiler = PatternCompiler::new(rules);
        self
    }

    /// Set how many evidence sentences are kept per candidate.
    pub fn with_evidence_cap(mut self, evidence_cap: usize) -> Self {
        self.evidence_cap = evidence_cap;
        self
    }

    /// The scorer used for ranking.
    pub fn scorer(&self) -> &Arc<SimilarityScorer> {
        &self.scorer
    }

    /// Normalize a caller's term into query tokens.
    pub fn normalize(&self, tokens: &[String], lemmatize: bool) -> Result<TokenSequence> {
        let text = tokens.join(" ");
        let normalized = if lemmatize {
            self.lemmatizer.lemmatize(&text)?
        } else {
            normalize_term(&text)?
        };

        if normalized.is_empty() {
            return Err(TaxonomerError::invalid_argument(format!(
                "Term '{text}' contains no words"
            )));
        }
        Ok(normalized)
    }

    /// Ranked hypernyms of a term.
    pub fn get_ranked_hypernyms(&self, tokens: &[String], lemmatize: bool) -> Result<Vec<ScoredMatch>> {
        self.get_ranked(RelationKind::Hypernym, tokens, lemmatize)
    }

    /// Ranked hyponyms of a term.
    pub fn get_ranked_hyponyms(&self, tokens: &[String], lemmatize: bool) -> Result<Vec<ScoredMatch>> {
        self.get_ranked(RelationKind::Hyponym, tokens, lemmatize)
    }

    /// Ranked co-hyponyms of a term.
    pub fn get_ranked_cohyponyms(&self, tokens: &[String], lemmatize: bool) -> Result<Vec<ScoredMatch>> {
        self.get_ranked(RelationKind::Cohyponym, tokens, lemmatize)
    }

    /// Ranked candidates of any relation kind.
    pub fn get_ranked(
        &self,
        kind: RelationKind,
        tokens: &[String],
        lemmatize: bool,
    ) -> Result<Vec<ScoredMatch>> {
        let query = self.normalize(tokens, lemmatize)?;
        self.rank_relation(kind, &query, lemmatize)
    }

    /// Run caller-supplied rule text instead of a built-in template.
    pub fn execute_given_rules(
        &self,
        tokens: &[String],
        rule_text: &str,
        lemmatize: bool,
    ) -> Result<Vec<ScoredMatch>> {
        let query = self.normalize(tokens, lemmatize)?;
        let queries = self.compiler.compile_rules(rule_text, &query, lemmatize)?;
        self.run(&query, &queries)
    }

    /// Hypernyms broadened through co-hyponyms and head words.
    ///
    /// The term and its top `n` co-hyponyms are each queried for hypernyms and
    /// the counts summed per result. Every accumulated result then also
    /// contributes its count to its head, and the head of the term is added
    /// once. Everything is re-ranked against the term.
    ///
    /// The head of a token sequence is its last token. This is an
    /// approximation of the syntactic head.
    pub fn get_expanded_hypernyms(
        &self,
        pattern: &[String],
        n: usize,
        lemmatize: bool,
    ) -> Result<Vec<ScoredMatch>> {
        let query = self.normalize(pattern, lemmatize)?;

        let mut seeds = vec![query.clone()];
        for cohyponym in self
            .rank_relation(RelationKind::Cohyponym, &query, lemmatize)?
            .into_iter()
            .take(n)
        {
            let seed = match self.normalize(&cohyponym.result, lemmatize) {
                Ok(seed) => seed,
                Err(e) => {
                    warn!("Skipping co-hyponym seed '{}': {e}", cohyponym.result_text());
                    continue;
                }
            };
            if !seeds.contains(&seed) {
                seeds.push(seed);
            }
        }
        debug!("Expanding hypernyms of '{}' through {} seeds", query.join(" "), seeds.len());

        let mut accumulated = seeds.iter().try_fold(
            MatchConsolidator::new(0),
            |mut acc, seed| -> Result<MatchConsolidator> {
                for m in self.rank_relation(RelationKind::Hypernym, seed, lemmatize)? {
                    acc.add_count(m.result, m.count);
                }
                Ok(acc)
            },
        )?;

        let snapshot: Vec<(TokenSequence, usize)> = accumulated
            .results()
            .map(|r| (r.clone(), accumulated.count_of(r)))
            .collect();
        for (result, count) in snapshot {
            if let Some(head) = result.last() {
                accumulated.add_count(vec![head.clone()], count);
            }
        }
        if let Some(head) = query.last() {
            accumulated.add_count(vec![head.clone()], 1);
        }

        let ranked = self.scorer.rank(&query, &accumulated.into_matches());
        info!(
            "Expanded hypernyms of '{}': {} candidates",
            query.join(" "),
            ranked.len()
        );
        Ok(ranked)
    }

    fn rank_relation(
        &self,
        kind: RelationKind,
        query: &[String],
        lemmatize: bool,
    ) -> Result<Vec<ScoredMatch>> {
        let queries = self.compiler.compile(query, kind, lemmatize)?;
        let ranked = self.run(query, &queries)?;
        debug!(
            "{kind} candidates of '{}': {}",
            query.join(" "),
            ranked.len()
        );
        Ok(ranked)
    }

    fn run(&self, query: &[String], queries: &[CompiledQuery]) -> Result<Vec<ScoredMatch>> {
        let mut raw = Vec::new();
        for compiled in queries {
            raw.extend(
                self.corpus
                    .execute(compiled)?
                    .into_iter()
                    .map(RawMatch::from),
            );
        }

        let consolidated = consolidate(raw, self.evidence_cap);
        Ok(self.scorer.rank(query, &consolidated))
    }
}
