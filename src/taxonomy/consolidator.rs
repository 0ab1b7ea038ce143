//! Groups raw matches by their result tokens.

use ahash::AHashMap;

use crate::taxonomy::types::{ConsolidatedMatch, RawMatch, TokenSequence};

/// Running, insertion-ordered accumulator of consolidated matches.
///
/// Groups are keyed by exact, case-sensitive equality of result tokens and
/// keep the order in which each result was first seen. Every added match is
/// counted; only the first `evidence_cap` evidence values of a group are kept.
#[derive(Debug, Clone)]
pub struct MatchConsolidator {
    evidence_cap: usize,
    index: AHashMap<TokenSequence, usize>,
    matches: Vec<ConsolidatedMatch>,
}

impl MatchConsolidator {
    /// Create an empty consolidator.
    pub fn new(evidence_cap: usize) -> Self {
        MatchConsolidator {
            evidence_cap,
            index: AHashMap::new(),
            matches: Vec::new(),
        }
    }

    /// Add one raw match.
    pub fn add(&mut self, raw: RawMatch) {
        let cap = self.evidence_cap;
        let entry = self.entry(raw.result_tokens);
        entry.count += 1;
        if entry.evidence.len() < cap {
            entry.evidence.push(raw.evidence);
        }
    }

    /// Add `count` occurrences of a result with no evidence.
    pub fn add_count(&mut self, result_tokens: TokenSequence, count: usize) {
        if count == 0 {
            return;
        }
        self.entry(result_tokens).count += count;
    }

    /// Merge an already consolidated match, summing counts.
    pub fn merge(&mut self, other: ConsolidatedMatch) {
        if other.count == 0 {
            return;
        }
        let cap = self.evidence_cap;
        let entry = self.entry(other.result_tokens);
        entry.count += other.count;
        let room = cap.saturating_sub(entry.evidence.len());
        entry.evidence.extend(other.evidence.into_iter().take(room));
    }

    fn entry(&mut self, result_tokens: TokenSequence) -> &mut ConsolidatedMatch {
        let position = match self.index.get(&result_tokens) {
            Some(&position) => position,
            None => {
                let position = self.matches.len();
                self.index.insert(result_tokens.clone(), position);
                self.matches.push(ConsolidatedMatch::counted(result_tokens, 0));
                position
            }
        };
        &mut self.matches[position]
    }

    /// Distinct result token sequences, in first-seen order.
    pub fn results(&self) -> impl Iterator<Item = &TokenSequence> {
        self.matches.iter().map(|m| &m.result_tokens)
    }

    /// Count accumulated for a result.
    pub fn count_of(&self, result_tokens: &[String]) -> usize {
        self.index
            .get(result_tokens)
            .map(|&i| self.matches[i].count)
            .unwrap_or(0)
    }

    /// Number of distinct results.
    pub fn len(&self) -> usize {
        self.matches.len()
    }

    /// Whether nothing has been added.
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// Finish, returning the groups in first-seen order.
    pub fn into_matches(self) -> Vec<ConsolidatedMatch> {
        self.matches
    }
}

/// Consolidate a batch of raw matches.
pub fn consolidate<I>(raw_matches: I, evidence_cap: usize) -> Vec<ConsolidatedMatch>
where
    I: IntoIterator<Item = RawMatch>,
{
    let mut consolidator = MatchConsolidator::new(evidence_cap);
    for raw in raw_matches {
        consolidator.add(raw);
    }
    consolidator.into_matches()
}
