//! Lexicon-backed lemmatizer.
//!
//! The annotated corpus already carries a lemma for every token. Harvesting
//! those pairs gives query lemmas that agree with the corpus annotation, which
//! is what `[lemma="…"]` atoms are matched against. Unknown forms fall back to
//! [`RuleLemmatizer`].

use ahash::AHashMap;

use super::{Lemmatizer, RuleLemmatizer};
use crate::corpus::Corpus;

/// Form-to-lemma lookup with rule-based fallback.
#[derive(Debug, Clone, Default)]
pub struct LexiconLemmatizer {
    lexicon: AHashMap<String, String>,
    fallback: RuleLemmatizer,
}

impl LexiconLemmatizer {
    /// Create a lemmatizer from explicit `(form, lemma)` pairs.
    pub fn from_pairs<I, F, L>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (F, L)>,
        F: Into<String>,
        L: Into<String>,
    {
        let lexicon = pairs
            .into_iter()
            .map(|(form, lemma)| (form.into().to_lowercase(), lemma.into()))
            .collect();
        LexiconLemmatizer {
            lexicon,
            fallback: RuleLemmatizer::new(),
        }
    }

    /// Harvest the most frequent lemma for every lowercased form in the corpus.
    ///
    /// Ties are broken by the lexicographically smallest lemma so the lexicon
    /// does not depend on corpus iteration order.
    pub fn from_corpus(corpus: &Corpus) -> Self {
        let mut counts: AHashMap<(String, String), usize> = AHashMap::new();
        for token in corpus.tokens() {
            *counts
                .entry((token.norm.clone(), token.lemma.clone()))
                .or_insert(0) += 1;
        }

        let mut best: AHashMap<String, (String, usize)> = AHashMap::new();
        for ((form, lemma), count) in counts {
            match best.get_mut(&form) {
                Some((current, current_count)) => {
                    if count > *current_count || (count == *current_count && lemma < *current) {
                        *current = lemma;
                        *current_count = count;
                    }
                }
                None => {
                    best.insert(form, (lemma, count));
                }
            }
        }

        log::debug!("Harvested {} lemma entries from corpus", best.len());

        LexiconLemmatizer {
            lexicon: best
                .into_iter()
                .map(|(form, (lemma, _))| (form, lemma))
                .collect(),
            fallback: RuleLemmatizer::new(),
        }
    }

    /// Number of forms in the lexicon.
    pub fn len(&self) -> usize {
        self.lexicon.len()
    }

    /// Whether the lexicon is empty.
    pub fn is_empty(&self) -> bool {
        self.lexicon.is_empty()
    }
}

impl Lemmatizer for LexiconLemmatizer {
    fn lemmatize_word(&self, word: &str) -> String {
        match self.lexicon.get(word) {
            Some(lemma) => lemma.clone(),
            None => self.fallback.lemmatize_word(word),
        }
    }

    fn name(&self) -> &'static str {
        "lexicon"
    }
}
