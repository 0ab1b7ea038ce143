//! Lemmatizers for query terms.
//!
//! A lemmatizer turns a short term into exactly one lemma per token, using the
//! same tokenization as [`UnicodeWordTokenizer`] followed by lowercasing. The
//! result feeds `[lemma="…"]` atoms in compiled queries, so it must agree with
//! the lemma annotation of the corpus as closely as possible.
//!
//! - [`rule::RuleLemmatizer`] - English inflection rules with irregular forms
//! - [`lexicon::LexiconLemmatizer`] - Form-to-lemma table harvested from the
//!   annotated corpus, falling back to the rules
//!
//! Implementations hold no per-call mutable state, so one instance can be
//! shared across ontology workers.

pub mod lexicon;
pub mod rule;

pub use lexicon::LexiconLemmatizer;
pub use rule::RuleLemmatizer;

use crate::analysis::token_filter::Filter;
use crate::analysis::token_filter::lowercase::LowercaseFilter;
use crate::analysis::tokenizer::Tokenizer;
use crate::analysis::tokenizer::unicode_word::UnicodeWordTokenizer;
use crate::error::Result;

/// Trait for components that map words to their dictionary form.
pub trait Lemmatizer: Send + Sync {
    /// Lemmatize one lowercased word.
    fn lemmatize_word(&self, word: &str) -> String;

    /// Tokenize, lowercase and lemmatize a term, one lemma per token.
    fn lemmatize(&self, text: &str) -> Result<Vec<String>> {
        Ok(normalize_term(text)?
            .iter()
            .map(|word| self.lemmatize_word(word))
            .collect())
    }

    /// Get the name of this lemmatizer.
    fn name(&self) -> &'static str;
}

/// Tokenize and lowercase a term without lemmatizing it.
///
/// ```
/// use taxonomer::analysis::lemmatizer::normalize_term;
///
/// let words = normalize_term("Golden Retriever").unwrap();
/// assert_eq!(words, vec!["golden", "retriever"]);
/// ```
pub fn normalize_term(text: &str) -> Result<Vec<String>> {
    let tokens = UnicodeWordTokenizer::new().tokenize(text)?;
    let lowered = LowercaseFilter::new().filter(tokens)?;
    Ok(lowered.map(|token| token.text).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_term_strips_punctuation() {
        let words = normalize_term("  Hot-Dog, STANDS ").unwrap();
        assert_eq!(words, vec!["hot", "dog", "stands"]);
    }

    #[test]
    fn test_one_lemma_per_token() {
        let lemmatizer = RuleLemmatizer::new();
        let lemmas = lemmatizer.lemmatize("Guide Dogs for Children").unwrap();
        assert_eq!(lemmas, vec!["guide", "dog", "for", "child"]);
    }

    #[test]
    fn test_empty_input() {
        let lemmatizer = RuleLemmatizer::new();
        assert!(lemmatizer.lemmatize("  ,, ").unwrap().is_empty());
    }
}
