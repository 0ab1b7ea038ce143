//! Documents, sentences and annotated tokens.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TaxonomerError};

/// Token attributes a query atom can test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenAttribute {
    /// Surface form as it appears in the text
    Word,
    /// Normalized (lowercased) surface form
    Norm,
    /// Dictionary form
    Lemma,
    /// Part-of-speech tag
    Pos,
}

impl TokenAttribute {
    /// Attribute name as written in query patterns.
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenAttribute::Word => "word",
            TokenAttribute::Norm => "norm",
            TokenAttribute::Lemma => "lemma",
            TokenAttribute::Pos => "pos",
        }
    }
}

impl fmt::Display for TokenAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TokenAttribute {
    type Err = TaxonomerError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "word" => Ok(TokenAttribute::Word),
            "norm" => Ok(TokenAttribute::Norm),
            "lemma" => Ok(TokenAttribute::Lemma),
            "pos" | "tag" => Ok(TokenAttribute::Pos),
            other => Err(TaxonomerError::query_compilation(format!(
                "Unknown token attribute '{other}'"
            ))),
        }
    }
}

/// A corpus token with its linguistic annotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotatedToken {
    pub word: String,
    pub norm: String,
    pub lemma: String,
    pub pos: String,
}

impl AnnotatedToken {
    /// Create a token whose `norm` is the lowercased word.
    pub fn new<W: Into<String>, L: Into<String>, P: Into<String>>(word: W, lemma: L, pos: P) -> Self {
        let word = word.into();
        AnnotatedToken {
            norm: word.to_lowercase(),
            word,
            lemma: lemma.into(),
            pos: pos.into(),
        }
    }

    /// Override the normalized form.
    pub fn with_norm<N: Into<String>>(mut self, norm: N) -> Self {
        self.norm = norm.into();
        self
    }

    /// Get the value of an attribute.
    pub fn attribute(&self, attribute: TokenAttribute) -> &str {
        match attribute {
            TokenAttribute::Word => &self.word,
            TokenAttribute::Norm => &self.norm,
            TokenAttribute::Lemma => &self.lemma,
            TokenAttribute::Pos => &self.pos,
        }
    }
}

/// A tokenized sentence.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Sentence {
    pub tokens: Vec<AnnotatedToken>,
}

impl Sentence {
    /// Create a sentence from annotated tokens.
    pub fn new(tokens: Vec<AnnotatedToken>) -> Self {
        Sentence { tokens }
    }

    /// Build a sentence from whitespace-separated `word/lemma/POS` triples.
    ///
    /// Missing fields default to the lowercased word and the tag `X`.
    ///
    /// ```
    /// use taxonomer::corpus::Sentence;
    ///
    /// let sentence = Sentence::from_tagged("Dogs/dog/NOUN bark/bark/VERB");
    /// assert_eq!(sentence.tokens[0].lemma, "dog");
    /// assert_eq!(sentence.text(), "Dogs bark");
    /// ```
    pub fn from_tagged(tagged: &str) -> Self {
        let tokens = tagged
            .split_whitespace()
            .map(|triple| {
                let mut parts = triple.rsplitn(3, '/').collect::<Vec<_>>();
                parts.reverse();
                match parts.as_slice() {
                    [word, lemma, pos] if !word.is_empty() => {
                        AnnotatedToken::new(*word, *lemma, *pos)
                    }
                    _ => AnnotatedToken::new(triple, triple.to_lowercase(), "X"),
                }
            })
            .collect();
        Sentence { tokens }
    }

    /// Sentence text, tokens joined by single spaces.
    pub fn text(&self) -> String {
        self.tokens
            .iter()
            .map(|t| t.word.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Normalized forms of the tokens in `start..end`.
    pub fn norms(&self, start: usize, end: usize) -> Vec<String> {
        self.tokens[start..end]
            .iter()
            .map(|t| t.norm.clone())
            .collect()
    }

    /// Number of tokens.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Whether the sentence has no tokens.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// A corpus document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: u64,
    pub sentences: Vec<Sentence>,
}

impl Document {
    /// Create a document.
    pub fn new(id: u64, sentences: Vec<Sentence>) -> Self {
        Document { id, sentences }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_parsing() {
        assert_eq!("lemma".parse::<TokenAttribute>().unwrap(), TokenAttribute::Lemma);
        assert_eq!("tag".parse::<TokenAttribute>().unwrap(), TokenAttribute::Pos);
        assert!("shape".parse::<TokenAttribute>().is_err());
    }

    #[test]
    fn test_from_tagged_defaults() {
        let sentence = Sentence::from_tagged("Poodles/poodle/NOUN ,");
        assert_eq!(sentence.len(), 2);
        assert_eq!(sentence.tokens[0].norm, "poodles");
        assert_eq!(sentence.tokens[1].lemma, ",");
        assert_eq!(sentence.tokens[1].pos, "X");
    }

    #[test]
    fn test_norms_slice() {
        let sentence = Sentence::from_tagged("Golden/golden/ADJ Retrievers/retriever/NOUN");
        assert_eq!(sentence.norms(0, 2), vec!["golden", "retrievers"]);
    }
}
