//! Reader for the "vertical" annotated corpus format.
//!
//! ```text
//! <doc id="17">
//! Dogs	dog	NOUN
//! such	such	ADJ
//! as	as	ADP
//! poodles	poodle	NOUN
//!
//! Next	next	ADJ
//! ...
//! </doc>
//! ```
//!
//! One token per line as `word<TAB>lemma<TAB>pos[<TAB>norm]`; a blank line ends
//! a sentence, `</doc>` ends a document. Documents without an `id` attribute
//! are numbered sequentially. Tokens outside any `<doc>` block belong to an
//! implicit document.

use std::fs;
use std::path::Path;

use lazy_static::lazy_static;
use regex::Regex;

use crate::corpus::document::{AnnotatedToken, Document, Sentence};
use crate::error::{Result, TaxonomerError};

lazy_static! {
    static ref DOC_ID: Regex = Regex::new(r#"\bid\s*=\s*"?(\d+)"?"#).unwrap();
}

/// Parser for vertical corpus files.
#[derive(Debug, Default)]
pub struct VerticalReader {
    documents: Vec<Document>,
    sentences: Vec<Sentence>,
    tokens: Vec<AnnotatedToken>,
    current_id: Option<u64>,
    next_id: u64,
}

impl VerticalReader {
    /// Create a new reader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read and parse a corpus file.
    pub fn read_file<P: AsRef<Path>>(path: P) -> Result<Vec<Document>> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            TaxonomerError::corpus(format!(
                "Failed to read corpus file '{}': {e}",
                path.display()
            ))
        })?;
        Self::new().parse(&content)
    }

    /// Parse corpus text.
    pub fn parse(mut self, content: &str) -> Result<Vec<Document>> {
        for (line_num, line) in content.lines().enumerate() {
            let trimmed = line.trim();

            if trimmed.is_empty() {
                self.end_sentence();
            } else if trimmed.starts_with("<doc") {
                self.end_document();
                let id = match DOC_ID.captures(trimmed) {
                    Some(caps) => caps[1].parse::<u64>().map_err(|e| {
                        TaxonomerError::corpus(format!(
                            "Invalid document id on line {}: {e}",
                            line_num + 1
                        ))
                    })?,
                    None => self.next_id,
                };
                self.current_id = Some(id);
            } else if trimmed.starts_with("</doc") {
                self.end_document();
            } else if trimmed.starts_with('<') && trimmed.ends_with('>') {
                // Other structural markup (<s>, <p>) only delimits sentences.
                self.end_sentence();
            } else {
                self.tokens.push(Self::parse_token(line, line_num + 1)?);
            }
        }
        self.end_document();

        Ok(self.documents)
    }

    fn parse_token(line: &str, line_num: usize) -> Result<AnnotatedToken> {
        let columns: Vec<&str> = line.split('\t').map(|c| c.trim()).collect();
        match columns.as_slice() {
            [word, lemma, pos] => Ok(AnnotatedToken::new(*word, *lemma, *pos)),
            [word, lemma, pos, norm, ..] => {
                Ok(AnnotatedToken::new(*word, *lemma, *pos).with_norm(*norm))
            }
            _ => Err(TaxonomerError::corpus(format!(
                "Expected at least 3 tab-separated columns on line {line_num}, found {}",
                columns.len()
            ))),
        }
    }

    fn end_sentence(&mut self) {
        if !self.tokens.is_empty() {
            let tokens = std::mem::take(&mut self.tokens);
            self.sentences.push(Sentence::new(tokens));
        }
    }

    fn end_document(&mut self) {
        self.end_sentence();
        if self.sentences.is_empty() {
            self.current_id = None;
            return;
        }

        let id = self.current_id.take().unwrap_or(self.next_id);
        self.next_id = self.next_id.max(id + 1);
        let sentences = std::mem::take(&mut self.sentences);
        self.documents.push(Document::new(id, sentences));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "<doc id=\"7\">\n\
        Dogs\tdog\tNOUN\n\
        such\tsuch\tADJ\n\
        as\tas\tADP\n\
        poodles\tpoodle\tNOUN\n\
        \n\
        Cats\tcat\tNOUN\n\
        purr\tpurr\tVERB\n\
        </doc>\n\
        <doc>\n\
        U.S.\tU.S.\tPROPN\tus\n\
        </doc>\n";

    #[test]
    fn test_parse_documents_and_sentences() {
        let documents = VerticalReader::new().parse(SAMPLE).unwrap();

        assert_eq!(documents.len(), 2);
        assert_eq!(documents[0].id, 7);
        assert_eq!(documents[0].sentences.len(), 2);
        assert_eq!(documents[0].sentences[0].text(), "Dogs such as poodles");
        assert_eq!(documents[0].sentences[0].tokens[0].norm, "dogs");
    }

    #[test]
    fn test_missing_id_is_sequential() {
        let documents = VerticalReader::new().parse(SAMPLE).unwrap();
        assert_eq!(documents[1].id, 8);
        assert_eq!(documents[1].sentences[0].tokens[0].norm, "us");
    }

    #[test]
    fn test_tokens_without_doc_block() {
        let documents = VerticalReader::new()
            .parse("a\ta\tDET\ndog\tdog\tNOUN\n")
            .unwrap();
        assert_eq!(documents.len(), 1);
        assert_eq!(documents[0].id, 0);
        assert_eq!(documents[0].sentences[0].len(), 2);
    }

    #[test]
    fn test_malformed_line() {
        let result = VerticalReader::new().parse("dog\tdog\n");
        assert!(matches!(result, Err(TaxonomerError::Corpus(_))));
    }
}
