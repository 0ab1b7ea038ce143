//! Parser for the token-sequence pattern language.
//!
//! Supported syntax:
//! - Token atoms: `[lemma="dog"]`, `[pos="NOUN|PROPN" & norm!="other"]`, `[]`
//! - Bare strings as shorthand for `[norm="…"]`: `"such" "as"`
//! - Groups and alternation: `("and" | "or")`
//! - Quantifiers: `?`, `*`, `+`, `{n}`, `{n,}`, `{n,m}`
//! - Named captures: `result:[pos="NOUN"]`, `result:([pos="ADJ"]* [pos="NOUN"])`
//!
//! Attribute values are regular expressions anchored at both ends. Inside a
//! quoted value `\"` stands for a quote; every other backslash sequence is
//! handed to the regex engine unchanged.

use std::iter::Peekable;
use std::str::CharIndices;

use regex::Regex;

use crate::corpus::document::TokenAttribute;
use crate::error::{Result, TaxonomerError};
use crate::query::pattern::{AttributeClause, PatternNode, TokenCondition};

/// Attribute tested by bare string atoms.
pub const DEFAULT_ATTRIBUTE: TokenAttribute = TokenAttribute::Norm;

/// Parse a pattern string into a [`PatternNode`] tree.
///
/// ```
/// use taxonomer::query::parser::parse_pattern;
///
/// let pattern = parse_pattern(r#"[lemma="dog"] "such" "as" result:[pos="NOUN"]+"#).unwrap();
/// assert!(pattern.has_capture("result"));
/// ```
pub fn parse_pattern(pattern: &str) -> Result<PatternNode> {
    let mut parser = PatternParser::new(pattern);
    let node = parser.parse_alternation()?;
    parser.skip_whitespace();
    match parser.chars.peek().copied() {
        None => Ok(node),
        Some((pos, c)) => Err(parser.error(pos, &format!("unexpected '{c}'"))),
    }
}

/// Internal recursive-descent parser.
struct PatternParser<'a> {
    source: &'a str,
    chars: Peekable<CharIndices<'a>>,
}

impl<'a> PatternParser<'a> {
    fn new(source: &'a str) -> Self {
        PatternParser {
            source,
            chars: source.char_indices().peekable(),
        }
    }

    fn error(&self, pos: usize, message: &str) -> TaxonomerError {
        TaxonomerError::query_compilation(format!(
            "{message} at offset {pos} in pattern '{}'",
            self.source.trim()
        ))
    }

    fn end_error(&self, message: &str) -> TaxonomerError {
        self.error(self.source.len(), message)
    }

    fn skip_whitespace(&mut self) {
        while let Some(&(_, c)) = self.chars.peek() {
            if c.is_whitespace() {
                self.chars.next();
            } else {
                break;
            }
        }
    }

    fn peek_char(&mut self) -> Option<char> {
        self.skip_whitespace();
        self.chars.peek().map(|&(_, c)| c)
    }

    fn expect(&mut self, expected: char) -> Result<()> {
        self.skip_whitespace();
        match self.chars.next() {
            Some((_, c)) if c == expected => Ok(()),
            Some((pos, c)) => Err(self.error(pos, &format!("expected '{expected}', found '{c}'"))),
            None => Err(self.end_error(&format!("expected '{expected}'"))),
        }
    }

    fn parse_alternation(&mut self) -> Result<PatternNode> {
        let mut branches = vec![self.parse_sequence()?];
        while self.peek_char() == Some('|') {
            self.chars.next();
            branches.push(self.parse_sequence()?);
        }

        if branches.len() == 1 {
            Ok(branches.remove(0))
        } else {
            Ok(PatternNode::Alternation(branches))
        }
    }

    fn parse_sequence(&mut self) -> Result<PatternNode> {
        let mut items = Vec::new();
        while let Some(c) = self.peek_char() {
            if c == ')' || c == '|' {
                break;
            }
            items.push(self.parse_item()?);
        }

        match items.len() {
            0 => {
                let pos = self
                    .chars
                    .peek()
                    .map(|&(p, _)| p)
                    .unwrap_or(self.source.len());
                Err(self.error(pos, "empty pattern"))
            }
            1 => Ok(items.remove(0)),
            _ => Ok(PatternNode::Sequence(items)),
        }
    }

    fn parse_item(&mut self) -> Result<PatternNode> {
        let label = match self.peek_char() {
            Some(c) if c.is_alphabetic() || c == '_' => {
                let label = self.parse_identifier();
                self.expect(':')?;
                Some(label)
            }
            _ => None,
        };

        let mut node = self.parse_primary()?;
        node = self.parse_quantifiers(node)?;

        Ok(match label {
            Some(label) => PatternNode::Capture {
                label,
                node: Box::new(node),
            },
            None => node,
        })
    }

    fn parse_primary(&mut self) -> Result<PatternNode> {
        self.skip_whitespace();
        match self.chars.peek().copied() {
            Some((_, '[')) => {
                self.chars.next();
                let condition = self.parse_condition()?;
                self.expect(']')?;
                Ok(PatternNode::Token(condition))
            }
            Some((_, '(')) => {
                self.chars.next();
                let node = self.parse_alternation()?;
                self.expect(')')?;
                Ok(node)
            }
            Some((pos, '"')) => {
                let value = self.parse_string()?;
                let clause = self.build_clause(DEFAULT_ATTRIBUTE, &value, false, pos)?;
                Ok(PatternNode::Token(TokenCondition {
                    clauses: vec![clause],
                }))
            }
            Some((pos, c)) => Err(self.error(pos, &format!("unexpected '{c}'"))),
            None => Err(self.end_error("unexpected end of pattern")),
        }
    }

    fn parse_condition(&mut self) -> Result<TokenCondition> {
        let mut clauses = Vec::new();
        if self.peek_char() == Some(']') {
            return Ok(TokenCondition { clauses });
        }

        loop {
            self.skip_whitespace();
            let pos = self.chars.peek().map(|&(p, _)| p).unwrap_or(self.source.len());
            let name = self.parse_identifier();
            if name.is_empty() {
                return Err(self.error(pos, "expected attribute name"));
            }
            let attribute = name
                .parse::<TokenAttribute>()
                .map_err(|_| self.error(pos, &format!("unknown attribute '{name}'")))?;

            let negated = match self.peek_char() {
                Some('!') => {
                    self.chars.next();
                    self.expect('=')?;
                    true
                }
                Some('=') => {
                    self.chars.next();
                    false
                }
                _ => return Err(self.error(pos, "expected '=' or '!='")),
            };

            self.skip_whitespace();
            let value = self.parse_string()?;
            clauses.push(self.build_clause(attribute, &value, negated, pos)?);

            if self.peek_char() == Some('&') {
                self.chars.next();
            } else {
                break;
            }
        }

        Ok(TokenCondition { clauses })
    }

    fn build_clause(
        &self,
        attribute: TokenAttribute,
        value: &str,
        negated: bool,
        pos: usize,
    ) -> Result<AttributeClause> {
        let regex = Regex::new(&format!("^(?:{value})$"))
            .map_err(|e| self.error(pos, &format!("invalid regular expression '{value}': {e}")))?;
        Ok(AttributeClause {
            attribute,
            regex,
            negated,
        })
    }

    fn parse_identifier(&mut self) -> String {
        let mut ident = String::new();
        while let Some(&(_, c)) = self.chars.peek() {
            if c.is_alphanumeric() || c == '_' {
                ident.push(c);
                self.chars.next();
            } else {
                break;
            }
        }
        ident
    }

    fn parse_string(&mut self) -> Result<String> {
        match self.chars.next() {
            Some((_, '"')) => {}
            Some((pos, c)) => return Err(self.error(pos, &format!("expected '\"', found '{c}'"))),
            None => return Err(self.end_error("expected '\"'")),
        }

        let mut value = String::new();
        loop {
            match self.chars.next() {
                Some((_, '"')) => return Ok(value),
                Some((_, '\\')) => match self.chars.next() {
                    Some((_, '"')) => value.push('"'),
                    Some((_, c)) => {
                        value.push('\\');
                        value.push(c);
                    }
                    None => return Err(self.end_error("unterminated string")),
                },
                Some((_, c)) => value.push(c),
                None => return Err(self.end_error("unterminated string")),
            }
        }
    }

    fn parse_quantifiers(&mut self, mut node: PatternNode) -> Result<PatternNode> {
        loop {
            let (min, max) = match self.chars.peek().copied() {
                Some((_, '?')) => {
                    self.chars.next();
                    (0, Some(1))
                }
                Some((_, '*')) => {
                    self.chars.next();
                    (0, None)
                }
                Some((_, '+')) => {
                    self.chars.next();
                    (1, None)
                }
                Some((pos, '{')) => {
                    self.chars.next();
                    self.parse_bounds(pos)?
                }
                _ => return Ok(node),
            };

            node = PatternNode::Repeat {
                node: Box::new(node),
                min,
                max,
            };
        }
    }

    fn parse_bounds(&mut self, pos: usize) -> Result<(usize, Option<usize>)> {
        let min = self
            .parse_number()
            .ok_or_else(|| self.error(pos, "expected repetition count"))?;

        let max = match self.peek_char() {
            Some(',') => {
                self.chars.next();
                self.skip_whitespace();
                self.parse_number()
            }
            _ => Some(min),
        };
        self.expect('}')?;

        if let Some(max) = max {
            if max < min {
                return Err(self.error(pos, &format!("invalid repetition {{{min},{max}}}")));
            }
        }
        Ok((min, max))
    }

    fn parse_number(&mut self) -> Option<usize> {
        self.skip_whitespace();
        let mut digits = String::new();
        while let Some(&(_, c)) = self.chars.peek() {
            if c.is_ascii_digit() {
                digits.push(c);
                self.chars.next();
            } else {
                break;
            }
        }
        digits.parse().ok()
    }
}
