//! Compiles rule templates into executable queries.
//!
//! The caller's tokens are rendered into a single query variable, either as
//! lemma atoms or normalized-surface atoms, and substituted for every `$query`
//! placeholder. Each rule body of the template becomes one [`CompiledQuery`].
//!
//! ```
//! use taxonomer::query::compiler::PatternCompiler;
//!
//! let rendered = PatternCompiler::render_query_variable(&["guide".into(), "dogs".into()], false);
//! assert_eq!(rendered, r#"([norm="guide"] [norm="dogs"])"#);
//! ```

use std::sync::Arc;

use crate::corpus::document::{AnnotatedToken, TokenAttribute};
use crate::error::{Result, TaxonomerError};
use crate::query::parser::parse_pattern;
use crate::query::pattern::{PatternMatch, PatternNode};
use crate::query::template::{RelationKind, RuleSet, RuleTemplate};

/// Placeholder replaced by the rendered query tokens.
pub const QUERY_VARIABLE: &str = "$query";

/// An executable token-sequence query.
#[derive(Debug, Clone)]
pub struct CompiledQuery {
    source: String,
    pattern: PatternNode,
}

impl CompiledQuery {
    /// Compile a pattern with no placeholders left in it.
    pub fn compile(source: &str) -> Result<Self> {
        if source.contains(QUERY_VARIABLE) {
            return Err(TaxonomerError::query_compilation(format!(
                "Unsubstituted {QUERY_VARIABLE} in pattern '{source}'"
            )));
        }
        let pattern = parse_pattern(source)?;
        Ok(CompiledQuery {
            source: source.to_string(),
            pattern,
        })
    }

    /// The pattern text this query was compiled from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The compiled pattern.
    pub fn pattern(&self) -> &PatternNode {
        &self.pattern
    }

    /// Find leftmost, non-overlapping matches in a sentence.
    pub fn find_matches(&self, tokens: &[AnnotatedToken]) -> Vec<PatternMatch> {
        self.pattern.find_iter(tokens)
    }
}

/// Renders the caller's tokens into relation rule templates.
#[derive(Debug, Clone)]
pub struct PatternCompiler {
    rules: Arc<RuleSet>,
}

impl Default for PatternCompiler {
    fn default() -> Self {
        Self::new(RuleSet::builtin())
    }
}

impl PatternCompiler {
    /// Create a compiler over a rule set.
    pub fn new(rules: RuleSet) -> Self {
        PatternCompiler {
            rules: Arc::new(rules),
        }
    }

    /// Compile the built-in template of a relation for the given tokens.
    pub fn compile(
        &self,
        tokens: &[String],
        kind: RelationKind,
        lemmatize: bool,
    ) -> Result<Vec<CompiledQuery>> {
        let template = self.rules.get(kind)?;
        Self::compile_template(template, tokens, lemmatize)
    }

    /// Compile caller-supplied rule text for the given tokens.
    pub fn compile_rules(
        &self,
        rule_text: &str,
        tokens: &[String],
        lemmatize: bool,
    ) -> Result<Vec<CompiledQuery>> {
        let template = RuleTemplate::parse(rule_text);
        if template.is_empty() {
            return Err(TaxonomerError::query_compilation("Rule text contains no rules"));
        }
        Self::compile_template(&template, tokens, lemmatize)
    }

    fn compile_template(
        template: &RuleTemplate,
        tokens: &[String],
        lemmatize: bool,
    ) -> Result<Vec<CompiledQuery>> {
        if tokens.iter().all(|t| t.trim().is_empty()) {
            return Err(TaxonomerError::invalid_argument(
                "Cannot compile a query for an empty token sequence",
            ));
        }

        let variable = Self::render_query_variable(tokens, lemmatize);
        template
            .rules()
            .iter()
            .map(|rule| CompiledQuery::compile(&rule.replace(QUERY_VARIABLE, &variable)))
            .collect()
    }

    /// Render tokens as a parenthesized sequence of literal atoms.
    ///
    /// Lemma atoms keep the token as given; normalized-surface atoms are
    /// lowercased to agree with the corpus `norm` attribute.
    pub fn render_query_variable(tokens: &[String], lemmatize: bool) -> String {
        let attribute = if lemmatize {
            TokenAttribute::Lemma
        } else {
            TokenAttribute::Norm
        };

        let atoms: Vec<String> = tokens
            .iter()
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
            .map(|token| {
                let value = if lemmatize {
                    token.to_string()
                } else {
                    token.to_lowercase()
                };
                format!("[{attribute}=\"{}\"]", escape_literal(&value))
            })
            .collect();

        format!("({})", atoms.join(" "))
    }
}

/// Escape a literal token for use inside a quoted pattern value.
pub fn escape_literal(token: &str) -> String {
    regex::escape(token).replace('"', "\\\"")
}
