//! Token-sequence patterns and their matcher.
//!
//! A [`PatternNode`] tree is produced by the [`parser`](crate::query::parser)
//! and evaluated against the tokens of one sentence. Evaluation tracks the set
//! of reachable positions after each node, in preference order (greedy
//! quantifiers prefer more repetitions, alternations prefer earlier branches).
//! Only the first state reaching a given position is kept, so the work per
//! node is bounded by the sentence length.

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::corpus::document::{AnnotatedToken, TokenAttribute};

/// A labeled sub-span of a match.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CaptureSpan {
    /// Capture label
    pub label: String,
    /// Start position (inclusive)
    pub start: usize,
    /// End position (exclusive)
    pub end: usize,
}

impl CaptureSpan {
    /// Get the length of this span.
    pub fn length(&self) -> usize {
        self.end.saturating_sub(self.start)
    }
}

/// A pattern match within a sentence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternMatch {
    /// Start position (inclusive)
    pub start: usize,
    /// End position (exclusive)
    pub end: usize,
    /// Captures in the order they closed
    pub captures: Vec<CaptureSpan>,
}

impl PatternMatch {
    /// Get the last capture with the given label.
    pub fn capture(&self, label: &str) -> Option<&CaptureSpan> {
        self.captures.iter().rev().find(|c| c.label == label)
    }
}

/// One `attr="regex"` or `attr!="regex"` test.
#[derive(Debug, Clone)]
pub struct AttributeClause {
    pub attribute: TokenAttribute,
    pub regex: Regex,
    pub negated: bool,
}

impl AttributeClause {
    fn matches(&self, token: &AnnotatedToken) -> bool {
        self.regex.is_match(token.attribute(self.attribute)) != self.negated
    }
}

/// Conjunction of attribute clauses; empty matches any token.
#[derive(Debug, Clone, Default)]
pub struct TokenCondition {
    pub clauses: Vec<AttributeClause>,
}

impl TokenCondition {
    /// Test a token against every clause.
    pub fn matches(&self, token: &AnnotatedToken) -> bool {
        self.clauses.iter().all(|clause| clause.matches(token))
    }
}

/// A node of a compiled pattern.
#[derive(Debug, Clone)]
pub enum PatternNode {
    /// Exactly one token satisfying a condition
    Token(TokenCondition),
    /// Nodes matched one after another
    Sequence(Vec<PatternNode>),
    /// First matching branch is preferred
    Alternation(Vec<PatternNode>),
    /// Greedy repetition
    Repeat {
        node: Box<PatternNode>,
        min: usize,
        max: Option<usize>,
    },
    /// Labeled sub-pattern
    Capture { label: String, node: Box<PatternNode> },
}

#[derive(Debug, Clone)]
struct MatchState {
    pos: usize,
    captures: Vec<CaptureSpan>,
}

impl PatternNode {
    /// Find leftmost, non-overlapping matches in a token sequence.
    ///
    /// Empty matches are never reported.
    pub fn find_iter(&self, tokens: &[AnnotatedToken]) -> Vec<PatternMatch> {
        let mut matches = Vec::new();
        let mut start = 0;

        while start < tokens.len() {
            let initial = MatchState {
                pos: start,
                captures: Vec::new(),
            };
            let mut states = Vec::new();
            self.advance(tokens, &initial, &mut states);

            match states.into_iter().find(|s| s.pos > start) {
                Some(state) => {
                    matches.push(PatternMatch {
                        start,
                        end: state.pos,
                        captures: state.captures,
                    });
                    start = state.pos;
                }
                None => start += 1,
            }
        }

        matches
    }

    fn advance(&self, tokens: &[AnnotatedToken], state: &MatchState, out: &mut Vec<MatchState>) {
        match self {
            PatternNode::Token(condition) => {
                if let Some(token) = tokens.get(state.pos) {
                    if condition.matches(token) {
                        out.push(MatchState {
                            pos: state.pos + 1,
                            captures: state.captures.clone(),
                        });
                    }
                }
            }
            PatternNode::Sequence(nodes) => {
                let mut states = vec![state.clone()];
                for node in nodes {
                    let mut next = Vec::new();
                    for s in &states {
                        node.advance(tokens, s, &mut next);
                    }
                    dedup_positions(&mut next);
                    if next.is_empty() {
                        return;
                    }
                    states = next;
                }
                out.extend(states);
            }
            PatternNode::Alternation(branches) => {
                let mut next = Vec::new();
                for branch in branches {
                    branch.advance(tokens, state, &mut next);
                }
                dedup_positions(&mut next);
                out.extend(next);
            }
            PatternNode::Repeat { node, min, max } => {
                let remaining = tokens.len().saturating_sub(state.pos);
                let bound = max.unwrap_or(usize::MAX).min(remaining + 1);

                let mut levels = vec![vec![state.clone()]];
                for _ in 0..bound {
                    let mut next = Vec::new();
                    if let Some(last) = levels.last() {
                        for s in last {
                            node.advance(tokens, s, &mut next);
                        }
                    }
                    dedup_positions(&mut next);
                    if next.is_empty() {
                        break;
                    }
                    levels.push(next);
                }

                let mut collected = Vec::new();
                for level in levels.into_iter().skip(*min).rev() {
                    collected.extend(level);
                }
                dedup_positions(&mut collected);
                out.extend(collected);
            }
            PatternNode::Capture { label, node } => {
                let mut inner = Vec::new();
                node.advance(tokens, state, &mut inner);
                for mut s in inner {
                    s.captures.push(CaptureSpan {
                        label: label.clone(),
                        start: state.pos,
                        end: s.pos,
                    });
                    out.push(s);
                }
            }
        }
    }

    /// Whether the pattern defines a capture with this label.
    pub fn has_capture(&self, label: &str) -> bool {
        match self {
            PatternNode::Token(_) => false,
            PatternNode::Sequence(nodes) | PatternNode::Alternation(nodes) => {
                nodes.iter().any(|n| n.has_capture(label))
            }
            PatternNode::Repeat { node, .. } => node.has_capture(label),
            PatternNode::Capture { label: l, node } => l == label || node.has_capture(label),
        }
    }
}

/// Keep only the first (preferred) state for each position.
fn dedup_positions(states: &mut Vec<MatchState>) {
    let mut seen: Vec<usize> = Vec::with_capacity(states.len());
    states.retain(|s| {
        if seen.contains(&s.pos) {
            false
        } else {
            seen.push(s.pos);
            true
        }
    });
}
