//! Token-sequence query language.
//!
//! - [`parser`] turns pattern text into a [`PatternNode`] tree
//! - [`pattern`] evaluates a tree against the tokens of a sentence
//! - [`template`] loads the per-relation rule templates
//! - [`compiler`] substitutes the caller's term into a template and compiles
//!   every rule body into a [`CompiledQuery`]

pub mod compiler;
pub mod parser;
pub mod pattern;
pub mod template;

pub use self::compiler::{CompiledQuery, PatternCompiler, QUERY_VARIABLE};
pub use self::parser::parse_pattern;
pub use self::pattern::{CaptureSpan, PatternMatch, PatternNode};
pub use self::template::{RelationKind, RuleSet, RuleTemplate};
