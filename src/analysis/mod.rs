//! Text analysis for query terms.
//!
//! Query terms are short strings (a term, never a full document), so the
//! pipeline is deliberately small: a [`Tokenizer`] splits the term into
//! [`Token`]s, [`Filter`]s normalize them, and a [`Lemmatizer`] maps each
//! token to exactly one lemma.
//!
//! ```text
//! "Golden Retrievers" → Tokenizer → Lowercase → Lemmatizer → ["golden", "retriever"]
//! ```

pub mod lemmatizer;
pub mod token;
pub mod token_filter;
pub mod tokenizer;

// Re-export commonly used types
pub use lemmatizer::*;
pub use token::*;
pub use token_filter::*;
pub use tokenizer::*;
