//! Annotated corpus and the client interface used to query it.
//!
//! The taxonomy reader only needs one capability from a corpus: execute a
//! compiled token-sequence query and return every match with its document id
//! and sentence text. [`CorpusClient`] captures that contract; [`Corpus`] is an
//! in-memory implementation over a tokenized, lemmatized and POS-tagged
//! "vertical" file (see [`reader`]).

pub mod client;
pub mod document;
pub mod index;
pub mod reader;

// Re-export commonly used types
pub use client::{CorpusClient, QueryHit};
pub use document::{AnnotatedToken, Document, Sentence, TokenAttribute};
pub use index::Corpus;
pub use reader::VerticalReader;
