//! vocabtutor-core: Vocabulary model, parsing, quiz flow, and scoring.
//!
//! This crate defines the data model, the vocabulary file format, the quiz
//! session and screen state machines, and the best-effort score store that
//! the rest of vocabtutor builds on.

pub mod config;
pub mod error;
pub mod model;
pub mod navigation;
pub mod parser;
pub mod quiz;
pub mod scores;
pub mod source;
pub mod store;
pub mod traits;
