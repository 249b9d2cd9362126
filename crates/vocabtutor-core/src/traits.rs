//! Core trait definitions for the pluggable edges of vocabtutor.
//!
//! Storage backends and vocabulary sources are implemented in
//! `vocabtutor-data`; pronunciation is implemented in `vocabtutor-speech`.

use async_trait::async_trait;

use crate::error::{LoadError, StorageError};
use crate::model::Language;

// ---------------------------------------------------------------------------
// Key-value storage
// ---------------------------------------------------------------------------

/// Durable string key-value storage.
pub trait KeyValueStore: Send + Sync {
    /// Read a value. `Ok(None)` means the key was never written.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write a value, replacing any previous one.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete a key. Deleting a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

// ---------------------------------------------------------------------------
// Vocabulary sources
// ---------------------------------------------------------------------------

/// Where vocabulary files come from.
#[async_trait]
pub trait VocabSource: Send + Sync {
    /// Human-readable location of the file for `lang`/`level`, used in errors.
    fn location(&self, lang: &str, level: &str) -> String;

    /// Fetch the raw text of the file for `lang`/`level`.
    async fn fetch(&self, lang: &str, level: &str) -> Result<String, LoadError>;
}

// ---------------------------------------------------------------------------
// Pronunciation
// ---------------------------------------------------------------------------

/// Fire-and-forget pronunciation of a single word.
///
/// Implementations must return immediately and never surface failures.
pub trait Pronunciation: Send + Sync {
    fn speak(&self, word: &str, language: Language);
}

