//! Loading vocabulary through a [`VocabSource`].

use std::collections::HashMap;

use async_trait::async_trait;

use crate::error::LoadError;
use crate::model::Vocabulary;
use crate::parser::{parse_vocab, vocab_path};
use crate::traits::VocabSource;

/// Fetch and parse the vocabulary for `lang`/`level`.
///
/// Fetch failures propagate as [`LoadError`]; malformed lines are skipped by
/// the parser and never fail the load.
pub async fn load_vocabulary(
    source: &dyn VocabSource,
    lang: &str,
    level: &str,
) -> Result<Vocabulary, LoadError> {
    let raw = source.fetch(lang, level).await?;
    let entries = parse_vocab(&raw);
    tracing::debug!(
        "loaded {} entries from {}",
        entries.len(),
        source.location(lang, level)
    );
    Ok(Vocabulary::new(entries))
}

/// A `VocabSource` backed by in-memory file contents keyed by
/// `<lang>/<level>.dat`.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    files: HashMap<String, String>,
}

impl StaticSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the contents for `lang`/`level`.
    pub fn with_file(mut self, lang: &str, level: &str, contents: &str) -> Self {
        self.files
            .insert(vocab_path(lang, level), contents.to_string());
        self
    }
}

#[async_trait]
impl VocabSource for StaticSource {
    fn location(&self, lang: &str, level: &str) -> String {
        vocab_path(lang, level)
    }

    async fn fetch(&self, lang: &str, level: &str) -> Result<String, LoadError> {
        let path = self.location(lang, level);
        self.files
            .get(&path)
            .cloned()
            .ok_or_else(|| LoadError::Unavailable {
                path,
                reason: "not found".into(),
            })
    }
}
