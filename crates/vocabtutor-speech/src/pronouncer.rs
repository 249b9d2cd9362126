//! Remote-then-local pronunciation policy.

use std::fmt;
use std::sync::Arc;

use vocabtutor_core::model::Language;
use vocabtutor_core::traits::Pronunciation;

use crate::synth::{NullSynthesizer, Synthesizer};

/// Which backend ended up speaking a word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeechOutcome {
    Remote,
    Local,
    /// Every backend failed; nothing was spoken.
    Silent,
}

impl fmt::Display for SpeechOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpeechOutcome::Remote => write!(f, "remote"),
            SpeechOutcome::Local => write!(f, "local"),
            SpeechOutcome::Silent => write!(f, "silent"),
        }
    }
}

/// Tries the remote synthesizer (when configured) and falls back to the
/// local one. Failures are logged and never returned.
#[derive(Clone)]
pub struct Pronouncer {
    remote: Option<Arc<dyn Synthesizer>>,
    local: Arc<dyn Synthesizer>,
}

impl Pronouncer {
    pub fn new(remote: Option<Arc<dyn Synthesizer>>, local: Arc<dyn Synthesizer>) -> Self {
        Self { remote, local }
    }

    /// A pronouncer that never makes a sound.
    pub fn silent() -> Self {
        Self::new(None, Arc::new(NullSynthesizer))
    }

    /// Backend names in the order they are tried, e.g. `["google", "local"]`.
    pub fn chain(&self) -> Vec<&str> {
        self.remote
            .iter()
            .map(|r| r.name())
            .chain(std::iter::once(self.local.name()))
            .collect()
    }

    pub async fn pronounce(&self, word: &str, language: Language) -> SpeechOutcome {
        if let Some(remote) = &self.remote {
            match remote.speak(word, language).await {
                Ok(()) => return SpeechOutcome::Remote,
                Err(e) => {
                    tracing::warn!("{} synthesis failed, falling back: {e}", remote.name());
                }
            }
        }

        match self.local.speak(word, language).await {
            Ok(()) => SpeechOutcome::Local,
            Err(e) => {
                tracing::warn!("{} synthesis failed: {e}", self.local.name());
                SpeechOutcome::Silent
            }
        }
    }
}

impl Pronunciation for Pronouncer {
    fn speak(&self, word: &str, language: Language) {
        let handle = match tokio::runtime::Handle::try_current() {
            Ok(handle) => handle,
            Err(_) => {
                tracing::debug!("no async runtime, not speaking '{word}'");
                return;
            }
        };

        let pronouncer = self.clone();
        let word = word.to_string();
        handle.spawn(async move {
            pronouncer.pronounce(&word, language).await;
        });
    }
}
