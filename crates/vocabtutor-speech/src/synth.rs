//! The synthesizer abstraction shared by every backend.

use async_trait::async_trait;

use vocabtutor_core::model::Language;

use crate::error::SynthesisError;

/// A backend that can say a word out loud.
#[async_trait]
pub trait Synthesizer: Send + Sync {
    /// Backend name for logs (e.g. "google").
    fn name(&self) -> &str;

    /// Speak `text` in `language`. Returns once playback has been started.
    async fn speak(&self, text: &str, language: Language) -> Result<(), SynthesisError>;
}

/// Used when no synthesis capability exists. Never fails.
pub struct NullSynthesizer;

#[async_trait]
impl Synthesizer for NullSynthesizer {
    fn name(&self) -> &str {
        "none"
    }

    async fn speak(&self, text: &str, language: Language) -> Result<(), SynthesisError> {
        tracing::debug!("no speech engine available, not speaking '{text}' ({language})");
        Ok(())
    }
}
