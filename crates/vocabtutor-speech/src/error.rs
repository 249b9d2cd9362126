//! Synthesis error types.

use thiserror::Error;

/// Errors that can occur while pronouncing a word.
///
/// None of these reach the user: the pronouncer logs them and falls back.
#[derive(Debug, Error)]
pub enum SynthesisError {
    /// No API key is configured for the remote service.
    #[error("remote synthesis credential not configured")]
    MissingCredential,

    /// The API returned an error response.
    #[error("API error (HTTP {status}): {message}")]
    ApiError { status: u16, message: String },

    /// The response carried no audio payload.
    #[error("response contained no audio content")]
    MissingAudio,

    #[error("failed to decode audio: {0}")]
    Decode(String),

    /// The request timed out.
    #[error("request timed out after {0}s")]
    Timeout(u64),

    /// A network error occurred.
    #[error("network error: {0}")]
    Network(String),

    /// The local engine or audio player could not be started.
    #[error("speech engine unavailable: {0}")]
    EngineUnavailable(String),

    #[error("audio playback failed: {0}")]
    Playback(String),
}
