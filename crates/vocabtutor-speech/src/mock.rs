//! Test doubles for the speech stack.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use vocabtutor_core::model::Language;

use crate::audio::AudioPlayer;
use crate::error::SynthesisError;
use crate::local::{SpeechEngine, Utterance};
use crate::synth::Synthesizer;
use crate::voices::Voice;

/// Audio player that keeps every clip it is asked to play.
#[derive(Default)]
pub struct RecordingPlayer {
    played: Mutex<Vec<(Vec<u8>, String)>>,
}

impl RecordingPlayer {
    /// Clips played so far, with their encodings.
    pub fn played(&self) -> Vec<(Vec<u8>, String)> {
        self.played.lock().unwrap().clone()
    }
}

#[async_trait]
impl AudioPlayer for RecordingPlayer {
    async fn play(&self, audio: Vec<u8>, encoding: &str) -> Result<(), SynthesisError> {
        self.played
            .lock()
            .unwrap()
            .push((audio, encoding.to_string()));
        Ok(())
    }
}

/// Synthesizer that records requests and optionally fails every one.
pub struct RecordingSynthesizer {
    name: String,
    fail: bool,
    call_count: AtomicU32,
    spoken: Mutex<Vec<(String, Language)>>,
}

impl RecordingSynthesizer {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            fail: false,
            call_count: AtomicU32::new(0),
            spoken: Mutex::new(Vec::new()),
        }
    }

    /// A synthesizer whose every request fails with a network error.
    pub fn failing(name: &str) -> Self {
        Self {
            fail: true,
            ..Self::new(name)
        }
    }

    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }

    /// Words successfully spoken.
    pub fn spoken(&self) -> Vec<(String, Language)> {
        self.spoken.lock().unwrap().clone()
    }
}

#[async_trait]
impl Synthesizer for RecordingSynthesizer {
    fn name(&self) -> &str {
        &self.name
    }

    async fn speak(&self, text: &str, language: Language) -> Result<(), SynthesisError> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        if self.fail {
            return Err(SynthesisError::Network("connection refused".to_string()));
        }
        self.spoken
            .lock()
            .unwrap()
            .push((text.to_string(), language));
        Ok(())
    }
}

/// Local engine with a fixed voice list that records utterances.
pub struct MockEngine {
    voices: Option<Vec<Voice>>,
    voice_queries: AtomicU32,
    cancels: AtomicU32,
    utterances: Mutex<Vec<Utterance>>,
}

impl MockEngine {
    pub fn with_voices(voices: Vec<Voice>) -> Self {
        Self {
            voices: Some(voices),
            voice_queries: AtomicU32::new(0),
            cancels: AtomicU32::new(0),
            utterances: Mutex::new(Vec::new()),
        }
    }

    /// An engine whose voice listing always fails.
    pub fn failing_voices() -> Self {
        Self {
            voices: None,
            ..Self::with_voices(Vec::new())
        }
    }

    pub fn utterances(&self) -> Vec<Utterance> {
        self.utterances.lock().unwrap().clone()
    }

    pub fn cancel_count(&self) -> u32 {
        self.cancels.load(Ordering::Relaxed)
    }

    pub fn voice_queries(&self) -> u32 {
        self.voice_queries.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl SpeechEngine for MockEngine {
    async fn voices(&self) -> Result<Vec<Voice>, SynthesisError> {
        self.voice_queries.fetch_add(1, Ordering::Relaxed);
        self.voices
            .clone()
            .ok_or_else(|| SynthesisError::EngineUnavailable("mock".to_string()))
    }

    async fn utter(&self, utterance: Utterance) -> Result<(), SynthesisError> {
        self.utterances.lock().unwrap().push(utterance);
        Ok(())
    }

    async fn cancel(&self) {
        self.cancels.fetch_add(1, Ordering::Relaxed);
    }
}
