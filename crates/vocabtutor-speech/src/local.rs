//! Local, in-process speech synthesis.
//!
//! [`LocalSynthesizer`] owns the voice-selection and cancellation policy and
//! drives any [`SpeechEngine`]. [`EspeakEngine`] is the engine used in
//! practice: it shells out to `espeak-ng` (or a flag-compatible program).

use std::process::Stdio;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::process::{Child, Command};
use tokio::sync::{Mutex, OnceCell};

use vocabtutor_core::model::Language;

use crate::error::SynthesisError;
use crate::synth::Synthesizer;
use crate::voices::{profile, select_voice, Voice};

/// Delivery rate relative to normal speech.
pub const RATE: f32 = 0.9;
pub const PITCH: f32 = 1.0;
pub const VOLUME: f32 = 1.0;

/// One request to a local engine.
#[derive(Debug, Clone, PartialEq)]
pub struct Utterance {
    pub text: String,
    /// Target locale, e.g. `nl-NL`.
    pub locale: String,
    /// Chosen voice; `None` falls back to the locale's language.
    pub voice: Option<Voice>,
    pub rate: f32,
    pub pitch: f32,
    pub volume: f32,
}

/// A local synthesis engine.
#[async_trait]
pub trait SpeechEngine: Send + Sync {
    /// Installed voices.
    async fn voices(&self) -> Result<Vec<Voice>, SynthesisError>;

    /// Start speaking. Returns without waiting for the utterance to end.
    async fn utter(&self, utterance: Utterance) -> Result<(), SynthesisError>;

    /// Stop the in-flight utterance, if any.
    async fn cancel(&self);
}

/// Synthesizer over a local engine. At most one utterance plays at a time.
pub struct LocalSynthesizer {
    engine: Arc<dyn SpeechEngine>,
    voices: OnceCell<Vec<Voice>>,
}

impl LocalSynthesizer {
    pub fn new(engine: Arc<dyn SpeechEngine>) -> Self {
        Self {
            engine,
            voices: OnceCell::new(),
        }
    }

    async fn installed_voices(&self) -> &[Voice] {
        self.voices
            .get_or_init(|| async {
                match self.engine.voices().await {
                    Ok(voices) => voices,
                    Err(e) => {
                        tracing::warn!("could not list local voices: {e}");
                        Vec::new()
                    }
                }
            })
            .await
    }
}

#[async_trait]
impl Synthesizer for LocalSynthesizer {
    fn name(&self) -> &str {
        "local"
    }

    async fn speak(&self, text: &str, language: Language) -> Result<(), SynthesisError> {
        self.engine.cancel().await;

        let voice = select_voice(self.installed_voices().await, language).cloned();
        self.engine
            .utter(Utterance {
                text: text.to_string(),
                locale: profile(language).locale.to_string(),
                voice,
                rate: RATE,
                pitch: PITCH,
                volume: VOLUME,
            })
            .await
    }
}

// ---------------------------------------------------------------------------
// espeak-ng
// ---------------------------------------------------------------------------

/// espeak-ng's default speed in words per minute.
const ESPEAK_BASE_WPM: f32 = 175.0;

/// Engine that runs an espeak-ng compatible program per utterance.
pub struct EspeakEngine {
    program: String,
    current: Mutex<Option<Child>>,
}

impl EspeakEngine {
    pub fn new(program: &str) -> Self {
        Self {
            program: program.to_string(),
            current: Mutex::new(None),
        }
    }

    /// Returns an engine if `program` can be run on this machine.
    pub async fn detect(program: &str) -> Option<Self> {
        let available = Command::new(program)
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map(|s| s.success())
            .unwrap_or(false);

        if available {
            Some(Self::new(program))
        } else {
            tracing::debug!("local speech engine '{program}' not found");
            None
        }
    }

    fn args(utterance: &Utterance) -> Vec<String> {
        let mut args = vec![
            "-s".to_string(),
            ((ESPEAK_BASE_WPM * utterance.rate).round() as u32).to_string(),
            "-p".to_string(),
            ((50.0 * utterance.pitch).round().clamp(0.0, 99.0) as u32).to_string(),
            "-a".to_string(),
            ((100.0 * utterance.volume).round().clamp(0.0, 200.0) as u32).to_string(),
        ];
        let voice = match &utterance.voice {
            Some(voice) => voice.locale.clone(),
            None => language_of(&utterance.locale),
        };
        args.push("-v".to_string());
        args.push(voice);
        args.push("--".to_string());
        args.push(utterance.text.clone());
        args
    }
}

/// `nl-NL` -> `nl`, the form espeak-ng accepts as a voice name.
fn language_of(locale: &str) -> String {
    locale
        .split(['-', '_'])
        .next()
        .unwrap_or(locale)
        .to_lowercase()
}

/// Parse the table printed by `espeak-ng --voices`.
///
/// ```text
/// Pty Language       Age/Gender VoiceName          File                 Other Languages
///  5  nl              --/M      Dutch              gmw/nl
/// ```
pub fn parse_voice_list(output: &str) -> Vec<Voice> {
    output
        .lines()
        .skip_while(|l| !l.trim_start().starts_with("Pty"))
        .skip(1)
        .filter_map(|line| {
            let cols: Vec<&str> = line.split_whitespace().collect();
            match cols.as_slice() {
                [_pty, locale, _age_gender, name, ..] => Some(Voice {
                    name: name.replace('_', " "),
                    locale: locale.to_string(),
                }),
                _ => None,
            }
        })
        .collect()
}

#[async_trait]
impl SpeechEngine for EspeakEngine {
    async fn voices(&self) -> Result<Vec<Voice>, SynthesisError> {
        let output = Command::new(&self.program)
            .arg("--voices")
            .stderr(Stdio::null())
            .output()
            .await
            .map_err(|e| SynthesisError::EngineUnavailable(format!("{}: {e}", self.program)))?;
        Ok(parse_voice_list(&String::from_utf8_lossy(&output.stdout)))
    }

    async fn utter(&self, utterance: Utterance) -> Result<(), SynthesisError> {
        let child = Command::new(&self.program)
            .args(Self::args(&utterance))
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| SynthesisError::EngineUnavailable(format!("{}: {e}", self.program)))?;

        if let Some(mut previous) = self.current.lock().await.replace(child) {
            // Superseded; the utterance may already have ended.
            let _ = previous.start_kill();
        }
        Ok(())
    }

    async fn cancel(&self) {
        if let Some(mut child) = self.current.lock().await.take() {
            if let Err(e) = child.start_kill() {
                tracing::debug!("previous utterance already finished: {e}");
            }
        }
    }
}
