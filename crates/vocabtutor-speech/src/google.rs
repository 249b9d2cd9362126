//! Google Cloud Text-to-Speech backend.

use std::sync::Arc;

use async_trait::async_trait;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use vocabtutor_core::model::Language;

use crate::audio::AudioPlayer;
use crate::error::SynthesisError;
use crate::synth::Synthesizer;
use crate::voices::profile;

const DEFAULT_BASE_URL: &str = "https://texttospeech.googleapis.com";
const DEFAULT_TIMEOUT_SECS: u64 = 15;
const SPEAKING_RATE: f64 = 0.9;

/// Remote synthesizer using the Google Cloud `text:synthesize` endpoint.
pub struct GoogleSynthesizer {
    api_key: String,
    base_url: String,
    audio_encoding: String,
    client: reqwest::Client,
    player: Arc<dyn AudioPlayer>,
}

impl GoogleSynthesizer {
    pub fn new(
        api_key: &str,
        base_url: Option<String>,
        audio_encoding: &str,
        player: Arc<dyn AudioPlayer>,
    ) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .expect("failed to build HTTP client");

        Self {
            api_key: api_key.to_string(),
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            audio_encoding: audio_encoding.to_string(),
            client,
            player,
        }
    }

    /// Request audio for `text` and return the decoded bytes.
    #[instrument(skip_all, fields(language = %language))]
    pub async fn synthesize(&self, text: &str, language: Language) -> Result<Vec<u8>, SynthesisError> {
        if self.api_key.trim().is_empty() {
            return Err(SynthesisError::MissingCredential);
        }

        let voice = profile(language);
        let body = SynthesizeRequest {
            input: SynthesisInput {
                text: text.to_string(),
            },
            voice: VoiceSelection {
                language_code: voice.locale.to_string(),
                name: voice.google_voice.to_string(),
                ssml_gender: "NEUTRAL".to_string(),
            },
            audio_config: AudioConfig {
                audio_encoding: self.audio_encoding.clone(),
                pitch: 0.0,
                speaking_rate: SPEAKING_RATE,
            },
        };

        let response = self
            .client
            .post(format!(
                "{}/v1/text:synthesize?key={}",
                self.base_url, self.api_key
            ))
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SynthesisError::Timeout(DEFAULT_TIMEOUT_SECS)
                } else {
                    SynthesisError::Network(e.without_url().to_string())
                }
            })?;

        let status = response.status().as_u16();
        if status >= 400 {
            let message = response.text().await.unwrap_or_default();
            return Err(SynthesisError::ApiError { status, message });
        }

        let payload: SynthesizeResponse =
            response
                .json()
                .await
                .map_err(|e| SynthesisError::ApiError {
                    status: 0,
                    message: format!("failed to parse response: {}", e.without_url()),
                })?;

        let encoded = payload
            .audio_content
            .filter(|a| !a.is_empty())
            .ok_or(SynthesisError::MissingAudio)?;

        base64::engine::general_purpose::STANDARD
            .decode(encoded.as_bytes())
            .map_err(|e| SynthesisError::Decode(e.to_string()))
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SynthesizeRequest {
    input: SynthesisInput,
    voice: VoiceSelection,
    audio_config: AudioConfig,
}

#[derive(Serialize)]
struct SynthesisInput {
    text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct VoiceSelection {
    language_code: String,
    name: String,
    ssml_gender: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AudioConfig {
    audio_encoding: String,
    pitch: f64,
    speaking_rate: f64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SynthesizeResponse {
    #[serde(default)]
    audio_content: Option<String>,
}

#[async_trait]
impl Synthesizer for GoogleSynthesizer {
    fn name(&self) -> &str {
        "google"
    }

    async fn speak(&self, text: &str, language: Language) -> Result<(), SynthesisError> {
        let audio = self.synthesize(text, language).await?;
        self.player.play(audio, &self.audio_encoding).await
    }
}
