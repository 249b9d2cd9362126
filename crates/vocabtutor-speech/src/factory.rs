//! Building a [`Pronouncer`] from configuration.

use std::sync::Arc;

use vocabtutor_core::config::SpeechConfig;

use crate::audio::CommandPlayer;
use crate::google::GoogleSynthesizer;
use crate::local::{EspeakEngine, LocalSynthesizer};
use crate::pronouncer::Pronouncer;
use crate::synth::{NullSynthesizer, Synthesizer};

/// Choose backends by configuration presence and engine availability.
///
/// - a non-empty Google key adds the remote synthesizer in front
/// - the local engine is used when its program runs, otherwise speech is a no-op
pub async fn create_pronouncer(config: &SpeechConfig) -> Pronouncer {
    let remote = config.remote().map(|google| {
        let player = Arc::new(CommandPlayer::new(
            &config.local.player,
            config.local.player_args.clone(),
        ));
        Arc::new(GoogleSynthesizer::new(
            &google.api_key,
            google.base_url.clone(),
            &google.audio_encoding,
            player,
        )) as Arc<dyn Synthesizer>
    });

    let local: Arc<dyn Synthesizer> = match EspeakEngine::detect(&config.local.program).await {
        Some(engine) => Arc::new(LocalSynthesizer::new(Arc::new(engine))),
        None => {
            tracing::info!(
                "local speech engine '{}' unavailable, pronunciation falls back to silence",
                config.local.program
            );
            Arc::new(NullSynthesizer)
        }
    };

    let pronouncer = Pronouncer::new(remote, local);
    tracing::debug!("pronunciation chain: {}", pronouncer.chain().join(" -> "));
    pronouncer
}
