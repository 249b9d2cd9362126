//! The `vocabtutor speak` command.

use std::path::PathBuf;

use anyhow::Result;

use vocabtutor_core::model::Language;
use vocabtutor_speech::{create_pronouncer, SpeechOutcome};

pub async fn execute(config_path: Option<PathBuf>, word: String, lang: Language) -> Result<()> {
    let config = super::load(config_path)?;
    let pronouncer = create_pronouncer(&config.speech).await;
    let chain = pronouncer.chain();

    if chain == ["none"] {
        println!("No speech engine available; nothing spoken.");
        return Ok(());
    }

    match pronouncer.pronounce(&word, lang).await {
        SpeechOutcome::Silent => println!("Could not pronounce '{word}' (tried {}).", chain.join(", ")),
        outcome => println!("Pronounced '{word}' in {} ({outcome}).", lang.name()),
    }
    Ok(())
}
