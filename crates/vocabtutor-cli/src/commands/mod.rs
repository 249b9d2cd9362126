//! Subcommand implementations.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;

use vocabtutor_core::config::{load_config_from, TutorConfig};
use vocabtutor_core::scores::ScoreStore;
use vocabtutor_data::JsonFileStore;

pub mod export;
pub mod init;
pub mod reset;
pub mod scores;
pub mod speak;
pub mod study;
pub mod topics;
pub mod validate;

fn load(config_path: Option<PathBuf>) -> Result<TutorConfig> {
    let config = load_config_from(config_path.as_deref())?;
    tracing::debug!("config: {config:?}");
    Ok(config)
}

fn open_scores(config: &TutorConfig) -> ScoreStore {
    ScoreStore::new(Arc::new(JsonFileStore::new(config.storage.dir.clone())))
}
