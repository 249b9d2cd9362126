//! Score export to a dated JSON file.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};

use vocabtutor_core::scores::ScoreStore;

/// `vocabulary-scores-YYYY-MM-DD.json`
pub fn export_file_name(date: NaiveDate) -> String {
    format!("vocabulary-scores-{}.json", date.format("%Y-%m-%d"))
}

/// Write every stored record into `dir`, named for today's date.
///
/// Returns the path written.
pub fn write_export(scores: &ScoreStore, dir: &Path) -> Result<PathBuf> {
    let path = dir.join(export_file_name(Local::now().date_naive()));
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create {}", dir.display()))?;
    std::fs::write(&path, scores.export())
        .with_context(|| format!("failed to write export to {}", path.display()))?;
    tracing::info!("exported scores to {}", path.display());
    Ok(path)
}
