//! The `vocabtutor topics` command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use comfy_table::{Cell, Table};

use vocabtutor_core::model::{Language, Level};
use vocabtutor_core::source::load_vocabulary;
use vocabtutor_data::source_from_config;

pub async fn execute(config_path: Option<PathBuf>, lang: Language, level: Level) -> Result<()> {
    let config = super::load(config_path)?;
    let source = source_from_config(&config.data);
    let scores = super::open_scores(&config);

    let vocabulary = load_vocabulary(source.as_ref(), lang.id(), level.as_str())
        .await
        .context("could not load vocabulary file")?;

    println!(
        "{} {}: {} words in {} topics",
        lang.name(),
        level,
        vocabulary.len(),
        vocabulary.topics().len()
    );

    let mut table = Table::new();
    table.set_header(vec!["Topic", "Words", "Last accuracy", "Date"]);

    for topic in vocabulary.topics() {
        let score = scores.get_topic_score(lang.id(), level.as_str(), &topic);
        table.add_row(vec![
            Cell::new(&topic),
            Cell::new(vocabulary.entries_for(&topic).len()),
            Cell::new(
                score
                    .as_ref()
                    .map(|s| format!("{}%", s.accuracy))
                    .unwrap_or_else(|| "-".to_string()),
            ),
            Cell::new(score.map(|s| s.date).unwrap_or_else(|| "-".to_string())),
        ]);
    }

    println!("{table}");
    Ok(())
}
