//! The `vocabtutor scores` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use vocabtutor_core::model::{Language, Level};

pub fn execute(
    config_path: Option<PathBuf>,
    lang: Option<Language>,
    level: Option<Level>,
) -> Result<()> {
    let config = super::load(config_path)?;
    let scores = super::open_scores(&config);

    let records: Vec<_> = scores
        .get_all()
        .into_values()
        .filter(|r| lang.is_none_or(|l| r.lang == l.id()))
        .filter(|r| level.is_none_or(|l| r.level == l.as_str()))
        .collect();

    if records.is_empty() {
        println!("No scores recorded yet.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec![
        "Language", "Level", "Topic", "Correct", "Incorrect", "Total", "Accuracy", "Date",
    ]);
    for r in &records {
        table.add_row(vec![
            Cell::new(&r.lang),
            Cell::new(&r.level),
            Cell::new(&r.topic),
            Cell::new(r.correct),
            Cell::new(r.incorrect),
            Cell::new(r.total),
            Cell::new(format!("{}%", r.accuracy)),
            Cell::new(&r.date),
        ]);
    }

    println!("{table}");
    println!("{} record(s)", records.len());
    Ok(())
}
