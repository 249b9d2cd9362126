//! The `vocabtutor validate` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use vocabtutor_core::model::Vocabulary;
use vocabtutor_core::parser::{parse_vocab, validate_vocab};

pub fn execute(file: PathBuf) -> Result<()> {
    let raw = std::fs::read_to_string(&file)
        .with_context(|| format!("failed to read {}", file.display()))?;

    let vocabulary = Vocabulary::new(parse_vocab(&raw));
    println!(
        "{}: {} entries in {} topics",
        file.display(),
        vocabulary.len(),
        vocabulary.topics().len()
    );
    for topic in vocabulary.topics() {
        println!("  [{topic}] {} entries", vocabulary.entries_for(&topic).len());
    }

    let warnings = validate_vocab(&raw);
    for w in &warnings {
        println!("  line {}: WARNING: {}", w.line, w.message);
    }

    if warnings.is_empty() {
        println!("No problems found.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}
