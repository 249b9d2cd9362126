//! The `vocabtutor export` command.

use std::path::PathBuf;

use anyhow::Result;

use vocabtutor_data::write_export;

pub fn execute(config_path: Option<PathBuf>, output: PathBuf) -> Result<()> {
    let config = super::load(config_path)?;
    let scores = super::open_scores(&config);

    let count = scores.get_all().len();
    let path = write_export(&scores, &output)?;
    println!("Exported {count} record(s) to {}", path.display());
    Ok(())
}
