//! The `vocabtutor reset` command.

use std::path::PathBuf;

use anyhow::Result;

pub fn execute(config_path: Option<PathBuf>, yes: bool) -> Result<()> {
    let config = super::load(config_path)?;
    let scores = super::open_scores(&config);
    let count = scores.get_all().len();

    if !yes {
        println!("This deletes {count} stored score(s). Re-run with --yes to confirm.");
        return Ok(());
    }

    scores.clear();
    println!("Deleted {count} score(s).");
    Ok(())
}
