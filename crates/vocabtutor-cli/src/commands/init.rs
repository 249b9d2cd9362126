//! The `vocabtutor init` command.

use std::path::Path;

use anyhow::Result;

pub fn execute() -> Result<()> {
    if Path::new("vocabtutor.toml").exists() {
        println!("vocabtutor.toml already exists, skipping.");
    } else {
        std::fs::write("vocabtutor.toml", SAMPLE_CONFIG)?;
        println!("Created vocabtutor.toml");
    }

    std::fs::create_dir_all("data/nederlands")?;
    let sample_path = Path::new("data/nederlands/B1.dat");
    if sample_path.exists() {
        println!("data/nederlands/B1.dat already exists, skipping.");
    } else {
        std::fs::write(sample_path, SAMPLE_VOCABULARY)?;
        println!("Created data/nederlands/B1.dat");
    }

    println!("\nNext steps:");
    println!("  1. Optionally set VOCABTUTOR_GOOGLE_API_KEY for Google voices");
    println!("  2. Run: vocabtutor validate --file data/nederlands/B1.dat");
    println!("  3. Run: vocabtutor study --lang nederlands --level B1");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# vocabtutor configuration

[data]
source = "directory"
path = "./data"

# [data]
# source = "http"
# base_url = "https://example.com/vocab"

[speech.google]
api_key = "${VOCABTUTOR_GOOGLE_API_KEY}"
audio_encoding = "MP3"

[speech.local]
program = "espeak-ng"
player = "mpg123"
player_args = ["-q"]
"#;

const SAMPLE_VOCABULARY: &str = "\
[Verkeer]
de fiets|bicycle|Ik ga met de fiets naar mijn werk.
de overstap|transfer|Bij Utrecht heb je een overstap.
de vertraging|delay|De trein heeft tien minuten vertraging.
het perron|platform|De trein vertrekt van perron vijf.

[Werk]
de sollicitatie|job application|Ze schrijft een sollicitatie voor een nieuwe baan.
het overleg|meeting, consultation|We hebben om tien uur overleg.
de werkgever|employer
ontslaan|to dismiss|Hij is vorige maand ontslagen.

[Gezondheid]
de huisarts|general practitioner|Ik heb een afspraak bij de huisarts.
verkouden|having a cold|Ik ben al een week verkouden.
het recept|prescription|De apotheek heeft mijn recept klaar.
";
