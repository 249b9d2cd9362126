//! vocabtutor CLI: the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use vocabtutor_core::model::{Language, Level};

mod commands;

#[derive(Parser)]
#[command(
    name = "vocabtutor",
    version,
    about = "Vocabulary flashcard tutor with spoken pronunciation"
)]
struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Drill vocabulary interactively
    Study {
        /// Language to start with (nederlands/nl, francais/fr)
        #[arg(long, requires = "level")]
        lang: Option<Language>,

        /// Level to start with (A2, B1, B2, C1)
        #[arg(long, requires = "lang")]
        level: Option<Level>,
    },

    /// List the topics of a vocabulary file with their last scores
    Topics {
        #[arg(long)]
        lang: Language,

        #[arg(long)]
        level: Level,
    },

    /// Show stored scores
    Scores {
        /// Only this language
        #[arg(long)]
        lang: Option<Language>,

        /// Only this level
        #[arg(long)]
        level: Option<Level>,
    },

    /// Write all scores to a dated JSON file
    Export {
        /// Output directory
        #[arg(long, default_value = ".")]
        output: PathBuf,
    },

    /// Delete all stored scores
    Reset {
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },

    /// Check a vocabulary file for problems
    Validate {
        /// Path to a .dat vocabulary file
        #[arg(long)]
        file: PathBuf,
    },

    /// Pronounce a single word
    Speak {
        word: String,

        #[arg(long)]
        lang: Language,
    },

    /// Create starter config and a sample vocabulary file
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("vocabtutor=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();
    let config = cli.config;

    let result = match cli.command {
        Commands::Study { lang, level } => commands::study::execute(config, lang, level).await,
        Commands::Topics { lang, level } => commands::topics::execute(config, lang, level).await,
        Commands::Scores { lang, level } => commands::scores::execute(config, lang, level),
        Commands::Export { output } => commands::export::execute(config, output),
        Commands::Reset { yes } => commands::reset::execute(config, yes),
        Commands::Validate { file } => commands::validate::execute(file),
        Commands::Speak { word, lang } => commands::speak::execute(config, word, lang).await,
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
