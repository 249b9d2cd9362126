//! Core data model types for vocabtutor.
//!
//! These are the types the whole system passes around: parsed vocabulary
//! entries, the languages and levels a user can pick, quiz summaries, and
//! persisted score records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A single parsed vocabulary line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabEntry {
    /// The word being drilled.
    pub word: String,
    /// Its definition or translation.
    pub definition: String,
    /// Example sentence; empty when the line had none.
    #[serde(default)]
    pub example: String,
    /// Topic the entry was declared under.
    pub topic: String,
}

impl VocabEntry {
    /// Returns `true` if the entry carries an example sentence.
    pub fn has_example(&self) -> bool {
        !self.example.is_empty()
    }
}

/// A parsed vocabulary file for one language and level.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vocabulary {
    entries: Vec<VocabEntry>,
}

impl Vocabulary {
    pub fn new(entries: Vec<VocabEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[VocabEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Distinct topics in first-seen order.
    pub fn topics(&self) -> Vec<String> {
        let mut topics: Vec<String> = Vec::new();
        for entry in &self.entries {
            if !topics.iter().any(|t| t == &entry.topic) {
                topics.push(entry.topic.clone());
            }
        }
        topics
    }

    /// Entries whose topic matches exactly, in file order.
    pub fn entries_for(&self, topic: &str) -> Vec<VocabEntry> {
        self.entries
            .iter()
            .filter(|e| e.topic == topic)
            .cloned()
            .collect()
    }

    pub fn has_topic(&self, topic: &str) -> bool {
        self.entries.iter().any(|e| e.topic == topic)
    }
}

/// Supported study languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Dutch,
    French,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::Dutch, Language::French];

    /// Identifier used in data paths and score keys.
    pub fn id(&self) -> &'static str {
        match self {
            Language::Dutch => "nederlands",
            Language::French => "francais",
        }
    }

    /// Two-letter ISO 639-1 code.
    pub fn code(&self) -> &'static str {
        match self {
            Language::Dutch => "nl",
            Language::French => "fr",
        }
    }

    /// BCP 47 locale tag used to pick voices.
    pub fn locale(&self) -> &'static str {
        match self {
            Language::Dutch => "nl-NL",
            Language::French => "fr-FR",
        }
    }

    /// English display name.
    pub fn name(&self) -> &'static str {
        match self {
            Language::Dutch => "Dutch",
            Language::French => "French",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "nederlands" | "nl" | "dutch" => Ok(Language::Dutch),
            "francais" | "français" | "fr" | "french" => Ok(Language::French),
            other => Err(format!("unknown language: {other}")),
        }
    }
}

/// CEFR levels with vocabulary files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Level {
    A2,
    B1,
    B2,
    C1,
}

impl Level {
    pub const ALL: [Level; 4] = [Level::A2, Level::B1, Level::B2, Level::C1];

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::A2 => "A2",
            Level::B1 => "B1",
            Level::B2 => "B2",
            Level::C1 => "C1",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Level {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "A2" => Ok(Level::A2),
            "B1" => Ok(Level::B1),
            "B2" => Ok(Level::B2),
            "C1" => Ok(Level::C1),
            other => Err(format!("unknown level: {other}")),
        }
    }
}

/// A language and level picked together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Selection {
    pub language: Language,
    pub level: Level,
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.language.name(), self.level)
    }
}

/// Final counts of a finished quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizSummary {
    pub correct: u32,
    pub incorrect: u32,
    pub total: u32,
}

impl QuizSummary {
    pub fn accuracy(&self) -> u32 {
        accuracy(self.correct, self.total)
    }
}

/// Percentage of `correct` over `total`, rounded half away from zero; 0 when
/// `total` is 0.
pub fn accuracy(correct: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    (f64::from(correct) / f64::from(total) * 100.0).round() as u32
}

/// A persisted per-topic result. Later saves for the same
/// (lang, level, topic) replace earlier ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub lang: String,
    pub level: String,
    pub topic: String,
    pub correct: u32,
    pub incorrect: u32,
    pub total: u32,
    /// Rounded percentage, 0..=100.
    pub accuracy: u32,
    pub timestamp: DateTime<Utc>,
    /// Local calendar date of the save, for display.
    pub date: String,
}
