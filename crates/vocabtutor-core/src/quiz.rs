//! Quiz session state machine for one topic.
//!
//! A session shuffles the topic's words, presents them one at a time with the
//! definition hidden, and counts self-graded answers until every word has
//! been answered. `correct + incorrect <= total` holds throughout and reaches
//! equality exactly when the session completes.

use rand::seq::SliceRandom;
use rand::Rng;
use thiserror::Error;

use crate::model::{QuizSummary, VocabEntry, Vocabulary};

/// Illegal actions for the current session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum QuizError {
    /// Answering requires the definition to be revealed first.
    #[error("definition has not been revealed yet")]
    DefinitionHidden,

    /// Revealing or speaking is only possible before the reveal.
    #[error("definition is already revealed")]
    DefinitionShown,

    #[error("quiz session is already complete")]
    Finished,
}

/// What a session is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizState<'a> {
    Presenting {
        entry: &'a VocabEntry,
        revealed: bool,
    },
    Complete(QuizSummary),
}

/// Result of answering the current word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Another word is now presented, definition hidden.
    Next,
    /// That was the last word.
    Complete(QuizSummary),
}

/// A drill over one topic.
#[derive(Debug, Clone)]
pub struct QuizSession {
    topic: String,
    words: Vec<VocabEntry>,
    index: usize,
    correct: u32,
    incorrect: u32,
    total: u32,
    revealed: bool,
}

impl QuizSession {
    /// Start a session over the entries of `topic`, shuffled uniformly.
    pub fn start(vocabulary: &Vocabulary, topic: &str) -> Self {
        Self::start_with_rng(vocabulary, topic, &mut rand::rng())
    }

    /// Like [`QuizSession::start`] with an explicit random source.
    pub fn start_with_rng<R: Rng + ?Sized>(
        vocabulary: &Vocabulary,
        topic: &str,
        rng: &mut R,
    ) -> Self {
        Self::from_words(topic, vocabulary.entries_for(topic), rng)
    }

    /// Start a session over an explicit word list, shuffled uniformly.
    pub fn from_words<R: Rng + ?Sized>(topic: &str, mut words: Vec<VocabEntry>, rng: &mut R) -> Self {
        words.shuffle(rng);
        let total = words.len() as u32;
        Self {
            topic: topic.to_string(),
            words,
            index: 0,
            correct: 0,
            incorrect: 0,
            total,
            revealed: false,
        }
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Words in presentation order.
    pub fn words(&self) -> &[VocabEntry] {
        &self.words
    }

    pub fn state(&self) -> QuizState<'_> {
        match self.words.get(self.index) {
            Some(entry) if !self.is_complete() => QuizState::Presenting {
                entry,
                revealed: self.revealed,
            },
            _ => QuizState::Complete(self.summary()),
        }
    }

    /// The word being presented, if the session is not complete.
    pub fn current(&self) -> Option<&VocabEntry> {
        match self.state() {
            QuizState::Presenting { entry, .. } => Some(entry),
            QuizState::Complete(_) => None,
        }
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    pub fn is_complete(&self) -> bool {
        self.answered() == self.total
    }

    /// Number of words answered so far.
    pub fn answered(&self) -> u32 {
        self.correct + self.incorrect
    }

    /// Counts so far; final once the session is complete.
    pub fn summary(&self) -> QuizSummary {
        QuizSummary {
            correct: self.correct,
            incorrect: self.incorrect,
            total: self.total,
        }
    }

    /// Check that the current word may be pronounced.
    pub fn can_speak(&self) -> Result<&VocabEntry, QuizError> {
        match self.state() {
            QuizState::Presenting {
                entry,
                revealed: false,
            } => Ok(entry),
            QuizState::Presenting { revealed: true, .. } => Err(QuizError::DefinitionShown),
            QuizState::Complete(_) => Err(QuizError::Finished),
        }
    }

    /// Show the definition of the current word.
    pub fn reveal(&mut self) -> Result<(), QuizError> {
        self.can_speak()?;
        self.revealed = true;
        Ok(())
    }

    /// Grade the current word and move on.
    pub fn answer(&mut self, known: bool) -> Result<Advance, QuizError> {
        if self.is_complete() {
            return Err(QuizError::Finished);
        }
        if !self.revealed {
            return Err(QuizError::DefinitionHidden);
        }

        if known {
            self.correct += 1;
        } else {
            self.incorrect += 1;
        }
        self.revealed = false;

        if self.is_complete() {
            Ok(Advance::Complete(self.summary()))
        } else {
            self.index += 1;
            Ok(Advance::Next)
        }
    }
}
