//! Per-topic score persistence.
//!
//! All records live in one serialized map under [`SCORES_KEY`], keyed by
//! `"<lang>__<level>__<topic>"`. Storage is advisory: every failure is logged
//! and degraded (reads return nothing, writes do nothing) so quizzes keep
//! working without persistence.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{Local, Utc};

use crate::error::StorageError;
use crate::model::{accuracy, ScoreRecord};
use crate::traits::KeyValueStore;

/// Storage key holding the whole score map.
pub const SCORES_KEY: &str = "vocab_tutor_scores";

/// All stored records keyed by composite topic key.
pub type ScoreMap = BTreeMap<String, ScoreRecord>;

/// Composite key for one (lang, level, topic) triple.
pub fn topic_key(lang: &str, level: &str, topic: &str) -> String {
    format!("{lang}__{level}__{topic}")
}

/// Best-effort score repository over a [`KeyValueStore`].
#[derive(Clone)]
pub struct ScoreStore {
    store: Arc<dyn KeyValueStore>,
}

impl ScoreStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Record a finished quiz, replacing any earlier record for the topic.
    ///
    /// Returns `None` if the record could not be persisted. Nothing is
    /// written when the existing records cannot be read.
    pub fn save(
        &self,
        lang: &str,
        level: &str,
        topic: &str,
        correct: u32,
        incorrect: u32,
        total: u32,
    ) -> Option<ScoreRecord> {
        let record = ScoreRecord {
            lang: lang.to_string(),
            level: level.to_string(),
            topic: topic.to_string(),
            correct,
            incorrect,
            total,
            accuracy: accuracy(correct, total),
            timestamp: Utc::now(),
            date: Local::now().format("%Y-%m-%d").to_string(),
        };

        // Corrupt data is replaced; an unreadable store is left untouched.
        let mut scores = match self.read() {
            Ok(scores) => scores,
            Err(e @ StorageError::Corrupt(_)) => {
                tracing::error!("error reading scores, replacing them: {e}");
                ScoreMap::new()
            }
            Err(e) => {
                tracing::error!("error reading scores, not saving {lang}/{level}/{topic}: {e}");
                return None;
            }
        };
        scores.insert(topic_key(lang, level, topic), record.clone());

        match self.write(&scores) {
            Ok(()) => Some(record),
            Err(e) => {
                tracing::error!("error saving score for {lang}/{level}/{topic}: {e}");
                None
            }
        }
    }

    pub fn get_topic_score(&self, lang: &str, level: &str, topic: &str) -> Option<ScoreRecord> {
        self.get_all().remove(&topic_key(lang, level, topic))
    }

    /// Records for one language and level, in key order.
    pub fn get_level_scores(&self, lang: &str, level: &str) -> Vec<ScoreRecord> {
        self.get_all()
            .into_values()
            .filter(|s| s.lang == lang && s.level == level)
            .collect()
    }

    /// Every stored record. Empty if storage is unreadable or corrupted.
    pub fn get_all(&self) -> ScoreMap {
        match self.read() {
            Ok(scores) => scores,
            Err(e) => {
                tracing::error!("error reading scores: {e}");
                ScoreMap::new()
            }
        }
    }

    /// Remove every record.
    pub fn clear(&self) {
        if let Err(e) = self.store.remove(SCORES_KEY) {
            tracing::error!("error clearing scores: {e}");
        }
    }

    /// Pretty-printed JSON of every record, mirroring the stored map.
    pub fn export(&self) -> String {
        let scores = self.get_all();
        match serde_json::to_string_pretty(&scores) {
            Ok(json) => json,
            Err(e) => {
                tracing::error!("error exporting scores: {e}");
                "{}".to_string()
            }
        }
    }

    fn read(&self) -> Result<ScoreMap, StorageError> {
        match self.store.get(SCORES_KEY)? {
            Some(data) => {
                serde_json::from_str(&data).map_err(|e| StorageError::Corrupt(e.to_string()))
            }
            None => Ok(ScoreMap::new()),
        }
    }

    fn write(&self, scores: &ScoreMap) -> Result<(), StorageError> {
        let json = serde_json::to_string(scores)?;
        self.store.set(SCORES_KEY, &json)
    }
}
