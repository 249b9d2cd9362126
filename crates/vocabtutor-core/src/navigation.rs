//! Top-level screen state machine.
//!
//! ```text
//! SelectLanguage -> Loading -> SelectTopic <-> Quiz -> Results
//!                          \-> LoadFailed -> SelectLanguage
//! ```
//!
//! Every user action goes through [`Navigator::dispatch`]. Actions that make
//! no sense on the current screen are rejected with
//! [`NavigationError::InvalidAction`] and leave the screen untouched.

use std::sync::Arc;

use thiserror::Error;

use crate::error::LoadError;
use crate::model::{QuizSummary, ScoreRecord, Selection, Vocabulary};
use crate::quiz::{Advance, QuizError, QuizSession};
use crate::scores::ScoreStore;
use crate::source::load_vocabulary;
use crate::traits::{Pronunciation, VocabSource};

/// Errors from dispatching an action.
#[derive(Debug, Error)]
pub enum NavigationError {
    #[error("'{action}' is not available on the {screen} screen")]
    InvalidAction {
        action: &'static str,
        screen: &'static str,
    },

    #[error("unknown topic: {0}")]
    UnknownTopic(String),

    #[error(transparent)]
    Quiz(#[from] QuizError),
}

/// A user action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    ChooseLanguage(Selection),
    ChooseTopic(String),
    Speak,
    Reveal,
    Answer { known: bool },
    /// Run the finished topic again with a fresh shuffle.
    Retry,
    BackToTopics,
    ChangeLanguage,
}

impl Action {
    fn name(&self) -> &'static str {
        match self {
            Action::ChooseLanguage(_) => "choose language",
            Action::ChooseTopic(_) => "choose topic",
            Action::Speak => "speak",
            Action::Reveal => "reveal",
            Action::Answer { .. } => "answer",
            Action::Retry => "retry",
            Action::BackToTopics => "back to topics",
            Action::ChangeLanguage => "change language",
        }
    }
}

/// A topic as listed on the topic screen.
#[derive(Debug, Clone)]
pub struct TopicStatus {
    pub name: String,
    pub word_count: usize,
    /// Last stored result for this topic, if any.
    pub score: Option<ScoreRecord>,
}

#[derive(Debug, Clone)]
pub struct TopicMenu {
    pub selection: Selection,
    pub vocabulary: Arc<Vocabulary>,
    pub topics: Vec<TopicStatus>,
    /// Result of the quiz the user just came back from.
    pub last_result: Option<QuizSummary>,
}

#[derive(Debug, Clone)]
pub struct ActiveQuiz {
    pub selection: Selection,
    pub vocabulary: Arc<Vocabulary>,
    pub session: QuizSession,
}

#[derive(Debug, Clone)]
pub struct QuizResults {
    pub selection: Selection,
    pub vocabulary: Arc<Vocabulary>,
    pub topic: String,
    pub summary: QuizSummary,
    /// The stored record, or `None` if persisting it failed.
    pub record: Option<ScoreRecord>,
}

/// What the user is looking at.
#[derive(Debug, Clone)]
pub enum Screen {
    SelectLanguage,
    Loading(Selection),
    LoadFailed { selection: Selection, error: LoadError },
    SelectTopic(TopicMenu),
    Quiz(ActiveQuiz),
    Results(QuizResults),
}

impl Screen {
    pub fn name(&self) -> &'static str {
        match self {
            Screen::SelectLanguage => "language selection",
            Screen::Loading(_) => "loading",
            Screen::LoadFailed { .. } => "load error",
            Screen::SelectTopic(_) => "topic selection",
            Screen::Quiz(_) => "quiz",
            Screen::Results(_) => "results",
        }
    }
}

/// Drives the screen state machine.
pub struct Navigator {
    source: Arc<dyn VocabSource>,
    scores: ScoreStore,
    speech: Arc<dyn Pronunciation>,
    screen: Screen,
}

impl Navigator {
    pub fn new(
        source: Arc<dyn VocabSource>,
        scores: ScoreStore,
        speech: Arc<dyn Pronunciation>,
    ) -> Self {
        Self {
            source,
            scores,
            speech,
            screen: Screen::SelectLanguage,
        }
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn scores(&self) -> &ScoreStore {
        &self.scores
    }

    /// Apply one action and return the resulting screen.
    pub async fn dispatch(&mut self, action: Action) -> Result<&Screen, NavigationError> {
        let name = action.name();
        match action {
            Action::ChooseLanguage(selection) => self.choose_language(selection).await?,
            Action::ChooseTopic(topic) => self.choose_topic(&topic)?,
            Action::Speak => self.speak()?,
            Action::Reveal => self.reveal()?,
            Action::Answer { known } => self.answer(known)?,
            Action::Retry => self.retry()?,
            Action::BackToTopics => self.back_to_topics()?,
            Action::ChangeLanguage => self.change_language(name)?,
        }
        Ok(&self.screen)
    }

    fn invalid(&self, action: &'static str) -> NavigationError {
        NavigationError::InvalidAction {
            action,
            screen: self.screen.name(),
        }
    }

    async fn choose_language(&mut self, selection: Selection) -> Result<(), NavigationError> {
        if !matches!(self.screen, Screen::SelectLanguage) {
            return Err(self.invalid("choose language"));
        }

        self.screen = Screen::Loading(selection);
        let loaded = load_vocabulary(
            self.source.as_ref(),
            selection.language.id(),
            selection.level.as_str(),
        )
        .await;

        self.screen = match loaded {
            Ok(vocabulary) => {
                Screen::SelectTopic(self.topic_menu(selection, Arc::new(vocabulary), None))
            }
            Err(error) => {
                tracing::error!("{error}");
                Screen::LoadFailed { selection, error }
            }
        };
        Ok(())
    }

    fn choose_topic(&mut self, topic: &str) -> Result<(), NavigationError> {
        let Screen::SelectTopic(menu) = &self.screen else {
            return Err(self.invalid("choose topic"));
        };
        let selection = menu.selection;
        let vocabulary = Arc::clone(&menu.vocabulary);
        self.start_quiz(selection, vocabulary, topic)
    }

    fn speak(&self) -> Result<(), NavigationError> {
        let Screen::Quiz(quiz) = &self.screen else {
            return Err(self.invalid("speak"));
        };
        let entry = quiz.session.can_speak()?;
        self.speech.speak(&entry.word, quiz.selection.language);
        Ok(())
    }

    fn reveal(&mut self) -> Result<(), NavigationError> {
        match &mut self.screen {
            Screen::Quiz(quiz) => Ok(quiz.session.reveal()?),
            _ => Err(self.invalid("reveal")),
        }
    }

    fn answer(&mut self, known: bool) -> Result<(), NavigationError> {
        let Screen::Quiz(quiz) = &mut self.screen else {
            return Err(self.invalid("answer"));
        };
        match quiz.session.answer(known)? {
            Advance::Next => Ok(()),
            Advance::Complete(summary) => {
                let selection = quiz.selection;
                let vocabulary = Arc::clone(&quiz.vocabulary);
                let topic = quiz.session.topic().to_string();
                self.screen = Screen::Results(self.finish(selection, vocabulary, topic, summary));
                Ok(())
            }
        }
    }

    fn retry(&mut self) -> Result<(), NavigationError> {
        let Screen::Results(results) = &self.screen else {
            return Err(self.invalid("retry"));
        };
        let selection = results.selection;
        let vocabulary = Arc::clone(&results.vocabulary);
        let topic = results.topic.clone();
        self.start_quiz(selection, vocabulary, &topic)
    }

    fn back_to_topics(&mut self) -> Result<(), NavigationError> {
        let (selection, vocabulary, last_result) = match &self.screen {
            // Abandoning a quiz discards it without saving.
            Screen::Quiz(quiz) => (quiz.selection, Arc::clone(&quiz.vocabulary), None),
            Screen::Results(results) => (
                results.selection,
                Arc::clone(&results.vocabulary),
                Some(results.summary),
            ),
            _ => return Err(self.invalid("back to topics")),
        };
        self.screen = Screen::SelectTopic(self.topic_menu(selection, vocabulary, last_result));
        Ok(())
    }

    fn change_language(&mut self, action: &'static str) -> Result<(), NavigationError> {
        match self.screen {
            Screen::SelectTopic(_)
            | Screen::Quiz(_)
            | Screen::Results(_)
            | Screen::LoadFailed { .. } => {
                self.screen = Screen::SelectLanguage;
                Ok(())
            }
            Screen::SelectLanguage | Screen::Loading(_) => Err(self.invalid(action)),
        }
    }

    fn start_quiz(
        &mut self,
        selection: Selection,
        vocabulary: Arc<Vocabulary>,
        topic: &str,
    ) -> Result<(), NavigationError> {
        if !vocabulary.has_topic(topic) {
            return Err(NavigationError::UnknownTopic(topic.to_string()));
        }

        let session = QuizSession::start(&vocabulary, topic);
        self.screen = if session.is_complete() {
            let summary = session.summary();
            Screen::Results(self.finish(selection, vocabulary, topic.to_string(), summary))
        } else {
            Screen::Quiz(ActiveQuiz {
                selection,
                vocabulary,
                session,
            })
        };
        Ok(())
    }

    fn finish(
        &self,
        selection: Selection,
        vocabulary: Arc<Vocabulary>,
        topic: String,
        summary: QuizSummary,
    ) -> QuizResults {
        let record = self.scores.save(
            selection.language.id(),
            selection.level.as_str(),
            &topic,
            summary.correct,
            summary.incorrect,
            summary.total,
        );
        QuizResults {
            selection,
            vocabulary,
            topic,
            summary,
            record,
        }
    }

    fn topic_menu(
        &self,
        selection: Selection,
        vocabulary: Arc<Vocabulary>,
        last_result: Option<QuizSummary>,
    ) -> TopicMenu {
        let scores = self
            .scores
            .get_level_scores(selection.language.id(), selection.level.as_str());
        let topics = vocabulary
            .topics()
            .into_iter()
            .map(|name| TopicStatus {
                word_count: vocabulary.entries_for(&name).len(),
                score: scores.iter().find(|s| s.topic == name).cloned(),
                name,
            })
            .collect();
        TopicMenu {
            selection,
            vocabulary,
            topics,
            last_result,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Language, Level};
    use crate::source::StaticSource;
    use crate::store::MemoryStore;
    use std::sync::Mutex;

    const B1: &str = "\
[Food]
appel|apple|Ik eet een appel
brood|bread
kaas|cheese
[Travel]
trein|train
";

    #[derive(Default)]
    struct RecordingSpeech {
        spoken: Mutex<Vec<(String, Language)>>,
    }

    impl Pronunciation for RecordingSpeech {
        fn speak(&self, word: &str, language: Language) {
            self.spoken
                .lock()
                .unwrap()
                .push((word.to_string(), language));
        }
    }

    struct Harness {
        nav: Navigator,
        backing: Arc<MemoryStore>,
        speech: Arc<RecordingSpeech>,
    }

    fn harness() -> Harness {
        let source = StaticSource::new().with_file("nederlands", "B1", B1);
        let backing = Arc::new(MemoryStore::new());
        let speech = Arc::new(RecordingSpeech::default());
        let nav = Navigator::new(
            Arc::new(source),
            ScoreStore::new(backing.clone()),
            speech.clone(),
        );
        Harness {
            nav,
            backing,
            speech,
        }
    }

    fn dutch_b1() -> Selection {
        Selection {
            language: Language::Dutch,
            level: Level::B1,
        }
    }

    async fn finish_topic(nav: &mut Navigator, topic: &str, known: bool) {
        nav.dispatch(Action::ChooseTopic(topic.into())).await.unwrap();
        while matches!(nav.screen(), Screen::Quiz(_)) {
            nav.dispatch(Action::Reveal).await.unwrap();
            nav.dispatch(Action::Answer { known }).await.unwrap();
        }
    }

    #[tokio::test]
    async fn language_selection_lists_topics() {
        let mut h = harness();
        let screen = h
            .nav
            .dispatch(Action::ChooseLanguage(dutch_b1()))
            .await
            .unwrap();
        let Screen::SelectTopic(menu) = screen else {
            panic!("expected topic selection, got {}", screen.name());
        };
        let names: Vec<&str> = menu.topics.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Food", "Travel"]);
        assert_eq!(menu.topics[0].word_count, 3);
        assert!(menu.topics[0].score.is_none());
        assert!(menu.last_result.is_none());
    }

    #[tokio::test]
    async fn load_failure_routes_to_error_screen() {
        let mut h = harness();
        let selection = Selection {
            language: Language::French,
            level: Level::C1,
        };
        let screen = h
            .nav
            .dispatch(Action::ChooseLanguage(selection))
            .await
            .unwrap();
        let Screen::LoadFailed { error, .. } = screen else {
            panic!("expected load error screen");
        };
        assert_eq!(error.path(), "francais/C1.dat");

        // The only way out is back to language selection.
        assert!(h.nav.dispatch(Action::BackToTopics).await.is_err());
        h.nav.dispatch(Action::ChangeLanguage).await.unwrap();
        assert!(matches!(h.nav.screen(), Screen::SelectLanguage));
    }

    #[tokio::test]
    async fn full_quiz_saves_score_and_shows_results() {
        let mut h = harness();
        h.nav
            .dispatch(Action::ChooseLanguage(dutch_b1()))
            .await
            .unwrap();
        finish_topic(&mut h.nav, "Food", true).await;

        let Screen::Results(results) = h.nav.screen() else {
            panic!("expected results");
        };
        assert_eq!(results.topic, "Food");
        assert_eq!(
            results.summary,
            QuizSummary {
                correct: 3,
                incorrect: 0,
                total: 3
            }
        );
        assert_eq!(results.record.as_ref().unwrap().accuracy, 100);

        let stored = h
            .nav
            .scores()
            .get_topic_score("nederlands", "B1", "Food")
            .unwrap();
        assert_eq!(stored.correct, 3);
    }

    #[tokio::test]
    async fn back_to_topics_carries_result_and_score() {
        let mut h = harness();
        h.nav
            .dispatch(Action::ChooseLanguage(dutch_b1()))
            .await
            .unwrap();
        finish_topic(&mut h.nav, "Travel", false).await;

        let screen = h.nav.dispatch(Action::BackToTopics).await.unwrap();
        let Screen::SelectTopic(menu) = screen else {
            panic!("expected topic selection");
        };
        assert_eq!(menu.last_result.unwrap().incorrect, 1);
        let travel = menu.topics.iter().find(|t| t.name == "Travel").unwrap();
        assert_eq!(travel.score.as_ref().unwrap().accuracy, 0);
    }

    #[tokio::test]
    async fn storage_failure_still_reaches_results() {
        let mut h = harness();
        h.backing.fail_writes(true);
        h.nav
            .dispatch(Action::ChooseLanguage(dutch_b1()))
            .await
            .unwrap();
        finish_topic(&mut h.nav, "Travel", true).await;

        let Screen::Results(results) = h.nav.screen() else {
            panic!("expected results");
        };
        assert!(results.record.is_none());
        assert_eq!(results.summary.correct, 1);
    }

    #[tokio::test]
    async fn speak_only_before_reveal() {
        let mut h = harness();
        h.nav
            .dispatch(Action::ChooseLanguage(dutch_b1()))
            .await
            .unwrap();
        h.nav
            .dispatch(Action::ChooseTopic("Travel".into()))
            .await
            .unwrap();

        h.nav.dispatch(Action::Speak).await.unwrap();
        h.nav.dispatch(Action::Speak).await.unwrap();
        {
            let spoken = h.speech.spoken.lock().unwrap();
            assert_eq!(spoken.len(), 2);
            assert_eq!(spoken[0], ("trein".to_string(), Language::Dutch));
        }

        h.nav.dispatch(Action::Reveal).await.unwrap();
        let err = h.nav.dispatch(Action::Speak).await.unwrap_err();
        assert!(matches!(
            err,
            NavigationError::Quiz(QuizError::DefinitionShown)
        ));
    }

    #[tokio::test]
    async fn abandoning_quiz_does_not_save() {
        let mut h = harness();
        h.nav
            .dispatch(Action::ChooseLanguage(dutch_b1()))
            .await
            .unwrap();
        h.nav
            .dispatch(Action::ChooseTopic("Food".into()))
            .await
            .unwrap();
        h.nav.dispatch(Action::Reveal).await.unwrap();
        h.nav
            .dispatch(Action::Answer { known: true })
            .await
            .unwrap();

        let screen = h.nav.dispatch(Action::BackToTopics).await.unwrap();
        let Screen::SelectTopic(menu) = screen else {
            panic!("expected topic selection");
        };
        assert!(menu.last_result.is_none());
        assert!(h.nav.scores().get_all().is_empty());
    }

    #[tokio::test]
    async fn retry_restarts_same_topic() {
        let mut h = harness();
        h.nav
            .dispatch(Action::ChooseLanguage(dutch_b1()))
            .await
            .unwrap();
        finish_topic(&mut h.nav, "Food", false).await;

        let screen = h.nav.dispatch(Action::Retry).await.unwrap();
        let Screen::Quiz(quiz) = screen else {
            panic!("expected quiz");
        };
        assert_eq!(quiz.session.topic(), "Food");
        assert_eq!(quiz.session.answered(), 0);
        assert_eq!(quiz.session.summary().total, 3);
    }

    #[tokio::test]
    async fn unknown_topic_is_blocked() {
        let mut h = harness();
        h.nav
            .dispatch(Action::ChooseLanguage(dutch_b1()))
            .await
            .unwrap();
        let err = h
            .nav
            .dispatch(Action::ChooseTopic("Sports".into()))
            .await
            .unwrap_err();
        assert!(matches!(err, NavigationError::UnknownTopic(t) if t == "Sports"));
        assert!(matches!(h.nav.screen(), Screen::SelectTopic(_)));
    }

    #[tokio::test]
    async fn invalid_actions_leave_screen_unchanged() {
        let mut h = harness();
        let err = h.nav.dispatch(Action::Reveal).await.unwrap_err();
        assert!(matches!(
            err,
            NavigationError::InvalidAction {
                action: "reveal",
                screen: "language selection"
            }
        ));
        assert!(h.nav.dispatch(Action::ChangeLanguage).await.is_err());
        assert!(matches!(h.nav.screen(), Screen::SelectLanguage));

        h.nav
            .dispatch(Action::ChooseLanguage(dutch_b1()))
            .await
            .unwrap();
        assert!(h
            .nav
            .dispatch(Action::ChooseLanguage(dutch_b1()))
            .await
            .is_err());
        assert!(h.nav.dispatch(Action::Retry).await.is_err());
    }

    #[tokio::test]
    async fn change_language_resets_from_quiz() {
        let mut h = harness();
        h.nav
            .dispatch(Action::ChooseLanguage(dutch_b1()))
            .await
            .unwrap();
        h.nav
            .dispatch(Action::ChooseTopic("Food".into()))
            .await
            .unwrap();
        h.nav.dispatch(Action::ChangeLanguage).await.unwrap();
        assert!(matches!(h.nav.screen(), Screen::SelectLanguage));
    }
}
