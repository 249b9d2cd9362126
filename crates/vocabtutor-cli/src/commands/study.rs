//! The `vocabtutor study` command.
//!
//! A line-oriented front end over [`Navigator`]: every screen is rendered as
//! text, and each input line is mapped to one [`Action`].

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};

use vocabtutor_core::model::{Language, Level, Selection};
use vocabtutor_core::navigation::{Action, Navigator, Screen};
use vocabtutor_data::source_from_config;
use vocabtutor_speech::create_pronouncer;

pub async fn execute(
    config_path: Option<PathBuf>,
    lang: Option<Language>,
    level: Option<Level>,
) -> Result<()> {
    let config = super::load(config_path)?;
    let source = source_from_config(&config.data);
    let scores = super::open_scores(&config);
    let pronouncer = create_pronouncer(&config.speech).await;

    let mut nav = Navigator::new(source, scores, Arc::new(pronouncer));

    if let (Some(language), Some(level)) = (lang, level) {
        nav.dispatch(Action::ChooseLanguage(Selection { language, level }))
            .await?;
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        println!("\n{}", render(nav.screen()));
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await.context("failed to read input")? else {
            println!();
            break;
        };

        match parse_input(nav.screen(), &line) {
            Input::Quit => break,
            Input::Help => println!("{}", help(nav.screen())),
            Input::Unrecognized(hint) => println!("{hint}"),
            Input::Act(action) => {
                if let Err(e) = nav.dispatch(action).await {
                    println!("{e}");
                }
            }
        }
    }

    Ok(())
}

/// What an input line means on the current screen.
#[derive(Debug, PartialEq, Eq)]
enum Input {
    Act(Action),
    Help,
    Quit,
    Unrecognized(&'static str),
}

/// Every language/level pair, in menu order.
fn selections() -> Vec<Selection> {
    Language::ALL
        .iter()
        .flat_map(|&language| Level::ALL.iter().map(move |&level| Selection { language, level }))
        .collect()
}

/// A menu number (`3`) or a language and level (`nl B1`).
fn parse_selection(input: &str) -> Option<Selection> {
    if let Ok(n) = input.parse::<usize>() {
        return n.checked_sub(1).and_then(|i| selections().get(i).copied());
    }
    let mut parts = input.split_whitespace();
    let language = parts.next()?.parse().ok()?;
    let level = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some(Selection { language, level })
}

fn parse_input(screen: &Screen, line: &str) -> Input {
    let input = line.trim();
    let key = input.to_lowercase();

    match key.as_str() {
        "q" | "quit" => return Input::Quit,
        "?" | "h" | "help" => return Input::Help,
        _ => {}
    }

    match screen {
        Screen::SelectLanguage => match parse_selection(input) {
            Some(selection) => Input::Act(Action::ChooseLanguage(selection)),
            None => Input::Unrecognized(
                "Enter a number from the list, or a language and level such as 'nl B1'.",
            ),
        },
        Screen::Loading(_) => Input::Unrecognized("Still loading."),
        Screen::LoadFailed { .. } => match key.as_str() {
            "" | "l" => Input::Act(Action::ChangeLanguage),
            _ => Input::Unrecognized("Press enter to choose another language."),
        },
        Screen::SelectTopic(menu) => {
            if key == "l" {
                return Input::Act(Action::ChangeLanguage);
            }
            if input.is_empty() {
                return Input::Unrecognized("Enter a topic number or name.");
            }
            let by_number = input
                .parse::<usize>()
                .ok()
                .and_then(|n| n.checked_sub(1))
                .and_then(|i| menu.topics.get(i));
            let by_name = menu.topics.iter().find(|t| t.name.to_lowercase() == key);
            let topic = by_number
                .or(by_name)
                .map(|t| t.name.clone())
                .unwrap_or_else(|| input.to_string());
            Input::Act(Action::ChooseTopic(topic))
        }
        Screen::Quiz(quiz) => match key.as_str() {
            "" if !quiz.session.is_revealed() => Input::Act(Action::Reveal),
            "r" => Input::Act(Action::Reveal),
            "s" => Input::Act(Action::Speak),
            "y" | "k" => Input::Act(Action::Answer { known: true }),
            "n" | "u" => Input::Act(Action::Answer { known: false }),
            "t" => Input::Act(Action::BackToTopics),
            "l" => Input::Act(Action::ChangeLanguage),
            _ if quiz.session.is_revealed() => {
                Input::Unrecognized("Did you know it? [y]es or [n]o.")
            }
            _ => Input::Unrecognized("Press enter to reveal, or [s] to hear the word."),
        },
        Screen::Results(_) => match key.as_str() {
            "r" => Input::Act(Action::Retry),
            "" | "t" => Input::Act(Action::BackToTopics),
            "l" => Input::Act(Action::ChangeLanguage),
            _ => Input::Unrecognized("[r] retry, [t] topics or [l] change language."),
        },
    }
}

fn render(screen: &Screen) -> String {
    let mut out = String::new();

    match screen {
        Screen::SelectLanguage => {
            out.push_str("Choose a language and level:\n");
            for (i, selection) in selections().iter().enumerate() {
                out.push_str(&format!("  {}) {selection}\n", i + 1));
            }
            out.push_str("[q] quit");
        }
        Screen::Loading(selection) => {
            out.push_str(&format!("Loading {selection}..."));
        }
        Screen::LoadFailed { selection, error } => {
            out.push_str(&format!("Could not load vocabulary file for {selection}.\n"));
            out.push_str(&format!("  {error}\n"));
            out.push_str("[enter] choose another language  [q] quit");
        }
        Screen::SelectTopic(menu) => {
            out.push_str(&format!("{} - choose a topic\n", menu.selection));
            if let Some(last) = &menu.last_result {
                out.push_str(&format!(
                    "Last quiz: {}/{} correct ({}%)\n",
                    last.correct,
                    last.total,
                    last.accuracy()
                ));
            }
            for (i, topic) in menu.topics.iter().enumerate() {
                out.push_str(&format!(
                    "  {}) {} - {} words",
                    i + 1,
                    topic.name,
                    topic.word_count
                ));
                if let Some(score) = &topic.score {
                    out.push_str(&format!(" - last {}% ({})", score.accuracy, score.date));
                }
                out.push('\n');
            }
            out.push_str("[l] change language  [q] quit");
        }
        Screen::Quiz(quiz) => {
            let session = &quiz.session;
            let summary = session.summary();
            out.push_str(&format!(
                "{} ({})  word {}/{}  correct {}  incorrect {}\n\n",
                session.topic(),
                quiz.selection,
                (session.answered() + 1).min(summary.total),
                summary.total,
                summary.correct,
                summary.incorrect
            ));
            if let Some(entry) = session.current() {
                out.push_str(&format!("  {}\n", entry.word));
                if session.is_revealed() {
                    out.push_str(&format!("  = {}\n", entry.definition));
                    if entry.has_example() {
                        out.push_str(&format!("  \"{}\"\n", entry.example));
                    }
                }
            }
            out.push('\n');
            if session.is_revealed() {
                out.push_str("[y] knew it  [n] didn't know  [t] topics  [q] quit");
            } else {
                out.push_str("[enter] reveal  [s] speak  [t] topics  [q] quit");
            }
        }
        Screen::Results(results) => {
            out.push_str(&format!(
                "Quiz complete: {} ({})\n",
                results.topic, results.selection
            ));
            out.push_str(&format!(
                "  Correct: {}  Incorrect: {}  Total: {}  Accuracy: {}%\n",
                results.summary.correct,
                results.summary.incorrect,
                results.summary.total,
                results.summary.accuracy()
            ));
            if results.record.is_none() {
                out.push_str("  (score could not be saved)\n");
            }
            out.push_str("[r] retry  [t] topics  [l] change language  [q] quit");
        }
    }

    out
}

fn help(screen: &Screen) -> &'static str {
    match screen {
        Screen::SelectLanguage => "Type a menu number, or a language and level such as 'francais B2'.",
        Screen::Loading(_) => "Waiting for the vocabulary file.",
        Screen::LoadFailed { .. } => "Press enter to go back to language selection.",
        Screen::SelectTopic(_) => "Type a topic number or name, or [l] to change language.",
        Screen::Quiz(_) => {
            "enter/r: reveal  s: speak  y/k: knew it  n/u: didn't know  t: back to topics  l: change language"
        }
        Screen::Results(_) => "r: retry this topic  enter/t: back to topics  l: change language",
    }
}
