//! Vocabulary file parser.
//!
//! The format is line-oriented:
//!
//! ```text
//! [TopicName]
//! word|definition|example
//! word2|definition2
//! ```
//!
//! A `[name]` line sets the topic for the lines that follow. Other lines are
//! split on `|` into word, definition and an optional example. Lines without
//! a word or a definition are skipped. There is no escaping for `|` or
//! brackets inside fields.

use std::collections::HashSet;

use crate::model::VocabEntry;

/// Topic assigned to entries that appear before any `[topic]` line.
pub const DEFAULT_TOPIC: &str = "Uncategorized";

/// Relative path of the vocabulary file for a language and level.
pub fn vocab_path(lang: &str, level: &str) -> String {
    format!("{lang}/{level}.dat")
}

/// Parse raw vocabulary text into entries, in file order.
pub fn parse_vocab(raw: &str) -> Vec<VocabEntry> {
    let mut entries = Vec::new();
    let mut current_topic = DEFAULT_TOPIC.to_string();

    for line in raw.split('\n').map(str::trim).filter(|l| !l.is_empty()) {
        if let Some(topic) = topic_header(line) {
            current_topic = topic.to_string();
            continue;
        }
        if let Some(entry) = parse_entry(line, &current_topic) {
            entries.push(entry);
        }
    }

    entries
}

/// Returns the topic name if `line` is a `[name]` header.
fn topic_header(line: &str) -> Option<&str> {
    let inner = line.strip_prefix('[')?.strip_suffix(']')?;
    if inner.contains(['[', ']']) {
        return None;
    }
    Some(inner)
}

fn parse_entry(line: &str, topic: &str) -> Option<VocabEntry> {
    let mut fields = line.split('|').map(str::trim);
    let word = fields.next().unwrap_or_default();
    let definition = fields.next().unwrap_or_default();
    let example = fields.next().unwrap_or_default();

    if word.is_empty() || definition.is_empty() {
        return None;
    }

    Some(VocabEntry {
        word: word.to_string(),
        definition: definition.to_string(),
        example: example.to_string(),
        topic: topic.to_string(),
    })
}

/// A warning from vocabulary validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationWarning {
    /// 1-based line number in the raw text.
    pub line: usize,
    /// Warning message.
    pub message: String,
}

/// Report lines the parser would drop or that look suspicious.
///
/// Validation never changes what [`parse_vocab`] returns.
pub fn validate_vocab(raw: &str) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();
    let mut current_topic = DEFAULT_TOPIC.to_string();
    let mut header_line: Option<usize> = None;
    let mut topic_entries = 0usize;
    let mut seen_words: HashSet<(String, String)> = HashSet::new();

    for (idx, line) in raw.split('\n').enumerate() {
        let line_no = idx + 1;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(topic) = topic_header(line) {
            if let Some(prev) = header_line {
                if topic_entries == 0 {
                    warnings.push(ValidationWarning {
                        line: prev,
                        message: format!("topic [{current_topic}] has no entries"),
                    });
                }
            }
            current_topic = topic.to_string();
            header_line = Some(line_no);
            topic_entries = 0;
            continue;
        }

        let malformed_header = line.starts_with('[') && line.ends_with(']');
        if malformed_header {
            warnings.push(ValidationWarning {
                line: line_no,
                message: format!("malformed topic header: {line}"),
            });
        }

        match parse_entry(line, &current_topic) {
            Some(entry) => {
                topic_entries += 1;
                let key = (entry.topic.clone(), entry.word.to_lowercase());
                if !seen_words.insert(key) {
                    warnings.push(ValidationWarning {
                        line: line_no,
                        message: format!(
                            "duplicate word '{}' in topic [{}]",
                            entry.word, entry.topic
                        ),
                    });
                }
            }
            None if malformed_header => {}
            None => {
                let reason = if line.split('|').next().unwrap_or_default().trim().is_empty() {
                    "missing word"
                } else {
                    "missing definition"
                };
                warnings.push(ValidationWarning {
                    line: line_no,
                    message: format!("line skipped: {reason}"),
                });
            }
        }
    }

    if let Some(prev) = header_line {
        if topic_entries == 0 {
            warnings.push(ValidationWarning {
                line: prev,
                message: format!("topic [{current_topic}] has no entries"),
            });
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
[Food]
appel|apple|Ik eet een appel
banaan|banana

[Travel]
trein | train | De trein is laat
";

    #[test]
    fn parse_topic_blocks() {
        let entries = parse_vocab("[Food]\napple|a fruit|I eat an apple\nbanana|a fruit");
        assert_eq!(entries.len(), 2);
        assert!(entries.iter().all(|e| e.topic == "Food"));
        assert_eq!(entries[0].example, "I eat an apple");
        assert_eq!(entries[1].example, "");
        assert!(!entries[1].has_example());
    }

    #[test]
    fn entries_before_header_are_uncategorized() {
        let entries = parse_vocab("hallo|hello\n[Greetings]\ndag|bye");
        assert_eq!(entries[0].topic, DEFAULT_TOPIC);
        assert_eq!(entries[0].word, "hallo");
        assert_eq!(entries[1].topic, "Greetings");
    }

    #[test]
    fn empty_definition_is_dropped() {
        let entries = parse_vocab("[Food]\nword|\n|definition\nlonely\nkaas|cheese");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].word, "kaas");
    }

    #[test]
    fn fields_are_trimmed() {
        let entries = parse_vocab(SAMPLE);
        let trein = entries.iter().find(|e| e.word == "trein").unwrap();
        assert_eq!(trein.definition, "train");
        assert_eq!(trein.example, "De trein is laat");
        assert_eq!(trein.topic, "Travel");
    }

    #[test]
    fn extra_fields_are_ignored() {
        let entries = parse_vocab("a|b|c|d|e");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].example, "c");
    }

    #[test]
    fn crlf_and_blank_lines() {
        let entries = parse_vocab("[Home]\r\n\r\n   \r\nhuis|house\r\n");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].topic, "Home");
        assert_eq!(entries[0].definition, "house");
    }

    #[test]
    fn nested_brackets_are_not_a_header() {
        let entries = parse_vocab("[Food]\n[a[b]]\nkaas|cheese");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].topic, "Food");
    }

    #[test]
    fn header_with_spaces_keeps_inner_text() {
        let entries = parse_vocab("  [Daily Life]  \nwerk|work");
        assert_eq!(entries[0].topic, "Daily Life");
    }

    #[test]
    fn vocab_path_layout() {
        assert_eq!(vocab_path("nederlands", "B1"), "nederlands/B1.dat");
    }

    #[test]
    fn validate_clean_file() {
        assert!(validate_vocab(SAMPLE).is_empty());
    }

    #[test]
    fn validate_reports_dropped_lines() {
        let raw = "[Food]\nkaas|cheese\nbrood|\n|milk";
        let warnings = validate_vocab(raw);
        assert_eq!(warnings.len(), 2);
        assert_eq!(warnings[0].line, 3);
        assert!(warnings[0].message.contains("missing definition"));
        assert_eq!(warnings[1].line, 4);
        assert!(warnings[1].message.contains("missing word"));
    }

    #[test]
    fn validate_reports_duplicates_and_empty_topics() {
        let raw = "[Empty]\n[Food]\nkaas|cheese\nKaas|cheese again\n[Bad[x]]";
        let warnings = validate_vocab(raw);
        assert!(warnings
            .iter()
            .any(|w| w.line == 1 && w.message.contains("[Empty] has no entries")));
        assert!(warnings
            .iter()
            .any(|w| w.line == 4 && w.message.contains("duplicate word")));
        assert!(warnings
            .iter()
            .any(|w| w.line == 5 && w.message.contains("malformed topic header")));
    }

    #[test]
    fn validate_checks_malformed_header_kept_as_entry() {
        let raw = "[Food]\n[x|y[z]]\n[x|again]]";
        let entries = parse_vocab(raw);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].word, "[x");

        let warnings = validate_vocab(raw);
        assert_eq!(warnings.len(), 3);
        assert!(warnings[0].message.contains("malformed topic header"));
        assert_eq!(warnings[1].line, 3);
        assert!(warnings[1].message.contains("malformed topic header"));
        assert_eq!(warnings[2].line, 3);
        assert!(warnings[2].message.contains("duplicate word '[x'"));
    }

    #[test]
    fn malformed_header_entry_counts_toward_topic() {
        let warnings = validate_vocab("[Food]\n[x|y[z]]\n[Drinks]\nmelk|milk");
        assert!(!warnings.iter().any(|w| w.message.contains("no entries")));
    }
}
