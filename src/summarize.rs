//! Sentence-truncation summaries.

use once_cell::sync::Lazy;
use regex::Regex;

/// Default character budget for a summary.
pub const DEFAULT_MAX_CHARS: usize = 600;

/// Number of leading sentences kept.
pub const SUMMARY_SENTENCES: usize = 4;

static SENTENCE_BREAK: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.!?]\s+").expect("valid regex"));

/// Split text after `.`, `!` or `?` followed by whitespace.
///
/// The punctuation stays with the preceding sentence; the whitespace run is
/// dropped.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    for m in SENTENCE_BREAK.find_iter(text) {
        // punctuation is a single ASCII byte
        sentences.push(&text[start..m.start() + 1]);
        start = m.end();
    }
    sentences.push(&text[start..]);
    sentences
}

/// First four sentences of `text`, capped at `max_chars` characters.
///
/// Over-long results are cut to `max_chars - 1` characters plus `…`. A zero
/// budget yields an empty string.
pub fn summarize(text: &str, max_chars: usize) -> String {
    if max_chars == 0 {
        return String::new();
    }
    let short = split_sentences(text)
        .into_iter()
        .take(SUMMARY_SENTENCES)
        .collect::<Vec<_>>()
        .join(" ");
    let short = short.trim();

    if short.chars().count() > max_chars {
        let mut cut: String = short.chars().take(max_chars - 1).collect();
        cut.push('…');
        cut
    } else {
        short.to_string()
    }
}
