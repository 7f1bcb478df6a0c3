//! Pattern-based grammar and style checks.
//!
//! These are heuristics, not a grammar engine: legitimate emphasis such as
//! "no no" is reported like any other repeated word.

use prose_types::{GrammarReport, Issue};
use regex::{Regex, RegexBuilder};
use std::sync::LazyLock;

/// Hedging and filler words worth replacing with something stronger.
pub const WEAK_WORDS: &[&str] = &[
    "very", "really", "quite", "rather", "pretty", "kind of", "sort of", "basically",
    "actually", "just", "somewhat", "fairly", "almost", "seemingly", "literally", "totally",
    "absolutely", "completely", "entirely",
];

static WORD_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\w+").expect("valid regex"));

static WEAK_WORD_PATTERNS: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    WEAK_WORDS
        .iter()
        .map(|&word| {
            let pattern = RegexBuilder::new(&format!(r"\b{}\b", regex::escape(word)))
                .case_insensitive(true)
                .build()
                .expect("valid regex");
            (word, pattern)
        })
        .collect()
});

/// Run both scans. Never fails.
pub fn analyze_grammar(text: &str) -> GrammarReport {
    GrammarReport {
        issues: find_repeated_words(text)
            .into_iter()
            .map(|word| Issue::grammar(format!("Repeated word: \"{}\"", word)))
            .collect(),
        style_suggestions: find_weak_words(text)
            .into_iter()
            .map(|word| Issue::style(format!("Consider stronger alternative to \"{}\"", word)))
            .collect(),
    }
}

/// Words immediately followed by themselves ("the the"), case-insensitive.
///
/// Matches do not overlap: "the the the" yields a single match. The first
/// occurrence is returned as written.
pub fn find_repeated_words(text: &str) -> Vec<&str> {
    let runs: Vec<regex::Match<'_>> = WORD_RUN.find_iter(text).collect();
    let mut repeated = Vec::new();

    let mut i = 0;
    while i + 1 < runs.len() {
        let (first, second) = (runs[i], runs[i + 1]);
        let gap = &text[first.end()..second.start()];

        let adjacent = !gap.is_empty() && gap.chars().all(char::is_whitespace);
        if adjacent && first.as_str().to_lowercase() == second.as_str().to_lowercase() {
            repeated.push(first.as_str());
            i += 2;
        } else {
            i += 1;
        }
    }

    repeated
}

/// Distinct weak words present in the text, in list order.
pub fn find_weak_words(text: &str) -> Vec<&'static str> {
    WEAK_WORD_PATTERNS
        .iter()
        .filter(|(_, pattern)| pattern.is_match(text))
        .map(|(word, _)| *word)
        .collect()
}
