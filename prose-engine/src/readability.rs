//! Readability scoring.

use crate::round_to;
use crate::tokenize::{Tokenizer, UnicodeTokenizer};
use anyhow::{bail, Result};
use prose_types::{GradeLevel, ReadabilityLevel, ReadabilityReport};
use std::sync::Arc;
use tracing::warn;

/// Texts shorter than this (after trimming) are not scored.
pub const MIN_READABLE_CHARS: usize = 10;

/// Readability formulas estimating difficulty from sentence and word length.
pub trait ReadabilityFormula: Send + Sync {
    /// Reading-ease score; higher is easier.
    fn reading_ease(&self, text: &str) -> Result<f64>;

    /// US school grade level.
    fn grade_level(&self, text: &str) -> Result<f64>;
}

/// Flesch reading ease and Flesch-Kincaid grade level.
pub struct FleschFormula {
    tokenizer: Arc<dyn Tokenizer>,
}

/// Counts the formulas are computed from.
#[derive(Debug, Clone, Copy, PartialEq)]
struct TextCounts {
    words: usize,
    sentences: usize,
    syllables: usize,
}

impl TextCounts {
    fn words_per_sentence(&self) -> f64 {
        self.words as f64 / self.sentences as f64
    }

    fn syllables_per_word(&self) -> f64 {
        self.syllables as f64 / self.words as f64
    }
}

impl FleschFormula {
    pub fn new(tokenizer: Arc<dyn Tokenizer>) -> Self {
        Self { tokenizer }
    }

    fn counts(&self, text: &str) -> Result<TextCounts> {
        let words = self.tokenizer.alphabetic_words(text)?;
        if words.is_empty() {
            bail!("no words to score");
        }
        let sentences = self.tokenizer.sentence_split(text)?.len().max(1);
        let syllables = words.iter().map(|w| count_syllables(w)).sum();

        Ok(TextCounts {
            words: words.len(),
            sentences,
            syllables,
        })
    }
}

impl Default for FleschFormula {
    fn default() -> Self {
        Self::new(Arc::new(UnicodeTokenizer::new()))
    }
}

impl ReadabilityFormula for FleschFormula {
    fn reading_ease(&self, text: &str) -> Result<f64> {
        let counts = self.counts(text)?;
        Ok(206.835 - 1.015 * counts.words_per_sentence() - 84.6 * counts.syllables_per_word())
    }

    fn grade_level(&self, text: &str) -> Result<f64> {
        let counts = self.counts(text)?;
        Ok(0.39 * counts.words_per_sentence() + 11.8 * counts.syllables_per_word() - 15.59)
    }
}

/// Estimate syllables by counting vowel groups, with a silent-e adjustment.
pub fn count_syllables(word: &str) -> usize {
    let word = word.to_lowercase();
    let vowels = ['a', 'e', 'i', 'o', 'u', 'y'];

    let mut count = 0;
    let mut prev_was_vowel = false;

    for c in word.chars() {
        let is_vowel = vowels.contains(&c);
        if is_vowel && !prev_was_vowel {
            count += 1;
        }
        prev_was_vowel = is_vowel;
    }

    if word.ends_with('e') && count > 1 {
        count -= 1;
    }

    count.max(1)
}

/// Score a passage, absorbing formula failures into a sentinel report.
pub fn analyze_readability(formula: &dyn ReadabilityFormula, text: &str) -> ReadabilityReport {
    if text.trim().chars().count() < MIN_READABLE_CHARS {
        return ReadabilityReport::insufficient_text();
    }

    match try_analyze_readability(formula, text) {
        Ok(report) => report,
        Err(e) => {
            warn!("Readability analysis failed: {:#}", e);
            ReadabilityReport::analysis_failed()
        }
    }
}

fn try_analyze_readability(
    formula: &dyn ReadabilityFormula,
    text: &str,
) -> Result<ReadabilityReport> {
    let flesch_score = formula.reading_ease(text)?;
    let grade_level = formula.grade_level(text)?;

    Ok(ReadabilityReport {
        flesch_score: round_to(flesch_score, 1),
        grade_level: GradeLevel::Score(round_to(grade_level, 1)),
        readability_level: ReadabilityLevel::from_score(flesch_score),
    })
}
