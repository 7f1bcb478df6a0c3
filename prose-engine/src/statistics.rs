//! Lexical statistics and word frequency.

use crate::round_to;
use crate::tokenize::{is_alphabetic, Tokenizer};
use anyhow::Result;
use prose_types::{StatisticsReport, WordFrequencyEntry};
use std::collections::HashMap;
use tracing::warn;

/// Maximum number of entries returned by [`word_frequency`].
pub const TOP_WORDS: usize = 10;

/// Words shorter than this are never counted as top words.
const MIN_FREQUENCY_WORD_LEN: usize = 3;

const STOP_WORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by",
    "is", "are", "was", "were", "be", "been", "being", "have", "has", "had", "do", "does",
    "did", "will", "would", "could", "should", "may", "might", "must", "can", "this", "that",
    "these", "those", "i", "you", "he", "she", "it", "we", "they",
];

pub fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.contains(&word)
}

/// Word, sentence and character counts.
///
/// `character_count` is the raw input length and survives tokenizer failure.
pub fn text_statistics(tokenizer: &dyn Tokenizer, text: &str) -> StatisticsReport {
    let character_count = text.chars().count();

    match try_text_statistics(tokenizer, text, character_count) {
        Ok(report) => report,
        Err(e) => {
            warn!("Statistics extraction failed: {:#}", e);
            StatisticsReport::empty(character_count)
        }
    }
}

fn try_text_statistics(
    tokenizer: &dyn Tokenizer,
    text: &str,
    character_count: usize,
) -> Result<StatisticsReport> {
    let word_count = tokenizer.alphabetic_words(text)?.len();
    let sentence_count = tokenizer.sentence_split(text)?.len();

    let avg_words_per_sentence = if sentence_count > 0 {
        round_to(word_count as f64 / sentence_count as f64, 1)
    } else {
        0.0
    };

    Ok(StatisticsReport {
        word_count,
        sentence_count,
        character_count,
        avg_words_per_sentence,
    })
}

/// Most frequent content words, descending by count.
///
/// Ties keep the order in which the words first appear. Returns an empty
/// list if tokenization fails.
pub fn word_frequency(tokenizer: &dyn Tokenizer, text: &str) -> Vec<WordFrequencyEntry> {
    match try_word_frequency(tokenizer, text) {
        Ok(entries) => entries,
        Err(e) => {
            warn!("Word frequency extraction failed: {:#}", e);
            Vec::new()
        }
    }
}

fn try_word_frequency(tokenizer: &dyn Tokenizer, text: &str) -> Result<Vec<WordFrequencyEntry>> {
    let lowered = text.to_lowercase();

    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut entries: Vec<WordFrequencyEntry> = Vec::new();

    for token in tokenizer.word_tokenize(&lowered)? {
        if !is_alphabetic(&token)
            || is_stop_word(&token)
            || token.chars().count() < MIN_FREQUENCY_WORD_LEN
        {
            continue;
        }

        match positions.get(&token) {
            Some(&idx) => entries[idx].count += 1,
            None => {
                positions.insert(token.clone(), entries.len());
                entries.push(WordFrequencyEntry {
                    word: token,
                    count: 1,
                });
            }
        }
    }

    // Stable sort keeps first-seen order among equal counts.
    entries.sort_by(|a, b| b.count.cmp(&a.count));
    entries.truncate(TOP_WORDS);

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenize::UnicodeTokenizer;
    use anyhow::bail;

    struct BrokenTokenizer;

    impl Tokenizer for BrokenTokenizer {
        fn sentence_split(&self, _text: &str) -> Result<Vec<String>> {
            bail!("tokenizer data missing")
        }

        fn word_tokenize(&self, _text: &str) -> Result<Vec<String>> {
            bail!("tokenizer data missing")
        }
    }

    #[test]
    fn test_basic_statistics() {
        let stats = text_statistics(&UnicodeTokenizer::new(), "Hello, this is a test. It has two sentences!");

        assert_eq!(stats.word_count, 9);
        assert_eq!(stats.sentence_count, 2);
        assert_eq!(stats.character_count, 44);
        assert_eq!(stats.avg_words_per_sentence, 4.5);
    }

    #[test]
    fn test_character_count_is_raw_length() {
        let text = "  Café au lait.  ";
        let stats = text_statistics(&UnicodeTokenizer::new(), text);
        assert_eq!(stats.character_count, 17);
        assert_eq!(stats.word_count, 3);
    }

    #[test]
    fn test_failure_keeps_character_count() {
        let stats = text_statistics(&BrokenTokenizer, "Some words here.");
        assert_eq!(stats, StatisticsReport::empty(16));
    }

    #[test]
    fn test_statistics_are_deterministic() {
        let tokenizer = UnicodeTokenizer::new();
        let text = "Repeatable results matter. Run it again, and again.";
        let first = text_statistics(&tokenizer, text);
        let second = text_statistics(&tokenizer, text);
        assert_eq!(first, second);
    }

    #[test]
    fn test_frequency_filters_and_orders() {
        let text = "The cat and the dog. The cat ran. A dog ran to the cat. Go on, cat!";
        let top = word_frequency(&UnicodeTokenizer::new(), text);

        let pairs: Vec<(&str, usize)> = top.iter().map(|e| (e.word.as_str(), e.count)).collect();
        assert_eq!(pairs, vec![("cat", 4), ("dog", 2), ("ran", 2)]);
    }

    #[test]
    fn test_frequency_caps_at_ten() {
        let text = "alpha bravo charlie delta echo foxtrot golf hotel india juliet kilo lima \
                    mike november";
        let top = word_frequency(&UnicodeTokenizer::new(), text);

        assert_eq!(top.len(), TOP_WORDS);
        assert_eq!(top[0].word, "alpha");
        assert_eq!(top[9].word, "juliet");
    }

    #[test]
    fn test_frequency_excludes_stop_and_short_words() {
        let top = word_frequency(&UnicodeTokenizer::new(), "It is on me, you and them.");
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].word, "them");
    }

    #[test]
    fn test_frequency_failure_is_empty() {
        assert!(word_frequency(&BrokenTokenizer, "Anything").is_empty());
    }
}
