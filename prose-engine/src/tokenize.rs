//! Word and sentence segmentation shared by every extractor.
//!
//! All extractors tokenize the same input independently, so the tokenizer
//! must be deterministic: identical text always yields identical tokens.

use anyhow::Result;
use unicode_segmentation::UnicodeSegmentation;

/// Splits text into sentences and word tokens.
pub trait Tokenizer: Send + Sync {
    /// Split text into sentences, dropping whitespace-only segments.
    fn sentence_split(&self, text: &str) -> Result<Vec<String>>;

    /// Split text into word and punctuation tokens, dropping whitespace.
    fn word_tokenize(&self, text: &str) -> Result<Vec<String>>;

    /// Tokens made only of alphabetic characters.
    fn alphabetic_words(&self, text: &str) -> Result<Vec<String>> {
        Ok(self
            .word_tokenize(text)?
            .into_iter()
            .filter(|token| is_alphabetic(token))
            .collect())
    }
}

/// Tokenizer based on Unicode (UAX #29) word and sentence boundaries.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnicodeTokenizer;

impl UnicodeTokenizer {
    pub fn new() -> Self {
        Self
    }
}

impl Tokenizer for UnicodeTokenizer {
    fn sentence_split(&self, text: &str) -> Result<Vec<String>> {
        Ok(text
            .unicode_sentences()
            .map(str::trim)
            .filter(|sentence| !sentence.is_empty())
            .map(str::to_string)
            .collect())
    }

    fn word_tokenize(&self, text: &str) -> Result<Vec<String>> {
        Ok(text
            .split_word_bounds()
            .filter(|token| !token.trim().is_empty())
            .map(str::to_string)
            .collect())
    }
}

/// True for a non-empty token whose every char is alphabetic.
pub fn is_alphabetic(token: &str) -> bool {
    !token.is_empty() && token.chars().all(char::is_alphabetic)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_tokenize_separates_punctuation() {
        let tokens = UnicodeTokenizer::new()
            .word_tokenize("Hello, world! It works.")
            .unwrap();
        assert_eq!(tokens, vec!["Hello", ",", "world", "!", "It", "works", "."]);
    }

    #[test]
    fn test_alphabetic_words_drop_numbers_and_symbols() {
        let words = UnicodeTokenizer::new()
            .alphabetic_words("We measured 42 samples, twice, today.")
            .unwrap();
        assert_eq!(words, vec!["We", "measured", "samples", "twice", "today"]);
    }

    #[test]
    fn test_sentence_split() {
        let sentences = UnicodeTokenizer::new()
            .sentence_split("First one. Second one?  Third!")
            .unwrap();
        assert_eq!(sentences, vec!["First one.", "Second one?", "Third!"]);
    }

    #[test]
    fn test_sentence_split_empty() {
        let sentences = UnicodeTokenizer::new().sentence_split("   ").unwrap();
        assert!(sentences.is_empty());
    }

    #[test]
    fn test_is_alphabetic() {
        assert!(is_alphabetic("naïve"));
        assert!(!is_alphabetic("don't"));
        assert!(!is_alphabetic("abc1"));
        assert!(!is_alphabetic(""));
    }
}
