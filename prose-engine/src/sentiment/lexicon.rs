use super::{Sentiment, SentimentScorer};
use crate::tokenize::{Tokenizer, UnicodeTokenizer};
use anyhow::Result;
use std::collections::HashMap;
use std::sync::Arc;

/// (word, polarity, subjectivity)
const LEXICON: &[(&str, f64, f64)] = &[
    // Positive
    ("good", 0.7, 0.6),
    ("great", 0.8, 0.75),
    ("excellent", 1.0, 1.0),
    ("wonderful", 1.0, 1.0),
    ("fantastic", 0.4, 0.9),
    ("amazing", 0.6, 0.9),
    ("awesome", 1.0, 1.0),
    ("best", 1.0, 0.3),
    ("better", 0.5, 0.5),
    ("nice", 0.6, 1.0),
    ("happy", 0.8, 1.0),
    ("glad", 0.5, 1.0),
    ("love", 0.5, 0.6),
    ("lovely", 0.5, 0.75),
    ("beautiful", 0.85, 1.0),
    ("pleasant", 0.73, 1.0),
    ("enjoyable", 0.4, 0.5),
    ("interesting", 0.5, 0.5),
    ("exciting", 0.3, 0.8),
    ("excited", 0.375, 0.75),
    ("helpful", 0.3, 0.4),
    ("useful", 0.3, 0.1),
    ("effective", 0.6, 0.8),
    ("important", 0.4, 1.0),
    ("significant", 0.375, 0.875),
    ("successful", 0.75, 0.95),
    ("clear", 0.1, 0.38),
    ("easy", 0.43, 0.83),
    ("right", 0.29, 0.54),
    ("fine", 0.42, 0.5),
    ("perfect", 1.0, 1.0),
    ("brilliant", 0.9, 1.0),
    ("impressive", 1.0, 1.0),
    ("positive", 0.23, 0.55),
    ("strong", 0.43, 0.73),
    ("fun", 0.3, 0.2),
    // Negative
    ("bad", -0.7, 0.67),
    ("worse", -0.4, 0.6),
    ("worst", -1.0, 1.0),
    ("terrible", -1.0, 1.0),
    ("awful", -1.0, 1.0),
    ("horrible", -1.0, 1.0),
    ("poor", -0.4, 0.6),
    ("sad", -0.5, 1.0),
    ("unhappy", -0.6, 0.9),
    ("angry", -0.5, 1.0),
    ("hate", -0.8, 0.9),
    ("ugly", -0.7, 1.0),
    ("boring", -1.0, 1.0),
    ("disappointing", -0.6, 0.7),
    ("disappointed", -0.75, 0.75),
    ("difficult", -0.5, 1.0),
    ("wrong", -0.5, 0.9),
    ("useless", -0.5, 0.2),
    ("weak", -0.375, 0.625),
    ("negative", -0.3, 0.4),
    ("annoying", -0.8, 0.9),
    ("stupid", -0.8, 1.0),
    ("broken", -0.4, 0.4),
    ("failed", -0.5, 0.3),
    ("painful", -0.7, 0.9),
    ("dangerous", -0.6, 0.9),
    // Opinion without valence
    ("think", 0.0, 0.3),
    ("feel", 0.0, 0.4),
    ("believe", 0.0, 0.4),
];

/// Multipliers applied to the next scored word.
const INTENSIFIERS: &[(&str, f64)] = &[
    ("very", 1.3),
    ("really", 1.3),
    ("so", 1.3),
    ("too", 1.3),
    ("extremely", 1.5),
    ("incredibly", 1.5),
    ("highly", 1.4),
    ("remarkably", 1.3),
    ("quite", 1.1),
];

const NEGATORS: &[&str] = &["not", "no", "never", "nothing", "hardly"];

/// Negation flips and dampens a word's polarity.
const NEGATION_FACTOR: f64 = -0.5;

/// Lexicon-based polarity and subjectivity scorer.
///
/// Scores are averaged over the words found in the lexicon. An intensifier
/// directly before a scored word scales it; a negator before that (or
/// directly before the word) flips it.
pub struct LexiconSentiment {
    tokenizer: Arc<dyn Tokenizer>,
    lexicon: HashMap<&'static str, (f64, f64)>,
    intensifiers: HashMap<&'static str, f64>,
}

impl LexiconSentiment {
    pub fn new(tokenizer: Arc<dyn Tokenizer>) -> Self {
        Self {
            tokenizer,
            lexicon: LEXICON.iter().map(|&(w, p, s)| (w, (p, s))).collect(),
            intensifiers: INTENSIFIERS.iter().copied().collect(),
        }
    }

    fn is_negator(token: &str) -> bool {
        NEGATORS.contains(&token) || token.ends_with("n't") || token.ends_with("n’t")
    }
}

impl Default for LexiconSentiment {
    fn default() -> Self {
        Self::new(Arc::new(UnicodeTokenizer::new()))
    }
}

impl SentimentScorer for LexiconSentiment {
    fn sentiment(&self, text: &str) -> Result<Sentiment> {
        let tokens: Vec<String> = self
            .tokenizer
            .word_tokenize(text)?
            .into_iter()
            .filter(|t| t.chars().any(char::is_alphabetic))
            .map(|t| t.to_lowercase())
            .collect();

        let mut polarity_sum = 0.0;
        let mut subjectivity_sum = 0.0;
        let mut scored = 0usize;

        for (i, token) in tokens.iter().enumerate() {
            let Some(&(mut polarity, mut subjectivity)) = self.lexicon.get(token.as_str()) else {
                continue;
            };

            let mut modifier_pos = i;
            if modifier_pos > 0 {
                if let Some(factor) = self.intensifiers.get(tokens[modifier_pos - 1].as_str()) {
                    polarity *= factor;
                    subjectivity *= factor;
                    modifier_pos -= 1;
                }
            }
            if modifier_pos > 0 && Self::is_negator(&tokens[modifier_pos - 1]) {
                polarity *= NEGATION_FACTOR;
            }

            polarity_sum += polarity.clamp(-1.0, 1.0);
            subjectivity_sum += subjectivity.clamp(0.0, 1.0);
            scored += 1;
        }

        if scored == 0 {
            return Ok(Sentiment::default());
        }

        Ok(Sentiment {
            polarity: (polarity_sum / scored as f64).clamp(-1.0, 1.0),
            subjectivity: (subjectivity_sum / scored as f64).clamp(0.0, 1.0),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(text: &str) -> Sentiment {
        LexiconSentiment::default().sentiment(text).unwrap()
    }

    #[test]
    fn test_no_opinion_words_is_neutral() {
        let sentiment = score("The meeting starts at noon in room four.");
        assert_eq!(sentiment, Sentiment::default());
    }

    #[test]
    fn test_positive_text() {
        let sentiment = score("This is a good and beautiful day.");
        assert!(sentiment.polarity > 0.5);
        assert!(sentiment.subjectivity > 0.5);
    }

    #[test]
    fn test_negation_flips_polarity() {
        let sentiment = score("This is not good.");
        assert!((sentiment.polarity - -0.35).abs() < 1e-9);
    }

    #[test]
    fn test_contracted_negation() {
        assert!(score("It isn't good.").polarity < 0.0);
    }

    #[test]
    fn test_intensifier_strengthens() {
        let plain = score("The food was good.");
        let intense = score("The food was very good.");
        assert!(intense.polarity > plain.polarity);
    }

    #[test]
    fn test_scores_stay_in_range() {
        let sentiment = score("Extremely excellent, incredibly perfect, extremely awesome.");
        assert!(sentiment.polarity <= 1.0);
        assert!(sentiment.subjectivity <= 1.0);
    }

    #[test]
    fn test_negative_text() {
        assert!(score("What a terrible, awful experience.").polarity < -0.1);
    }
}
