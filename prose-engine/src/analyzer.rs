//! Runs every extractor over one passage and merges the results.

use crate::config::AnalysisConfig;
use crate::grammar_heuristics::analyze_grammar;
use crate::panic_message;
use crate::readability::{analyze_readability, FleschFormula, ReadabilityFormula};
use crate::sentiment::{analyze_sentiment, LexiconSentiment, SentimentScorer};
use crate::statistics::{text_statistics, word_frequency};
use crate::tokenize::{Tokenizer, UnicodeTokenizer};
use prose_types::AnalysisReport;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use tracing::{debug, warn};

/// Aggregates the readability, sentiment, grammar, statistics and word
/// frequency extractors into a single [`AnalysisReport`].
///
/// Extractors absorb their own failures into sentinels. Only a failure of
/// the aggregation itself (a capability that panics) degrades the whole
/// report. Input over the configured limits is still analyzed.
pub struct TextAnalyzer {
    tokenizer: Arc<dyn Tokenizer>,
    readability: Box<dyn ReadabilityFormula>,
    sentiment: Box<dyn SentimentScorer>,
    limits: AnalysisConfig,
}

impl TextAnalyzer {
    /// Analyzer with the built-in capabilities and default limits.
    pub fn new() -> Self {
        let tokenizer: Arc<dyn Tokenizer> = Arc::new(UnicodeTokenizer::new());
        Self::with_capabilities(
            tokenizer.clone(),
            Box::new(FleschFormula::new(tokenizer.clone())),
            Box::new(LexiconSentiment::new(tokenizer)),
        )
    }

    pub fn with_capabilities(
        tokenizer: Arc<dyn Tokenizer>,
        readability: Box<dyn ReadabilityFormula>,
        sentiment: Box<dyn SentimentScorer>,
    ) -> Self {
        Self {
            tokenizer,
            readability,
            sentiment,
            limits: AnalysisConfig::default(),
        }
    }

    pub fn with_limits(mut self, limits: AnalysisConfig) -> Self {
        self.limits = limits;
        self
    }

    /// Full report for a passage. Never fails.
    pub fn comprehensive_analysis(&self, text: &str) -> AnalysisReport {
        if text.trim().is_empty() {
            return AnalysisReport::no_text();
        }

        let failure = match panic::catch_unwind(AssertUnwindSafe(|| self.aggregate(text))) {
            Ok(report) => return report,
            Err(payload) => panic_message(payload.as_ref()),
        };

        warn!("Analysis failed: {}", failure);
        AnalysisReport::failed(&failure, text.chars().count())
    }

    /// Same as [`comprehensive_analysis`](Self::comprehensive_analysis).
    pub fn analyze(&self, text: &str) -> AnalysisReport {
        self.comprehensive_analysis(text)
    }

    fn aggregate(&self, text: &str) -> AnalysisReport {
        self.warn_if_over_limits(text);

        let tokenizer = self.tokenizer.as_ref();
        let report = AnalysisReport {
            grammar: analyze_grammar(text),
            readability: analyze_readability(self.readability.as_ref(), text),
            sentiment: analyze_sentiment(self.sentiment.as_ref(), tokenizer, text),
            statistics: text_statistics(tokenizer, text),
            top_words: word_frequency(tokenizer, text),
            error: None,
            success: true,
        };

        debug!(
            "Analyzed {} words in {} sentences",
            report.statistics.word_count, report.statistics.sentence_count
        );
        report
    }

    fn warn_if_over_limits(&self, text: &str) {
        let chars = text.chars().count();
        if chars > self.limits.max_text_length {
            warn!(
                "Text is long ({} characters, recommended max {}), consider shortening",
                chars, self.limits.max_text_length
            );
        }

        let words = text.split_whitespace().count();
        if words > self.limits.max_words {
            warn!(
                "Text is long ({} words, recommended max {}), consider shortening",
                words, self.limits.max_words
            );
        }
    }
}

impl Default for TextAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sentiment::Sentiment;
    use anyhow::Result;
    use prose_types::{GradeLabel, GradeLevel, ReadabilityLevel, Tone};
    use std::sync::atomic::{AtomicUsize, Ordering};

    const PASSAGE: &str = "The cat sat on the mat. The cat was happy and the day was good. \
                           Cats like warm places.";

    struct CountingTokenizer {
        calls: Arc<AtomicUsize>,
    }

    impl Tokenizer for CountingTokenizer {
        fn sentence_split(&self, text: &str) -> Result<Vec<String>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            UnicodeTokenizer.sentence_split(text)
        }

        fn word_tokenize(&self, text: &str) -> Result<Vec<String>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            UnicodeTokenizer.word_tokenize(text)
        }
    }

    struct PanickingScorer;

    impl SentimentScorer for PanickingScorer {
        fn sentiment(&self, _text: &str) -> Result<Sentiment> {
            panic!("lexicon corrupted")
        }
    }

    fn counting_analyzer(calls: Arc<AtomicUsize>) -> TextAnalyzer {
        let tokenizer: Arc<dyn Tokenizer> = Arc::new(CountingTokenizer { calls });
        TextAnalyzer::with_capabilities(
            tokenizer.clone(),
            Box::new(FleschFormula::new(tokenizer.clone())),
            Box::new(LexiconSentiment::new(tokenizer)),
        )
    }

    #[test]
    fn test_empty_text_is_sentinel_without_extractors() {
        let calls = Arc::new(AtomicUsize::new(0));
        let analyzer = counting_analyzer(calls.clone());

        for text in ["", "   ", "\n\t "] {
            let report = analyzer.comprehensive_analysis(text);
            assert_eq!(report.error.as_deref(), Some("No text provided"));
            assert!(!report.success);
            assert_eq!(report.readability.grade_level, GradeLevel::Label(GradeLabel::NotApplicable));
            assert_eq!(report.sentiment.overall_tone, Tone::NotApplicable);
        }
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_normal_report() {
        let report = TextAnalyzer::new().analyze(PASSAGE);

        assert!(report.success);
        assert!(report.error.is_none());
        assert_eq!(report.statistics.sentence_count, 3);
        assert_eq!(report.statistics.character_count, PASSAGE.chars().count());
        assert!(report.top_words.len() <= 10);
        assert_eq!(report.top_words[0].word, "cat");
        assert_eq!(report.top_words[0].count, 2);
        assert_eq!(report.sentiment.overall_tone, Tone::Positive);
    }

    #[test]
    fn test_short_text_skips_readability() {
        let report = TextAnalyzer::new().analyze("Hi there");

        assert!(report.success);
        assert_eq!(report.readability.readability_level, ReadabilityLevel::InsufficientText);
        assert_eq!(report.statistics.word_count, 2);
    }

    #[test]
    fn test_word_count_is_stable() {
        let analyzer = TextAnalyzer::new();
        let first = analyzer.analyze(PASSAGE);
        let second = analyzer.analyze(PASSAGE);
        assert_eq!(first.statistics.word_count, second.statistics.word_count);
        assert_eq!(first, second);
    }

    #[test]
    fn test_grammar_issues_merged() {
        let report = TextAnalyzer::new().analyze("This is the the best plan, basically.");

        assert_eq!(report.grammar.issues.len(), 1);
        assert_eq!(report.grammar.issues[0].message, "Repeated word: \"the\"");
        assert_eq!(report.grammar.style_suggestions.len(), 1);
    }

    #[test]
    fn test_over_char_limit_is_still_analyzed() {
        let analyzer = TextAnalyzer::new().with_limits(AnalysisConfig {
            max_text_length: 20,
            ..AnalysisConfig::default()
        });
        let text = "This sentence is definitely longer than twenty characters.";

        let report = analyzer.analyze(text);

        assert!(report.success);
        assert!(report.error.is_none());
        assert_eq!(report.statistics.character_count, text.chars().count());
        assert_eq!(report.statistics.word_count, 8);
    }

    #[test]
    fn test_long_passage_is_still_analyzed() {
        let text = "The river runs past the mill. ".repeat(67);
        assert!(text.split_whitespace().count() > AnalysisConfig::default().max_words);

        let report = TextAnalyzer::new().analyze(&text);

        assert!(report.success);
        assert!(!report.is_degraded());
        assert_eq!(report.statistics.word_count, 402);
        assert_eq!(report.statistics.sentence_count, 67);
        assert_eq!(report.top_words[0].word, "river");
    }

    #[test]
    fn test_panicking_capability_is_error_report() {
        let tokenizer: Arc<dyn Tokenizer> = Arc::new(UnicodeTokenizer::new());
        let analyzer = TextAnalyzer::with_capabilities(
            tokenizer.clone(),
            Box::new(FleschFormula::new(tokenizer)),
            Box::new(PanickingScorer),
        );

        let report = analyzer.analyze(PASSAGE);

        assert!(!report.success);
        assert_eq!(report.error.as_deref(), Some("Analysis failed: lexicon corrupted"));
        assert_eq!(report.statistics.character_count, PASSAGE.chars().count());
    }
}
