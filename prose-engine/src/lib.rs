//! Prose analysis and rewriting engine.
//!
//! [`TextAnalyzer`] merges independent metric extractors into one report;
//! [`RewritePipeline`] corrects and paraphrases text with lazily loaded
//! generation models. Neither surfaces errors to the caller: failures are
//! logged and replaced by sentinel values or the unchanged input.

pub mod analyzer;
pub mod config;
pub mod generation;
pub mod grammar_heuristics;
pub mod model_handle;
pub mod post_processing;
pub mod readability;
pub mod rewrite;
pub mod sentiment;
pub mod service;
pub mod statistics;
pub mod tokenize;

pub use analyzer::TextAnalyzer;
pub use config::{load_config, AnalysisConfig, Config, RewriteConfig};
pub use generation::{GenerationRequest, HuggingFaceGenerator, TextGenerator};
pub use model_handle::{ModelHandle, ModelLoader};
pub use post_processing::{GrammarProcessor, TextProcessor};
pub use readability::{FleschFormula, ReadabilityFormula};
pub use rewrite::RewritePipeline;
pub use sentiment::{LexiconSentiment, Sentiment, SentimentScorer};
pub use service::RewriteMode;
pub use tokenize::{Tokenizer, UnicodeTokenizer};

/// Round half away from zero to the given number of decimals.
pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Text carried by a caught panic payload.
pub(crate) fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unexpected panic".to_string()
    }
}
