mod grammar;

use anyhow::Result;

pub use grammar::GrammarProcessor;

/// Trait for deterministic text post-processors.
///
/// Processors run after a model has produced text, to clean up what the
/// model left behind.
pub trait TextProcessor: Send + Sync {
    /// Process the input text and return the transformed result.
    fn process(&self, text: &str) -> Result<String>;
}

/// Secondary grammar pass applied to corrected text, if enabled.
pub fn secondary_corrector(enabled: bool) -> Option<Box<dyn TextProcessor>> {
    if enabled {
        Some(Box::new(GrammarProcessor::new()))
    } else {
        None
    }
}
