//! Text-to-text generation backends used by the rewrite pipeline.

mod hugging_face;

use anyhow::Result;

pub use hugging_face::HuggingFaceGenerator;

/// A single generation call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationRequest<'a> {
    pub prompt: &'a str,
    /// Upper bound on the generated sequence, in tokens.
    pub max_length: usize,
    /// Greedy decoding: the same prompt always yields the same output.
    pub deterministic: bool,
}

impl<'a> GenerationRequest<'a> {
    pub fn deterministic(prompt: &'a str, max_length: usize) -> Self {
        Self {
            prompt,
            max_length,
            deterministic: true,
        }
    }
}

/// Trait for heavy text-to-text models (grammar correction, paraphrasing).
///
/// Generators are shared across requests for the life of the process, so
/// they must be thread-safe.
pub trait TextGenerator: Send + Sync {
    /// Generate text for the prompt.
    ///
    /// # Returns
    /// * `Ok(String)` with the generated text
    /// * `Err` if inference failed
    fn generate(&self, request: &GenerationRequest<'_>) -> Result<String>;
}
