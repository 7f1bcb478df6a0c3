use serde::{Deserialize, Serialize};
use std::fmt;

/// Output of the correct-then-paraphrase pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewriteResult {
    pub fixed: String,
    /// Only present when the corrected text was long enough to paraphrase.
    pub paraphrased: Option<String>,
}

/// Result of a single rewrite request, with the bookkeeping callers display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewriteResponse {
    pub text: String,
    pub original_length: usize,
    pub resulting_length: usize,
    pub changed: bool,
}

impl RewriteResponse {
    pub fn new(original: &str, result: String) -> Self {
        Self {
            original_length: original.chars().count(),
            resulting_length: result.chars().count(),
            changed: result != original,
            text: result,
        }
    }

    /// Identity response, used when no rewrite could be produced.
    pub fn unchanged(original: &str) -> Self {
        Self::new(original, original.to_string())
    }
}

/// Lifecycle of a lazily loaded model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelState {
    Uninitialized,
    Loading,
    Ready,
    Failed,
}

impl ModelState {
    /// Ready and failed are never left once reached.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Ready | Self::Failed)
    }
}

impl fmt::Display for ModelState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelState::Uninitialized => write!(f, "uninitialized"),
            ModelState::Loading => write!(f, "loading"),
            ModelState::Ready => write!(f, "ready"),
            ModelState::Failed => write!(f, "failed"),
        }
    }
}
