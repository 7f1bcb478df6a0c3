use super::TextProcessor;
use anyhow::Result;
use harper_core::linting::{Lint, LintGroup, Linter, Suggestion};
use harper_core::parsers::PlainEnglish;
use harper_core::spell::MutableDictionary;
use harper_core::{Dialect, Document};
use std::sync::Arc;
use tracing::debug;

/// Rule-based grammar and spelling fixer using Harper.
///
/// Runs offline in a few milliseconds, which makes it a cheap second pass
/// over what the correction model produced. Each lint's first suggestion is
/// applied; lints without suggestions are left alone.
pub struct GrammarProcessor {
    dictionary: Arc<MutableDictionary>,
}

impl GrammarProcessor {
    /// Create a grammar processor with Harper's curated dictionary.
    pub fn new() -> Self {
        let dictionary = MutableDictionary::curated();
        Self { dictionary }
    }
}

impl TextProcessor for GrammarProcessor {
    fn process(&self, text: &str) -> Result<String> {
        if text.trim().is_empty() {
            return Ok(text.to_string());
        }

        let mut parser = PlainEnglish;
        let document = Document::new(text, &mut parser, &self.dictionary);

        let mut linter = LintGroup::new_curated(self.dictionary.clone(), Dialect::American);
        let mut lints: Vec<Lint> = linter.lint(&document).into_iter().collect();

        // Right to left, so earlier spans stay valid after each edit.
        lints.sort_by(|a, b| b.span.start.cmp(&a.span.start));

        // Harper spans index chars, not bytes.
        let mut chars: Vec<char> = text.chars().collect();
        let mut applied = 0;
        let mut boundary = chars.len();

        for lint in lints {
            let (start, end) = (lint.span.start, lint.span.end);
            if start > end || end > boundary {
                // Overlaps an edit already made.
                continue;
            }

            if let Some(suggestion) = lint.suggestions.first() {
                let replacement = apply_suggestion(&chars[start..end], suggestion);
                chars.splice(start..end, replacement);
                boundary = start;
                applied += 1;
            }
        }

        if applied > 0 {
            debug!("Harper applied {} suggestion(s)", applied);
        }

        Ok(chars.into_iter().collect())
    }
}

/// Replacement chars for a span under the given suggestion.
fn apply_suggestion(original: &[char], suggestion: &Suggestion) -> Vec<char> {
    match suggestion {
        Suggestion::ReplaceWith(chars) => chars.clone(),
        Suggestion::Remove => Vec::new(),
        Suggestion::InsertAfter(chars) => original.iter().chain(chars.iter()).copied().collect(),
    }
}

impl Default for GrammarProcessor {
    fn default() -> Self {
        Self::new()
    }
}
