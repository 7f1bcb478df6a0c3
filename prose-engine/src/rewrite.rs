//! Grammar correction followed by an optional paraphrase.
//!
//! Every public operation falls back to the input text: a missing model, a
//! failed inference or a rejected paraphrase never surfaces as an error.

use crate::config::RewriteConfig;
use crate::generation::{GenerationRequest, HuggingFaceGenerator, TextGenerator};
use crate::model_handle::ModelHandle;
use crate::panic_message;
use crate::post_processing::{secondary_corrector, TextProcessor};
use anyhow::{anyhow, Result};
use prose_types::{ModelState, RewriteResponse, RewriteResult};
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct RewritePipeline {
    grammar: ModelHandle,
    paraphraser: ModelHandle,
    secondary: Option<Box<dyn TextProcessor>>,
    config: RewriteConfig,
}

impl RewritePipeline {
    pub fn new(
        grammar: ModelHandle,
        paraphraser: ModelHandle,
        secondary: Option<Box<dyn TextProcessor>>,
        config: RewriteConfig,
    ) -> Self {
        Self {
            grammar,
            paraphraser,
            secondary,
            config,
        }
    }

    /// Pipeline backed by the hosted models named in the config.
    ///
    /// Nothing is loaded until the first request that needs a model.
    pub fn from_config(config: &RewriteConfig) -> Self {
        Self::new(
            hosted_model_handle("grammar", &config.grammar_model, config),
            hosted_model_handle("paraphraser", &config.paraphrase_model, config),
            secondary_corrector(config.secondary_correction),
            config.clone(),
        )
    }

    /// Grammar model, loading it on first use. `None` when unavailable.
    pub fn load_grammar_model(&self) -> Option<Arc<dyn TextGenerator>> {
        self.grammar.get()
    }

    /// Paraphrase model, loading it on first use. `None` when unavailable.
    pub fn load_paraphraser_model(&self) -> Option<Arc<dyn TextGenerator>> {
        self.paraphraser.get()
    }

    pub fn model_states(&self) -> [(&str, ModelState); 2] {
        [
            (self.grammar.name(), self.grammar.state()),
            (self.paraphraser.name(), self.paraphraser.state()),
        ]
    }

    /// Correct grammar and spelling. Returns the input on any failure.
    pub fn fix_text(&self, text: &str) -> String {
        let Some(model) = self.load_grammar_model() else {
            warn!("Grammar model not available, returning text unchanged");
            return text.to_string();
        };

        match contain_panic(|| self.try_fix(model.as_ref(), text)) {
            Ok(corrected) => corrected,
            Err(e) => {
                warn!("Grammar correction failed: {:#}", e);
                text.to_string()
            }
        }
    }

    fn try_fix(&self, model: &dyn TextGenerator, text: &str) -> Result<String> {
        let request = GenerationRequest::deterministic(text, self.config.max_length_for(text));
        let mut corrected = model.generate(&request)?;

        if let Some(secondary) = &self.secondary {
            corrected = secondary.process(&corrected)?;
        }

        Ok(corrected)
    }

    /// Reword text for style. Returns the input on any failure or when the
    /// model's candidate is rejected.
    pub fn paraphrase_text(&self, text: &str) -> String {
        let Some(model) = self.load_paraphraser_model() else {
            warn!("Paraphraser model not available, returning text unchanged");
            return text.to_string();
        };

        match contain_panic(|| self.try_paraphrase(model.as_ref(), text)) {
            Ok(Some(paraphrased)) => paraphrased,
            Ok(None) => {
                info!("Paraphraser returned unchanged text, using original");
                text.to_string()
            }
            Err(e) => {
                warn!("Paraphrasing failed: {:#}", e);
                text.to_string()
            }
        }
    }

    fn try_paraphrase(&self, model: &dyn TextGenerator, text: &str) -> Result<Option<String>> {
        let prompt = format!("{}{}", self.config.paraphrase_prefix, text);
        let request = GenerationRequest::deterministic(&prompt, self.config.max_length_for(text));
        let candidate = model.generate(&request)?;

        Ok(self.accept_paraphrase(text, candidate))
    }

    /// Keep a candidate only if it actually differs and is not trivially short.
    fn accept_paraphrase(&self, original: &str, candidate: String) -> Option<String> {
        let differs = candidate.to_lowercase() != original.to_lowercase();
        let long_enough = candidate.chars().count() > self.config.min_paraphrase_length;

        if differs && long_enough {
            Some(candidate)
        } else {
            debug!(
                "Rejected paraphrase candidate (differs={}, long_enough={})",
                differs, long_enough
            );
            None
        }
    }

    /// Correct the text, then paraphrase it if the correction is long enough.
    pub fn fix_and_paraphrase(&self, text: &str) -> RewriteResult {
        let fixed = self.fix_text(text);

        let paraphrased = if fixed.split_whitespace().count() > self.config.paraphrase_min_words {
            Some(self.paraphrase_text(&fixed))
        } else {
            None
        };

        RewriteResult { fixed, paraphrased }
    }

    /// `fix_text` with before/after bookkeeping.
    pub fn fix(&self, text: &str) -> RewriteResponse {
        RewriteResponse::new(text, self.fix_text(text))
    }

    /// `paraphrase_text` with before/after bookkeeping.
    pub fn improve(&self, text: &str) -> RewriteResponse {
        RewriteResponse::new(text, self.paraphrase_text(text))
    }
}

/// Turn a panic inside a model or processor into an ordinary error.
fn contain_panic<T>(task: impl FnOnce() -> Result<T>) -> Result<T> {
    panic::catch_unwind(AssertUnwindSafe(task))
        .unwrap_or_else(|payload| Err(anyhow!("panicked: {}", panic_message(payload.as_ref()))))
}

fn hosted_model_handle(name: &str, model_id: &str, config: &RewriteConfig) -> ModelHandle {
    let model_id = model_id.to_string();
    let config = config.clone();

    ModelHandle::new(
        name,
        Box::new(move || -> Result<Arc<dyn TextGenerator>> {
            Ok(Arc::new(HuggingFaceGenerator::load(&model_id, &config)?))
        }),
    )
}
