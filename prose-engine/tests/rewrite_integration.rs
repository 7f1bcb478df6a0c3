use anyhow::{bail, Result};
use prose_engine::service::{rewrite_with_timeout, RewriteMode};
use prose_engine::{
    GenerationRequest, ModelHandle, RewriteConfig, RewritePipeline, TextGenerator,
};
use prose_types::ModelState;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Grammar model that capitalizes the first letter and appends a period.
struct Capitalizer;

impl TextGenerator for Capitalizer {
    fn generate(&self, request: &GenerationRequest<'_>) -> Result<String> {
        let mut chars = request.prompt.chars();
        let fixed = match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
            None => String::new(),
        };
        if fixed.ends_with('.') {
            Ok(fixed)
        } else {
            Ok(format!("{}.", fixed))
        }
    }
}

/// Paraphraser that reverses word order after stripping the prompt prefix.
struct Reverser {
    calls: Arc<AtomicUsize>,
}

impl TextGenerator for Reverser {
    fn generate(&self, request: &GenerationRequest<'_>) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let text = request.prompt.trim_start_matches("paraphrase: ");
        Ok(text.split_whitespace().rev().collect::<Vec<_>>().join(" "))
    }
}

fn failing_handle(name: &str, loads: Arc<AtomicUsize>) -> ModelHandle {
    ModelHandle::new(
        name,
        Box::new(move || -> Result<Arc<dyn TextGenerator>> {
            loads.fetch_add(1, Ordering::SeqCst);
            bail!("weights missing")
        }),
    )
}

fn working_pipeline(paraphrase_calls: Arc<AtomicUsize>) -> RewritePipeline {
    RewritePipeline::new(
        ModelHandle::ready("grammar", Arc::new(Capitalizer)),
        ModelHandle::ready("paraphraser", Arc::new(Reverser { calls: paraphrase_calls })),
        None,
        RewriteConfig::default(),
    )
}

#[test]
fn test_failed_grammar_model_is_never_retried() {
    let loads = Arc::new(AtomicUsize::new(0));
    let pipeline = RewritePipeline::new(
        failing_handle("grammar", loads.clone()),
        ModelHandle::unavailable("paraphraser"),
        None,
        RewriteConfig::default(),
    );

    for text in ["she go home", "they was late", "it are fine"] {
        assert_eq!(pipeline.fix_text(text), text);
    }

    assert_eq!(loads.load(Ordering::SeqCst), 1);
    assert_eq!(pipeline.model_states()[0], ("grammar", ModelState::Failed));
}

#[test]
fn test_concurrent_first_requests_load_once() {
    let loads = Arc::new(AtomicUsize::new(0));
    let counted = loads.clone();
    let grammar = ModelHandle::new(
        "grammar",
        Box::new(move || -> Result<Arc<dyn TextGenerator>> {
            counted.fetch_add(1, Ordering::SeqCst);
            thread::sleep(Duration::from_millis(30));
            Ok(Arc::new(Capitalizer))
        }),
    );
    let pipeline = Arc::new(RewritePipeline::new(
        grammar,
        ModelHandle::unavailable("paraphraser"),
        None,
        RewriteConfig::default(),
    ));

    let workers: Vec<_> = (0..6)
        .map(|_| {
            let pipeline = pipeline.clone();
            thread::spawn(move || pipeline.fix_text("hello there"))
        })
        .collect();

    for worker in workers {
        assert_eq!(worker.join().unwrap(), "Hello there.");
    }
    assert_eq!(loads.load(Ordering::SeqCst), 1);
}

#[test]
fn test_short_text_gets_no_paraphrase() {
    let calls = Arc::new(AtomicUsize::new(0));
    let pipeline = working_pipeline(calls.clone());

    let result = pipeline.fix_and_paraphrase("Short text.");

    assert_eq!(result.fixed, "Short text.");
    assert!(result.paraphrased.is_none());
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_long_text_gets_paraphrase_of_fixed_text() {
    let calls = Arc::new(AtomicUsize::new(0));
    let pipeline = working_pipeline(calls.clone());
    let text = "the committee reviewed every proposal carefully before voting on the final budget today";

    let result = pipeline.fix_and_paraphrase(text);

    assert_eq!(
        result.fixed,
        "The committee reviewed every proposal carefully before voting on the final budget today."
    );
    assert_eq!(
        result.paraphrased.as_deref(),
        Some("today. budget final the on voting before carefully proposal every reviewed committee The")
    );
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_paraphrase_of_single_word_is_rejected() {
    let calls = Arc::new(AtomicUsize::new(0));
    let pipeline = working_pipeline(calls);

    // Reversing one word returns it unchanged, so the candidate is rejected.
    let response = pipeline.improve("Supercalifragilistic");

    assert!(!response.changed);
    assert_eq!(response.text, "Supercalifragilistic");
}

#[tokio::test]
async fn test_fix_through_service() {
    let pipeline = Arc::new(working_pipeline(Arc::new(AtomicUsize::new(0))));

    let response = rewrite_with_timeout(
        pipeline,
        "fix this".to_string(),
        RewriteMode::Fix,
        Duration::from_secs(5),
    )
    .await;

    assert_eq!(response.text, "Fix this.");
    assert_eq!(response.original_length, 8);
    assert_eq!(response.resulting_length, 9);
    assert!(response.changed);
}
