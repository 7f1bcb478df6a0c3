//! Async entry points with request-level timeouts.
//!
//! The analyzer and rewrite pipeline are blocking, so each call runs on
//! tokio's blocking pool. A timed-out call resolves to the same fallback
//! the blocking operation would produce on failure; the blocking task itself
//! is left to finish in the background.

use crate::analyzer::TextAnalyzer;
use crate::rewrite::RewritePipeline;
use anyhow::{anyhow, Result};
use prose_types::{AnalysisReport, RewriteResponse, RewriteResult};
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

/// Which rewrite a request asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RewriteMode {
    /// Grammar correction only.
    Fix,
    /// Paraphrase only.
    Improve,
}

async fn run_blocking<T, F>(timeout: Duration, task: F) -> Result<T>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    let handle = tokio::task::spawn_blocking(task);

    match tokio::time::timeout(timeout, handle).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(e)) => Err(anyhow!("Worker task failed: {}", e)),
        Err(_) => Err(anyhow!("timed out after {}s", timeout.as_secs())),
    }
}

/// Analyze on the blocking pool. A timeout yields the error report.
pub async fn analyze_with_timeout(
    analyzer: Arc<TextAnalyzer>,
    text: String,
    timeout: Duration,
) -> AnalysisReport {
    let character_count = text.chars().count();

    match run_blocking(timeout, move || analyzer.comprehensive_analysis(&text)).await {
        Ok(report) => report,
        Err(e) => {
            warn!("Analysis request failed: {:#}", e);
            AnalysisReport::failed(&e.to_string(), character_count)
        }
    }
}

/// Fix or improve on the blocking pool. A timeout yields the input unchanged.
pub async fn rewrite_with_timeout(
    pipeline: Arc<RewritePipeline>,
    text: String,
    mode: RewriteMode,
    timeout: Duration,
) -> RewriteResponse {
    let original = text.clone();

    let outcome = run_blocking(timeout, move || match mode {
        RewriteMode::Fix => pipeline.fix(&text),
        RewriteMode::Improve => pipeline.improve(&text),
    })
    .await;

    outcome.unwrap_or_else(|e| {
        warn!("Rewrite request failed: {:#}", e);
        RewriteResponse::unchanged(&original)
    })
}

/// Fix then paraphrase on the blocking pool. A timeout yields the input as
/// the fixed text with no paraphrase.
pub async fn fix_and_paraphrase_with_timeout(
    pipeline: Arc<RewritePipeline>,
    text: String,
    timeout: Duration,
) -> RewriteResult {
    let original = text.clone();

    let outcome = run_blocking(timeout, move || pipeline.fix_and_paraphrase(&text)).await;

    outcome.unwrap_or_else(|e| {
        warn!("Rewrite request failed: {:#}", e);
        RewriteResult {
            fixed: original,
            paraphrased: None,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RewriteConfig;
    use crate::generation::{GenerationRequest, TextGenerator};
    use crate::model_handle::ModelHandle;
    use std::thread;

    struct Slow(Duration);

    impl TextGenerator for Slow {
        fn generate(&self, request: &GenerationRequest<'_>) -> Result<String> {
            thread::sleep(self.0);
            Ok(format!("{} Done.", request.prompt))
        }
    }

    fn pipeline(delay: Duration) -> Arc<RewritePipeline> {
        Arc::new(RewritePipeline::new(
            ModelHandle::ready("grammar", Arc::new(Slow(delay))),
            ModelHandle::ready("paraphraser", Arc::new(Slow(delay))),
            None,
            RewriteConfig::default(),
        ))
    }

    #[tokio::test]
    async fn test_analyze_completes_within_timeout() {
        let report = analyze_with_timeout(
            Arc::new(TextAnalyzer::new()),
            "A short passage that is easy to read.".to_string(),
            Duration::from_secs(5),
        )
        .await;

        assert!(report.success);
        assert_eq!(report.statistics.word_count, 8);
    }

    #[tokio::test]
    async fn test_fix_completes_within_timeout() {
        let response = rewrite_with_timeout(
            pipeline(Duration::ZERO),
            "Fix me.".to_string(),
            RewriteMode::Fix,
            Duration::from_secs(5),
        )
        .await;

        assert_eq!(response.text, "Fix me. Done.");
        assert!(response.changed);
    }

    #[tokio::test]
    async fn test_slow_rewrite_returns_input() {
        let response = rewrite_with_timeout(
            pipeline(Duration::from_millis(500)),
            "Too slow to fix.".to_string(),
            RewriteMode::Improve,
            Duration::from_millis(50),
        )
        .await;

        assert_eq!(response.text, "Too slow to fix.");
        assert!(!response.changed);
    }

    #[tokio::test]
    async fn test_slow_fix_and_paraphrase_returns_input() {
        let result = fix_and_paraphrase_with_timeout(
            pipeline(Duration::from_millis(500)),
            "Too slow to fix.".to_string(),
            Duration::from_millis(50),
        )
        .await;

        assert_eq!(result.fixed, "Too slow to fix.");
        assert_eq!(result.paraphrased, None);
    }
}
