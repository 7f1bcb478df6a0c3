use super::{GenerationRequest, TextGenerator};
use crate::config::RewriteConfig;
use anyhow::{anyhow, Context, Result};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

/// Sent once at load time so the service brings the model up.
const WARMUP_PROMPT: &str = "This is a test.";
const WARMUP_MAX_LENGTH: usize = 16;

#[derive(Debug, Serialize)]
struct InferencePayload<'a> {
    inputs: &'a str,
    parameters: InferenceParameters,
    options: InferenceOptions,
}

#[derive(Debug, Serialize)]
struct InferenceParameters {
    max_length: usize,
    do_sample: bool,
}

#[derive(Debug, Serialize)]
struct InferenceOptions {
    wait_for_model: bool,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum InferenceResponse {
    Generated(Vec<GeneratedText>),
    Failed { error: String },
}

#[derive(Debug, Deserialize)]
struct GeneratedText {
    generated_text: String,
}

/// Text-to-text model served by a Hugging Face compatible inference API.
///
/// Requests go to `{endpoint}/{model_id}`. Blocking: call from a plain
/// thread or `spawn_blocking`, never directly from async code.
pub struct HuggingFaceGenerator {
    client: Client,
    url: String,
    model_id: String,
    token: Option<String>,
}

impl HuggingFaceGenerator {
    /// Connect to the model and wait until it is loaded.
    ///
    /// # Returns
    /// * `Ok(HuggingFaceGenerator)` once the model answered a warm-up request
    /// * `Err` if the endpoint is unreachable or the model cannot be served
    pub fn load(model_id: &str, config: &RewriteConfig) -> Result<Self> {
        info!("Loading model {} from {}", model_id, config.endpoint);

        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        let generator = Self {
            client,
            url: format!("{}/{}", config.endpoint.trim_end_matches('/'), model_id),
            model_id: model_id.to_string(),
            token: config.api_token(),
        };

        generator
            .generate(&GenerationRequest::deterministic(WARMUP_PROMPT, WARMUP_MAX_LENGTH))
            .with_context(|| format!("Model {} failed to load", model_id))?;

        info!("✓ Model {} loaded", model_id);
        Ok(generator)
    }
}

impl TextGenerator for HuggingFaceGenerator {
    fn generate(&self, request: &GenerationRequest<'_>) -> Result<String> {
        let payload = InferencePayload {
            inputs: request.prompt,
            parameters: InferenceParameters {
                max_length: request.max_length,
                do_sample: !request.deterministic,
            },
            options: InferenceOptions {
                wait_for_model: true,
            },
        };

        let mut builder = self.client.post(&self.url).json(&payload);
        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token);
        }

        let response = builder
            .send()
            .map_err(|e| anyhow!("Inference request to {} failed: {}", self.model_id, e))?;

        let status = response.status();
        let body = response.text().context("Failed to read inference response")?;

        if !status.is_success() {
            return Err(anyhow!(
                "Inference failed with status {}: {}",
                status,
                body.trim()
            ));
        }

        debug!("{} returned {} bytes", self.model_id, body.len());
        parse_generated_text(&body)
    }
}

/// Extract the first generation from an inference API response body.
fn parse_generated_text(body: &str) -> Result<String> {
    let response: InferenceResponse =
        serde_json::from_str(body).context("Unexpected inference response")?;

    match response {
        InferenceResponse::Generated(generations) => generations
            .into_iter()
            .next()
            .map(|g| g.generated_text)
            .ok_or_else(|| anyhow!("Inference returned no generations")),
        InferenceResponse::Failed { error } => Err(anyhow!("Inference error: {}", error)),
    }
}
