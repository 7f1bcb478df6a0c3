use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub analysis: AnalysisConfig,
    #[serde(default)]
    pub rewrite: RewriteConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Longest passage accepted, in characters.
    #[serde(default = "default_max_text_length")]
    pub max_text_length: usize,
    /// Most whitespace-separated words accepted.
    #[serde(default = "default_max_words")]
    pub max_words: usize,
    #[serde(default = "default_analysis_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RewriteConfig {
    /// Base URL of the hosted inference API; the model id is appended.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_grammar_model")]
    pub grammar_model: String,
    #[serde(default = "default_paraphrase_model")]
    pub paraphrase_model: String,
    /// Environment variable holding the API token, if any.
    #[serde(default = "default_api_token_env")]
    pub api_token_env: String,
    /// Run Harper over the model output.
    #[serde(default = "default_true")]
    pub secondary_correction: bool,
    /// Corrected text must have more words than this to be paraphrased.
    #[serde(default = "default_paraphrase_min_words")]
    pub paraphrase_min_words: usize,
    #[serde(default = "default_max_output_length")]
    pub max_output_length: usize,
    /// Added to the input length to get the generation budget.
    #[serde(default = "default_length_headroom")]
    pub length_headroom: usize,
    #[serde(default = "default_paraphrase_prefix")]
    pub paraphrase_prefix: String,
    /// Paraphrases this short or shorter are discarded.
    #[serde(default = "default_min_paraphrase_length")]
    pub min_paraphrase_length: usize,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_rewrite_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_true() -> bool { true }

fn default_max_text_length() -> usize { 2500 }
fn default_max_words() -> usize { 340 }
fn default_analysis_timeout_secs() -> u64 { 30 }

fn default_endpoint() -> String { "https://api-inference.huggingface.co/models".to_string() }
fn default_grammar_model() -> String { "pszemraj/flan-t5-large-grammar-synthesis".to_string() }
fn default_paraphrase_model() -> String { "Vamsi/T5_Paraphrase_Paws".to_string() }
fn default_api_token_env() -> String { "HF_TOKEN".to_string() }
fn default_paraphrase_min_words() -> usize { 12 }
fn default_max_output_length() -> usize { 512 }
fn default_length_headroom() -> usize { 100 }
fn default_paraphrase_prefix() -> String { "paraphrase: ".to_string() }
fn default_min_paraphrase_length() -> usize { 10 }
fn default_request_timeout_secs() -> u64 { 120 }
fn default_rewrite_timeout_secs() -> u64 { 20 }

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            max_text_length: default_max_text_length(),
            max_words: default_max_words(),
            timeout_secs: default_analysis_timeout_secs(),
        }
    }
}

impl Default for RewriteConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            grammar_model: default_grammar_model(),
            paraphrase_model: default_paraphrase_model(),
            api_token_env: default_api_token_env(),
            secondary_correction: default_true(),
            paraphrase_min_words: default_paraphrase_min_words(),
            max_output_length: default_max_output_length(),
            length_headroom: default_length_headroom(),
            paraphrase_prefix: default_paraphrase_prefix(),
            min_paraphrase_length: default_min_paraphrase_length(),
            request_timeout_secs: default_request_timeout_secs(),
            timeout_secs: default_rewrite_timeout_secs(),
        }
    }
}

impl RewriteConfig {
    /// Generation budget for an input: input length plus headroom, capped.
    pub fn max_length_for(&self, text: &str) -> usize {
        (text.chars().count() + self.length_headroom).min(self.max_output_length)
    }

    /// API token from the configured environment variable, if set.
    pub fn api_token(&self) -> Option<String> {
        std::env::var(&self.api_token_env)
            .ok()
            .filter(|token| !token.trim().is_empty())
    }
}

impl Config {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse config")
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }
}

/// Default config location: `~/.config/prose-assistant/config.toml`.
pub fn default_config_path() -> Result<PathBuf> {
    let config_dir = dirs::config_dir()
        .ok_or_else(|| anyhow!("Could not determine config directory"))?;
    Ok(config_dir.join("prose-assistant").join("config.toml"))
}

/// Resolve an explicit path (expanding `~` and `$VARS`) or the default one.
pub fn resolve_config_path(path: Option<&str>) -> Result<PathBuf> {
    match path {
        Some(raw) => {
            let expanded = shellexpand::full(raw)
                .map_err(|e| anyhow!("Failed to expand path: {}", e))?
                .to_string();
            Ok(PathBuf::from(expanded))
        }
        None => default_config_path(),
    }
}

/// Load configuration, falling back to defaults when the file is missing
/// or invalid.
pub fn load_config(path: Option<&str>) -> Config {
    let config_path = match resolve_config_path(path) {
        Ok(p) => p,
        Err(e) => {
            warn!("{}, using default config", e);
            return Config::default();
        }
    };

    let config_str = match fs::read_to_string(&config_path) {
        Ok(s) => s,
        Err(_) => {
            warn!(
                "Could not read config file at {}, using defaults",
                config_path.display()
            );
            return Config::default();
        }
    };

    match Config::from_toml_str(&config_str) {
        Ok(config) => {
            info!("Loaded config from {}", config_path.display());
            config
        }
        Err(e) => {
            warn!("{:#}, using defaults", e);
            Config::default()
        }
    }
}
