//! Configuration for provider lists, retry policy, and generation parameters.

use std::env;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Primary env var consulted for the backend API key.
const ENV_GOOGLE_API_KEY: &str = "GOOGLE_API_KEY";
/// Legacy env var consulted when the primary is unset.
const ENV_GEMINI_API_KEY: &str = "GEMINI_API_KEY";

/// Complete client configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CoachConfig {
    /// Backend API key; falls back to the environment when absent.
    pub api_key: Option<String>,
    /// Provider lists and voice selection.
    pub models: ModelConfig,
    /// Retry and backoff policy shared by all capabilities.
    pub retry: RetryConfig,
    /// Generation parameters for the plan capability.
    pub generation: GenerationConfig,
}

/// Ordered provider lists per capability, most capable first.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Models tried in order for plan generation.
    pub plan: Vec<String>,
    /// Models tried in order for speech synthesis.
    pub speech: Vec<String>,
    /// Models tried in order for image synthesis.
    pub image: Vec<String>,
    /// Prebuilt voice used for narration.
    pub voice: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            plan: vec![
                "gemini-2.0-flash-exp".to_owned(),
                "gemini-1.5-flash-latest".to_owned(),
                "gemini-1.5-pro-latest".to_owned(),
            ],
            speech: vec![
                "gemini-2.5-flash-preview-tts".to_owned(),
                "gemini-2.0-flash-exp".to_owned(),
                "gemini-1.5-pro".to_owned(),
            ],
            image: vec![
                "imagen-3.0-generate-002".to_owned(),
                "imagen-2.0-generate-002".to_owned(),
            ],
            voice: "Kore".to_owned(),
        }
    }
}

/// Retry and backoff policy for a single provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Maximum calls per provider, first try included.
    pub max_attempts: u32,
    /// Base backoff delay in milliseconds; doubles per attempt.
    pub base_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay_ms: 1000,
        }
    }
}

/// Generation parameters for schema-constrained plan requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Sampling temperature.
    pub temperature: f32,
    /// Upper bound on generated tokens.
    pub max_output_tokens: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: 0.5,
            max_output_tokens: 3072,
        }
    }
}

impl CoachConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        Ok(toml::from_str(&raw)?)
    }

    /// Resolves the API key from the config file value, then the
    /// `GOOGLE_API_KEY` and `GEMINI_API_KEY` environment variables.
    ///
    /// # Errors
    /// Returns [`Error::MissingApiKey`] if no non-empty key is found.
    pub fn resolve_api_key(&self) -> Result<String> {
        let candidates = [
            self.api_key.clone(),
            env::var(ENV_GOOGLE_API_KEY).ok(),
            env::var(ENV_GEMINI_API_KEY).ok(),
        ];
        candidates
            .into_iter()
            .flatten()
            .map(|value| value.trim().to_owned())
            .find(|value| !value.is_empty())
            .ok_or_else(|| Error::MissingApiKey(ENV_GOOGLE_API_KEY.to_owned()))
    }
}
