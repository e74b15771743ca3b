use core::result::Result as CoreResult;
use std::io::Error as IoError;

use reqwest::Error as ReqwestError;
use serde_json::Error as SerdeJsonError;
use thiserror::Error;
use toml::de::Error as TomlError;

use crate::types::Capability;

/// Result type for generation operations.
pub type Result<T> = CoreResult<T, Error>;

/// Errors that can occur while generating plans, speech, or images.
#[derive(Debug, Error)]
pub enum Error {
    /// An I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] IoError),

    /// An HTTP request failed before a response was received.
    #[error("HTTP request failed: {0}")]
    Request(#[from] ReqwestError),

    /// JSON serialization or deserialization failed.
    #[error("JSON serialization error: {0}")]
    Json(#[from] SerdeJsonError),

    /// TOML deserialization failed.
    #[error("TOML deserialization error: {0}")]
    Toml(#[from] TomlError),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Required API key was not found.
    #[error("API key not found: {0}")]
    MissingApiKey(String),

    /// The provider does not exist or does not serve this capability.
    #[error("Provider not found: {0}")]
    NotFound(String),

    /// A provider returned a transient service failure.
    #[error("Provider error: {0}")]
    Provider(String),

    /// A provider returned 2xx but the expected payload field is absent.
    #[error("Invalid response from provider: {0}")]
    InvalidResponse(String),

    /// Structured output could not be recovered by any strategy.
    #[error("Structured output recovery failed: {0}")]
    Recovery(SerdeJsonError),

    /// No providers are configured for the capability.
    #[error("no providers configured for {0}")]
    NoProviders(Capability),

    /// Every provider and retry combination failed for the capability.
    #[error("{capability} failed: all providers exhausted: {source}")]
    Exhausted {
        /// Capability that could not be fulfilled.
        capability: Capability,
        /// Failure from the final attempt, kept so a recovery failure
        /// remains distinguishable from plain provider exhaustion.
        source: Box<Error>,
    },
}

impl Error {
    /// Determines whether this error may succeed if the same provider
    /// is retried after a backoff delay.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Request(_) | Self::Provider(_) | Self::InvalidResponse(_) | Self::Recovery(_)
        )
    }

    /// Determines whether the current provider should be abandoned
    /// immediately in favor of the next one in the list.
    pub fn skips_provider(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Returns `true` when no further automatic attempt will be made
    /// for the request that produced this error.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Exhausted { .. } | Self::NoProviders(_) | Self::MissingApiKey(_) | Self::Config(_)
        )
    }
}
