//! Best-effort recovery of structured output from raw model text.
//!
//! Generation is schema-constrained but not guaranteed byte-clean:
//! models occasionally wrap the JSON in markdown fences or prose.
//! Recovery peels those wrappers in a fixed order, and every stage
//! still requires the extracted span to parse strictly, so garbage is
//! never silently accepted.

use std::sync::LazyLock;

use regex::Regex;
use serde::de::DeserializeOwned;

use fitcoach_core::{Error, Result};

/// First fenced block explicitly labeled as JSON. The pattern is a
/// constant, so compilation cannot fail at runtime.
static JSON_FENCE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?s)```json\s*(.*?)\s*```").ok());

/// First fenced block of any kind.
static ANY_FENCE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?s)```\s*(.*?)\s*```").ok());

/// Attempts to parse `raw` as `T`, falling back through extraction
/// strategies: strict parse, labeled fence, any fence, then the greedy
/// span from the first `{` to the last `}`.
///
/// # Errors
/// Returns [`Error::Recovery`] carrying the original strict-parse
/// error when every strategy fails.
pub fn recover<T: DeserializeOwned>(raw: &str) -> Result<T> {
    let strict_error = match serde_json::from_str::<T>(raw) {
        Ok(value) => return Ok(value),
        Err(err) => err,
    };

    for candidate in candidates(raw) {
        if let Ok(value) = serde_json::from_str::<T>(candidate) {
            tracing::debug!("recovered structured output from wrapped response");
            return Ok(value);
        }
    }

    Err(Error::Recovery(strict_error))
}

/// Extraction candidates in priority order.
fn candidates(raw: &str) -> impl Iterator<Item = &str> {
    let labeled = JSON_FENCE
        .as_ref()
        .and_then(|fence| fence.captures(raw))
        .and_then(|caps| caps.get(1))
        .map(|span| span.as_str());
    let fenced = ANY_FENCE
        .as_ref()
        .and_then(|fence| fence.captures(raw))
        .and_then(|caps| caps.get(1))
        .map(|span| span.as_str());
    let braced = match (raw.find('{'), raw.rfind('}')) {
        (Some(open), Some(close)) if open < close => Some(&raw[open..=close]),
        _ => None,
    };

    labeled.into_iter().chain(fenced).chain(braced)
}
