//! Generic provider fallback engine shared by all three capabilities.
//!
//! Providers are tried strictly in list order; each gets a bounded
//! retry budget with exponential backoff before the engine advances.
//! A not-found response abandons the provider immediately. The first
//! success wins and no further provider is contacted.

use std::future::Future;
use std::time::Duration;

use tokio::time::sleep;

use fitcoach_core::{Capability, Error, Result};

/// Attempts each provider in order until one call succeeds.
///
/// Per provider, `issue_call` is invoked up to `max_attempts` times
/// (first try included). A failure whose [`Error::skips_provider`] is
/// true abandons the provider without consuming its remaining budget;
/// a retryable failure ([`Error::is_retryable`]) waits
/// `base_delay * 2^attempt` and retries until the budget is spent. The
/// delay grows without a ceiling, so callers bound worst-case latency
/// through `max_attempts`.
///
/// # Errors
/// Returns [`Error::NoProviders`] for an empty provider list,
/// [`Error::Config`] for a zero attempt budget, and
/// [`Error::Exhausted`] wrapping the final attempt's failure once
/// every provider and retry combination has failed. A failure that is
/// neither retryable nor a provider skip (a missing API key, for
/// example) propagates unchanged: no later attempt could succeed.
pub async fn with_fallback<T, F, Fut>(
    capability: Capability,
    providers: &[String],
    max_attempts: u32,
    base_delay: Duration,
    mut issue_call: F,
) -> Result<T>
where
    F: FnMut(String) -> Fut + Send,
    Fut: Future<Output = Result<T>> + Send,
    T: Send,
{
    if providers.is_empty() {
        return Err(Error::NoProviders(capability));
    }
    if max_attempts == 0 {
        return Err(Error::Config(format!(
            "retry budget for {capability} must be at least 1"
        )));
    }

    let mut last_error: Option<Error> = None;

    for provider in providers {
        for attempt in 0..max_attempts {
            match issue_call(provider.clone()).await {
                Ok(value) => {
                    if attempt > 0 {
                        tracing::info!(
                            "{capability} succeeded on {provider} after {} attempts",
                            attempt + 1
                        );
                    }
                    return Ok(value);
                }
                Err(err) if err.skips_provider() => {
                    tracing::info!("{capability}: {provider} unavailable, trying next provider");
                    last_error = Some(err);
                    break;
                }
                Err(err) if err.is_retryable() => {
                    tracing::warn!(
                        "{capability}: {provider} attempt {}/{max_attempts} failed: {err}",
                        attempt + 1
                    );
                    let budget_left = attempt + 1 < max_attempts;
                    last_error = Some(err);
                    if budget_left {
                        sleep(base_delay * 2_u32.pow(attempt)).await;
                    }
                }
                Err(err) => {
                    tracing::error!("{capability}: {provider} failed without recourse: {err}");
                    return Err(err);
                }
            }
        }
    }

    let source = last_error.unwrap_or_else(|| Error::NoProviders(capability));
    tracing::error!("{capability}: all providers exhausted");
    Err(Error::Exhausted {
        capability,
        source: Box::new(source),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicU32, Ordering};
    use tokio::time::Instant;

    const BASE_DELAY: Duration = Duration::from_millis(1000);

    fn providers(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| (*name).to_owned()).collect()
    }

    #[tokio::test]
    async fn test_first_attempt_success_makes_one_call() {
        let calls = AtomicU32::new(0);
        let result = with_fallback(
            Capability::Plan,
            &providers(&["alpha", "beta"]),
            3,
            BASE_DELAY,
            |_provider| {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Ok("plan") }
            },
        )
        .await;

        assert_eq!(result.expect("First attempt should succeed"), "plan");
        assert_eq!(
            calls.load(Ordering::SeqCst),
            1,
            "No fallback and no retry on success"
        );
    }

    #[tokio::test]
    async fn test_not_found_advances_after_one_call() {
        let log = Mutex::new(Vec::new());
        let result = with_fallback(
            Capability::Speech,
            &providers(&["missing", "present"]),
            3,
            BASE_DELAY,
            |provider| {
                log.lock().expect("log lock").push(provider.clone());
                async move {
                    if provider == "missing" {
                        Err(Error::NotFound(provider))
                    } else {
                        Ok("audio")
                    }
                }
            },
        )
        .await;

        assert_eq!(result.expect("Second provider should succeed"), "audio");
        assert_eq!(
            *log.lock().expect("log lock"),
            vec!["missing".to_owned(), "present".to_owned()],
            "Not-found must consume exactly one call regardless of budget"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_transient_provider_exhausts_budget_with_growing_delays() {
        let timestamps = Mutex::new(Vec::new());
        let result: Result<()> = with_fallback(
            Capability::Image,
            &providers(&["flaky"]),
            3,
            BASE_DELAY,
            |_provider| {
                timestamps.lock().expect("timestamps lock").push(Instant::now());
                async { Err(Error::Provider("503".to_owned())) }
            },
        )
        .await;

        assert!(
            matches!(result, Err(Error::Exhausted { capability: Capability::Image, .. })),
            "All-transient provider must end in exhaustion"
        );

        let stamps = timestamps.lock().expect("timestamps lock");
        assert_eq!(stamps.len(), 3, "Budget of 3 means exactly 3 calls");
        let delay1 = stamps[1] - stamps[0];
        let delay2 = stamps[2] - stamps[1];
        assert_eq!(delay1, BASE_DELAY);
        assert_eq!(delay2, BASE_DELAY * 2);
        assert!(delay2 > delay1, "Backoff must strictly increase");
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_sleep_after_final_attempt_of_last_provider() {
        let start = Instant::now();
        let result: Result<()> = with_fallback(
            Capability::Plan,
            &providers(&["only"]),
            1,
            BASE_DELAY,
            |_provider| async { Err(Error::Provider("down".to_owned())) },
        )
        .await;

        assert!(result.is_err());
        assert_eq!(
            Instant::now() - start,
            Duration::ZERO,
            "A spent budget must not pay a final backoff delay"
        );
    }

    #[tokio::test]
    async fn test_empty_provider_list_is_terminal() {
        let result: Result<()> = with_fallback(
            Capability::Plan,
            &[],
            3,
            BASE_DELAY,
            |_provider| async { Ok(()) },
        )
        .await;

        assert!(matches!(
            result,
            Err(Error::NoProviders(Capability::Plan))
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_single_provider_degrades_to_bounded_retry() {
        let calls = AtomicU32::new(0);
        let result = with_fallback(
            Capability::Speech,
            &providers(&["solo"]),
            3,
            BASE_DELAY,
            |_provider| {
                let attempt = calls.fetch_add(1, Ordering::SeqCst) + 1;
                async move {
                    if attempt == 3 {
                        Ok("late win")
                    } else {
                        Err(Error::Provider("hiccup".to_owned()))
                    }
                }
            },
        )
        .await;

        assert_eq!(result.expect("Third attempt should succeed"), "late win");
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_non_retryable_failure_aborts_without_fallback() {
        let calls = AtomicU32::new(0);
        let result: Result<()> = with_fallback(
            Capability::Plan,
            &providers(&["alpha", "beta"]),
            3,
            BASE_DELAY,
            |_provider| {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err(Error::MissingApiKey("GOOGLE_API_KEY".to_owned())) }
            },
        )
        .await;

        assert!(
            matches!(result, Err(Error::MissingApiKey(_))),
            "A non-retryable failure must propagate unchanged"
        );
        assert_eq!(
            calls.load(Ordering::SeqCst),
            1,
            "No retry and no fallback can fix a missing API key"
        );
    }

    #[tokio::test]
    async fn test_zero_attempt_budget_is_rejected() {
        let calls = AtomicU32::new(0);
        let result: Result<()> = with_fallback(
            Capability::Plan,
            &providers(&["only"]),
            0,
            BASE_DELAY,
            |_provider| {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Ok(()) }
            },
        )
        .await;

        assert!(
            matches!(result, Err(Error::Config(_))),
            "A zero budget is a configuration error, not exhaustion"
        );
        assert_eq!(calls.load(Ordering::SeqCst), 0, "No call is made");
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhaustion_wraps_last_attempt_error() {
        let result: Result<()> = with_fallback(
            Capability::Plan,
            &providers(&["one", "two"]),
            2,
            BASE_DELAY,
            |provider| async move {
                if provider == "one" {
                    Err(Error::NotFound(provider))
                } else {
                    Err(Error::InvalidResponse("missing candidates".to_owned()))
                }
            },
        )
        .await;

        match result {
            Err(Error::Exhausted { capability, source }) => {
                assert_eq!(capability, Capability::Plan);
                assert!(
                    matches!(*source, Error::InvalidResponse(_)),
                    "Exhaustion should carry the final provider's failure"
                );
            }
            other => panic!("Expected exhaustion, got {other:?}"),
        }
    }
}
