//! Generation client facade: the three call sites built on the
//! fallback engine.

use std::time::Duration;

use async_trait::async_trait;

use fitcoach_core::{Capability, CoachConfig, Plan, Result, UserProfile};

use crate::audio::{AudioClip, decode_base64};
use crate::fallback::with_fallback;
use crate::gemini::GeminiEndpoint;
use crate::playback::Narrator;
use crate::recovery::recover;

/// A generated image exposed as a directly embeddable data URI.
#[derive(Debug, Clone)]
pub struct ImageHandle {
    /// Base64 payload of the PNG image.
    base64: String,
}

impl ImageHandle {
    /// Wraps a base64 image payload.
    pub fn new(base64: String) -> Self {
        Self { base64 }
    }

    /// `data:` URI suitable for direct embedding.
    pub fn data_uri(&self) -> String {
        format!("data:image/png;base64,{}", self.base64)
    }

    /// Decodes the raw image bytes.
    ///
    /// # Errors
    /// Returns an error if the payload is not valid base64.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        decode_base64(&self.base64)
    }
}

/// Client for the plan, speech, and image capabilities. Each request
/// walks its capability's provider list through the shared fallback
/// engine; independent capabilities share no mutable state and may be
/// in flight concurrently.
pub struct GenerationClient {
    /// HTTP endpoint shared by all capabilities.
    endpoint: GeminiEndpoint,
    /// Provider lists, retry policy, and generation parameters.
    config: CoachConfig,
}

impl GenerationClient {
    /// Creates a client from configuration, resolving the API key from
    /// the config file or environment.
    ///
    /// # Errors
    /// Returns [`Error::MissingApiKey`] when no key is available.
    pub fn new(config: CoachConfig) -> Result<Self> {
        let api_key = config.resolve_api_key()?;
        Ok(Self {
            endpoint: GeminiEndpoint::new(api_key)?,
            config,
        })
    }

    /// Backoff base delay from configuration.
    fn base_delay(&self) -> Duration {
        Duration::from_millis(self.config.retry.base_delay_ms)
    }

    /// Generates a complete plan for the profile. Each attempt makes
    /// one HTTP call and recovers the structured output; a recovery
    /// failure counts as a transient attempt failure, so a later
    /// attempt or provider can still supply a clean plan.
    ///
    /// # Errors
    /// Terminal failures only: no providers configured, or every
    /// provider and retry combination exhausted (the wrapped source
    /// tells recovery failures apart from provider failures).
    pub async fn generate_plan(&self, profile: &UserProfile) -> Result<Plan> {
        let body = GeminiEndpoint::plan_request(profile, &self.config.generation);
        with_fallback(
            Capability::Plan,
            &self.config.models.plan,
            self.config.retry.max_attempts,
            self.base_delay(),
            |model| {
                let body = body.clone();
                async move {
                    let raw = self.endpoint.generate_text(&model, &body).await?;
                    recover::<Plan>(&raw)
                }
            },
        )
        .await
    }

    /// Synthesizes narration audio for the text using the configured
    /// voice, returning a self-contained playable clip.
    ///
    /// # Errors
    /// Terminal failures as for [`Self::generate_plan`].
    pub async fn synthesize_speech(&self, text: &str) -> Result<AudioClip> {
        let body = GeminiEndpoint::speech_request(text, &self.config.models.voice);
        with_fallback(
            Capability::Speech,
            &self.config.models.speech,
            self.config.retry.max_attempts,
            self.base_delay(),
            |model| {
                let body = body.clone();
                async move { self.endpoint.generate_audio(&model, &body).await }
            },
        )
        .await
    }

    /// Generates a single illustration for the prompt.
    ///
    /// # Errors
    /// Terminal failures as for [`Self::generate_plan`].
    pub async fn illustrate(&self, image_prompt: &str) -> Result<ImageHandle> {
        let body = GeminiEndpoint::image_request(image_prompt);
        with_fallback(
            Capability::Image,
            &self.config.models.image,
            self.config.retry.max_attempts,
            self.base_delay(),
            |model| {
                let body = body.clone();
                async move {
                    let bytes = self.endpoint.predict_image(&model, &body).await?;
                    Ok(ImageHandle::new(bytes))
                }
            },
        )
        .await
    }
}

#[async_trait]
impl Narrator for GenerationClient {
    async fn narrate(&self, text: &str) -> Result<AudioClip> {
        self.synthesize_speech(text).await
    }
}
