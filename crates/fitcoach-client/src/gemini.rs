//! HTTP layer for the Gemini `generateContent` and Imagen `predict`
//! endpoints.
//!
//! One call here is one attempt: the fallback engine owns retries and
//! provider ordering, this module owns payload construction, status
//! classification, and envelope extraction.

use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::{Value, json};

use fitcoach_core::{Error, GenerationConfig, Result, UserProfile};

use crate::audio::AudioClip;
use crate::prompt;

/// Production API base URL.
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Client for a single backend account, shared by all capabilities.
pub struct GeminiEndpoint {
    /// HTTP client for API requests.
    client: Client,
    /// API key passed as a query parameter.
    api_key: String,
    /// Base URL, overridable for proxies.
    base_url: String,
}

impl GeminiEndpoint {
    /// Creates an endpoint with the given API key.
    ///
    /// # Errors
    /// Returns an error if the provided API key is empty.
    pub fn new(api_key: String) -> Result<Self> {
        if api_key.is_empty() {
            return Err(Error::MissingApiKey("GOOGLE_API_KEY".to_owned()));
        }

        Ok(Self {
            client: Client::default(),
            api_key,
            base_url: DEFAULT_BASE_URL.to_owned(),
        })
    }

    /// Overrides the API base URL (e.g. for a regional proxy).
    #[must_use]
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_owned();
        self
    }

    /// URL of a model's `generateContent` operation.
    fn generate_url(&self, model: &str) -> String {
        format!(
            "{}/models/{model}:generateContent?key={}",
            self.base_url, self.api_key
        )
    }

    /// URL of a model's `predict` operation.
    fn predict_url(&self, model: &str) -> String {
        format!(
            "{}/models/{model}:predict?key={}",
            self.base_url, self.api_key
        )
    }

    /// Builds the schema-constrained plan request body.
    pub fn plan_request(profile: &UserProfile, generation: &GenerationConfig) -> Value {
        json!({
            "contents": [{ "parts": [{ "text": prompt::PLAN_USER_TURN }] }],
            "systemInstruction": { "parts": [{ "text": prompt::plan_system_prompt(profile) }] },
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": plan_schema(),
                "temperature": generation.temperature,
                "maxOutputTokens": generation.max_output_tokens,
            }
        })
    }

    /// Builds the speech request body for the given text and voice.
    pub fn speech_request(text: &str, voice: &str) -> Value {
        json!({
            "contents": [{ "parts": [{ "text": format!("{}{text}", prompt::SPEECH_PREAMBLE) }] }],
            "generationConfig": {
                "responseModalities": ["AUDIO"],
                "speechConfig": {
                    "voiceConfig": { "prebuiltVoiceConfig": { "voiceName": voice } }
                }
            }
        })
    }

    /// Builds the image request body asking for a single sample.
    pub fn image_request(image_prompt: &str) -> Value {
        json!({
            "instances": [{ "prompt": image_prompt }],
            "parameters": { "sampleCount": 1 }
        })
    }

    /// Makes one plan-generation attempt and returns the raw text the
    /// model produced (recovery happens at the call site).
    ///
    /// # Errors
    /// Classified per attempt: 404 skips the provider, other failures
    /// and missing payload fields are retryable.
    pub async fn generate_text(&self, model: &str, body: &Value) -> Result<String> {
        let envelope: GenerateContentResponse =
            self.post(&self.generate_url(model), model, body).await?;
        let part = first_part(envelope, model)?;
        part.text
            .ok_or_else(|| Error::InvalidResponse(format!("{model}: part carries no text")))
    }

    /// Makes one speech-synthesis attempt and decodes the inline PCM
    /// payload at its declared sample rate.
    ///
    /// # Errors
    /// Classified per attempt as for [`Self::generate_text`].
    pub async fn generate_audio(&self, model: &str, body: &Value) -> Result<AudioClip> {
        let envelope: GenerateContentResponse =
            self.post(&self.generate_url(model), model, body).await?;
        let part = first_part(envelope, model)?;
        let inline = part.inline_data.ok_or_else(|| {
            Error::InvalidResponse(format!("{model}: part carries no inline audio"))
        })?;
        AudioClip::from_base64_pcm(&inline.data, &inline.mime_type)
    }

    /// Makes one image-synthesis attempt and returns the base64 image
    /// payload of the first prediction.
    ///
    /// # Errors
    /// Classified per attempt as for [`Self::generate_text`].
    pub async fn predict_image(&self, model: &str, body: &Value) -> Result<String> {
        let envelope: PredictResponse = self.post(&self.predict_url(model), model, body).await?;
        envelope
            .predictions
            .into_iter()
            .next()
            .and_then(|prediction| prediction.bytes_base64_encoded)
            .ok_or_else(|| {
                Error::InvalidResponse(format!("{model}: no prediction with image bytes"))
            })
    }

    /// POSTs a JSON body and deserializes the 2xx envelope.
    async fn post<T: for<'de> Deserialize<'de>>(
        &self,
        url: &str,
        model: &str,
        body: &Value,
    ) -> Result<T> {
        let response = self.client.post(url).json(body).send().await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(Error::NotFound(format!("model {model} is not served")));
        }
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(Error::Provider(format!(
                "{model} responded {status}: {detail}"
            )));
        }

        Ok(response.json().await?)
    }
}

/// JSON schema the plan capability constrains generation with. The
/// required lists are the output contract: every exercise field, all
/// four meal slots, and the tips pair must be present.
pub fn plan_schema() -> Value {
    let meal = json!({
        "type": "OBJECT",
        "properties": {
            "name": { "type": "STRING" },
            "calories": { "type": "NUMBER" }
        },
        "required": ["name", "calories"]
    });

    json!({
        "type": "OBJECT",
        "properties": {
            "workout_plan": {
                "type": "OBJECT",
                "properties": {
                    "daily_routine": {
                        "type": "ARRAY",
                        "items": {
                            "type": "OBJECT",
                            "properties": {
                                "day": { "type": "STRING" },
                                "focus": { "type": "STRING" },
                                "exercises": {
                                    "type": "ARRAY",
                                    "items": {
                                        "type": "OBJECT",
                                        "properties": {
                                            "name": { "type": "STRING" },
                                            "sets": { "type": "STRING" },
                                            "reps": { "type": "STRING" },
                                            "rest": { "type": "STRING" }
                                        },
                                        "required": ["name", "sets", "reps", "rest"]
                                    }
                                }
                            },
                            "required": ["day", "focus", "exercises"]
                        }
                    }
                },
                "required": ["daily_routine"]
            },
            "diet_plan": {
                "type": "OBJECT",
                "properties": {
                    "meal_plan": {
                        "type": "ARRAY",
                        "items": {
                            "type": "OBJECT",
                            "properties": {
                                "day": { "type": "STRING" },
                                "meals": {
                                    "type": "OBJECT",
                                    "properties": {
                                        "breakfast": meal.clone(),
                                        "lunch": meal.clone(),
                                        "dinner": meal.clone(),
                                        "snacks": meal
                                    },
                                    "required": ["breakfast", "lunch", "dinner", "snacks"]
                                }
                            },
                            "required": ["day", "meals"]
                        }
                    }
                },
                "required": ["meal_plan"]
            },
            "ai_tips": {
                "type": "OBJECT",
                "properties": {
                    "lifestyle_tips": { "type": "ARRAY", "items": { "type": "STRING" } },
                    "motivation": { "type": "STRING" }
                },
                "required": ["lifestyle_tips", "motivation"]
            }
        },
        "required": ["workout_plan", "diet_plan", "ai_tips"]
    })
}

/// Response envelope returned by `generateContent`.
#[derive(Deserialize)]
struct GenerateContentResponse {
    /// Generated candidates; the first one carries the payload.
    #[serde(default)]
    candidates: Vec<Candidate>,
}

/// A single generated candidate.
#[derive(Deserialize)]
struct Candidate {
    /// Content block holding the response parts.
    content: Option<CandidateContent>,
}

/// Content block of a candidate.
#[derive(Deserialize)]
struct CandidateContent {
    /// Ordered response parts; the first one is used.
    #[serde(default)]
    parts: Vec<Part>,
}

/// One response part: either text or an inline binary payload.
#[derive(Deserialize)]
struct Part {
    /// Generated text, present for plan responses.
    text: Option<String>,
    /// Inline binary payload, present for audio responses.
    #[serde(rename = "inlineData")]
    inline_data: Option<InlineData>,
}

/// Base64 payload plus its declared MIME string.
#[derive(Deserialize)]
struct InlineData {
    /// MIME-type-like string carrying the `rate=` parameter.
    #[serde(rename = "mimeType")]
    mime_type: String,
    /// Base64-encoded payload bytes.
    data: String,
}

/// Response envelope returned by `predict`.
#[derive(Deserialize)]
struct PredictResponse {
    /// Generated predictions; the first one is used.
    #[serde(default)]
    predictions: Vec<Prediction>,
}

/// A single image prediction.
#[derive(Deserialize)]
struct Prediction {
    /// Base64-encoded image bytes.
    #[serde(rename = "bytesBase64Encoded")]
    bytes_base64_encoded: Option<String>,
}

/// Extracts the first part of the first candidate, treating absence as
/// a retryable malformed envelope rather than a crash.
fn first_part(envelope: GenerateContentResponse, model: &str) -> Result<Part> {
    envelope
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .and_then(|content| content.parts.into_iter().next())
        .ok_or_else(|| Error::InvalidResponse(format!("{model}: envelope carries no parts")))
}
