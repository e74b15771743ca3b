//! Resilient multi-provider generation client.
//!
//! Plan, speech, and image generation share one fallback engine that
//! walks an ordered provider list with bounded exponential-backoff
//! retry. Successful responses are unwrapped by the structured-output
//! recoverer (plan) or the PCM-to-WAV codec (speech) before reaching
//! the caller.
#![cfg_attr(
    test,
    allow(
        clippy::expect_used,
        clippy::unwrap_used,
        clippy::panic,
        clippy::missing_panics_doc,
        reason = "Allow for tests"
    )
)]

/// PCM decoding and WAV container encoding.
pub mod audio;
/// Generation client facade over the three capabilities.
pub mod client;
/// Generic provider fallback engine.
pub mod fallback;
/// HTTP layer for the Gemini and Imagen endpoints.
pub mod gemini;
/// Single-slot audio playback session.
pub mod playback;
/// Plan prompt construction.
pub mod prompt;
/// Best-effort JSON recovery from raw model output.
pub mod recovery;

pub use audio::AudioClip;
pub use client::{GenerationClient, ImageHandle};
pub use fallback::with_fallback;
pub use playback::{AudioSink, Narrator, PlaybackSession, PlaybackState};
pub use recovery::recover;
