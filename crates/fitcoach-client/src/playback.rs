//! Single-slot audio playback session.
//!
//! At most one clip is audible at a time. Requesting the key that is
//! already playing stops it (toggle); requesting a different key stops
//! and releases the current clip before the new one starts. The actual
//! audio output lives behind [`AudioSink`], which the embedder
//! implements.

use async_trait::async_trait;

use fitcoach_core::Result;

use crate::audio::AudioClip;

/// Synthesizes narration audio for a piece of text.
#[async_trait]
pub trait Narrator: Send + Sync {
    /// Produces a playable clip for the given text.
    ///
    /// # Errors
    /// Returns an error when every speech provider is exhausted.
    async fn narrate(&self, text: &str) -> Result<AudioClip>;
}

/// Output device abstraction owned by the playback session.
pub trait AudioSink: Send {
    /// Starts playing a clip, replacing whatever state the sink held.
    ///
    /// # Errors
    /// Returns an error if the sink cannot accept the clip.
    fn start(&mut self, clip: AudioClip) -> Result<()>;

    /// Stops playback and releases the underlying resource. Called at
    /// most once per started clip; must be safe when nothing plays.
    fn stop(&mut self);
}

/// Current session state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaybackState {
    /// Nothing is playing.
    Idle,
    /// The clip for the named logical item is audible.
    Playing(String),
}

/// Tracks which logical item's narration is currently audible.
pub struct PlaybackSession<S: AudioSink> {
    /// Output device for clips.
    sink: S,
    /// Key of the item currently playing, if any.
    current: Option<String>,
}

impl<S: AudioSink> PlaybackSession<S> {
    /// Creates an idle session over the given sink.
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            current: None,
        }
    }

    /// Plays narration for `key`, applying toggle semantics.
    ///
    /// While `key` is already playing, stops it and returns
    /// [`PlaybackState::Idle`]. While another key is playing, that
    /// clip is stopped and released before the new synthesis begins.
    /// On synthesis failure the session stays idle and the error
    /// propagates.
    ///
    /// # Errors
    /// Returns an error when synthesis or the sink fails.
    pub async fn play<N: Narrator + ?Sized>(
        &mut self,
        narrator: &N,
        key: &str,
        text: &str,
    ) -> Result<PlaybackState> {
        if self.current.as_deref() == Some(key) {
            self.stop();
            return Ok(PlaybackState::Idle);
        }
        if self.current.is_some() {
            self.stop();
        }

        let clip = narrator.narrate(text).await?;
        self.sink.start(clip)?;
        self.current = Some(key.to_owned());
        Ok(PlaybackState::Playing(key.to_owned()))
    }

    /// Stops playback and releases the resource; idempotent.
    pub fn stop(&mut self) {
        if self.current.take().is_some() {
            self.sink.stop();
        }
    }

    /// Handles the sink's natural end-of-playback signal.
    pub fn on_ended(&mut self) {
        self.stop();
    }

    /// Current session state.
    pub fn state(&self) -> PlaybackState {
        self.current
            .clone()
            .map_or(PlaybackState::Idle, PlaybackState::Playing)
    }

    /// Key of the item currently playing, if any.
    pub fn current_key(&self) -> Option<&str> {
        self.current.as_deref()
    }
}
