//! Text-to-speech playback session
//!
//! Playback goes through a remote synthesis engine first and falls back to a
//! local engine when the remote one fails. A [`PlaybackSession`] owns the one
//! playback that may be active at a time; starting a new one cancels the old.

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Voice requested from the synthesis engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Voice {
    Male,
    #[default]
    Female,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeechOptions {
    pub lang: String,
    pub rate: f32,
    pub pitch: f32,
    pub volume: f32,
    pub voice: Voice,
    /// Try the remote engine before the local one
    pub prefer_remote: bool,
}

impl Default for SpeechOptions {
    fn default() -> Self {
        Self {
            lang: "en-US".to_string(),
            rate: 0.9,
            pitch: 1.0,
            volume: 1.0,
            voice: Voice::Female,
            prefer_remote: true,
        }
    }
}

impl SpeechOptions {
    pub fn slow() -> Self {
        Self {
            rate: 0.7,
            ..Default::default()
        }
    }

    pub fn normal() -> Self {
        Self::default()
    }

    pub fn fast() -> Self {
        Self {
            rate: 1.2,
            ..Default::default()
        }
    }
}

/// Something that can start and stop speaking a piece of text
pub trait SpeechEngine {
    fn name(&self) -> &str;

    /// Begin playback; returning `Ok` means audio has started
    fn start(&mut self, text: &str, options: &SpeechOptions) -> Result<()>;

    /// Stop any playback this engine started. Must be safe to call when idle.
    fn cancel(&mut self);
}

/// Which engine is producing the current playback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Remote,
    Local,
}

/// Callback run once when playback ends on its own
pub type Completion = Box<dyn FnOnce() + Send>;

enum PlaybackState {
    Idle,
    Playing {
        route: Route,
        on_end: Option<Completion>,
    },
}

/// Owner of the single active playback
pub struct PlaybackSession<R, L> {
    remote: R,
    local: L,
    state: PlaybackState,
}

impl<R: SpeechEngine, L: SpeechEngine> PlaybackSession<R, L> {
    pub fn new(remote: R, local: L) -> Self {
        Self {
            remote,
            local,
            state: PlaybackState::Idle,
        }
    }

    /// Speak `text`, replacing whatever is currently playing.
    ///
    /// Blank text is ignored and yields `Ok(None)`. An error is returned only
    /// when the local engine fails too.
    pub fn speak(
        &mut self,
        text: &str,
        options: &SpeechOptions,
        on_end: Option<Completion>,
    ) -> Result<Option<Route>> {
        if text.trim().is_empty() {
            return Ok(None);
        }

        self.cancel();

        let route = if options.prefer_remote {
            match self.remote.start(text, options) {
                Ok(()) => Route::Remote,
                Err(e) => {
                    log::warn!(
                        "{} playback failed, falling back to {}: {e}",
                        self.remote.name(),
                        self.local.name()
                    );
                    self.local.start(text, options)?;
                    Route::Local
                }
            }
        } else {
            self.local.start(text, options)?;
            Route::Local
        };

        self.state = PlaybackState::Playing { route, on_end };
        Ok(Some(route))
    }

    /// Stop playback without running the completion callback.
    ///
    /// Returns whether anything was playing.
    pub fn cancel(&mut self) -> bool {
        self.remote.cancel();
        self.local.cancel();
        let was_playing = self.is_playing();
        self.state = PlaybackState::Idle;
        was_playing
    }

    /// Called by the host when the active playback reaches its end
    pub fn finish(&mut self) -> bool {
        match std::mem::replace(&mut self.state, PlaybackState::Idle) {
            PlaybackState::Playing { on_end, .. } => {
                if let Some(callback) = on_end {
                    callback();
                }
                true
            }
            PlaybackState::Idle => false,
        }
    }

    pub fn is_playing(&self) -> bool {
        matches!(self.state, PlaybackState::Playing { .. })
    }

    pub fn current_route(&self) -> Option<Route> {
        match self.state {
            PlaybackState::Playing { route, .. } => Some(route),
            PlaybackState::Idle => None,
        }
    }
}
