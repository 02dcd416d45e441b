//! Audio and speech backend traits

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::AlertError;

/// Identifier of a configured sound asset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoundId(pub String);

impl From<&str> for SoundId {
    fn from(s: &str) -> Self {
        SoundId(s.to_string())
    }
}

/// Token identifying one playback. Completion notifications carry it,
/// so completions from a superseded session can be told apart from the
/// live one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlaybackId(Uuid);

impl PlaybackId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PlaybackId {
    fn default() -> Self {
        Self::new()
    }
}

/// Audio playback device. `play` is fire-and-forget; completion
/// arrives asynchronously as a `PlaybackId` event handed back to
/// `AlertSequencer::on_playback_finished`.
pub trait AudioDevice: Send {
    fn play(&mut self, sound: &SoundId) -> Result<PlaybackId, AlertError>;

    /// Synchronously halt the current playback, if any
    fn stop(&mut self);
}

/// Text-to-speech backend. `speak` is invoked only from the
/// sequencer's drive step, never inline in event handling, so a slow
/// synthesizer cannot stall frame processing mid-update.
pub trait SpeechSynthesizer: Send {
    fn speak(&mut self, text: &str) -> Result<(), AlertError>;

    /// Speech rate in backend-specific units
    fn set_rate(&mut self, rate: u32);
}
