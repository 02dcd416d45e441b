//! Alert Sequencing
//!
//! Turns status transitions into non-overlapping sound-then-speech
//! alert sessions. A new transition always supersedes the session in
//! flight: audio is stopped immediately and a superseded session's
//! spoken message never fires.

pub mod backend;
pub mod sequencer;

pub use backend::{AudioDevice, PlaybackId, SoundId, SpeechSynthesizer};
pub use sequencer::{AlertConfig, AlertKind, AlertPhase, AlertSequencer};

use thiserror::Error;

/// Alert backend error types. These are recovered where they occur:
/// a failed backend call costs one audible alert, never the session.
#[derive(Error, Debug)]
pub enum AlertError {
    #[error("Audio playback failed: {0}")]
    Playback(String),

    #[error("Speech synthesis failed: {0}")]
    Speech(String),
}
