//! Alert Sequencer Implementation

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::backend::{AudioDevice, PlaybackId, SoundId, SpeechSynthesizer};

/// Alert configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertConfig {
    /// Sound asset played on a SLEEPING transition
    pub sleeping_sound: SoundId,
    /// Sound asset played on a DROWSY transition
    pub drowsy_sound: SoundId,
    /// Spoken after the sleeping sound completes
    pub sleeping_message: String,
    /// Spoken after the drowsy sound completes
    pub drowsy_message: String,
    /// Speech rate passed to the synthesizer (default: 150)
    pub speech_rate: u32,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            sleeping_sound: SoundId::from("alert_sleeping.wav"),
            drowsy_sound: SoundId::from("alert_drowsy.wav"),
            sleeping_message: "Wake up! You are falling asleep".to_string(),
            drowsy_message: "Stay alert! You are feeling drowsy".to_string(),
            speech_rate: 150,
        }
    }
}

/// Which alert a transition maps to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlertKind {
    Drowsy,
    Sleeping,
}

/// Per-session state machine. `Cancelled` is reachable from any state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertPhase {
    /// Sound started, waiting for its completion event
    PlayingSound,
    /// Sound finished; spoken message pending for the next drive step
    Speaking,
    Done,
    Cancelled,
}

#[derive(Debug)]
struct AlertSession {
    playback: PlaybackId,
    message: String,
    phase: AlertPhase,
}

/// Sequences one alert at a time: sound to completion, then speech.
///
/// At most one audio session and at most one pending spoken message
/// are outstanding at any instant. Starting a new alert (or cancelling)
/// supersedes the session in flight; its completion events are ignored
/// from then on.
pub struct AlertSequencer {
    config: AlertConfig,
    audio: Box<dyn AudioDevice>,
    speech: Box<dyn SpeechSynthesizer>,
    session: Option<AlertSession>,
}

impl AlertSequencer {
    pub fn new(
        config: AlertConfig,
        audio: Box<dyn AudioDevice>,
        mut speech: Box<dyn SpeechSynthesizer>,
    ) -> Self {
        speech.set_rate(config.speech_rate);
        Self {
            config,
            audio,
            speech,
            session: None,
        }
    }

    /// Supersede any session in flight and start the alert for `kind`.
    /// A backend failure is logged and recovered: no session starts,
    /// the sequencer stays ready for the next transition.
    pub fn trigger(&mut self, kind: AlertKind) {
        self.cancel();

        let (sound, message) = match kind {
            AlertKind::Sleeping => (&self.config.sleeping_sound, &self.config.sleeping_message),
            AlertKind::Drowsy => (&self.config.drowsy_sound, &self.config.drowsy_message),
        };

        match self.audio.play(sound) {
            Ok(playback) => {
                info!("Alert started: {:?} ({})", kind, sound.0);
                self.session = Some(AlertSession {
                    playback,
                    message: message.clone(),
                    phase: AlertPhase::PlayingSound,
                });
            }
            Err(e) => {
                error!("Failed to start alert sound: {}", e);
            }
        }
    }

    /// Cancel the session in flight: halt audio synchronously and
    /// discard any pending spoken message.
    pub fn cancel(&mut self) {
        if let Some(session) = &mut self.session {
            if matches!(session.phase, AlertPhase::PlayingSound | AlertPhase::Speaking) {
                debug!("Cancelling in-flight alert session");
                self.audio.stop();
                session.phase = AlertPhase::Cancelled;
            }
        }
    }

    /// Handle an asynchronous playback-completion event. Only the live
    /// session's token advances it to the speaking step; stale tokens
    /// from superseded sessions are ignored.
    pub fn on_playback_finished(&mut self, playback: PlaybackId) {
        match &mut self.session {
            Some(session)
                if session.playback == playback && session.phase == AlertPhase::PlayingSound =>
            {
                session.phase = AlertPhase::Speaking;
            }
            _ => {
                debug!("Ignoring stale playback completion {:?}", playback);
            }
        }
    }

    /// Run the deferred speech step. Called once per scheduling-loop
    /// tick, after completion events have been drained; `speak` never
    /// runs inline in the event handler.
    pub fn drive(&mut self) {
        if let Some(session) = &mut self.session {
            if session.phase == AlertPhase::Speaking {
                if let Err(e) = self.speech.speak(&session.message) {
                    warn!("Voice alert failed: {}", e);
                }
                session.phase = AlertPhase::Done;
            }
        }
    }

    /// Phase of the most recent session, if any
    pub fn current_phase(&self) -> Option<AlertPhase> {
        self.session.as_ref().map(|s| s.phase)
    }
}
