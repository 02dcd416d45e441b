//! Monitoring session implementation

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{info, warn};

use alerting::{AlertKind, AlertSequencer, AudioDevice, PlaybackId, SpeechSynthesizer};
use drowsiness::{
    format_mmss, ActiveClock, CombinedEyeState, DebounceAggregator, Status,
};
use face_landmarks::{FaceLandmarks, LandmarkSource};

use crate::config::MonitorConfig;
use crate::MonitorError;

/// Read-only view for a rendering consumer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub status: Status,
    pub status_color: String,
    pub timer_text: String,
    pub face_detected: bool,
    pub running: bool,
}

/// One monitoring session.
///
/// Owns the debounce aggregator, the active clock, and the alert
/// sequencer. Status and run counters are mutated only here, on the
/// scheduling loop's thread of execution; everything else reads. A
/// frame tick completes entirely, including transition side effects,
/// before any audio-completion event is handled.
pub struct MonitorSession {
    config: MonitorConfig,
    aggregator: DebounceAggregator,
    clock: ActiveClock,
    alerts: AlertSequencer,
    running: bool,
    face_detected: bool,
}

impl MonitorSession {
    /// Create a session. Configuration errors are fatal here.
    pub fn new(
        config: MonitorConfig,
        audio: Box<dyn AudioDevice>,
        speech: Box<dyn SpeechSynthesizer>,
    ) -> Result<Self, MonitorError> {
        config.validate()?;
        Ok(Self {
            aggregator: DebounceAggregator::new(config.drowsiness.clone()),
            clock: ActiveClock::new(),
            alerts: AlertSequencer::new(config.alert.clone(), audio, speech),
            running: false,
            face_detected: false,
            config,
        })
    }

    /// Begin (or resume) monitoring
    pub fn start(&mut self, now: Instant) {
        if !self.running {
            info!("Monitoring started");
            self.running = true;
            self.clock.resume(self.aggregator.status(), now);
        }
    }

    /// Pause monitoring: freezes the clock and silences any in-flight
    /// alert. Accumulated active time is kept.
    pub fn stop(&mut self, now: Instant) {
        if self.running {
            info!("Monitoring stopped");
            self.running = false;
            self.clock.pause(now);
            self.alerts.cancel();
        }
    }

    /// Reset to a fresh session: status back to ACTIVE, counters and
    /// the active clock zeroed, alerts cancelled.
    pub fn reset(&mut self, now: Instant) {
        info!("Session reset");
        self.aggregator.reset();
        self.clock.reset();
        self.alerts.cancel();
        if self.running {
            self.clock.resume(self.aggregator.status(), now);
        }
    }

    /// Process one frame's landmarks (`None` = no face detected).
    /// No-op while stopped.
    pub fn process_frame(&mut self, landmarks: Option<&FaceLandmarks>, now: Instant) {
        if !self.running {
            return;
        }
        self.face_detected = landmarks.is_some();

        let observation =
            landmarks.map(|frame| CombinedEyeState::from_landmarks(frame, &self.config.drowsiness));

        // The aggregator reports the transition with both endpoints, so
        // the clock banks its delta against the correct prior state and
        // the sequencer supersedes the old session before the new
        // status takes effect anywhere else.
        if let Some(transition) = self.aggregator.observe(observation) {
            self.clock.on_transition(&transition, now);
            match transition.to {
                Status::Active => self.alerts.cancel(),
                Status::Drowsy => self.alerts.trigger(AlertKind::Drowsy),
                Status::Sleeping => self.alerts.trigger(AlertKind::Sleeping),
            }
        }
    }

    /// Feed one audio-completion event. Processed between frame ticks.
    pub fn handle_audio_event(&mut self, playback: PlaybackId) {
        if self.running {
            self.alerts.on_playback_finished(playback);
        }
    }

    /// Run the deferred speech step for any completed alert sound
    pub fn drive_alerts(&mut self) {
        if self.running {
            self.alerts.drive();
        }
    }

    /// Current debounced status
    pub fn status(&self) -> Status {
        self.aggregator.status()
    }

    /// Cumulative active time
    pub fn elapsed(&self, now: Instant) -> Duration {
        self.clock.elapsed(now)
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Snapshot for a rendering consumer
    pub fn snapshot(&self, now: Instant) -> SessionSnapshot {
        let status = self.status();
        SessionSnapshot {
            status,
            status_color: status.display_color().to_string(),
            timer_text: format_mmss(self.elapsed(now)),
            face_detected: self.face_detected,
            running: self.running,
        }
    }

    /// Cooperative polling loop: one frame tick per interval, with
    /// audio-completion events drained and pending speech driven
    /// between ticks. Runs until the session is stopped. Landmark
    /// source failures are logged and the frame skipped.
    pub async fn run(
        &mut self,
        source: &mut dyn LandmarkSource,
        audio_events: &mut UnboundedReceiver<PlaybackId>,
    ) {
        let mut interval =
            tokio::time::interval(Duration::from_millis(self.config.frame_interval_ms));
        while self.running {
            interval.tick().await;

            while let Ok(playback) = audio_events.try_recv() {
                self.handle_audio_event(playback);
            }
            self.drive_alerts();

            let now = Instant::now();
            match source.next_frame() {
                Ok(frame) => self.process_frame(frame.as_ref(), now),
                Err(e) => warn!("Landmark acquisition failed, frame skipped: {}", e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alerting::{AlertError, SoundId};
    use std::sync::{Arc, Mutex};
    use tokio::sync::mpsc;

    struct TestAudio {
        played: Arc<Mutex<Vec<String>>>,
        stops: Arc<Mutex<u32>>,
        completions: Option<mpsc::UnboundedSender<PlaybackId>>,
    }

    impl AudioDevice for TestAudio {
        fn play(&mut self, sound: &SoundId) -> Result<PlaybackId, AlertError> {
            self.played.lock().unwrap().push(sound.0.clone());
            let id = PlaybackId::new();
            if let Some(tx) = &self.completions {
                let _ = tx.send(id);
            }
            Ok(id)
        }

        fn stop(&mut self) {
            *self.stops.lock().unwrap() += 1;
        }
    }

    struct TestSpeech {
        spoken: Arc<Mutex<Vec<String>>>,
    }

    impl SpeechSynthesizer for TestSpeech {
        fn speak(&mut self, text: &str) -> Result<(), AlertError> {
            self.spoken.lock().unwrap().push(text.to_string());
            Ok(())
        }

        fn set_rate(&mut self, _rate: u32) {}
    }

    struct Harness {
        session: MonitorSession,
        played: Arc<Mutex<Vec<String>>>,
        stops: Arc<Mutex<u32>>,
        spoken: Arc<Mutex<Vec<String>>>,
    }

    fn harness(completions: Option<mpsc::UnboundedSender<PlaybackId>>) -> Harness {
        let played = Arc::new(Mutex::new(Vec::new()));
        let stops = Arc::new(Mutex::new(0));
        let spoken = Arc::new(Mutex::new(Vec::new()));
        let session = MonitorSession::new(
            MonitorConfig::default(),
            Box::new(TestAudio {
                played: played.clone(),
                stops: stops.clone(),
                completions,
            }),
            Box::new(TestSpeech {
                spoken: spoken.clone(),
            }),
        )
        .unwrap();
        Harness {
            session,
            played,
            stops,
            spoken,
        }
    }

    fn frame_with_ear(ratio: f32) -> FaceLandmarks {
        crate::synthetic::landmarks_with_ear(ratio)
    }

    fn t(base: Instant, secs: u64) -> Instant {
        base + Duration::from_secs(secs)
    }

    #[test]
    fn test_rejects_invalid_config() {
        let mut config = MonitorConfig::default();
        config.drowsiness.frame_threshold = 0;
        let result = MonitorSession::new(
            config,
            Box::new(TestAudio {
                played: Arc::new(Mutex::new(Vec::new())),
                stops: Arc::new(Mutex::new(0)),
                completions: None,
            }),
            Box::new(TestSpeech {
                spoken: Arc::new(Mutex::new(Vec::new())),
            }),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_sleep_scenario_transitions_once_and_freezes_clock() {
        // Thresholds 0.25/0.21, frame threshold 6, ratio 0.10:
        // exactly one ACTIVE -> SLEEPING transition at frame 6, active
        // time frozen from that frame onward.
        let mut h = harness(None);
        let base = Instant::now();
        h.session.start(base);

        let frame = frame_with_ear(0.10);
        for i in 0..5 {
            h.session.process_frame(Some(&frame), t(base, i));
            assert_eq!(h.session.status(), Status::Active);
        }
        h.session.process_frame(Some(&frame), t(base, 5));
        assert_eq!(h.session.status(), Status::Sleeping);
        assert_eq!(h.played.lock().unwrap().len(), 1);

        // Further closed frames: no re-fire, no second alert
        for i in 6..12 {
            h.session.process_frame(Some(&frame), t(base, i));
        }
        assert_eq!(h.played.lock().unwrap().len(), 1);

        // Clock banked 5s of active time at the transition, frozen since
        assert_eq!(h.session.elapsed(t(base, 60)), Duration::from_secs(5));
    }

    #[test]
    fn test_clock_resumes_on_return_to_active() {
        let mut h = harness(None);
        let base = Instant::now();
        h.session.start(base);

        let closed = frame_with_ear(0.10);
        let open = frame_with_ear(0.40);
        for i in 0..6 {
            h.session.process_frame(Some(&closed), t(base, i));
        }
        // Sleeping from t=5; recover over frames at t=10..15
        for i in 10..16 {
            h.session.process_frame(Some(&open), t(base, i));
        }
        assert_eq!(h.session.status(), Status::Active);
        // 5s banked before sleeping; active again since t=15
        assert_eq!(h.session.elapsed(t(base, 20)), Duration::from_secs(10));
    }

    #[test]
    fn test_half_closed_eyes_trigger_drowsy_alert() {
        let mut h = harness(None);
        let base = Instant::now();
        h.session.start(base);

        let half = frame_with_ear(0.23);
        for i in 0..6 {
            h.session.process_frame(Some(&half), t(base, i));
        }
        assert_eq!(h.session.status(), Status::Drowsy);
        assert_eq!(h.played.lock().unwrap().as_slice(), ["alert_drowsy.wav"]);
    }

    #[test]
    fn test_stop_pauses_clock_and_cancels_alert() {
        let mut h = harness(None);
        let base = Instant::now();
        h.session.start(base);

        let closed = frame_with_ear(0.10);
        for i in 0..6 {
            h.session.process_frame(Some(&closed), t(base, i));
        }
        h.session.stop(t(base, 8));
        assert!(*h.stops.lock().unwrap() >= 1);

        // Frames while stopped are ignored
        h.session.process_frame(Some(&closed), t(base, 9));
        assert!(!h.session.is_running());

        // Restart keeps accumulated time and status
        h.session.start(t(base, 20));
        assert_eq!(h.session.status(), Status::Sleeping);
        assert_eq!(h.session.elapsed(t(base, 30)), Duration::from_secs(5));
    }

    #[test]
    fn test_reset_zeroes_everything() {
        let mut h = harness(None);
        let base = Instant::now();
        h.session.start(base);

        let closed = frame_with_ear(0.10);
        for i in 0..6 {
            h.session.process_frame(Some(&closed), t(base, i));
        }
        h.session.reset(t(base, 10));
        assert_eq!(h.session.status(), Status::Active);
        assert_eq!(h.session.elapsed(t(base, 10)), Duration::ZERO);

        // Still running, so the clock starts over from the reset point
        assert_eq!(h.session.elapsed(t(base, 15)), Duration::from_secs(5));
    }

    #[test]
    fn test_snapshot_fields() {
        let mut h = harness(None);
        let base = Instant::now();
        h.session.start(base);
        h.session.process_frame(Some(&frame_with_ear(0.40)), base);

        let snap = h.session.snapshot(t(base, 65));
        assert_eq!(snap.status, Status::Active);
        assert_eq!(snap.status_color, "green");
        assert_eq!(snap.timer_text, "01:05");
        assert!(snap.face_detected);
        assert!(snap.running);
    }

    #[test]
    fn test_no_face_frames_freeze_by_default() {
        let mut h = harness(None);
        let base = Instant::now();
        h.session.start(base);

        let closed = frame_with_ear(0.10);
        for i in 0..5 {
            h.session.process_frame(Some(&closed), t(base, i));
        }
        for i in 5..20 {
            h.session.process_frame(None, t(base, i));
        }
        assert_eq!(h.session.status(), Status::Active);

        let snap = h.session.snapshot(t(base, 20));
        assert!(!snap.face_detected);
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_loop_full_alert_cycle() {
        // End to end under the polling loop: sustained closed eyes
        // must produce the sleeping alert sound and then, after the
        // completion event is drained on a later tick, the spoken
        // message, exactly once.
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut h = harness(Some(tx));
        let mut source = crate::synthetic::SyntheticLandmarkSource::new(vec![Some(0.10)]);

        h.session.start(Instant::now());
        let _ = tokio::time::timeout(
            Duration::from_secs(1),
            h.session.run(&mut source, &mut rx),
        )
        .await;

        assert_eq!(h.session.status(), Status::Sleeping);
        assert_eq!(h.played.lock().unwrap().len(), 1);
        assert_eq!(
            h.spoken.lock().unwrap().as_slice(),
            ["Wake up! You are falling asleep"]
        );
    }
}
