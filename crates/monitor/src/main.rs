//! Drowsiness monitor demo - synthetic landmark feed, console alerts

use std::time::{Duration, Instant};

use tokio::sync::mpsc;
use tracing::info;

use alerting::{AlertError, AudioDevice, PlaybackId, SoundId, SpeechSynthesizer};
use monitor::{init_logging, MonitorConfig, MonitorSession, SyntheticLandmarkSource};

/// Logs playback and completes it on the next loop tick
struct ConsoleAudio {
    completions: mpsc::UnboundedSender<PlaybackId>,
}

impl AudioDevice for ConsoleAudio {
    fn play(&mut self, sound: &SoundId) -> Result<PlaybackId, AlertError> {
        info!("[audio] playing {}", sound.0);
        let id = PlaybackId::new();
        self.completions
            .send(id)
            .map_err(|e| AlertError::Playback(e.to_string()))?;
        Ok(id)
    }

    fn stop(&mut self) {
        info!("[audio] stopped");
    }
}

struct ConsoleSpeech {
    rate: u32,
}

impl SpeechSynthesizer for ConsoleSpeech {
    fn speak(&mut self, text: &str) -> Result<(), AlertError> {
        info!("[voice @ {}] {}", self.rate, text);
        Ok(())
    }

    fn set_rate(&mut self, rate: u32) {
        self.rate = rate;
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    info!("=== Drowsiness Monitor v{} ===", env!("CARGO_PKG_VERSION"));
    let config = MonitorConfig::load()?;

    let (completion_tx, mut completion_rx) = mpsc::unbounded_channel();
    let mut session = MonitorSession::new(
        config,
        Box::new(ConsoleAudio {
            completions: completion_tx,
        }),
        Box::new(ConsoleSpeech { rate: 150 }),
    )?;

    // Scripted subject: awake, then half-closed eyes, then asleep,
    // then recovering. One entry per frame, cycling.
    let mut script = Vec::new();
    script.extend(std::iter::repeat(Some(0.35)).take(90));
    script.extend(std::iter::repeat(Some(0.23)).take(30));
    script.extend(std::iter::repeat(Some(0.10)).take(45));
    script.extend(std::iter::repeat(None).take(15));
    script.extend(std::iter::repeat(Some(0.35)).take(60));
    let mut source = SyntheticLandmarkSource::new(script);

    session.start(Instant::now());
    let _ = tokio::time::timeout(
        Duration::from_secs(15),
        session.run(&mut source, &mut completion_rx),
    )
    .await;
    session.stop(Instant::now());

    let snapshot = session.snapshot(Instant::now());
    println!("{}", serde_json::to_string_pretty(&snapshot)?);

    Ok(())
}
