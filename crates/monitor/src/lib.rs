//! Drowsiness Monitoring Session
//!
//! Ties the classifier, active clock, and alert sequencer into one
//! owned session:
//! - Per-frame processing entry point
//! - Start / stop / reset controls
//! - Audio-completion event handling between frame ticks
//! - Async polling loop driving a landmark source
//! - Read-only snapshot for a rendering consumer

pub mod config;
pub mod session;
pub mod synthetic;

pub use config::MonitorConfig;
pub use session::{MonitorSession, SessionSnapshot};
pub use synthetic::SyntheticLandmarkSource;

use thiserror::Error;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Monitor error types
#[derive(Error, Debug)]
pub enum MonitorError {
    #[error("Invalid classifier configuration: {0}")]
    Drowsiness(#[from] drowsiness::DrowsinessError),

    #[error("Frame interval must be at least 1 ms")]
    ZeroFrameInterval,

    #[error("Failed to load configuration: {0}")]
    ConfigLoad(#[from] ::config::ConfigError),
}

/// Initialize structured logging
pub fn init_logging() {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");
}
