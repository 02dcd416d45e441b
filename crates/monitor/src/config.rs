//! Monitor configuration

use serde::{Deserialize, Serialize};

use alerting::AlertConfig;
use drowsiness::DrowsinessConfig;

use crate::MonitorError;

/// Top-level monitoring configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    /// Classifier and debounce settings
    pub drowsiness: DrowsinessConfig,

    /// Alert sounds, messages, and speech rate
    pub alert: AlertConfig,

    /// Polling interval of the frame loop (default: 33 ms, ~30 fps)
    pub frame_interval_ms: u64,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            drowsiness: DrowsinessConfig::default(),
            alert: AlertConfig::default(),
            frame_interval_ms: 33,
        }
    }
}

impl MonitorConfig {
    /// Validate all settings. Fatal at startup: a session is never
    /// constructed from an invalid configuration.
    pub fn validate(&self) -> Result<(), MonitorError> {
        self.drowsiness.validate()?;
        if self.frame_interval_ms == 0 {
            return Err(MonitorError::ZeroFrameInterval);
        }
        Ok(())
    }

    /// Load configuration from an optional `monitor.toml` plus
    /// `MONITOR_*` environment overrides, on top of the defaults.
    pub fn load() -> Result<Self, MonitorError> {
        let loaded = ::config::Config::builder()
            .add_source(::config::File::with_name("monitor").required(false))
            .add_source(::config::Environment::with_prefix("MONITOR").separator("__"))
            .build()?;
        let config: MonitorConfig = loaded.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }
}
