pub mod ports;
pub mod probe_error;
pub mod reachability;
pub mod scheduler;
pub mod status_cache;

use std::time::Duration;

use crate::common::config::MonitorConfig;

/// Knobs shared by the probe primitives.
#[derive(Debug, Clone)]
pub struct ProbeSettings {
    pub ping_program: String,
    pub ping_timeout: Option<Duration>,
    pub connect_timeout: Duration,
}

impl ProbeSettings {
    pub fn from_config(config: &MonitorConfig) -> Self {
        Self {
            ping_program: config.ping_program.clone(),
            ping_timeout: config.ping_timeout(),
            connect_timeout: config.connect_timeout(),
        }
    }
}

impl Default for ProbeSettings {
    fn default() -> Self {
        Self::from_config(&MonitorConfig::default())
    }
}
