use std::time::Duration;

use crate::config::ClientSettings;

/// Durations the role loops sleep and wait for, resolved from `ClientSettings`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopTiming {
    pub connect_timeout: Duration,
    pub poll_interval: Duration,
    pub publish_interval: Duration,
}

impl From<&ClientSettings> for LoopTiming {
    fn from(settings: &ClientSettings) -> Self {
        Self {
            connect_timeout: settings.connect_timeout(),
            poll_interval: settings.poll_interval(),
            publish_interval: settings.publish_interval(),
        }
    }
}

/// Why a role loop returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// The shutdown flag was triggered.
    Stopped,
    /// The broker never became reachable after the initial connect.
    NeverConnected,
    /// The connection dropped and did not come back within the timeout.
    ReconnectFailed,
}
