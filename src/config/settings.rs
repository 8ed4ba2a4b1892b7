use std::time::Duration;

use serde::Deserialize;

/// Top-level configuration settings for both processes.
///
/// Includes the broker address, client timing and logging settings.
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub broker: BrokerSettings,
    pub client: ClientSettings,
    pub log: LogSettings,
}

/// Address of the MQTT broker and the keepalive interval to negotiate with it.
#[derive(Debug, Deserialize, Clone)]
pub struct BrokerSettings {
    pub host: String,
    pub port: u16,
    pub keepalive_secs: u64,
}

/// Timing and session options for the client side of the connection.
#[derive(Debug, Deserialize, Clone)]
pub struct ClientSettings {
    /// How long to wait for the broker before giving up on a (re)connect.
    pub connect_timeout_secs: u64,
    /// Sleep between connectivity checks.
    pub poll_interval_secs: u64,
    /// Sleep between two location publishes.
    pub publish_interval_secs: u64,
    pub clean_session: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LogSettings {
    pub level: String,
}

impl BrokerSettings {
    pub fn keepalive(&self) -> Duration {
        Duration::from_secs(self.keepalive_secs)
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl ClientSettings {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    pub fn publish_interval(&self) -> Duration {
        Duration::from_secs(self.publish_interval_secs)
    }
}

/// Partial configuration settings loaded from files or environment.
///
/// Missing values are filled from `Settings::default()`.
#[derive(Debug, Deserialize)]
pub struct PartialSettings {
    pub broker: Option<PartialBrokerSettings>,
    pub client: Option<PartialClientSettings>,
    pub log: Option<PartialLogSettings>,
}

#[derive(Debug, Deserialize)]
pub struct PartialBrokerSettings {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub keepalive_secs: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct PartialClientSettings {
    pub connect_timeout_secs: Option<u64>,
    pub poll_interval_secs: Option<u64>,
    pub publish_interval_secs: Option<u64>,
    pub clean_session: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct PartialLogSettings {
    pub level: Option<String>,
}

/// Provides default values for `Settings`.
///
/// These are the values the car's broker setup has always used, so running
/// without any configuration source talks to the same broker.
impl Default for Settings {
    fn default() -> Self {
        Self {
            broker: BrokerSettings {
                host: "192.168.178.20".to_string(),
                port: 1883,
                keepalive_secs: 3,
            },
            client: ClientSettings {
                connect_timeout_secs: 10,
                poll_interval_secs: 1,
                publish_interval_secs: 2,
                clean_session: false,
            },
            log: LogSettings {
                level: "info".to_string(),
            },
        }
    }
}
