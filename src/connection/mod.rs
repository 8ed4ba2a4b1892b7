//! The `connection` module holds everything both processes share about the
//! broker connection: the CONNACK result codes, the connect/disconnect log
//! callbacks and the wait-for-connection helper.

use std::fmt;
use std::time::Duration;

use rumqttc::ConnectReturnCode;
use tokio::time::{Instant, sleep};
use tracing::{error, info, warn};

/// Result code a broker returns in its CONNACK packet (MQTT 3.1.1).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ReturnCode {
    SuccessfulConnection = 0,
    IncorrectProtocolVersion = 1,
    InvalidClientIdentifier = 2,
    ServerUnavailable = 3,
    BadUsernameOrPassword = 4,
    NotAuthorized = 5,
}

impl ReturnCode {
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::SuccessfulConnection),
            1 => Some(Self::IncorrectProtocolVersion),
            2 => Some(Self::InvalidClientIdentifier),
            3 => Some(Self::ServerUnavailable),
            4 => Some(Self::BadUsernameOrPassword),
            5 => Some(Self::NotAuthorized),
            _ => None,
        }
    }

    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::SuccessfulConnection => "Connection successful",
            Self::IncorrectProtocolVersion => "Connection refused - incorrect protocol version",
            Self::InvalidClientIdentifier => "Connection refused - invalid client identifier",
            Self::ServerUnavailable => "Connection refused - server unavailable",
            Self::BadUsernameOrPassword => "Connection refused - bad username or password",
            Self::NotAuthorized => "Connection refused - not authorized",
        }
    }
}

impl fmt::Display for ReturnCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

impl From<ConnectReturnCode> for ReturnCode {
    fn from(code: ConnectReturnCode) -> Self {
        match code {
            ConnectReturnCode::Success => Self::SuccessfulConnection,
            ConnectReturnCode::RefusedProtocolVersion => Self::IncorrectProtocolVersion,
            ConnectReturnCode::BadClientId => Self::InvalidClientIdentifier,
            ConnectReturnCode::ServiceUnavailable => Self::ServerUnavailable,
            ConnectReturnCode::BadUserNamePassword => Self::BadUsernameOrPassword,
            ConnectReturnCode::NotAuthorized => Self::NotAuthorized,
        }
    }
}

/// Human-readable description of a raw CONNACK code.
pub fn describe(code: u8) -> &'static str {
    ReturnCode::from_code(code)
        .map(ReturnCode::description)
        .unwrap_or("Unknown error")
}

/// Logs the outcome of a connection attempt.
pub fn on_connect(code: u8) {
    match ReturnCode::from_code(code) {
        Some(ReturnCode::SuccessfulConnection) => {
            info!("Connected successfully, returned code: {} ({})", code, describe(code));
        }
        Some(rc) => error!("Connection failed, returned code: {} ({})", code, rc),
        None => error!("Connection failed, unknown return code: {}", code),
    }
}

/// Logs the end of a connection. `expected` is true when the client asked for it.
pub fn on_disconnect(expected: bool) {
    if expected {
        info!("Client disconnected from broker.");
    } else {
        warn!("Unexpected disconnection from MQTT broker.");
    }
}

/// Anything whose connection state can be polled.
pub trait Connectivity {
    fn is_connected(&self) -> bool;
}

/// Polls `client` every `poll_interval` until it reports a connection or
/// `timeout` has elapsed. Returns whether a connection was observed.
pub async fn wait_for_connection<C>(client: &C, timeout: Duration, poll_interval: Duration) -> bool
where
    C: Connectivity + ?Sized,
{
    let start = Instant::now();
    while start.elapsed() < timeout {
        if client.is_connected() {
            info!("Client connected successfully.");
            return true;
        }
        info!("Waiting for connection...");
        sleep(poll_interval).await;
    }
    error!("Connection timeout.");
    false
}
