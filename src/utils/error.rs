//! The `error` module defines the error type shared by the broker session and
//! the role loops.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// The initial connection attempt failed. This one is fatal.
    #[error("failed to connect to broker at {addr}: {source}")]
    Connect {
        addr: String,
        #[source]
        source: rumqttc::ConnectionError,
    },

    /// A publish or subscribe request could not be queued.
    #[error("broker request failed: {0}")]
    Request(#[from] rumqttc::ClientError),

    #[error("client is not connected to the broker")]
    NotConnected,
}
