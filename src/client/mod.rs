//! The `client` module owns the connection to the MQTT broker.
//!
//! `BrokerSession` wraps a `rumqttc` client and drives its event loop on a
//! background task, the way the library's own threaded loop would. The role
//! loops never touch `rumqttc` directly: they talk to the `Link` trait, which
//! the session implements.

pub mod session;
mod timing;

pub use session::{BrokerSession, MessageHandler};
pub use timing::{LoopTiming, RunOutcome};

use std::future::Future;

use crate::connection::Connectivity;
use crate::utils::ClientError;

/// The operations the publisher and subscriber loops need from a broker connection.
pub trait Link: Connectivity {
    /// Publishes `payload` to `topic` with QoS 1, not retained.
    fn publish(&self, topic: &str, payload: String) -> impl Future<Output = Result<(), ClientError>> + Send;

    /// Subscribes to `topic` with QoS 1.
    fn subscribe(&self, topic: &str) -> impl Future<Output = Result<(), ClientError>> + Send;

    /// Disconnects from the broker and stops background work.
    fn shutdown(self) -> impl Future<Output = ()> + Send;
}

#[cfg(test)]
pub(crate) mod fake;
