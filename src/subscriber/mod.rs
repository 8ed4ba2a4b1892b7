//! The `subscriber` module listens on the car location topic and logs every
//! location it receives. Receiving happens on the session's event-loop task;
//! the loop here only watches connectivity.

use std::str::Utf8Error;
use std::sync::Arc;

use rumqttc::Publish;
use tokio::time::sleep;
use tracing::{error, info, warn};

use crate::client::{Link, LoopTiming, MessageHandler, RunOutcome};
use crate::connection::wait_for_connection;
use crate::shutdown::Shutdown;
use crate::topics::CAR_LOCATION_TOPIC;

pub const CLIENT_NAME: &str = "car_location_subscriber";

pub fn decode_payload(payload: &[u8]) -> Result<&str, Utf8Error> {
    std::str::from_utf8(payload)
}

/// Logs one received location.
pub fn log_location(message: &Publish) {
    match decode_payload(&message.payload) {
        Ok(text) => info!("Received message: {}", text),
        Err(e) => error!("Error processing message on {}: {}", message.topic, e),
    }
}

/// The handler to register with the broker session.
pub fn handler() -> MessageHandler {
    Arc::new(log_location)
}

pub async fn subscribe_location<L: Link>(link: &L, topic: &str) {
    match link.subscribe(topic).await {
        Ok(()) => info!("Subscribed to topic: {}", topic),
        Err(e) => error!("Error subscribing to topic: {}", e),
    }
}

/// Subscribes once, then watches the connection until shutdown. `link` is
/// shut down whatever the outcome.
pub async fn run<L: Link>(link: L, shutdown: &Shutdown, timing: LoopTiming) -> RunOutcome {
    let outcome = listen_until_stopped(&link, shutdown, timing).await;
    link.shutdown().await;
    info!("Subscriber stopped.");
    outcome
}

async fn listen_until_stopped<L: Link>(link: &L, shutdown: &Shutdown, timing: LoopTiming) -> RunOutcome {
    if !wait_for_connection(link, timing.connect_timeout, timing.poll_interval).await {
        error!("Failed to establish connection to the broker.");
        return RunOutcome::NeverConnected;
    }

    subscribe_location(link, CAR_LOCATION_TOPIC).await;

    while !shutdown.is_triggered() {
        if !link.is_connected() {
            warn!("Lost connection. Reconnecting...");
            if !wait_for_connection(link, timing.connect_timeout, timing.poll_interval).await {
                error!("Failed to reconnect to the broker.");
                return RunOutcome::ReconnectFailed;
            }
        }

        tokio::select! {
            _ = sleep(timing.poll_interval) => {}
            _ = shutdown.wait() => {}
        }
    }

    RunOutcome::Stopped
}

#[cfg(test)]
mod tests;
