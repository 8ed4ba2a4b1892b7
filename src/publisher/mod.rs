//! The `publisher` module reports the car's location to the broker on a fixed
//! interval until shutdown is requested or the broker stays unreachable.

use tokio::time::sleep;
use tracing::{error, info, warn};

use crate::client::{Link, LoopTiming, RunOutcome};
use crate::connection::wait_for_connection;
use crate::shutdown::Shutdown;
use crate::topics::CAR_LOCATION_TOPIC;

/// Name the publisher registers under; a uuid is appended per process.
pub const CLIENT_NAME: &str = "car_location_publisher";

/// Current location of the car. There is no GPS source yet, so this is fixed.
pub fn location_payload() -> String {
    "The car location is: XYZ".to_string()
}

/// Publishes one location. Failures are logged and swallowed.
pub async fn publish_location<L: Link>(link: &L, payload: String) {
    match link.publish(CAR_LOCATION_TOPIC, payload).await {
        Ok(()) => info!("Message sent successfully."),
        Err(e) => error!("Error while publishing: {}", e),
    }
}

/// Runs the publish loop, then shuts `link` down whatever the outcome.
pub async fn run<L: Link>(link: L, shutdown: &Shutdown, timing: LoopTiming) -> RunOutcome {
    let outcome = publish_until_stopped(&link, shutdown, timing).await;
    link.shutdown().await;
    info!("Publisher stopped.");
    outcome
}

async fn publish_until_stopped<L: Link>(link: &L, shutdown: &Shutdown, timing: LoopTiming) -> RunOutcome {
    if !wait_for_connection(link, timing.connect_timeout, timing.poll_interval).await {
        error!("Failed to establish connection to the broker.");
        return RunOutcome::NeverConnected;
    }

    while !shutdown.is_triggered() {
        if !link.is_connected() {
            warn!("Lost connection. Reconnecting...");
            if !wait_for_connection(link, timing.connect_timeout, timing.poll_interval).await {
                error!("Failed to reconnect to the broker.");
                return RunOutcome::ReconnectFailed;
            }
        }

        publish_location(link, location_payload()).await;

        tokio::select! {
            _ = sleep(timing.publish_interval) => {}
            _ = shutdown.wait() => {}
        }
    }

    RunOutcome::Stopped
}
