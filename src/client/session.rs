use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use rumqttc::{AsyncClient, ConnectionError, Event, EventLoop, MqttOptions, Outgoing, Packet, Publish, QoS};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::client::Link;
use crate::config::Settings;
use crate::connection::{self, Connectivity, ReturnCode};
use crate::utils::ClientError;

/// Callback invoked on the event-loop task for every incoming publish.
pub type MessageHandler = Arc<dyn Fn(&Publish) + Send + Sync>;

/// Capacity of the request channel between `AsyncClient` and its event loop.
const REQUEST_CAPACITY: usize = 10;

/// How long `shutdown` waits for the event loop to flush the DISCONNECT.
const DISCONNECT_GRACE: Duration = Duration::from_secs(2);

/// A live connection to the broker.
///
/// The event loop runs on its own tokio task; `connected` is the only state
/// shared with it.
#[derive(Debug)]
pub struct BrokerSession {
    client: AsyncClient,
    client_id: String,
    connected: Arc<AtomicBool>,
    event_loop: JoinHandle<()>,
}

impl BrokerSession {
    /// Connects to the configured broker under a unique id derived from `name`.
    ///
    /// The first event-loop poll is the connection attempt itself; if it fails,
    /// `ClientError::Connect` is returned and nothing is left running.
    pub async fn connect(
        name: &str,
        settings: &Settings,
        on_message: Option<MessageHandler>,
    ) -> Result<Self, ClientError> {
        let client_id = client_id(name);
        let addr = settings.broker.address();

        let mut options = MqttOptions::new(&client_id, &settings.broker.host, settings.broker.port);
        options.set_keep_alive(settings.broker.keepalive());
        options.set_clean_session(settings.client.clean_session);

        let (client, mut event_loop) = AsyncClient::new(options, REQUEST_CAPACITY);

        info!("Connecting to broker at {}...", addr);
        let connected = Arc::new(AtomicBool::new(false));
        match event_loop.poll().await {
            Ok(event) => handle_event(event, &connected, on_message.as_ref()),
            Err(source) => {
                if let ConnectionError::ConnectionRefused(code) = &source {
                    connection::on_connect(ReturnCode::from(*code).code());
                }
                return Err(ClientError::Connect { addr, source });
            }
        };
        info!("Connected to broker.");

        let retry_delay = settings.client.poll_interval();
        let event_loop = tokio::spawn(drive(event_loop, connected.clone(), on_message, retry_delay));

        Ok(Self {
            client,
            client_id,
            connected,
            event_loop,
        })
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }
}

impl Connectivity for BrokerSession {
    fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }
}

impl Link for BrokerSession {
    async fn publish(&self, topic: &str, payload: String) -> Result<(), ClientError> {
        if !self.is_connected() {
            return Err(ClientError::NotConnected);
        }
        self.client
            .publish(topic, QoS::AtLeastOnce, false, payload)
            .await?;
        Ok(())
    }

    async fn subscribe(&self, topic: &str) -> Result<(), ClientError> {
        self.client.subscribe(topic, QoS::AtLeastOnce).await?;
        Ok(())
    }

    async fn shutdown(self) {
        let Self {
            client,
            connected,
            mut event_loop,
            ..
        } = self;

        if let Err(e) = client.try_disconnect() {
            warn!("Failed to queue disconnect: {}", e);
        }

        if tokio::time::timeout(DISCONNECT_GRACE, &mut event_loop).await.is_err() {
            debug!("Event loop did not stop in time, aborting it");
            event_loop.abort();
            if connected.swap(false, Ordering::SeqCst) {
                connection::on_disconnect(true);
            }
        }
    }
}

/// `<name>_<uuid v4>`, so several instances of one role can share a broker.
pub fn client_id(name: &str) -> String {
    format!("{}_{}", name, Uuid::new_v4())
}

/// Runs the event loop until the client sends DISCONNECT. Errors are logged and
/// polling resumes after `retry_delay`, which makes `rumqttc` reconnect.
async fn drive(
    mut event_loop: EventLoop,
    connected: Arc<AtomicBool>,
    on_message: Option<MessageHandler>,
    retry_delay: Duration,
) {
    loop {
        match event_loop.poll().await {
            Ok(Event::Outgoing(Outgoing::Disconnect)) => {
                connected.store(false, Ordering::SeqCst);
                connection::on_disconnect(true);
                break;
            }
            Ok(event) => handle_event(event, &connected, on_message.as_ref()),
            Err(e) => {
                if connected.swap(false, Ordering::SeqCst) {
                    connection::on_disconnect(false);
                }
                match &e {
                    ConnectionError::ConnectionRefused(code) => {
                        connection::on_connect(ReturnCode::from(*code).code());
                    }
                    other => error!("Broker connection error: {}", other),
                }
                tokio::time::sleep(retry_delay).await;
            }
        }
    }
}

pub(crate) fn handle_event(event: Event, connected: &AtomicBool, on_message: Option<&MessageHandler>) {
    match event {
        Event::Incoming(Packet::ConnAck(ack)) => {
            let code = ReturnCode::from(ack.code);
            connection::on_connect(code.code());
            connected.store(code == ReturnCode::SuccessfulConnection, Ordering::SeqCst);
        }
        Event::Incoming(Packet::Publish(publish)) => {
            if let Some(handler) = on_message {
                handler(&publish);
            }
        }
        Event::Incoming(Packet::Disconnect) => {
            connected.store(false, Ordering::SeqCst);
            connection::on_disconnect(false);
        }
        other => debug!("Event = {:?}", other),
    }
}
