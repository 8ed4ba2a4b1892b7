//! In-memory `Link` used by the role-loop tests.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::client::Link;
use crate::connection::Connectivity;
use crate::utils::ClientError;

#[derive(Debug, Default)]
pub(crate) struct FakeState {
    pub connected: AtomicBool,
    pub fail_requests: AtomicBool,
    pub publish_attempts: AtomicUsize,
    pub published: Mutex<Vec<(String, String)>>,
    pub subscriptions: Mutex<Vec<String>>,
    pub shut_down: AtomicBool,
}

#[derive(Debug, Clone)]
pub(crate) struct FakeLink {
    pub state: Arc<FakeState>,
}

impl FakeLink {
    pub fn new(connected: bool) -> Self {
        let state = FakeState::default();
        state.connected.store(connected, Ordering::SeqCst);
        Self {
            state: Arc::new(state),
        }
    }

    pub fn failing() -> Self {
        let link = Self::new(true);
        link.state.fail_requests.store(true, Ordering::SeqCst);
        link
    }
}

impl Connectivity for FakeLink {
    fn is_connected(&self) -> bool {
        self.state.connected.load(Ordering::SeqCst)
    }
}

impl Link for FakeLink {
    async fn publish(&self, topic: &str, payload: String) -> Result<(), ClientError> {
        self.state.publish_attempts.fetch_add(1, Ordering::SeqCst);
        if self.state.fail_requests.load(Ordering::SeqCst) {
            return Err(ClientError::NotConnected);
        }
        self.state
            .published
            .lock()
            .unwrap()
            .push((topic.to_string(), payload));
        Ok(())
    }

    async fn subscribe(&self, topic: &str) -> Result<(), ClientError> {
        if self.state.fail_requests.load(Ordering::SeqCst) {
            return Err(ClientError::NotConnected);
        }
        self.state.subscriptions.lock().unwrap().push(topic.to_string());
        Ok(())
    }

    async fn shutdown(self) {
        self.state.connected.store(false, Ordering::SeqCst);
        self.state.shut_down.store(true, Ordering::SeqCst);
    }
}
