//! Debug and warning events
//!
//! Every event is logged through `tracing` and also broadcast to any
//! receivers obtained from [`OAuthClient::subscribe`](super::OAuthClient::subscribe).

use tokio::sync::broadcast;
use tracing::{debug, warn};

/// Capacity of the event channel; slow receivers observe `Lagged`
const EVENT_BUFFER: usize = 256;

/// Event emitted while issuing requests
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientEvent {
    /// Request/response trace
    Debug(String),
    /// High latency or rate-limit pressure
    Warn(String),
}

impl ClientEvent {
    /// Event message
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Debug(m) | Self::Warn(m) => m,
        }
    }

    /// Whether this is a warning
    #[must_use]
    pub fn is_warn(&self) -> bool {
        matches!(self, Self::Warn(_))
    }
}

/// Sending half shared by all clones of a client
#[derive(Debug, Clone)]
pub(crate) struct EventSink {
    tx: broadcast::Sender<ClientEvent>,
}

impl EventSink {
    pub(crate) fn new() -> Self {
        let (tx, _) = broadcast::channel(EVENT_BUFFER);
        Self { tx }
    }

    pub(crate) fn subscribe(&self) -> broadcast::Receiver<ClientEvent> {
        self.tx.subscribe()
    }

    pub(crate) fn debug(&self, message: String) {
        debug!("{message}");
        // No receivers is not an error
        let _ = self.tx.send(ClientEvent::Debug(message));
    }

    pub(crate) fn warn(&self, message: String) {
        warn!("{message}");
        let _ = self.tx.send(ClientEvent::Warn(message));
    }
}
