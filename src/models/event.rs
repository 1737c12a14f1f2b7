use std::{fmt::Display, sync::Arc};

use tokio::sync::{mpsc, oneshot};

use super::{AlertId, NotificationEvent, NotificationKind};

/// Identifies one connection attempt. Events from older attempts are stale.
pub type Generation = u64;

pub type ListenerId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Connected,
    /// Disconnected with a reconnect timer pending
    Reconnecting,
}

impl Display for ConnectionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConnectionState::Disconnected => write!(f, "disconnected"),
            ConnectionState::Connecting => write!(f, "connecting"),
            ConnectionState::Connected => write!(f, "connected"),
            ConnectionState::Reconnecting => write!(f, "reconnecting"),
        }
    }
}

/// Everything the client loop reacts to: transport callbacks, timers and
/// commands sent through a handle.
#[derive(Debug)]
pub enum Event {
    Opened(Generation),
    Frame(Generation, String),
    Closed(Generation, Option<String>),

    ReconnectDue(u64),
    Detach(AlertId),

    Show(String, NotificationKind),
    Dismiss(String),
    Clear,
    Subscribe(mpsc::UnboundedSender<NotificationEvent>, oneshot::Sender<ListenerId>),
    Unsubscribe(ListenerId),
    State(oneshot::Sender<ConnectionState>),

    Shutdown,
}

pub trait Listener {
    /// Delivers an event. Returns false once the listener is gone for good.
    fn notify(&self, event: &NotificationEvent) -> bool;
}

impl Listener for mpsc::UnboundedSender<NotificationEvent> {
    fn notify(&self, event: &NotificationEvent) -> bool {
        self.send(event.clone()).is_ok()
    }
}

pub type ArcListener = Arc<dyn Listener + Send + Sync>;
