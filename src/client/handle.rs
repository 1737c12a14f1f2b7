use tokio::sync::{mpsc, oneshot};
use tokio_util::sync::CancellationToken;

use super::error::{NotifierError, Result};
use crate::models::{ConnectionState, Event, ListenerId, NotificationEvent, NotificationKind};

/// Cloneable way to drive a running [`NotificationClient`](super::NotificationClient)
/// from other tasks.
#[derive(Clone)]
pub struct ClientHandle {
    event_tx: mpsc::UnboundedSender<Event>,
    token: CancellationToken,
}

impl ClientHandle {
    pub(crate) fn new(event_tx: mpsc::UnboundedSender<Event>, token: CancellationToken) -> Self {
        Self { event_tx, token }
    }

    fn send(&self, event: Event) -> Result<()> {
        if self.token.is_cancelled() {
            return Err(NotifierError::Closed);
        }
        self.event_tx.send(event).map_err(|_| NotifierError::Closed)
    }

    pub fn show(&self, message: impl Into<String>, kind: NotificationKind) -> Result<()> {
        self.send(Event::Show(message.into(), kind))
    }

    pub fn dismiss(&self, key: impl Into<String>) -> Result<()> {
        self.send(Event::Dismiss(key.into()))
    }

    pub fn clear(&self) -> Result<()> {
        self.send(Event::Clear)
    }

    /// Registers a listener that receives every recognized event, including
    /// the ones that never become alerts.
    pub async fn subscribe(
        &self,
    ) -> Result<(ListenerId, mpsc::UnboundedReceiver<NotificationEvent>)> {
        let (tx, rx) = mpsc::unbounded_channel();
        let (reply_tx, reply_rx) = oneshot::channel();
        self.send(Event::Subscribe(tx, reply_tx))?;
        let id = reply_rx.await.map_err(|_| NotifierError::Closed)?;
        Ok((id, rx))
    }

    pub fn unsubscribe(&self, id: ListenerId) -> Result<()> {
        self.send(Event::Unsubscribe(id))
    }

    pub async fn state(&self) -> Result<ConnectionState> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.send(Event::State(reply_tx))?;
        reply_rx.await.map_err(|_| NotifierError::Closed)
    }

    pub fn shutdown(&self) {
        let _ = self.send(Event::Shutdown);
        self.token.cancel();
    }

    /// Resolves once the client has shut down.
    pub async fn closed(&self) {
        self.token.cancelled().await
    }

    pub fn is_closed(&self) -> bool {
        self.token.is_cancelled()
    }
}
