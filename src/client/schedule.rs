use std::time::Duration;

use tokio::{sync::mpsc, task::JoinHandle};

use crate::models::Event;

/// A delayed event delivery that can be cancelled through its handle.
pub struct ScheduledTask {
    id: u64,
    handle: JoinHandle<()>,
}

impl ScheduledTask {
    pub fn after(
        id: u64,
        delay: Duration,
        event_tx: mpsc::UnboundedSender<Event>,
        event: Event,
    ) -> Self {
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if event_tx.send(event).is_err() {
                log::debug!("Scheduled task {} fired after the client stopped", id);
            }
        });
        Self { id, handle }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn cancel(self) {
        self.handle.abort();
    }
}

/// Fire-and-forget variant: the event is delivered after `delay` and the
/// task cannot be cancelled.
pub fn deliver_after(delay: Duration, event_tx: mpsc::UnboundedSender<Event>, event: Event) {
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        let _ = event_tx.send(event);
    });
}
