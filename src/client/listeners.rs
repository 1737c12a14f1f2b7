use crate::models::{ArcListener, ListenerId, NotificationEvent};

#[derive(Default)]
pub struct Listeners {
    next_id: ListenerId,
    entries: Vec<(ListenerId, ArcListener)>,
}

impl Listeners {
    pub fn add(&mut self, listener: ArcListener) -> ListenerId {
        self.next_id += 1;
        self.entries.push((self.next_id, listener));
        self.next_id
    }

    pub fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        before != self.entries.len()
    }

    /// Delivers the event in registration order and drops listeners that
    /// are gone.
    pub fn dispatch(&mut self, event: &NotificationEvent) {
        self.entries.retain(|(id, listener)| {
            let alive = listener.notify(event);
            if !alive {
                log::debug!("Listener {} is closed, removing", id);
            }
            alive
        });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
