#[cfg(test)]
#[path = "client_test.rs"]
mod tests;

use std::sync::Arc;

use chrono::Utc;
use futures::StreamExt;
use tokio::{sync::mpsc, task::JoinHandle, time::Instant};
use tokio_util::sync::CancellationToken;

use super::{
    alerts::ActiveAlertSet,
    dedupe::DedupeCache,
    error::Result,
    handle::ClientHandle,
    listeners::Listeners,
    schedule::{ScheduledTask, deliver_after},
    transport::{ArcTransport, push_url},
};
use crate::config::{NotifierConfig, ServerConfig};
use crate::models::{
    Alert, ArcListener, ConnectionState, Event, Generation, ListenerId, NotificationEvent,
    NotificationKind,
};
use crate::render::{ArcRenderer, ArcSystemNotifier};

/// Prefix of dedupe keys for system notifications, which are suppressed
/// separately from alerts.
const SYSTEM_KEY_PREFIX: &str = "sys_";

/// Keeps one push-channel connection open and turns its frames into alerts.
///
/// All state is owned by the instance and only touched from the task that
/// drives it; connection readers and timers talk to it through an event
/// channel.
pub struct NotificationClient {
    url: String,
    config: NotifierConfig,
    transport: ArcTransport,
    renderer: ArcRenderer,
    system: Option<ArcSystemNotifier>,

    state: ConnectionState,
    generation: Generation,
    connection: Option<JoinHandle<()>>,
    reconnect: Option<ScheduledTask>,
    next_timer_id: u64,

    dedupe: DedupeCache,
    alerts: ActiveAlertSet,
    listeners: Listeners,

    event_tx: mpsc::UnboundedSender<Event>,
    event_rx: mpsc::UnboundedReceiver<Event>,
    token: CancellationToken,
}

impl NotificationClient {
    pub fn new(
        server: &ServerConfig,
        config: NotifierConfig,
        transport: ArcTransport,
        renderer: ArcRenderer,
    ) -> Result<Self> {
        let url = push_url(&server.origin, &server.path)?;
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        Ok(Self {
            url,
            dedupe: DedupeCache::new(config.suppression_window(), config.retention_window()),
            config,
            transport,
            renderer,
            system: None,
            state: ConnectionState::Disconnected,
            generation: 0,
            connection: None,
            reconnect: None,
            next_timer_id: 0,
            alerts: ActiveAlertSet::default(),
            listeners: Listeners::default(),
            event_tx,
            event_rx,
            token: CancellationToken::new(),
        })
    }

    /// Raises a system notification for every alert-worthy event as well.
    pub fn with_system_notifier(mut self, notifier: ArcSystemNotifier) -> Self {
        self.system = Some(notifier);
        self
    }

    pub fn handle(&self) -> ClientHandle {
        ClientHandle::new(self.event_tx.clone(), self.token.clone())
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    pub fn alerts(&self) -> &ActiveAlertSet {
        &self.alerts
    }

    pub fn dedupe(&self) -> &DedupeCache {
        &self.dedupe
    }

    pub fn reconnect_pending(&self) -> bool {
        self.reconnect.is_some()
    }

    pub fn add_listener(&mut self, listener: ArcListener) -> ListenerId {
        self.listeners.add(listener)
    }

    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    /// Opens the push channel. Does nothing while a connection is being
    /// opened or is open.
    pub fn connect(&mut self) {
        if self.token.is_cancelled() {
            log::debug!("Client is disposed, not connecting");
            return;
        }
        if matches!(
            self.state,
            ConnectionState::Connecting | ConnectionState::Connected
        ) {
            log::debug!("Already {}, skipping connect", self.state);
            return;
        }

        self.generation += 1;
        self.set_state(ConnectionState::Connecting);
        log::info!("Connecting to {} (attempt #{})", self.url, self.generation);

        if let Some(stale) = self.connection.take() {
            stale.abort();
        }
        self.connection = Some(tokio::spawn(pump(
            Arc::clone(&self.transport),
            self.url.clone(),
            self.generation,
            self.event_tx.clone(),
            self.token.clone(),
        )));
    }

    /// Handles one text frame. Malformed frames are returned as errors and
    /// leave the client untouched.
    pub fn on_message(&mut self, payload: &str) -> Result<()> {
        let Some(event) = NotificationEvent::parse(payload)? else {
            return Ok(());
        };

        self.listeners.dispatch(&event);

        if !self.config.is_alert_type(event.kind().as_str()) {
            return Ok(());
        }

        let now = Instant::now();
        let shown = self.alert_once(&event, now);
        self.notify_system(&event, now);
        shown
    }

    fn alert_once(&mut self, event: &NotificationEvent, now: Instant) -> Result<()> {
        if self.dedupe.should_suppress(event.message(), now) {
            log::debug!("Duplicate alert suppressed: {}", preview(event.message()));
            return Ok(());
        }

        self.show_alert(event.alert_key(), event)?;
        self.dedupe.record_and_maybe_evict(event.message(), now);
        Ok(())
    }

    fn notify_system(&mut self, event: &NotificationEvent, now: Instant) {
        let Some(system) = &self.system else {
            return;
        };

        let key = format!("{}{}", SYSTEM_KEY_PREFIX, event.message());
        if self.dedupe.should_suppress(&key, now) {
            log::debug!(
                "Duplicate system notification suppressed: {}",
                preview(event.message())
            );
            return;
        }

        match system.notify(event) {
            Ok(()) => self.dedupe.record_and_maybe_evict(&key, now),
            Err(err) => log::warn!("Failed to raise system notification: {}", err),
        }
    }

    /// Shows an alert under `key`. An alert already shown under the same key
    /// is removed without exit transition once the new one is up. When
    /// rendering fails the shown alerts are left as they were.
    pub fn show_alert(&mut self, key: String, event: &NotificationEvent) -> Result<()> {
        let alert = Alert::new(key, event);
        self.renderer.render(&alert)?;

        if let Some(previous) = self.alerts.insert(alert) {
            log::debug!("Replaced alert {}", previous.key());
            self.renderer.remove(previous.id());
        }
        Ok(())
    }

    /// Shows an alert that did not come from the push channel. It skips
    /// listeners and duplicate suppression.
    pub fn show(&mut self, message: impl Into<String>, kind: NotificationKind) {
        let base = format!("manual_{}", Utc::now().timestamp_millis());
        let mut key = base.clone();
        let mut n = 1;
        while self.alerts.contains(&key) {
            key = format!("{}_{}", base, n);
            n += 1;
        }

        let event = NotificationEvent::new(kind, message).with_task_id(key.clone());
        if let Err(err) = self.show_alert(key, &event) {
            log::warn!("Failed to show alert: {}", err);
        }
    }

    /// Dismisses the alert shown under `key`, as a click on it would. The
    /// key is released immediately; the element is detached once the exit
    /// transition is over.
    pub fn dismiss(&mut self, key: &str) -> bool {
        match self.alerts.take(key) {
            Some(alert) => {
                self.exit(alert);
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        for alert in self.alerts.drain() {
            self.exit(alert);
        }
    }

    fn exit(&self, alert: Alert) {
        self.renderer.begin_exit(alert.id());
        deliver_after(
            self.config.exit_transition(),
            self.event_tx.clone(),
            Event::Detach(*alert.id()),
        );
    }

    fn on_open(&mut self, generation: Generation) {
        if generation != self.generation {
            log::debug!("Ignoring open of stale connection #{}", generation);
            return;
        }

        log::info!("Connected to {}", self.url);
        self.set_state(ConnectionState::Connected);
        if let Some(timer) = self.reconnect.take() {
            log::debug!("Cancelling reconnect timer #{}", timer.id());
            timer.cancel();
        }
    }

    fn on_close(&mut self, generation: Generation, reason: Option<String>) {
        if generation != self.generation {
            log::debug!("Ignoring close of stale connection #{}", generation);
            return;
        }

        match reason {
            Some(reason) => log::warn!("Disconnected from {}: {}", self.url, reason),
            None => log::info!("Disconnected from {}", self.url),
        }
        self.connection = None;
        self.set_state(ConnectionState::Disconnected);
        self.schedule_reconnect();
    }

    fn schedule_reconnect(&mut self) {
        if self.token.is_cancelled() {
            return;
        }

        if self.reconnect.is_none() {
            self.next_timer_id += 1;
            let id = self.next_timer_id;
            log::debug!(
                "Reconnecting in {}ms (timer #{})",
                self.config.reconnect_delay_ms,
                id
            );
            self.reconnect = Some(ScheduledTask::after(
                id,
                self.config.reconnect_delay(),
                self.event_tx.clone(),
                Event::ReconnectDue(id),
            ));
        }
        self.set_state(ConnectionState::Reconnecting);
    }

    fn on_reconnect_due(&mut self, id: u64) {
        if self.reconnect.as_ref().map(|t| t.id()) != Some(id) {
            log::debug!("Ignoring stale reconnect timer #{}", id);
            return;
        }
        self.reconnect = None;
        self.connect();
    }

    fn set_state(&mut self, state: ConnectionState) {
        if self.state == state {
            return;
        }
        log::trace!("Connection state {} -> {}", self.state, state);
        self.state = state;
        self.renderer.set_status(state);
    }

    /// Applies one event. Returns false once the client has shut down.
    pub fn handle_event(&mut self, event: Event) -> bool {
        match event {
            Event::Opened(generation) => self.on_open(generation),
            Event::Frame(generation, payload) => {
                if generation != self.generation {
                    log::debug!("Dropping frame of stale connection #{}", generation);
                } else if let Err(err) = self.on_message(&payload) {
                    log::error!("Failed to handle notification: {}", err);
                }
            }
            Event::Closed(generation, reason) => self.on_close(generation, reason),
            Event::ReconnectDue(id) => self.on_reconnect_due(id),
            Event::Detach(id) => self.renderer.remove(&id),
            Event::Show(message, kind) => self.show(message, kind),
            Event::Dismiss(key) => {
                if !self.dismiss(&key) {
                    log::debug!("No active alert for key {}", key);
                }
            }
            Event::Clear => self.clear(),
            Event::Subscribe(listener, reply) => {
                let id = self.add_listener(Arc::new(listener));
                let _ = reply.send(id);
            }
            Event::Unsubscribe(id) => {
                self.remove_listener(id);
            }
            Event::State(reply) => {
                let _ = reply.send(self.state);
            }
            Event::Shutdown => {
                self.dispose();
                return false;
            }
        }
        true
    }

    /// Waits for the next event and applies it.
    pub async fn step(&mut self) -> bool {
        match self.event_rx.recv().await {
            Some(event) => self.handle_event(event),
            None => false,
        }
    }

    /// Connects and processes events until the client is shut down.
    pub async fn start(mut self) {
        let token = self.token.clone();
        self.connect();
        loop {
            tokio::select! {
                _ = token.cancelled() => break,
                running = self.step() => if !running {
                    break;
                },
            }
        }
        self.dispose();
    }

    /// Stops the connection and any pending reconnect. Safe to call more
    /// than once.
    pub fn dispose(&mut self) {
        self.token.cancel();
        if let Some(timer) = self.reconnect.take() {
            timer.cancel();
        }
        if let Some(connection) = self.connection.take() {
            connection.abort();
        }
        self.set_state(ConnectionState::Disconnected);
    }
}

async fn pump(
    transport: ArcTransport,
    url: String,
    generation: Generation,
    event_tx: mpsc::UnboundedSender<Event>,
    token: CancellationToken,
) {
    let opened = tokio::select! {
        _ = token.cancelled() => return,
        opened = transport.open(&url) => opened,
    };

    let mut frames = match opened {
        Ok(frames) => frames,
        Err(err) => {
            let _ = event_tx.send(Event::Closed(generation, Some(err.to_string())));
            return;
        }
    };

    if event_tx.send(Event::Opened(generation)).is_err() {
        return;
    }

    loop {
        let frame = tokio::select! {
            _ = token.cancelled() => return,
            frame = frames.next() => frame,
        };

        let event = match frame {
            Some(Ok(payload)) => Event::Frame(generation, payload),
            Some(Err(err)) => Event::Closed(generation, Some(err.to_string())),
            None => Event::Closed(generation, None),
        };
        let closed = matches!(event, Event::Closed(..));
        if event_tx.send(event).is_err() || closed {
            return;
        }
    }
}

fn preview(message: &str) -> String {
    message.chars().take(30).collect()
}
