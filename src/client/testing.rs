use std::{
    collections::VecDeque,
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

use tokio::sync::mpsc;

use super::{
    error::{NotifierError, Result},
    transport::{FrameStream, Transport},
};
use crate::models::{Alert, AlertId, ConnectionState};
use crate::render::Renderer;

enum Outcome {
    Refuse,
    Accept(mpsc::UnboundedReceiver<Result<String>>),
}

/// Transport whose connection attempts succeed or fail in a scripted order.
/// Unscripted attempts are refused.
#[derive(Default)]
pub(crate) struct ScriptedTransport {
    opens: AtomicUsize,
    script: Mutex<VecDeque<Outcome>>,
}

impl ScriptedTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn refuse(&self) {
        self.script.lock().unwrap().push_back(Outcome::Refuse);
    }

    /// Scripts a successful open. Frames sent on the returned sender reach
    /// the client; dropping it closes the connection.
    pub fn accept(&self) -> mpsc::UnboundedSender<Result<String>> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.script.lock().unwrap().push_back(Outcome::Accept(rx));
        tx
    }

    pub fn opens(&self) -> usize {
        self.opens.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl Transport for ScriptedTransport {
    async fn open(&self, _url: &str) -> Result<FrameStream> {
        self.opens.fetch_add(1, Ordering::SeqCst);
        let next = self.script.lock().unwrap().pop_front();
        match next {
            Some(Outcome::Accept(rx)) => Ok(Box::pin(futures::stream::unfold(
                rx,
                |mut rx| async move { rx.recv().await.map(|frame| (frame, rx)) },
            ))),
            Some(Outcome::Refuse) | None => {
                Err(NotifierError::Connection("connection refused".to_string()))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    Render {
        id: AlertId,
        key: String,
        message: String,
    },
    BeginExit(AlertId),
    Remove(AlertId),
    Status(ConnectionState),
}

#[derive(Default)]
pub(crate) struct RecordingRenderer {
    calls: Mutex<Vec<Call>>,
}

impl RecordingRenderer {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    /// Calls that touch alerts, without status updates.
    pub fn alert_calls(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| !matches!(c, Call::Status(_)))
            .collect()
    }

    pub fn rendered(&self) -> Vec<(String, String)> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Render { key, message, .. } => Some((key, message)),
                _ => None,
            })
            .collect()
    }

    pub fn statuses(&self) -> Vec<ConnectionState> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Status(state) => Some(state),
                _ => None,
            })
            .collect()
    }
}

impl Renderer for RecordingRenderer {
    fn render(&self, alert: &Alert) -> Result<()> {
        self.calls.lock().unwrap().push(Call::Render {
            id: *alert.id(),
            key: alert.key().to_string(),
            message: alert.message().to_string(),
        });
        Ok(())
    }

    fn begin_exit(&self, id: &AlertId) {
        self.calls.lock().unwrap().push(Call::BeginExit(*id));
    }

    fn remove(&self, id: &AlertId) {
        self.calls.lock().unwrap().push(Call::Remove(*id));
    }

    fn set_status(&self, state: ConnectionState) {
        self.calls.lock().unwrap().push(Call::Status(state));
    }
}

pub(crate) fn frame(kind: &str, message: &str, task_id: Option<&str>) -> Result<String> {
    let mut value = serde_json::json!({"type": kind, "message": message});
    if let Some(task_id) = task_id {
        value["task_id"] = serde_json::Value::String(task_id.to_string());
    }
    Ok(value.to_string())
}
