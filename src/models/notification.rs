#[cfg(test)]
#[path = "notification_test.rs"]
mod tests;

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Reminder,
    Notification,
    Warning,
    Error,
    SmartReminder,
    ReportGenerated,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::Reminder => "reminder",
            NotificationKind::Notification => "notification",
            NotificationKind::Warning => "warning",
            NotificationKind::Error => "error",
            NotificationKind::SmartReminder => "smart_reminder",
            NotificationKind::ReportGenerated => "report_generated",
        }
    }
}

impl Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NotificationKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "reminder" => Ok(NotificationKind::Reminder),
            "notification" => Ok(NotificationKind::Notification),
            "warning" => Ok(NotificationKind::Warning),
            "error" => Ok(NotificationKind::Error),
            "smart_reminder" => Ok(NotificationKind::SmartReminder),
            "report_generated" => Ok(NotificationKind::ReportGenerated),
            other => Err(format!("unknown notification type {}", other)),
        }
    }
}

/// A single frame received from the push channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationEvent {
    #[serde(rename = "type")]
    kind: NotificationKind,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    task_id: Option<String>,
}

#[derive(Deserialize)]
struct RawFrame {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    task_id: Option<String>,
}

impl NotificationEvent {
    pub fn new(kind: NotificationKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            task_id: None,
        }
    }

    pub fn with_task_id(mut self, task_id: impl Into<String>) -> Self {
        self.task_id = Some(task_id.into());
        self
    }

    /// Parses a text frame. Well-formed frames carrying a type this client
    /// does not know about yield `Ok(None)`.
    pub fn parse(payload: &str) -> Result<Option<Self>, serde_json::Error> {
        let raw: RawFrame = serde_json::from_str(payload)?;
        let Ok(kind) = NotificationKind::from_str(&raw.kind) else {
            log::debug!("Ignoring notification of unknown type {}", raw.kind);
            return Ok(None);
        };
        Ok(Some(Self {
            kind,
            message: raw.message.unwrap_or_default(),
            task_id: raw.task_id,
        }))
    }

    pub fn kind(&self) -> NotificationKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn task_id(&self) -> Option<&str> {
        self.task_id.as_deref()
    }

    /// Key under which the alert for this event is displayed: the task id
    /// when present, otherwise the type name.
    pub fn alert_key(&self) -> String {
        match self.task_id.as_deref() {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => self.kind.to_string(),
        }
    }
}
