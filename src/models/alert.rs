use chrono::{DateTime, Local};
use crossterm::style::Color;
use uuid::Uuid;

use super::{NotificationEvent, NotificationKind};

pub type AlertId = Uuid;

/// A visible alert, addressed by its key. A newer alert with the same key
/// replaces this one.
#[derive(Debug, Clone)]
pub struct Alert {
    id: AlertId,
    key: String,
    kind: NotificationKind,
    message: String,
    shown_at: DateTime<Local>,
}

impl Alert {
    pub fn new(key: impl Into<String>, event: &NotificationEvent) -> Self {
        Self {
            id: Uuid::new_v4(),
            key: key.into(),
            kind: event.kind(),
            message: event.message().to_string(),
            shown_at: Local::now(),
        }
    }

    pub fn id(&self) -> &AlertId {
        &self.id
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn kind(&self) -> NotificationKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn shown_at(&self) -> DateTime<Local> {
        self.shown_at
    }

    pub fn title(&self) -> &'static str {
        match self.kind {
            NotificationKind::Notification => "Notification",
            _ => "Reminder",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self.kind {
            NotificationKind::Notification => "📬",
            _ => "🔔",
        }
    }

    /// Local wall-clock time the alert was shown, as `HH:MM`.
    pub fn time(&self) -> String {
        self.shown_at.format("%H:%M").to_string()
    }
}

impl NotificationKind {
    pub fn accent_color(&self) -> Color {
        match self {
            NotificationKind::Notification => Color::Rgb {
                r: 16,
                g: 185,
                b: 129,
            },
            NotificationKind::Warning => Color::Rgb {
                r: 245,
                g: 158,
                b: 11,
            },
            NotificationKind::Error => Color::Rgb {
                r: 239,
                g: 68,
                b: 68,
            },
            _ => Color::Rgb {
                r: 99,
                g: 102,
                b: 241,
            },
        }
    }
}
