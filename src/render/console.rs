#[cfg(test)]
#[path = "console_test.rs"]
mod tests;

use std::{
    collections::HashMap,
    io::{self, Write},
    sync::Mutex,
};

use crossterm::style::{Color, Stylize};

use super::Renderer;
use crate::client::error::{NotifierError, Result};
use crate::models::{Alert, AlertId, ConnectionState};

const BELL: &str = "\x07";

/// Renders alerts as coloured blocks on a terminal.
pub struct Console {
    inner: Mutex<Inner>,
    bell: bool,
}

struct Inner {
    out: Box<dyn Write + Send>,
    /// Alerts on screen, by id, with their keys
    shown: HashMap<AlertId, String>,
    connected: Option<bool>,
}

impl Console {
    pub fn new(out: Box<dyn Write + Send>, bell: bool) -> Self {
        Self {
            inner: Mutex::new(Inner {
                out,
                shown: HashMap::new(),
                connected: None,
            }),
            bell,
        }
    }

    pub fn stdout(bell: bool) -> Self {
        Self::new(Box::new(io::stdout()), bell)
    }

    fn with_inner<T>(&self, f: impl FnOnce(&mut Inner) -> io::Result<T>) -> io::Result<T> {
        let mut inner = self
            .inner
            .lock()
            .map_err(|_| io::Error::other("console lock poisoned"))?;
        f(&mut inner)
    }
}

impl Renderer for Console {
    fn render(&self, alert: &Alert) -> Result<()> {
        let color = alert.kind().accent_color();
        let header = format!(
            "{} {} [{}]  {}",
            alert.icon(),
            alert.title(),
            sanitize(alert.key()),
            alert.time()
        );
        let bell = if self.bell { BELL } else { "" };

        self.with_inner(|inner| {
            writeln!(inner.out, "{}{}", bell, header.with(color).bold())?;
            for line in sanitize(alert.message()).lines() {
                writeln!(inner.out, "  {}", line.with(color))?;
            }
            writeln!(inner.out, "  {}", "dismiss <key> to close".with(Color::DarkGrey))?;
            inner.out.flush()?;
            inner.shown.insert(*alert.id(), alert.key().to_string());
            Ok(())
        })
        .map_err(|e| NotifierError::Render(e.to_string()))
    }

    fn begin_exit(&self, id: &AlertId) {
        let res = self.with_inner(|inner| {
            let Some(key) = inner.shown.get(id).cloned() else {
                return Ok(());
            };
            writeln!(
                inner.out,
                "{}",
                format!("✕ [{}] dismissed", sanitize(&key)).with(Color::DarkGrey)
            )?;
            inner.out.flush()
        });
        if let Err(err) = res {
            log::warn!("Failed to write dismissal of alert {}: {}", id, err);
        }
    }

    fn remove(&self, id: &AlertId) {
        let res = self.with_inner(|inner| Ok(inner.shown.remove(id)));
        match res {
            Ok(Some(key)) => log::trace!("Detached alert {} ({})", id, key),
            Ok(None) => log::trace!("Alert {} already detached", id),
            Err(err) => log::warn!("Failed to detach alert {}: {}", id, err),
        }
    }

    fn set_status(&self, state: ConnectionState) {
        let connected = match state {
            ConnectionState::Connected => true,
            ConnectionState::Disconnected => false,
            ConnectionState::Connecting | ConnectionState::Reconnecting => return,
        };

        let res = self.with_inner(|inner| {
            if inner.connected == Some(connected) {
                return Ok(());
            }
            inner.connected = Some(connected);
            if connected {
                writeln!(inner.out, "{}", "● connected".with(Color::Green))?;
            } else {
                writeln!(inner.out, "{}", "○ disconnected".with(Color::DarkGrey))?;
            }
            inner.out.flush()
        });
        if let Err(err) = res {
            log::warn!("Failed to write connection status: {}", err);
        }
    }
}

/// Drops control characters so pushed text cannot drive the terminal.
/// Newlines and tabs are kept.
pub fn sanitize(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
        .collect()
}
