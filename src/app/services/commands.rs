#[cfg(test)]
#[path = "commands_test.rs"]
mod tests;

use std::{io::Write, str::FromStr};

use eyre::Result;
use tokio::sync::mpsc;

use crate::client::{ClientHandle, NotifierError};
use crate::models::NotificationKind;

const HELP: &str = r#"Commands:
    dismiss <key>          close the alert shown under <key> (alias: d)
    clear                  close every alert (alias: c)
    show [type] <message>  show a local alert (alias: s)
    status                 print the connection state
    quit                   exit (alias: q)"#;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    Dismiss(String),
    Clear,
    Show(NotificationKind, String),
    Status,
    Help,
    Quit,
}

impl ConsoleCommand {
    /// Parses one input line. Blank lines yield `None`; anything not
    /// understood is `Help`.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        let command = match verb {
            "d" | "dismiss" if !rest.is_empty() => Self::Dismiss(rest.to_string()),
            "c" | "clear" => Self::Clear,
            "s" | "show" if !rest.is_empty() => {
                let (kind, message) = match rest.split_once(char::is_whitespace) {
                    Some((first, message)) => match NotificationKind::from_str(first) {
                        Ok(kind) => (kind, message.trim()),
                        Err(_) => (NotificationKind::Notification, rest),
                    },
                    None => (NotificationKind::Notification, rest),
                };
                Self::Show(kind, message.to_string())
            }
            "status" => Self::Status,
            "q" | "quit" | "exit" => Self::Quit,
            _ => Self::Help,
        };
        Some(command)
    }
}

/// Applies console commands to a running client. Ends on `quit`, when the
/// input closes, or when the client is gone.
pub struct CommandService {
    lines: mpsc::UnboundedReceiver<String>,
    handle: ClientHandle,
    out: Box<dyn Write + Send>,
}

impl CommandService {
    pub fn new(
        lines: mpsc::UnboundedReceiver<String>,
        handle: ClientHandle,
        out: Box<dyn Write + Send>,
    ) -> Self {
        Self { lines, handle, out }
    }

    pub async fn run(mut self) -> Result<()> {
        loop {
            let line = tokio::select! {
                line = self.lines.recv() => line,
                _ = self.handle.closed() => return Ok(()),
            };
            let Some(line) = line else {
                break;
            };

            let Some(command) = ConsoleCommand::parse(&line) else {
                continue;
            };
            log::debug!("Console command: {:?}", command);
            if !self.apply(command).await? {
                return Ok(());
            }
        }

        log::debug!("Console input closed");
        self.handle.shutdown();
        Ok(())
    }

    async fn apply(&mut self, command: ConsoleCommand) -> Result<bool> {
        let res = match command {
            ConsoleCommand::Dismiss(key) => self.handle.dismiss(key),
            ConsoleCommand::Clear => self.handle.clear(),
            ConsoleCommand::Show(kind, message) => self.handle.show(message, kind),
            ConsoleCommand::Status => match self.handle.state().await {
                Ok(state) => {
                    writeln!(self.out, "status: {}", state)?;
                    Ok(())
                }
                Err(err) => Err(err),
            },
            ConsoleCommand::Help => {
                writeln!(self.out, "{}", HELP)?;
                Ok(())
            }
            ConsoleCommand::Quit => {
                self.handle.shutdown();
                return Ok(false);
            }
        };

        match res {
            Ok(()) => Ok(true),
            Err(NotifierError::Closed) => Ok(false),
            Err(err) => Err(err.into()),
        }
    }
}
