pub mod services;

pub use services::{CommandService, ConsoleCommand, spawn_stdin_reader};

use eyre::Result;

use crate::client::ClientHandle;

/// Writes every recognized notification to the log, alert or not.
pub async fn log_notifications(handle: ClientHandle) -> Result<()> {
    let (_, mut events) = handle.subscribe().await?;
    while let Some(event) = events.recv().await {
        match event.task_id() {
            Some(task_id) => log::info!(
                "Received {} for task {}: {}",
                event.kind(),
                task_id,
                event.message()
            ),
            None => log::info!("Received {}: {}", event.kind(), event.message()),
        }
    }
    Ok(())
}
