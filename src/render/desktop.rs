#[cfg(test)]
#[path = "desktop_test.rs"]
mod tests;

use notify_rust::Notification;
use tokio::runtime::Handle;

use super::SystemNotifier;
use crate::client::error::{NotifierError, Result};
use crate::config::APP_NAME;
use crate::models::NotificationEvent;

const SUMMARY: &str = "Agent reminder";

/// Raises desktop notifications through the platform notification service.
#[derive(Debug, Default, Clone)]
pub struct Desktop;

impl SystemNotifier for Desktop {
    fn notify(&self, event: &NotificationEvent) -> Result<()> {
        let runtime = Handle::try_current().map_err(|e| NotifierError::Render(e.to_string()))?;

        let mut notification = Notification::new();
        notification
            .summary(SUMMARY)
            .body(event.message())
            .appname(APP_NAME);

        // Talking to the notification daemon blocks
        let kind = event.kind();
        runtime.spawn_blocking(move || {
            if let Err(err) = notification.show() {
                log::warn!("Failed to show desktop notification for {}: {}", kind, err);
            }
        });
        Ok(())
    }
}
