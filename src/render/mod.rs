pub mod console;
pub mod desktop;

pub use console::Console;
pub use desktop::Desktop;

#[cfg(test)]
use mockall::automock;

use std::sync::Arc;

use crate::client::error::Result;
use crate::models::{Alert, AlertId, ConnectionState, NotificationEvent};

/// Surface the client draws alerts on.
#[cfg_attr(test, automock)]
pub trait Renderer: Send + Sync {
    fn render(&self, alert: &Alert) -> Result<()>;

    /// Starts the exit transition. The alert is detached later through
    /// `remove`.
    fn begin_exit(&self, id: &AlertId);

    /// Detaches an alert without transition. Removing an alert that is
    /// already gone is a no-op.
    fn remove(&self, id: &AlertId);

    fn set_status(&self, state: ConnectionState);
}

pub type ArcRenderer = Arc<dyn Renderer>;

/// Operating-system notification area, used next to the [`Renderer`].
#[cfg_attr(test, automock)]
pub trait SystemNotifier: Send + Sync {
    fn notify(&self, event: &NotificationEvent) -> Result<()>;
}

pub type ArcSystemNotifier = Arc<dyn SystemNotifier>;
