pub mod alert;
pub mod event;
pub mod notification;

pub use alert::{Alert, AlertId};
pub use event::{ArcListener, ConnectionState, Event, Generation, Listener, ListenerId};
pub use notification::{NotificationEvent, NotificationKind};
