pub mod alerts;
pub mod client;
pub mod dedupe;
pub mod error;
pub mod handle;
pub mod listeners;
pub mod schedule;
pub mod transport;

#[cfg(test)]
pub(crate) mod testing;

pub use alerts::ActiveAlertSet;
pub use client::NotificationClient;
pub use dedupe::DedupeCache;
pub use error::NotifierError;
pub use handle::ClientHandle;
pub use transport::{ArcTransport, FrameStream, Transport, WebSocket, push_url};
