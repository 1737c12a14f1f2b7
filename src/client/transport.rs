#[cfg(test)]
#[path = "transport_test.rs"]
mod tests;

use std::pin::Pin;

use futures::{Stream, StreamExt};
use tokio_tungstenite::{
    MaybeTlsStream, WebSocketStream, connect_async,
    tungstenite::{Message, client::IntoClientRequest, http::HeaderValue},
};
use url::Url;

use super::error::{NotifierError, Result};
use crate::config::user_agent;

/// Text frames received from the push channel. The stream ends when the
/// connection closes.
pub type FrameStream = Pin<Box<dyn Stream<Item = Result<String>> + Send>>;

#[async_trait::async_trait]
pub trait Transport: Send + Sync + 'static {
    async fn open(&self, url: &str) -> Result<FrameStream>;
}

pub type ArcTransport = std::sync::Arc<dyn Transport>;

/// Builds the push URL for a page origin: `http` becomes `ws`, `https`
/// becomes `wss`, host and port are kept and the path is replaced.
pub fn push_url(origin: &str, path: &str) -> Result<String> {
    let invalid = |reason: &str| NotifierError::InvalidOrigin {
        origin: origin.to_string(),
        reason: reason.to_string(),
    };

    let mut url = Url::parse(origin).map_err(|e| invalid(&e.to_string()))?;
    if url.host_str().is_none() {
        return Err(invalid("missing host"));
    }

    let scheme = match url.scheme() {
        "https" | "wss" => "wss",
        "http" | "ws" => "ws",
        other => return Err(invalid(&format!("unsupported scheme {}", other))),
    };
    url.set_scheme(scheme)
        .map_err(|_| invalid("cannot change scheme"))?;
    url.set_path(path);
    url.set_query(None);
    url.set_fragment(None);
    Ok(url.to_string())
}

#[derive(Debug, Default, Clone)]
pub struct WebSocket;

#[async_trait::async_trait]
impl Transport for WebSocket {
    async fn open(&self, url: &str) -> Result<FrameStream> {
        let mut request = url.into_client_request()?;
        if let Ok(agent) = HeaderValue::from_str(&user_agent()) {
            request.headers_mut().insert("User-Agent", agent);
        }

        let (ws, resp) = connect_async(request).await?;
        log::debug!("WebSocket handshake with {} done ({})", url, resp.status());

        Ok(frames(ws))
    }
}

type Socket = WebSocketStream<MaybeTlsStream<tokio::net::TcpStream>>;

/// A transport error is yielded once; the client treats it as the end of
/// the connection.
fn frames(ws: Socket) -> FrameStream {
    let stream = futures::stream::unfold(ws, |mut ws| async move {
        loop {
            match ws.next().await {
                Some(Ok(msg)) => {
                    if let Some(frame) = text_frame(msg) {
                        return Some((Ok(frame), ws));
                    }
                }
                Some(Err(e)) => return Some((Err(e.into()), ws)),
                None => return None,
            }
        }
    });
    Box::pin(stream)
}

/// Maps a websocket message to a frame. `None` means the message carries no
/// payload for the client (ping, pong, close) or one it cannot read.
pub(crate) fn text_frame(msg: Message) -> Option<String> {
    match msg {
        Message::Text(text) => Some(text),
        Message::Binary(data) => match String::from_utf8(data) {
            Ok(text) => Some(text),
            Err(err) => {
                log::error!("Dropping binary frame that is not utf-8: {}", err);
                None
            }
        },
        Message::Close(frame) => {
            log::debug!("Server closed the push channel: {:?}", frame);
            None
        }
        Message::Ping(_) | Message::Pong(_) | Message::Frame(_) => None,
    }
}
