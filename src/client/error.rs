use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotifierError {
    #[error("malformed notification frame: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("connection error: {0}")]
    Connection(String),

    #[error("render error: {0}")]
    Render(String),

    #[error("invalid origin {origin}: {reason}")]
    InvalidOrigin { origin: String, reason: String },

    #[error("notification client is closed")]
    Closed,
}

impl From<tokio_tungstenite::tungstenite::Error> for NotifierError {
    fn from(err: tokio_tungstenite::tungstenite::Error) -> Self {
        NotifierError::Connection(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, NotifierError>;
