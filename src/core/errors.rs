use thiserror::Error;

#[derive(Error, Debug)]
pub enum XtbError {
    #[error("websocket transport error: {0}")]
    Transport(#[from] tokio_tungstenite::tungstenite::Error),

    #[error("connection closed by peer")]
    ConnectionClosed,

    #[error("JSON codec error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("API error: {code} - {message}")]
    Api { code: String, message: String },

    #[error("configuration error: {0}")]
    Config(#[from] crate::core::config::ConfigError),

    #[error("session error: {0}")]
    Session(String),
}

impl XtbError {
    /// True for `status=false` responses. These are safe to retry on the same
    /// connection, unlike transport failures which leave it unusable.
    pub fn is_api_error(&self) -> bool {
        matches!(self, Self::Api { .. })
    }
}
