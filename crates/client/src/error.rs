//! Error types for the log stream client.

use logstream_protocol::DecodeError;
use tokio_tungstenite::tungstenite;

/// Errors produced while running a stream session.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("WebSocket error: {0}")]
    Ws(#[from] tungstenite::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed frame: {0}")]
    Decode(#[from] DecodeError),

    #[error("output error: {0}")]
    Io(#[from] std::io::Error),

    #[error("connection closed")]
    Closed,
}

/// Errors from building a [`ClientConfig`](crate::ClientConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid pattern for field `{field}`: {source}")]
    InvalidPattern {
        field: String,
        #[source]
        source: regex::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_error_display() {
        assert_eq!(ClientError::Closed.to_string(), "connection closed");
        let err = ClientError::from(DecodeError::MissingCommand);
        assert!(err.to_string().contains("cmd"));
    }

    #[test]
    fn config_error_names_field() {
        let source = regex::Regex::new("(").unwrap_err();
        let err = ConfigError::InvalidPattern {
            field: "server".into(),
            source,
        };
        assert!(err.to_string().contains("`server`"));
    }
}
