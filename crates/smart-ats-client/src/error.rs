use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Server rejected the request (HTTP {status}): {}", message.as_deref().unwrap_or("no message"))]
    Application {
        status: u16,
        message: Option<String>,
    },

    #[error("Malformed response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid server URL '{0}'")]
    InvalidUrl(String),
}

impl ClientError {
    /// The message the server attached to a rejection, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ClientError::Application { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// Whether the server answered and refused, as opposed to the exchange
    /// itself breaking down.
    pub fn is_application(&self) -> bool {
        matches!(self, ClientError::Application { .. })
    }
}
