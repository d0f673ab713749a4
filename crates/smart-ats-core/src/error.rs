use thiserror::Error;

#[derive(Error, Debug)]
pub enum SmartAtsError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Malformed analysis payload: {0}")]
    Payload(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SmartAtsError>;
