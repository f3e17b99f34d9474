use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Configuration JSON error: {0}")]
    ConfigFormat(#[from] serde_json::Error),
    #[error("Frame {received} arrived after frame {last}")]
    OutOfOrderFrame { last: u64, received: u64 },
}
