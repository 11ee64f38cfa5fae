use thiserror::Error;

/// Settlement failures. Any error aborts the whole batch; no partial report is produced.
#[derive(Error, Debug)]
pub enum SettlementError {
    #[error("participant {index} ({address}): {reason}")]
    Validation {
        index: usize,
        address: String,
        reason: String,
    },
    #[error("arithmetic error: {0}")]
    Arithmetic(&'static str),
    #[error("crypto error: {0}")]
    Crypto(String),
    #[error("invalid input: {0}")]
    Input(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl SettlementError {
    pub fn validation(index: usize, address: &str, reason: impl Into<String>) -> Self {
        Self::Validation {
            index,
            address: address.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for SettlementError {
    fn from(err: serde_json::Error) -> Self {
        Self::Input(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SettlementError>;
