use roaster_core::RoasterError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("failed to fetch shared document: {0}")]
    Fetch(String),

    #[error("shared document fetch timed out after {0}s")]
    FetchTimeout(u64),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ExtractError> for RoasterError {
    fn from(err: ExtractError) -> Self {
        match err {
            ExtractError::UnsupportedFormat(name) => RoasterError::UnsupportedFormat(name),
            other => RoasterError::Internal(other.to_string()),
        }
    }
}
