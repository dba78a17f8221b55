use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Caller-visible rejection raised while handling an analysis request.
///
/// Sentinel extraction texts are not errors and never appear here.
#[derive(Debug, Error)]
pub enum RoasterError {
    #[error("No file or Google Drive link provided")]
    NoInput,

    #[error("Unsupported file format. Please upload a PDF or DOCX file.")]
    UnsupportedFormat(String),

    #[error("{0}")]
    ExtractionFailed(String),

    #[error("Error processing resume: {0}")]
    Internal(String),
}

/// Machine-checkable rejection category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    NoInputProvided,
    UnsupportedFileFormat,
    FailedToExtractText,
    InternalError,
}

impl ErrorCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::NoInputProvided => "no_input_provided",
            ErrorCategory::UnsupportedFileFormat => "unsupported_file_format",
            ErrorCategory::FailedToExtractText => "failed_to_extract_text",
            ErrorCategory::InternalError => "internal_error",
        }
    }
}

impl RoasterError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            RoasterError::NoInput => ErrorCategory::NoInputProvided,
            RoasterError::UnsupportedFormat(_) => ErrorCategory::UnsupportedFileFormat,
            RoasterError::ExtractionFailed(_) => ErrorCategory::FailedToExtractText,
            RoasterError::Internal(_) => ErrorCategory::InternalError,
        }
    }

    /// Whether the rejection is the caller's fault (4xx) rather than ours (5xx).
    pub fn is_client_fault(&self) -> bool {
        !matches!(self, RoasterError::Internal(_))
    }

    pub fn internal(err: impl fmt::Display) -> Self {
        RoasterError::Internal(err.to_string())
    }
}

impl From<anyhow::Error> for RoasterError {
    fn from(err: anyhow::Error) -> Self {
        RoasterError::Internal(format!("{err:#}"))
    }
}
