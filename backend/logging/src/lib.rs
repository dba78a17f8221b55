//! Structured logging for the Resume Roaster service.
//!
//! Handles subscriber setup (console, JSON, rolling NDJSON files) and the
//! redaction applied to resume text before any of it reaches a log line.

pub mod logger;
pub mod redact;

pub use logger::{init_logger, LogSettings};
pub use redact::{preview, redact_sensitive_data};
