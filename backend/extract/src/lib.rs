//! Document text extraction for uploaded and shared resumes.
//!
//! Extractors never fail openly: when a document yields no text they return
//! one of the fixed sentinel sentences from [`sentinel`].

pub mod docx;
pub mod error;
pub mod format;
pub mod link;
pub mod pdf;
pub mod sentinel;

pub use docx::extract_docx;
pub use error::ExtractError;
pub use format::{extract, DocumentFormat};
pub use link::{
    download_url, extract_from_link, probe, resolve_file_id, FetchedDocument, HttpLinkFetcher,
    LinkFetcher, DEFAULT_MAX_DOWNLOAD_BYTES,
};
pub use pdf::extract_pdf;
pub use sentinel::is_sentinel;
