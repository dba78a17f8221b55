//! Format routing for uploaded documents.
//!
//! Uploads are routed purely on the declared filename; the bytes are never
//! sniffed. Link-sourced bytes have no trustworthy name and are probed instead
//! (see [`crate::link`]).

use std::fmt;

use crate::docx::extract_docx;
use crate::error::ExtractError;
use crate::pdf::extract_pdf;

/// Document formats we know how to extract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Docx,
}

impl DocumentFormat {
    /// Route a filename to its extractor by case-insensitive suffix.
    pub fn from_filename(filename: &str) -> Result<Self, ExtractError> {
        let lower = filename.trim().to_lowercase();
        if lower.ends_with(".pdf") {
            Ok(DocumentFormat::Pdf)
        } else if lower.ends_with(".docx") {
            Ok(DocumentFormat::Docx)
        } else {
            Err(ExtractError::UnsupportedFormat(filename.to_string()))
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            DocumentFormat::Pdf => "pdf",
            DocumentFormat::Docx => "docx",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            DocumentFormat::Pdf => "application/pdf",
            DocumentFormat::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
        }
    }

    /// Run the matching extractor. Always yields text (possibly a sentinel).
    pub fn extract(&self, bytes: &[u8]) -> String {
        match self {
            DocumentFormat::Pdf => extract_pdf(bytes),
            DocumentFormat::Docx => extract_docx(bytes),
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Route `filename` and extract `bytes` with the matching extractor.
pub fn extract(bytes: &[u8], filename: &str) -> Result<String, ExtractError> {
    let format = DocumentFormat::from_filename(filename)?;
    Ok(format.extract(bytes))
}
