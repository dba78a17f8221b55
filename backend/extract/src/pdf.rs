//! PDF text extraction.
//!
//! Pages are extracted independently with `lopdf`; an unreadable page is
//! logged and skipped. The parser can panic on hostile input, so every call
//! into it runs under [`std::panic::catch_unwind`].

use std::panic::{self, AssertUnwindSafe};

use lopdf::Document;
use tracing::{debug, warn};

use crate::sentinel::{PDF_NO_TEXT, PDF_UNREADABLE};

/// Extract the text of every page, each followed by a newline.
pub fn extract_pdf(bytes: &[u8]) -> String {
    let document = match panic::catch_unwind(AssertUnwindSafe(|| Document::load_mem(bytes))) {
        Ok(Ok(document)) => document,
        Ok(Err(e)) => {
            warn!(error = %e, size = bytes.len(), "Failed to parse PDF");
            return PDF_UNREADABLE.to_string();
        }
        Err(_) => {
            warn!(size = bytes.len(), "PDF parser panicked on malformed input");
            return PDF_UNREADABLE.to_string();
        }
    };

    let pages = document.get_pages();
    debug!(pages = pages.len(), "Parsed PDF");

    let mut text = String::new();
    for page_number in pages.into_keys() {
        match page_text(&document, page_number) {
            Ok(page) => {
                text.push_str(page.trim_end());
                text.push('\n');
            }
            Err(reason) => {
                warn!(page = page_number, %reason, "Skipping unreadable PDF page");
            }
        }
    }

    if text.trim().is_empty() {
        return PDF_NO_TEXT.to_string();
    }
    text
}

fn page_text(document: &Document, page_number: u32) -> Result<String, String> {
    match panic::catch_unwind(AssertUnwindSafe(|| document.extract_text(&[page_number]))) {
        Ok(Ok(text)) => Ok(text),
        Ok(Err(e)) => Err(e.to_string()),
        Err(_) => Err("text extraction panicked".to_string()),
    }
}
