//! Fixed diagnostic texts returned in place of document content.
//!
//! These are successful extraction results, not errors: callers tell "no text
//! found" apart from real content only by comparing against these strings.

pub const PDF_NO_TEXT: &str =
    "Unable to extract text from this PDF. It might be scanned or image-based.";

pub const PDF_UNREADABLE: &str =
    "Unable to extract text from this PDF. It might be corrupted or password-protected.";

pub const DOCX_NO_TEXT: &str =
    "Unable to extract text from this DOCX. It might be empty or contain only images.";

pub const DOCX_UNREADABLE: &str =
    "Unable to extract text from this DOCX. It might be corrupted or in an unsupported format.";

pub const LINK_UNREADABLE: &str = "Unable to extract text from the shared link. \
     Make sure it points to a publicly accessible PDF or DOCX file.";

const ALL: [&str; 5] = [
    PDF_NO_TEXT,
    PDF_UNREADABLE,
    DOCX_NO_TEXT,
    DOCX_UNREADABLE,
    LINK_UNREADABLE,
];

/// Whether `text` is one of the diagnostic sentinels.
pub fn is_sentinel(text: &str) -> bool {
    ALL.contains(&text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recognises_every_sentinel() {
        for sentinel in ALL {
            assert!(is_sentinel(sentinel));
        }
        assert!(!is_sentinel("Sample Resume\n"));
        assert!(!is_sentinel(""));
    }
}
