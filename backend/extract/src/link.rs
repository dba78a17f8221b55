//! Shared-drive link extraction.
//!
//! A link is resolved to a file id, the file is downloaded into a temporary
//! file owned by [`FetchedDocument`], and the bytes are probed as PDF first,
//! then DOCX. The temporary file is removed when the document is dropped, on
//! every exit path.

use std::io::Write;
use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use crate::error::ExtractError;
use crate::format::DocumentFormat;
use crate::sentinel::{is_sentinel, LINK_UNREADABLE};

/// Matches `/d/<id>` and `?id=<id>` link shapes.
static FILE_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:/d/|id=)([a-zA-Z0-9_-]+)").unwrap());

/// Cap on a single shared-link download.
pub const DEFAULT_MAX_DOWNLOAD_BYTES: u64 = 20 * 1024 * 1024;

/// Pull the file id out of a shareable link.
pub fn resolve_file_id(link: &str) -> Option<String> {
    FILE_ID_RE
        .captures(link)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Direct-download URL for a shared file id.
pub fn download_url(file_id: &str) -> String {
    format!("https://drive.google.com/uc?export=download&id={file_id}")
}

/// A downloaded document spooled to a temporary file.
#[derive(Debug)]
pub struct FetchedDocument {
    file: NamedTempFile,
}

impl FetchedDocument {
    /// Spool in-memory bytes to a temporary file.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ExtractError> {
        let mut file = NamedTempFile::new()?;
        file.write_all(bytes)?;
        file.flush()?;
        Ok(Self { file })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    pub async fn read_bytes(&self) -> Result<Vec<u8>, ExtractError> {
        Ok(tokio::fs::read(self.path()).await?)
    }
}

/// Resolves a shared file id to its bytes.
#[async_trait]
pub trait LinkFetcher: Send + Sync {
    fn name(&self) -> &str;

    async fn fetch(&self, file_id: &str) -> Result<FetchedDocument, ExtractError>;
}

/// Downloads publicly shared files over HTTP.
pub struct HttpLinkFetcher {
    client: reqwest::Client,
    max_bytes: u64,
}

impl HttpLinkFetcher {
    pub fn new(timeout: Duration) -> Result<Self, ExtractError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("ResumeRoaster/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ExtractError::Fetch(e.to_string()))?;
        Ok(Self {
            client,
            max_bytes: DEFAULT_MAX_DOWNLOAD_BYTES,
        })
    }

    pub fn with_max_bytes(mut self, max_bytes: u64) -> Self {
        self.max_bytes = max_bytes;
        self
    }
}

#[async_trait]
impl LinkFetcher for HttpLinkFetcher {
    fn name(&self) -> &str {
        "http"
    }

    async fn fetch(&self, file_id: &str) -> Result<FetchedDocument, ExtractError> {
        let url = download_url(file_id);
        info!(file_id = %file_id, "Fetching shared document");

        let mut response = self
            .client
            .get(&url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| ExtractError::Fetch(e.to_string()))?;

        let mut file = NamedTempFile::new()?;
        let mut size = 0u64;
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| ExtractError::Fetch(e.to_string()))?
        {
            size += chunk.len() as u64;
            if size > self.max_bytes {
                return Err(ExtractError::Fetch(format!(
                    "document exceeds {} bytes",
                    self.max_bytes
                )));
            }
            file.write_all(&chunk)?;
        }
        file.flush()?;

        debug!(file_id = %file_id, size, path = %file.path().display(), "Shared document spooled");
        Ok(FetchedDocument { file })
    }
}

/// Try every known format in order and keep the first one yielding real text.
pub fn probe(bytes: &[u8]) -> String {
    for format in [DocumentFormat::Pdf, DocumentFormat::Docx] {
        let text = format.extract(bytes);
        if !is_sentinel(&text) && !text.trim().is_empty() {
            debug!(%format, "Probe matched");
            return text;
        }
        debug!(%format, "Probe yielded no usable text");
    }
    LINK_UNREADABLE.to_string()
}

/// Extract text from a shared link.
///
/// An unrecognised link or a file no extractor can read yields
/// [`LINK_UNREADABLE`]; transport failures are errors.
pub async fn extract_from_link(
    link: &str,
    fetcher: &dyn LinkFetcher,
) -> Result<String, ExtractError> {
    let Some(file_id) = resolve_file_id(link) else {
        warn!("Shared link does not contain a file id");
        return Ok(LINK_UNREADABLE.to_string());
    };

    let document = fetcher.fetch(&file_id).await?;
    let bytes = document.read_bytes().await?;
    drop(document);

    tokio::task::spawn_blocking(move || probe(&bytes))
        .await
        .map_err(|e| ExtractError::Fetch(format!("probe task failed: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::docx::fixtures::docx_with_paragraphs;
    use crate::pdf::fixtures::pdf_with_pages;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    struct StaticFetcher {
        bytes: Vec<u8>,
        calls: AtomicUsize,
        spooled: Mutex<Option<PathBuf>>,
    }

    impl StaticFetcher {
        fn new(bytes: Vec<u8>) -> Self {
            Self {
                bytes,
                calls: AtomicUsize::new(0),
                spooled: Mutex::new(None),
            }
        }
    }

    #[async_trait]
    impl LinkFetcher for StaticFetcher {
        fn name(&self) -> &str {
            "static"
        }

        async fn fetch(&self, _file_id: &str) -> Result<FetchedDocument, ExtractError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let document = FetchedDocument::from_bytes(&self.bytes)?;
            *self.spooled.lock().unwrap() = Some(document.path().to_path_buf());
            Ok(document)
        }
    }

    struct FailingFetcher;

    #[async_trait]
    impl LinkFetcher for FailingFetcher {
        fn name(&self) -> &str {
            "failing"
        }

        async fn fetch(&self, _file_id: &str) -> Result<FetchedDocument, ExtractError> {
            Err(ExtractError::Fetch("connection refused".into()))
        }
    }

    #[test]
    fn test_resolves_both_link_shapes() {
        assert_eq!(
            resolve_file_id("https://drive.google.com/file/d/1234567890abcdef/view?usp=sharing")
                .as_deref(),
            Some("1234567890abcdef")
        );
        assert_eq!(
            resolve_file_id("https://drive.google.com/open?id=abc_DEF-123").as_deref(),
            Some("abc_DEF-123")
        );
        assert_eq!(resolve_file_id("https://example.com/resume.pdf"), None);
    }

    #[test]
    fn test_download_url_embeds_id() {
        assert!(download_url("xyz").ends_with("id=xyz"));
    }

    #[tokio::test]
    async fn test_pdf_link_is_probed_as_pdf() {
        let fetcher = StaticFetcher::new(pdf_with_pages(&[Some("Sample Resume")]));
        let text = extract_from_link("https://drive.google.com/file/d/abc/view", &fetcher)
            .await
            .unwrap();
        assert_eq!(text, "Sample Resume\n");
    }

    #[tokio::test]
    async fn test_docx_link_falls_back_to_docx() {
        let fetcher = StaticFetcher::new(docx_with_paragraphs(&["Hello World"]));
        let text = extract_from_link("https://drive.google.com/open?id=abc", &fetcher)
            .await
            .unwrap();
        assert_eq!(text, "Hello World\n");
    }

    #[tokio::test]
    async fn test_unreadable_file_yields_link_sentinel() {
        let fetcher = StaticFetcher::new(b"plain text, not a document".to_vec());
        let text = extract_from_link("https://drive.google.com/open?id=abc", &fetcher)
            .await
            .unwrap();
        assert_eq!(text, LINK_UNREADABLE);
    }

    #[tokio::test]
    async fn test_unmatched_link_never_fetches() {
        let fetcher = StaticFetcher::new(Vec::new());
        let text = extract_from_link("https://example.com/cv", &fetcher).await.unwrap();
        assert_eq!(text, LINK_UNREADABLE);
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_temp_file_is_removed_after_extraction() {
        let fetcher = StaticFetcher::new(b"garbage".to_vec());
        extract_from_link("https://drive.google.com/open?id=abc", &fetcher)
            .await
            .unwrap();
        let path = fetcher.spooled.lock().unwrap().clone().unwrap();
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_fetch_errors_propagate() {
        let err = extract_from_link("https://drive.google.com/open?id=abc", &FailingFetcher)
            .await
            .unwrap_err();
        assert!(matches!(err, ExtractError::Fetch(_)));
    }
}
