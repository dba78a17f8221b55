use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::time::timeout;
use tracing::{debug, info, warn};

use roaster_commentary::CommentaryGenerator;
use roaster_core::{
    AnalysisRecord, AnalysisRequest, AnalysisStore, AnalysisView, DocumentUpload, RoasterError,
    StatusCheck, STATUS_LIST_LIMIT,
};
use roaster_extract::sentinel::LINK_UNREADABLE;
use roaster_extract::{extract_from_link, DocumentFormat, ExtractError, LinkFetcher};
use roaster_logging::preview;

/// Raised when an upload yields only whitespace.
pub const EMPTY_EXTRACTION: &str = "Failed to extract text from the document";
/// Raised when a shared link resolves to nothing readable.
pub const DRIVE_EXTRACTION_FAILED: &str = "Failed to extract text from Google Drive link. Please ensure it's a PDF or DOCX file and is publicly accessible.";

const PREVIEW_CHARS: usize = 80;

#[derive(Debug, Clone, Copy)]
pub struct AnalyzerConfig {
    /// Upper bound on a single store write.
    pub store_timeout: Duration,
    /// Upper bound on downloading and probing a shared link.
    pub fetch_timeout: Duration,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            store_timeout: Duration::from_secs(10),
            fetch_timeout: Duration::from_secs(30),
        }
    }
}

/// Runs the validate → extract → generate → persist pipeline.
#[derive(Clone)]
pub struct Analyzer {
    store: Arc<dyn AnalysisStore>,
    fetcher: Arc<dyn LinkFetcher>,
    generator: CommentaryGenerator,
    config: AnalyzerConfig,
}

impl Analyzer {
    pub fn new(
        store: Arc<dyn AnalysisStore>,
        fetcher: Arc<dyn LinkFetcher>,
        generator: CommentaryGenerator,
        config: AnalyzerConfig,
    ) -> Self {
        Self {
            store,
            fetcher,
            generator,
            config,
        }
    }

    /// Analyze one request. A file takes precedence over a link.
    pub async fn analyze(&self, request: AnalysisRequest) -> Result<AnalysisView, RoasterError> {
        let text = match (&request.file, request.link()) {
            (Some(upload), _) => self.extract_upload(upload).await?,
            (None, Some(link)) => self.extract_link(link).await?,
            (None, None) => return Err(RoasterError::NoInput),
        };

        let commentary = self.generator.generate(&text);
        let record = AnalysisRecord::new(text, commentary.roast, commentary.review);
        self.persist(&record).await?;

        info!(id = %record.id, "Analysis stored");
        Ok(AnalysisView::from(&record))
    }

    async fn extract_upload(&self, upload: &DocumentUpload) -> Result<String, RoasterError> {
        let format = DocumentFormat::from_filename(&upload.filename)?;
        info!(
            filename = %upload.filename,
            %format,
            mime = format.mime_type(),
            size = upload.bytes.len(),
            "Extracting uploaded document"
        );

        let bytes = upload.bytes.clone();
        let text = tokio::task::spawn_blocking(move || format.extract(&bytes))
            .await
            .map_err(|e| RoasterError::internal(format!("extraction task failed: {e}")))?;

        if text.trim().is_empty() {
            return Err(RoasterError::ExtractionFailed(EMPTY_EXTRACTION.to_string()));
        }
        // Sentinel texts are analysed like any other text.
        debug!(chars = text.len(), preview = %preview(&text, PREVIEW_CHARS), "Extracted text");
        Ok(text)
    }

    async fn extract_link(&self, link: &str) -> Result<String, RoasterError> {
        info!(fetcher = self.fetcher.name(), "Extracting shared link");

        let text = timeout(
            self.config.fetch_timeout,
            extract_from_link(link, self.fetcher.as_ref()),
        )
        .await
        .map_err(|_| ExtractError::FetchTimeout(self.config.fetch_timeout.as_secs()))??;

        if text == LINK_UNREADABLE || text.trim().is_empty() {
            warn!("Shared link yielded no readable document");
            return Err(RoasterError::ExtractionFailed(
                DRIVE_EXTRACTION_FAILED.to_string(),
            ));
        }
        debug!(chars = text.len(), preview = %preview(&text, PREVIEW_CHARS), "Extracted text");
        Ok(text)
    }

    async fn persist(&self, record: &AnalysisRecord) -> Result<(), RoasterError> {
        match timeout(self.config.store_timeout, self.store.insert_analysis(record)).await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(e)) => {
                warn!(store = self.store.name(), error = %e, "Failed to store analysis");
                Err(RoasterError::from(e))
            }
            Err(_) => {
                warn!(store = self.store.name(), "Store write timed out");
                Err(RoasterError::internal(format!(
                    "store write timed out after {}s",
                    self.config.store_timeout.as_secs()
                )))
            }
        }
    }

    pub async fn record_status(&self, client_name: &str) -> Result<StatusCheck, RoasterError> {
        let check = StatusCheck::new(client_name);
        self.bounded("write", self.store.insert_status(&check)).await?;
        Ok(check)
    }

    /// Status checks in insertion order, capped at [`STATUS_LIST_LIMIT`].
    pub async fn list_status(&self) -> Result<Vec<StatusCheck>, RoasterError> {
        self.bounded("read", self.store.list_status(STATUS_LIST_LIMIT)).await
    }

    async fn bounded<T>(
        &self,
        op: &str,
        fut: impl Future<Output = anyhow::Result<T>>,
    ) -> Result<T, RoasterError> {
        match timeout(self.config.store_timeout, fut).await {
            Ok(result) => Ok(result?),
            Err(_) => {
                warn!(store = self.store.name(), op, "Store call timed out");
                Err(RoasterError::internal(format!(
                    "store {op} timed out after {}s",
                    self.config.store_timeout.as_secs()
                )))
            }
        }
    }

    pub async fn shutdown(&self) -> anyhow::Result<()> {
        info!(store = self.store.name(), "Closing analysis store");
        self.store.close().await
    }
}
