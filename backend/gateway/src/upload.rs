//! Resume Uploads
//!
//! Accepts a multipart form with an optional `file` part and an optional
//! `gdrive_link` text field and runs one analysis over it.

use axum::{
    extract::{Multipart, State},
    Json,
};
use tracing::{debug, info};

use roaster_core::{AnalysisRequest, AnalysisView, DocumentUpload};

use crate::error::Result;
use crate::server::GatewayState;

const FILE_FIELD: &str = "file";
const LINK_FIELD: &str = "gdrive_link";

/// Handler for `POST /api/upload-resume`
pub async fn upload_resume(
    State(state): State<GatewayState>,
    multipart: Multipart,
) -> Result<Json<AnalysisView>> {
    let request = read_request(multipart).await?;
    info!(
        has_file = request.file.is_some(),
        has_link = request.link().is_some(),
        "Received resume upload"
    );
    let view = state.analyzer.analyze(request).await?;
    Ok(Json(view))
}

async fn read_request(mut multipart: Multipart) -> Result<AnalysisRequest> {
    let mut request = AnalysisRequest::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some(FILE_FIELD) => {
                // Browsers send an empty filename when no file was picked.
                let filename = field
                    .file_name()
                    .map(str::to_string)
                    .filter(|name| !name.is_empty());
                let bytes = field.bytes().await?;
                if let Some(filename) = filename {
                    debug!(%filename, size = bytes.len(), "Read file part");
                    request.file = Some(DocumentUpload::new(filename, bytes));
                }
            }
            Some(LINK_FIELD) => {
                request.link = Some(field.text().await?);
            }
            other => {
                debug!(field = ?other, "Ignoring unknown form field");
            }
        }
    }

    Ok(request)
}
