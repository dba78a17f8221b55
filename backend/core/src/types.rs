use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Upper bound on status pings returned by a single listing.
pub const STATUS_LIST_LIMIT: usize = 1000;

/// A persisted analysis: the extracted resume text plus both commentaries.
///
/// Created once per successful upload and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    pub id: Uuid,
    pub resume_text: String,
    pub roast: String,
    pub review: String,
    pub timestamp: DateTime<Utc>,
}

impl AnalysisRecord {
    pub fn new(
        resume_text: impl Into<String>,
        roast: impl Into<String>,
        review: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            resume_text: resume_text.into(),
            roast: roast.into(),
            review: review.into(),
            timestamp: Utc::now(),
        }
    }
}

/// What callers get back: the record without the (possibly large) resume text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisView {
    pub id: Uuid,
    pub roast: String,
    pub review: String,
    pub timestamp: DateTime<Utc>,
}

impl From<&AnalysisRecord> for AnalysisView {
    fn from(record: &AnalysisRecord) -> Self {
        Self {
            id: record.id,
            roast: record.roast.clone(),
            review: record.review.clone(),
            timestamp: record.timestamp,
        }
    }
}

/// A timestamped client ping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusCheck {
    pub id: Uuid,
    pub client_name: String,
    pub timestamp: DateTime<Utc>,
}

impl StatusCheck {
    pub fn new(client_name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            client_name: client_name.into(),
            timestamp: Utc::now(),
        }
    }
}

/// An uploaded document. The filename is only used for extension sniffing.
#[derive(Debug, Clone)]
pub struct DocumentUpload {
    pub filename: String,
    pub bytes: Bytes,
}

impl DocumentUpload {
    pub fn new(filename: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            filename: filename.into(),
            bytes: bytes.into(),
        }
    }
}

/// Input to a single analysis. When both are set the file wins.
#[derive(Debug, Clone, Default)]
pub struct AnalysisRequest {
    pub file: Option<DocumentUpload>,
    pub link: Option<String>,
}

impl AnalysisRequest {
    pub fn from_file(upload: DocumentUpload) -> Self {
        Self {
            file: Some(upload),
            link: None,
        }
    }

    pub fn from_link(link: impl Into<String>) -> Self {
        Self {
            file: None,
            link: Some(link.into()),
        }
    }

    /// The link, if present and not blank.
    pub fn link(&self) -> Option<&str> {
        self.link
            .as_deref()
            .map(str::trim)
            .filter(|l| !l.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_omits_resume_text() {
        let record = AnalysisRecord::new("Sample Resume\n", "roast", "review");
        let view = AnalysisView::from(&record);
        assert_eq!(view.id, record.id);
        assert_eq!(view.timestamp, record.timestamp);

        let json = serde_json::to_value(&view).unwrap();
        assert!(json.get("resume_text").is_none());
        assert_eq!(json["roast"], "roast");
    }

    #[test]
    fn test_records_get_distinct_ids() {
        let a = AnalysisRecord::new("a", "b", "c");
        let b = AnalysisRecord::new("a", "b", "c");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_blank_link_counts_as_absent() {
        let request = AnalysisRequest::from_link("   ");
        assert!(request.link().is_none());

        let request = AnalysisRequest::from_link(" https://drive.google.com/open?id=abc ");
        assert_eq!(request.link(), Some("https://drive.google.com/open?id=abc"));
    }
}
