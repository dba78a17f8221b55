use anyhow::Result;
use async_trait::async_trait;

use crate::types::{AnalysisRecord, StatusCheck};

/// Persistence collaborator for analyses and status pings.
///
/// Inserts from concurrent requests must not need any coordination between
/// them; implementations may not hold a process-wide lock across I/O.
#[async_trait]
pub trait AnalysisStore: Send + Sync {
    /// Backend name for logging.
    fn name(&self) -> &str;

    async fn insert_analysis(&self, record: &AnalysisRecord) -> Result<()>;

    /// Most recent analyses first.
    async fn list_analyses(&self, limit: usize) -> Result<Vec<AnalysisRecord>>;

    async fn insert_status(&self, check: &StatusCheck) -> Result<()>;

    /// Status pings in insertion order, at most `limit` of them.
    async fn list_status(&self, limit: usize) -> Result<Vec<StatusCheck>>;

    /// Release the backend. Later calls fail.
    async fn close(&self) -> Result<()>;
}
