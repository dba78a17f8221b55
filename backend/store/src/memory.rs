use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

use anyhow::{anyhow, bail, Result};
use async_trait::async_trait;

use roaster_core::{AnalysisRecord, AnalysisStore, StatusCheck};

/// Process-local store; contents vanish with the process.
#[derive(Default)]
pub struct MemoryStore {
    analyses: RwLock<Vec<AnalysisRecord>>,
    status: RwLock<Vec<StatusCheck>>,
    closed: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn ensure_open(&self) -> Result<()> {
        if self.closed.load(Ordering::SeqCst) {
            bail!("analysis store is closed");
        }
        Ok(())
    }
}

fn poisoned<T>(_: T) -> anyhow::Error {
    anyhow!("memory store lock poisoned")
}

#[async_trait]
impl AnalysisStore for MemoryStore {
    fn name(&self) -> &str {
        "memory"
    }

    async fn insert_analysis(&self, record: &AnalysisRecord) -> Result<()> {
        self.ensure_open()?;
        self.analyses.write().map_err(poisoned)?.push(record.clone());
        Ok(())
    }

    async fn list_analyses(&self, limit: usize) -> Result<Vec<AnalysisRecord>> {
        self.ensure_open()?;
        let mut records = self.analyses.read().map_err(poisoned)?.clone();
        // Ties keep later inserts first.
        records.sort_by_key(|r| r.timestamp);
        records.reverse();
        records.truncate(limit);
        Ok(records)
    }

    async fn insert_status(&self, check: &StatusCheck) -> Result<()> {
        self.ensure_open()?;
        self.status.write().map_err(poisoned)?.push(check.clone());
        Ok(())
    }

    async fn list_status(&self, limit: usize) -> Result<Vec<StatusCheck>> {
        self.ensure_open()?;
        let status = self.status.read().map_err(poisoned)?;
        Ok(status.iter().take(limit).cloned().collect())
    }

    async fn close(&self) -> Result<()> {
        self.closed.store(true, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[tokio::test]
    async fn test_analyses_most_recent_first() {
        let store = MemoryStore::new();
        let mut older = AnalysisRecord::new("a", "r", "v");
        older.timestamp = Utc::now() - chrono::Duration::seconds(30);
        let newer = AnalysisRecord::new("b", "r", "v");
        store.insert_analysis(&newer).await.unwrap();
        store.insert_analysis(&older).await.unwrap();

        let listed = store.list_analyses(10).await.unwrap();
        assert_eq!(listed, vec![newer.clone(), older]);
        assert_eq!(store.list_analyses(1).await.unwrap(), vec![newer]);
    }

    #[tokio::test]
    async fn test_status_keeps_insertion_order() {
        let store = MemoryStore::new();
        for i in 0..5 {
            store
                .insert_status(&StatusCheck::new(format!("client-{i}")))
                .await
                .unwrap();
        }
        let listed = store.list_status(3).await.unwrap();
        assert_eq!(listed.len(), 3);
        assert_eq!(listed[0].client_name, "client-0");
        assert_eq!(listed[2].client_name, "client-2");
    }

    #[tokio::test]
    async fn test_close() {
        let store = MemoryStore::new();
        store.close().await.unwrap();
        assert!(store.insert_status(&StatusCheck::new("x")).await.is_err());
        assert!(store.list_analyses(1).await.is_err());
    }
}
