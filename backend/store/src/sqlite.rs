use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use anyhow::{anyhow, bail, Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, Connection};
use tracing::{debug, info};
use uuid::Uuid;

use roaster_core::{AnalysisRecord, AnalysisStore, StatusCheck};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// SQLite-backed store for analyses and status pings.
///
/// Every operation opens its own connection on a blocking worker, so
/// concurrent requests only contend inside SQLite itself.
pub struct SqliteStore {
    path: PathBuf,
    closed: AtomicBool,
}

impl SqliteStore {
    /// Open or create the database at the given path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let conn = connect(&path)?;
        init_schema(&conn)?;
        info!(path = %path.display(), "Analysis store opened");

        Ok(Self {
            path,
            closed: AtomicBool::new(false),
        })
    }

    async fn run<T, F>(&self, op: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> Result<T> + Send + 'static,
    {
        if self.closed.load(Ordering::SeqCst) {
            bail!("analysis store is closed");
        }
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || {
            let conn = connect(&path)?;
            op(&conn)
        })
        .await
        .context("Store task failed")?
    }
}

fn connect(path: &Path) -> Result<Connection> {
    let conn = Connection::open(path)
        .with_context(|| format!("Failed to open SQLite database {}", path.display()))?;
    conn.busy_timeout(BUSY_TIMEOUT)?;
    Ok(conn)
}

fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "PRAGMA journal_mode=WAL;
         CREATE TABLE IF NOT EXISTS resume_analyses (
             id          TEXT PRIMARY KEY,
             resume_text TEXT NOT NULL,
             roast       TEXT NOT NULL,
             review      TEXT NOT NULL,
             timestamp   TEXT NOT NULL
         );
         CREATE INDEX IF NOT EXISTS idx_analyses_timestamp ON resume_analyses(timestamp);
         CREATE TABLE IF NOT EXISTS status_checks (
             id          TEXT PRIMARY KEY,
             client_name TEXT NOT NULL,
             timestamp   TEXT NOT NULL
         );",
    )
    .context("Failed to initialize store schema")?;
    Ok(())
}

// Fixed-width so lexical order matches time order.
fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    Ok(DateTime::parse_from_rfc3339(raw)
        .with_context(|| format!("Bad timestamp {raw:?}"))?
        .with_timezone(&Utc))
}

fn parse_id(raw: &str) -> Result<Uuid> {
    Uuid::parse_str(raw).map_err(|e| anyhow!("Bad id {raw:?}: {e}"))
}

#[async_trait]
impl AnalysisStore for SqliteStore {
    fn name(&self) -> &str {
        "sqlite"
    }

    async fn insert_analysis(&self, record: &AnalysisRecord) -> Result<()> {
        let record = record.clone();
        self.run(move |conn| {
            conn.execute(
                "INSERT INTO resume_analyses (id, resume_text, roast, review, timestamp)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    record.id.to_string(),
                    record.resume_text,
                    record.roast,
                    record.review,
                    format_timestamp(&record.timestamp),
                ],
            )?;
            debug!(id = %record.id, "Analysis stored");
            Ok(())
        })
        .await
    }

    async fn list_analyses(&self, limit: usize) -> Result<Vec<AnalysisRecord>> {
        self.run(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, resume_text, roast, review, timestamp
                 FROM resume_analyses ORDER BY timestamp DESC, rowid DESC LIMIT ?1",
            )?;
            let rows = stmt
                .query_map(params![limit as i64], |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                        row.get::<_, String>(3)?,
                        row.get::<_, String>(4)?,
                    ))
                })?
                .collect::<rusqlite::Result<Vec<_>>>()?;

            rows.into_iter()
                .map(|(id, resume_text, roast, review, timestamp)| {
                    Ok(AnalysisRecord {
                        id: parse_id(&id)?,
                        resume_text,
                        roast,
                        review,
                        timestamp: parse_timestamp(&timestamp)?,
                    })
                })
                .collect()
        })
        .await
    }

    async fn insert_status(&self, check: &StatusCheck) -> Result<()> {
        let check = check.clone();
        self.run(move |conn| {
            conn.execute(
                "INSERT INTO status_checks (id, client_name, timestamp) VALUES (?1, ?2, ?3)",
                params![
                    check.id.to_string(),
                    check.client_name,
                    format_timestamp(&check.timestamp),
                ],
            )?;
            Ok(())
        })
        .await
    }

    async fn list_status(&self, limit: usize) -> Result<Vec<StatusCheck>> {
        self.run(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, client_name, timestamp FROM status_checks ORDER BY rowid ASC LIMIT ?1",
            )?;
            let rows = stmt
                .query_map(params![limit as i64], |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                    ))
                })?
                .collect::<rusqlite::Result<Vec<_>>>()?;

            rows.into_iter()
                .map(|(id, client_name, timestamp)| {
                    Ok(StatusCheck {
                        id: parse_id(&id)?,
                        client_name,
                        timestamp: parse_timestamp(&timestamp)?,
                    })
                })
                .collect()
        })
        .await
    }

    async fn close(&self) -> Result<()> {
        if !self.closed.swap(true, Ordering::SeqCst) {
            info!(path = %self.path.display(), "Analysis store closed");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn temp_store() -> (TempDir, SqliteStore) {
        let dir = TempDir::new().unwrap();
        let store = SqliteStore::open(dir.path().join("roaster.db")).unwrap();
        (dir, store)
    }

    #[tokio::test]
    async fn test_insert_and_list_analysis() {
        let (_dir, store) = temp_store();
        let record = AnalysisRecord::new("Sample Resume\n", "roast", "review");
        store.insert_analysis(&record).await.unwrap();

        let listed = store.list_analyses(10).await.unwrap();
        assert_eq!(listed, vec![record]);
    }

    #[tokio::test]
    async fn test_analyses_most_recent_first() {
        let (_dir, store) = temp_store();
        let mut older = AnalysisRecord::new("a", "r", "v");
        older.timestamp = Utc::now() - chrono::Duration::minutes(5);
        let newer = AnalysisRecord::new("b", "r", "v");
        store.insert_analysis(&older).await.unwrap();
        store.insert_analysis(&newer).await.unwrap();

        let listed = store.list_analyses(10).await.unwrap();
        assert_eq!(listed[0].id, newer.id);
        assert_eq!(listed[1].id, older.id);
        assert_eq!(store.list_analyses(1).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_status_insertion_order_and_limit() {
        let (_dir, store) = temp_store();
        for name in ["first", "second", "third"] {
            store.insert_status(&StatusCheck::new(name)).await.unwrap();
        }

        let names: Vec<String> = store
            .list_status(2)
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.client_name)
            .collect();
        assert_eq!(names, vec!["first", "second"]);
    }

    #[tokio::test]
    async fn test_reopen_keeps_data() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("roaster.db");
        let record = AnalysisRecord::new("text", "roast", "review");
        SqliteStore::open(&path)
            .unwrap()
            .insert_analysis(&record)
            .await
            .unwrap();

        let reopened = SqliteStore::open(&path).unwrap();
        assert_eq!(reopened.list_analyses(10).await.unwrap(), vec![record]);
    }

    #[tokio::test]
    async fn test_concurrent_inserts() {
        let (_dir, store) = temp_store();
        let store = std::sync::Arc::new(store);
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move {
                    let record = AnalysisRecord::new(format!("resume {i}"), "r", "v");
                    store.insert_analysis(&record).await
                })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }
        assert_eq!(store.list_analyses(100).await.unwrap().len(), 8);
    }

    #[tokio::test]
    async fn test_closed_store_rejects_operations() {
        let (_dir, store) = temp_store();
        store.close().await.unwrap();
        store.close().await.unwrap();
        let err = store
            .insert_analysis(&AnalysisRecord::new("a", "b", "c"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("closed"));
        assert!(store.list_status(10).await.is_err());
    }
}
